//! taskdeck serve command implementation.

use crate::error::Result;
use crate::server;

pub async fn run(host: &str, port: u16) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    server::serve(listener).await
}
