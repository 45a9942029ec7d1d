#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;

use taskdeck::cache::MirrorCache;
use taskdeck::client::ApiClient;
use taskdeck::server::{router, AppState};
use taskdeck::store::{TaskStore, UserStore};

/// An in-process API server bound to an ephemeral port.
pub struct TestServer {
    addr: SocketAddr,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Spawn the server on the current runtime.
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener addr");
        let app = router(AppState::new());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url())
    }

    pub fn task_store(&self, cache_dir: &Path) -> TaskStore {
        TaskStore::new(self.client(), MirrorCache::new(cache_dir.to_path_buf()))
    }

    pub fn user_store(&self, cache_dir: &Path) -> UserStore {
        UserStore::new(self.client(), MirrorCache::new(cache_dir.to_path_buf()))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn a server on a dedicated thread with its own runtime, for tests
/// that drive the compiled binary. The thread is detached; it dies with
/// the test process.
pub fn spawn_server_thread() -> String {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("runtime");
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind test listener");
            let addr = listener.local_addr().expect("listener addr");
            tx.send(addr).expect("report addr");
            axum::serve(listener, router(AppState::new()))
                .await
                .expect("serve");
        });
    });
    let addr = rx.recv().expect("server addr");
    format!("http://{addr}")
}
