//! Client-side form constraints.
//!
//! These rules are enforced before a store call is made; the server never
//! re-validates. They mirror what the forms declare: title length, due date
//! not in the past, name length, email shape, age range.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Error, Result};

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

fn invalid(field: &str, message: &str) -> Error {
    Error::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Title must be at least 3 characters after trimming.
pub fn title(value: &str) -> Result<()> {
    if value.trim().chars().count() < 3 {
        return Err(invalid("title", "must be at least 3 characters"));
    }
    Ok(())
}

/// Due date may not lie in the past; due today is allowed.
pub fn due_date(value: NaiveDate, today: NaiveDate) -> Result<()> {
    if value < today {
        return Err(invalid("dueDate", "cannot be in the past"));
    }
    Ok(())
}

/// Name must be at least 2 characters after trimming.
pub fn name(value: &str) -> Result<()> {
    if value.trim().chars().count() < 2 {
        return Err(invalid("name", "must be at least 2 characters"));
    }
    Ok(())
}

/// Email must look like an address: local part, `@`, domain with a dot.
pub fn email(value: &str) -> Result<()> {
    if !email_regex().is_match(value) {
        return Err(invalid("email", "is not a valid email address"));
    }
    Ok(())
}

/// Age must fall in 1..=120.
pub fn age(value: u8) -> Result<()> {
    if !(1..=120).contains(&value) {
        return Err(invalid("age", "must be between 1 and 120"));
    }
    Ok(())
}
