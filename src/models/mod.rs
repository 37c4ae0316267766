//! Data models and DTOs (Data Transfer Objects)
//!
//! Mirrors the JSON shapes exchanged with the remote Space Travel API.

pub mod planet;
pub mod spacecraft;

// Re-export commonly used types
pub use planet::*;
pub use spacecraft::*;

use serde::Deserialize;
use std::fmt;

/// Error body returned by the remote service on non-2xx responses
#[derive(Debug, Default, Deserialize)]
pub struct RemoteErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Format an integer with thousands separators ("12,500")
pub fn group_thousands(value: impl fmt::Display) -> String {
    let text = value.to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", text.as_str()),
    };
    let mut grouped = String::with_capacity(text.len() + digits.len() / 3);
    grouped.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
