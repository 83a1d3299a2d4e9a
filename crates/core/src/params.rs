//! Lenient readers for demo options passed as a JSON object.
//!
//! A missing key, a value of the wrong type, or a number that does not fit
//! the requested width falls back to the caller's default.

use serde_json::Value;

/// Borrowed view over a JSON options object.
#[derive(Debug, Clone, Copy)]
pub struct Params<'a> {
    value: &'a Value,
}

impl<'a> Params<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Reads a number (integer or float) as `f32`.
    pub fn f32_or(&self, name: &str, default: f32) -> f32 {
        self.value
            .get(name)
            .and_then(Value::as_f64)
            .map(|v| v as f32)
            .unwrap_or(default)
    }

    /// Reads a non-negative integer that fits in `u32`.
    pub fn u32_or(&self, name: &str, default: u32) -> u32 {
        self.value
            .get(name)
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(default)
    }

    pub fn str_or(&self, name: &str, default: &str) -> String {
        self.value
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_owned()
    }
}
