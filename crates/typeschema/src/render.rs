//! Example value rendering

use serde_json::Value;
use typeschema_core::Example;

/// Turns an example into the structured value placed under `x-example`
///
/// Implementations must be pure: rendering never re-enters schema generation.
pub trait ExampleRenderer: Send + Sync {
    fn render(&self, example: &Example) -> Result<Value, String>;
}

/// Renders examples by round-tripping them through JSON text
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Encode a value to JSON text
    pub fn encode_string(&self, value: &Value) -> Result<String, String> {
        serde_json::to_string(value).map_err(|e| e.to_string())
    }

    /// Decode JSON text into a value
    pub fn decode_str(&self, text: &str) -> Result<Value, String> {
        serde_json::from_str(text).map_err(|e| e.to_string())
    }
}

impl ExampleRenderer for JsonRenderer {
    fn render(&self, example: &Example) -> Result<Value, String> {
        match example {
            Example::Value(value) => {
                let text = self.encode_string(value)?;
                self.decode_str(&text)
            }
            Example::Json(text) => self.decode_str(text),
        }
    }
}

#[cfg(test)]
#[path = "render/render_tests.rs"]
mod render_tests;
