//! Log message bodies
//!
//! A message is either plain text or a structured value. Structured values are
//! rendered as an indented multi-line dump, or on one line when collapsing is
//! enabled in the configuration.

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Body of a single log call
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Plain text, logged as-is
    Text(String),
    /// Structured value with pretty and compact renderings
    Structured(Value),
}

impl Message {
    /// Build a structured message from any serializable value
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Message::Structured(serde_json::to_value(value)?))
    }

    /// Render the body that replaces `%M%`
    pub fn render(&self, collapse: bool) -> Result<String> {
        match self {
            Message::Text(text) => Ok(text.clone()),
            Message::Structured(value) => {
                let dump = if collapse {
                    serde_json::to_string(value)?
                } else {
                    serde_json::to_string_pretty(value)?
                };
                Ok(trim_line_break(dump))
            }
        }
    }
}

/// Drop a single trailing line break
fn trim_line_break(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

impl From<&String> for Message {
    fn from(text: &String) -> Self {
        Message::Text(text.clone())
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        Message::Structured(value)
    }
}
