use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque pagination token issued by the server.
///
/// The client never inspects or builds cursor values; it only echoes them
/// back verbatim on the next paginated request. Servers send either a
/// string or a number; both are kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap a token taken verbatim from a server response.
    pub fn from_server(token: impl Into<String>) -> Self {
        Cursor(token.into())
    }

    /// The value to echo back in the `bookmark` query parameter.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Cursor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Text(text) => Cursor(text),
            Wire::Number(number) => Cursor(number.to_string()),
        })
    }
}
