//! Connection definition from YAML.

use serde::{Deserialize, Serialize};

/// A connection between two cell ports.
///
/// Ports may be omitted; the source defaults to `out` and the target to `in`:
///
/// ```yaml
/// connections:
///   - from: gen
///     to: incl
///   - from: incl.out
///     to: add.left
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDefinition {
    /// Source cell and optional port (format: "cell" or "cell.port").
    pub from: String,

    /// Target cell and optional port (format: "cell" or "cell.port").
    pub to: String,
}

impl ConnectionDefinition {
    /// Create a new connection definition.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Parse the source into (cell_id, port); port defaults to "out".
    pub fn parse_from(&self) -> (&str, &str) {
        parse_cell_port(&self.from, "out")
    }

    /// Parse the target into (cell_id, port); port defaults to "in".
    pub fn parse_to(&self) -> (&str, &str) {
        parse_cell_port(&self.to, "in")
    }
}

/// Split "cell.port" at the last dot; a bare "cell" gets the default port.
///
/// Cell ids never contain dots, see `PlasmDefinition::validate`.
fn parse_cell_port<'a>(s: &'a str, default_port: &'static str) -> (&'a str, &'a str) {
    if let Some(dot_pos) = s.rfind('.') {
        let port = &s[dot_pos + 1..];
        if !port.is_empty() && port.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return (&s[..dot_pos], port);
        }
    }
    (s, default_port)
}
