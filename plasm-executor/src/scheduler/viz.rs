//! Graphviz DOT rendering of a plasm.

use super::graph::Plasm;
use std::fmt::Write;

impl Plasm {
    /// Render the topology as Graphviz DOT.
    ///
    /// Emits one line per cell and one per connection. Node identifiers are
    /// `c<registration index>`, so repeated calls produce identical text.
    pub fn viz(&self) -> String {
        let mut dot = String::from("digraph plasm {\n");
        dot.push_str("  rankdir=TB;\n");
        dot.push_str("  node [shape=box];\n");

        for slot in self.slots() {
            let _ = writeln!(
                dot,
                "  c{} [label=\"{}\\n({})\"];",
                slot.id.index(),
                escape(&slot.name),
                escape(&slot.info.type_name)
            );
        }

        for conn in self.connections() {
            let _ = writeln!(
                dot,
                "  c{} -> c{} [label=\"{} -> {}\"];",
                conn.from_cell.index(),
                conn.to_cell.index(),
                escape(&conn.from_port),
                escape(&conn.to_port)
            );
        }

        dot.push_str("}\n");
        dot
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
