//! Viz command - render a plasm as Graphviz DOT.

use anyhow::{Context, Result};
use plasm_cells::standard_registry;
use plasm_executor::loader::PlasmLoader;
use plasm_executor::scheduler::Plasm;
use std::path::Path;

/// Run the viz command.
pub fn run(file: &Path, output: Option<&Path>) -> Result<()> {
    let loaded = PlasmLoader::new(standard_registry())
        .load_file(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    match output {
        Some(path) => {
            write_dot(&loaded.plasm, path)?;
            println!("Wrote {} to {}", loaded.name(), path.display());
        }
        None => print!("{}", loaded.plasm.viz()),
    }
    Ok(())
}

/// Write the DOT rendering of `plasm` to `path`.
pub fn write_dot(plasm: &Plasm, path: &Path) -> Result<()> {
    std::fs::write(path, plasm.viz())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), cells = plasm.cell_count(), "Wrote DOT graph");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIR: &str = r#"
cells:
  - id: gen
    type: Generate
  - id: twice
    type: Multiply
    config:
      factor: 2.0
connections:
  - from: gen
    to: twice
"#;

    #[test]
    fn writes_dot_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pair.yaml");
        let output = dir.path().join("pair.dot");
        std::fs::write(&input, PAIR).unwrap();

        run(&input, Some(&output)).unwrap();

        let dot = std::fs::read_to_string(&output).unwrap();
        assert!(dot.starts_with("digraph plasm {"));
        assert!(dot.contains("c0 [label=\"gen\\n(Generate)\"];"));
        assert!(dot.contains("c1 [label=\"twice\\n(Multiply)\"];"));
        assert!(dot.contains("c0 -> c1 [label=\"out -> in\"];"));
    }

    #[test]
    fn unwritable_output_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pair.yaml");
        std::fs::write(&input, PAIR).unwrap();
        let output = dir.path().join("missing").join("pair.dot");

        assert!(run(&input, Some(&output)).is_err());
    }
}
