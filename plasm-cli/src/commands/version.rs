//! Version command - show version information.

use anyhow::Result;

/// Version information.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the version command.
pub fn run() -> Result<()> {
    println!("Plasm - tick-driven dataflow graphs");
    println!();
    println!("Version:     {}", VERSION);
    println!(
        "Platform:    {} / {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    println!();
    println!("Components:");
    println!("  plasm-core      Values, ports, tendrils, cell traits, errors");
    println!("  plasm-executor  Plasm graph, loader, wave scheduler");
    println!("  plasm-cells     Standard cell library");
    println!("  plasm-cli       Command-line interface");

    Ok(())
}
