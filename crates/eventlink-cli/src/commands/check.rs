use std::path::Path;

use anyhow::Result;
use eventlink_types::DispatchTarget;

/// Execute the `check` command: validate the file and report each binding.
pub fn execute(path: &Path) -> Result<()> {
    let registry = super::load_registry(path)?;
    println!("Connector file:    OK ({} connectors)", registry.len());

    for (name, descriptor) in registry.iter() {
        let target = match descriptor.dispatch_target() {
            DispatchTarget::Local(p) => format!("local {p}"),
            DispatchTarget::Remote(url) => format!("remote {url}"),
            DispatchTarget::None => "none".to_string(),
        };
        println!(
            "{:18} topic={} dispatch={}",
            format!("{name}:"),
            descriptor.topic(),
            target
        );
        for advisory in descriptor.advisories() {
            println!("  WARNING: {advisory}");
        }
    }

    let warnings = registry.advisories().len();
    if warnings == 0 {
        println!("\nAll checks passed.");
    } else {
        println!("\nAll checks passed with {warnings} warning(s).");
    }
    Ok(())
}
