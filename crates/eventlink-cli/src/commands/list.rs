use std::path::Path;

use anyhow::Result;

/// Execute the `list` command: print each descriptor's diagnostic form.
pub fn execute(path: &Path) -> Result<()> {
    let registry = super::load_registry(path)?;
    for (name, descriptor) in registry.iter() {
        println!("{name}: {descriptor}");
    }
    Ok(())
}
