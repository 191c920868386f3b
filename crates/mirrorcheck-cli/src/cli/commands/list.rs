//! List command: show what a mirror list parses to.

use anyhow::Result;
use mirrorcheck_core::mirrors;
use std::path::Path;

/// Print one candidate per line, with its name when the list has one.
pub fn run_list(path: &Path) -> Result<()> {
    let candidates = mirrors::load_candidates(path)?;
    if candidates.is_empty() {
        println!("No mirrors found in {}.", path.display());
        return Ok(());
    }
    for c in &candidates {
        let note = if c.is_supported() { "" } else { "  (unsupported)" };
        match &c.name {
            Some(name) => println!("{}\t{}{}", c.url, name, note),
            None => println!("{}{}", c.url, note),
        }
    }
    Ok(())
}
