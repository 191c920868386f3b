//! Config command: where the file lives and what is in effect.

use anyhow::Result;
use mirrorcheck_core::config::{self, MirrorCheckConfig};

pub fn run_config(cfg: &MirrorCheckConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
