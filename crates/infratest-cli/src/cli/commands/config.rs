//! Config command: show where configuration comes from and what it resolves to.

use anyhow::Result;
use infratest_core::config::{self, InfratestConfig};
use std::path::Path;

pub fn run_config(cfg: &InfratestConfig, explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
