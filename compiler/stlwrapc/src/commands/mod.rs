//! Command handlers for the `stlwrap` CLI.
//!
//! Handlers report failures on stderr and exit with status 1.

mod generate;
mod types;

pub use generate::{gen_files, print_unit, GenOptions};
pub use types::list_types;

use std::path::Path;

use crate::GenConfig;

/// Load a manifest or exit.
fn load_config(path: &str) -> GenConfig {
    match GenConfig::load(Path::new(path)) {
        Ok(config) => config,
        Err(e) => fail(&e),
    }
}

fn fail(error: &dyn std::error::Error) -> ! {
    eprintln!("error: {error}");
    std::process::exit(1);
}
