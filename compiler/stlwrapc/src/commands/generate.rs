//! `gen` and `print`.

use std::path::Path;

use stlwrap_codegen::InsertionCheck;
use stlwrap_types::{BuiltinSamples, Registry};

use super::{fail, load_config};
use crate::{write_artifacts, ArtifactPaths, Driver, GenConfig, Unit};

/// Command-line overrides for `gen`.
#[derive(Clone, Debug, Default)]
pub struct GenOptions {
    /// Artifact base name, relative to the working directory.
    pub output: Option<String>,
    pub strict: bool,
}

/// Generate the three artifacts of a manifest and write them.
pub fn gen_files(manifest: &str, options: &GenOptions) {
    let mut config = load_config(manifest);
    if options.strict {
        config.insertion_check = InsertionCheck::Strict;
    }
    let paths = match &options.output {
        Some(base) => ArtifactPaths::from_base(
            Path::new(base),
            config.interface.as_deref().map(Path::new),
            config.tests.as_deref().map(Path::new),
        ),
        None => config.artifact_paths(),
    };

    let registry = Registry::builtin();
    let artifacts = match driver(&config, &registry).generate(&config.requests) {
        Ok(artifacts) => artifacts,
        Err(e) => fail(&e),
    };
    if let Err(e) = write_artifacts(&artifacts, &paths) {
        fail(&e);
    }
    for unit in Unit::ALL {
        println!("wrote {}", paths.path(unit).display());
    }
}

/// Print one unit of a manifest to stdout.
pub fn print_unit(manifest: &str, unit: &str) {
    let Some(unit) = Unit::from_name(unit) else {
        eprintln!("error: unknown unit `{unit}` (expected implementation, interface or tests)");
        std::process::exit(1);
    };
    let config = load_config(manifest);
    let registry = Registry::builtin();
    match driver(&config, &registry).generate_unit(&config.requests, unit) {
        Ok(text) => print!("{text}"),
        Err(e) => fail(&e),
    }
}

fn driver<'a>(config: &GenConfig, registry: &'a Registry) -> Driver<'a> {
    let headers = match config.headers() {
        Ok(headers) => headers,
        Err(e) => fail(&e),
    };
    Driver::new(registry, &BuiltinSamples)
        .with_module(config.module.clone())
        .with_options(config.options())
        .with_headers(headers)
}
