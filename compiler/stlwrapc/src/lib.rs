//! Container Wrapper Generator Driver
//!
//! Library side of the `stlwrap` binary: request parsing and dispatch, the
//! Emission Driver, manifests, default headers and artifact emission.
//!
//! # Architecture
//!
//! ```text
//! manifest.json ── GenConfig::load
//!        ↓ requests, options, headers
//! Driver::generate ── Request::resolve ── InstantiationEngine (stlwrap_codegen)
//!        ↓
//! Artifacts { implementation, interface, tests }
//!        ↓
//! write_artifacts(ArtifactPaths)   → <base>.pyx, <base>.pxd, test_<base>.py
//! ```

use std::sync::Once;

pub mod commands;
mod config;
mod driver;
mod emit;
mod error;
pub mod headers;
mod request;

pub use config::{GenConfig, HeaderPaths};
pub use driver::{Artifacts, Driver, Headers, Unit};
pub use emit::{write_artifacts, ArtifactPaths};
pub use error::{ConfigError, EmitError, GenerateError};
pub use request::{RawRequest, Request, Shape};

/// Module and artifact base name used when a manifest names none.
pub const DEFAULT_MODULE: &str = "stlconverters";

static TRACING_INIT: Once = Once::new();

/// Install the `RUST_LOG`-driven subscriber. Safe to call repeatedly.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
