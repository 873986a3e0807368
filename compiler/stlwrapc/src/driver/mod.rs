//! Emission Driver
//!
//! Runs a batch of requests through the instantiation engine and assembles
//! the three text units.
//!
//! # Architecture
//!
//! ```text
//! [RawRequest]
//!      ↓  Request::resolve     (every request, before any composition)
//! [Request]
//!      ↓  Request::instantiate (dispatch on shape)
//! [Instantiation]
//!      ↓  Backend::render_fragment, one unit at a time
//! header ++ fragment₁ ++ "\n\n" ++ fragment₂ ++ "\n\n" ++ …
//! ```
//!
//! Request order is preserved in every unit so output diffs stay stable.
//! Any error aborts the whole batch.

use std::fmt;

use stlwrap_codegen::{Backend, CodegenOptions, CythonBackend, Instantiation, InstantiationEngine};
use stlwrap_ir::Fragment;
use stlwrap_types::{Registry, TestValues};

use crate::{headers, GenerateError, RawRequest, Request};

const SEPARATOR: &str = "\n\n";

/// One of the three generated text units.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    Implementation,
    Interface,
    Tests,
}

impl Unit {
    pub const ALL: [Unit; 3] = [Unit::Implementation, Unit::Interface, Unit::Tests];

    pub fn name(self) -> &'static str {
        match self {
            Unit::Implementation => "implementation",
            Unit::Interface => "interface",
            Unit::Tests => "tests",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| unit.name() == name)
    }

    fn fragment(self, instantiation: &Instantiation) -> &Fragment {
        match self {
            Unit::Implementation => &instantiation.implementation,
            Unit::Interface => &instantiation.interface,
            Unit::Tests => &instantiation.tests,
        }
    }

    fn default_header(self, module: &str) -> String {
        match self {
            Unit::Implementation => headers::implementation(module),
            Unit::Interface => headers::interface(module),
            Unit::Tests => headers::tests(module),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Header overrides. A unit without one gets the default header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Headers {
    pub implementation: Option<String>,
    pub interface: Option<String>,
    pub tests: Option<String>,
}

impl Headers {
    pub fn get(&self, unit: Unit) -> Option<&str> {
        match unit {
            Unit::Implementation => self.implementation.as_deref(),
            Unit::Interface => self.interface.as_deref(),
            Unit::Tests => self.tests.as_deref(),
        }
    }

    #[must_use]
    pub fn with(mut self, unit: Unit, header: impl Into<String>) -> Self {
        let slot = match unit {
            Unit::Implementation => &mut self.implementation,
            Unit::Interface => &mut self.interface,
            Unit::Tests => &mut self.tests,
        };
        *slot = Some(header.into());
        self
    }
}

/// The three assembled units of a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifacts {
    pub implementation: String,
    pub interface: String,
    pub tests: String,
}

impl Artifacts {
    pub fn unit(&self, unit: Unit) -> &str {
        match unit {
            Unit::Implementation => &self.implementation,
            Unit::Interface => &self.interface,
            Unit::Tests => &self.tests,
        }
    }
}

/// Generates artifacts for batches of requests.
pub struct Driver<'a, B: Backend = CythonBackend> {
    engine: InstantiationEngine<'a>,
    backend: B,
    module: String,
    headers: Headers,
}

impl<'a> Driver<'a> {
    pub fn new(registry: &'a Registry, samples: &'a dyn TestValues) -> Self {
        Driver::with_backend(registry, samples, CythonBackend::new())
    }
}

impl<'a, B: Backend> Driver<'a, B> {
    pub fn with_backend(registry: &'a Registry, samples: &'a dyn TestValues, backend: B) -> Self {
        Self {
            engine: InstantiationEngine::new(registry, samples),
            backend,
            module: crate::DEFAULT_MODULE.to_string(),
            headers: Headers::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: CodegenOptions) -> Self {
        self.engine = self.engine.with_options(options);
        self
    }

    /// Module name used by the default headers.
    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Resolve every request. Fails on the first bad one.
    pub fn resolve(&self, requests: &[RawRequest]) -> Result<Vec<Request>, GenerateError> {
        let registry = self.engine.registry();
        requests
            .iter()
            .map(|raw| Request::resolve(raw, registry))
            .collect()
    }

    /// Generate all three units.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(requests = requests.len(), module = %self.module)
    )]
    pub fn generate(&self, requests: &[RawRequest]) -> Result<Artifacts, GenerateError> {
        let instantiations = self.instantiate_all(requests)?;
        Ok(Artifacts {
            implementation: self.assemble(Unit::Implementation, &instantiations),
            interface: self.assemble(Unit::Interface, &instantiations),
            tests: self.assemble(Unit::Tests, &instantiations),
        })
    }

    /// Generate a single unit.
    #[tracing::instrument(level = "debug", skip_all, fields(requests = requests.len(), %unit))]
    pub fn generate_unit(
        &self,
        requests: &[RawRequest],
        unit: Unit,
    ) -> Result<String, GenerateError> {
        let instantiations = self.instantiate_all(requests)?;
        Ok(self.assemble(unit, &instantiations))
    }

    fn instantiate_all(
        &self,
        requests: &[RawRequest],
    ) -> Result<Vec<Instantiation>, GenerateError> {
        let resolved = self.resolve(requests)?;
        resolved
            .iter()
            .map(|request| {
                tracing::debug!(shape = %request.shape(), "instantiate");
                request.instantiate(&self.engine)
            })
            .collect()
    }

    fn assemble(&self, unit: Unit, instantiations: &[Instantiation]) -> String {
        let mut out = match self.headers.get(unit) {
            Some(header) => header.to_string(),
            None => unit.default_header(&self.module),
        };
        for instantiation in instantiations {
            out.push_str(&self.backend.render_fragment(unit.fragment(instantiation)));
            out.push_str(SEPARATOR);
        }
        out
    }
}
