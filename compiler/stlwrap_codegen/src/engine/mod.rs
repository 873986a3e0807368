//! Container Instantiation Engine
//!
//! Turns one canonical instantiation (set, map, or their free converter
//! functions) into three fragments: implementation, interface and tests.
//!
//! # Architecture
//!
//! ```text
//! CanonicalType(s)
//!        ↓  names::{SetNames, MapNames, ConverterNames}
//!   deterministic names
//!        ↓  Composer, once per element slot
//!   conversion triples (decls hoisted to method top)
//!        ↓
//!   Instantiation { implementation, interface, tests }
//! ```
//!
//! Each method is assembled as `decl ++ statements`: every typed
//! declaration any conversion needs comes first, then the logic.

mod convert;
mod iter;
mod map;
mod names;
mod set;

pub use names::{ConverterNames, MapNames, SetNames};

use stlwrap_ir::{BinaryOp, Expr, Fragment, Function, Literal, Param, Stmt};
use stlwrap_types::{
    CanonicalType, Comparison, DescriptorError, Primitive, Registry, TestValues,
};

use crate::{CodegenOptions, Composer, InsertionCheck};

/// The generated fragments for one instantiation request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Instantiation {
    pub implementation: Fragment,
    pub interface: Fragment,
    pub tests: Fragment,
}

/// Generates wrapper families from canonical element types.
///
/// Holds only read-only collaborators; instantiations share no state.
#[derive(Clone, Copy)]
pub struct InstantiationEngine<'a> {
    composer: Composer<'a>,
    samples: &'a dyn TestValues,
    options: CodegenOptions,
}

impl<'a> InstantiationEngine<'a> {
    pub fn new(registry: &'a Registry, samples: &'a dyn TestValues) -> Self {
        Self {
            composer: Composer::new(registry),
            samples,
            options: CodegenOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: CodegenOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &'a Registry {
        self.composer.registry()
    }

    /// `isinstance(subject, <accepted native types of ty>)`.
    fn type_check(&self, subject: Expr, ty: &CanonicalType) -> Result<Expr, DescriptorError> {
        let accepted = self.registry().accepted_native_types(ty)?;
        Ok(subject.is_instance(
            accepted
                .into_iter()
                .map(|t| t.host_name().to_string())
                .collect(),
        ))
    }

    /// Pre-insertion type check, present only under strict checking.
    fn insertion_guard(
        &self,
        subject: &Expr,
        ty: &CanonicalType,
        role: &str,
    ) -> Result<Vec<Stmt>, DescriptorError> {
        match self.options.insertion_check {
            InsertionCheck::Permissive => Ok(Vec::new()),
            InsertionCheck::Strict => {
                let human = self.registry().human_name(ty)?;
                Ok(vec![Stmt::when(
                    self.type_check(subject.clone(), ty)?.negate(),
                    vec![type_error(&human, role)],
                )])
            }
        }
    }

    /// The assertion generated tests use to compare values of `ty`.
    fn assert_same(&self, ty: &CanonicalType, actual: Expr, expected: &Literal) -> Stmt {
        let func = match self.samples.comparison(ty) {
            Comparison::Equal => "assert_equal",
            Comparison::Almost => "assert_almost_equal",
            Comparison::ArrayAlmost => "assert_array_almost_equal",
        };
        call_stmt(func, vec![actual, Expr::lit(expected.clone())])
    }
}

fn this() -> Expr {
    Expr::name("self")
}

fn self_param() -> Param {
    Param::new("self")
}

/// A `def` method whose body is `decl` followed by `stmts`.
fn method(name: &str, params: Vec<Param>, decl: Vec<Stmt>, stmts: Vec<Stmt>) -> Function {
    let mut body = decl;
    body.extend(stmts);
    Function::def(name, params, body)
}

fn call_stmt(func: &str, args: Vec<Expr>) -> Stmt {
    Stmt::Expr(Expr::name(func).call(args))
}

/// `raise TypeError("Only <human> <role> are valid.")`
fn type_error(human: &str, role: &str) -> Stmt {
    Stmt::Raise(
        Expr::name("TypeError").call(vec![Expr::lit(format!("Only {human} {role} are valid."))]),
    )
}

/// Guard an element conversion: an integer outside the storage range runs
/// `fallback` instead of raising `OverflowError`. Other types convert as is.
fn range_guarded(ty: &CanonicalType, convert: Vec<Stmt>, fallback: Vec<Stmt>) -> Vec<Stmt> {
    if ty.as_primitive().is_some_and(Primitive::is_integer) {
        vec![Stmt::try_except(convert, "OverflowError", fallback)]
    } else {
        convert
    }
}

/// `0 < container.count(key)`
fn count_positive(container: Expr, key: Expr) -> Expr {
    Expr::lit(0_i64).binary(BinaryOp::Lt, container.method("count", vec![key]))
}

/// `hasattr(x, "__iter__") or hasattr(x, "__len__") and hasattr(x, "__getitem__")`
fn is_iterable(subject: &Expr) -> Expr {
    subject.clone().has_attr("__iter__").binary(
        BinaryOp::Or,
        subject
            .clone()
            .has_attr("__len__")
            .binary(BinaryOp::And, subject.clone().has_attr("__getitem__")),
    )
}

/// Nose-style exhaustion checks: `it` yields `len` items, then signals the
/// end twice.
fn exhaustion_checks(container: &str, len: i64) -> Vec<Stmt> {
    let it = Expr::name("it");
    let next_raises = || {
        call_stmt(
            "assert_raises",
            vec![Expr::name("StopIteration"), Expr::name("next"), it.clone()],
        )
    };
    vec![
        Stmt::assign(it.clone(), Expr::name("iter").call(vec![Expr::name(container)])),
        call_stmt(
            "assert_equal",
            vec![
                Expr::name("len").call(vec![Expr::name("list").call(vec![it.clone()])]),
                Expr::lit(len),
            ],
        ),
        next_raises(),
        next_raises(),
    ]
}

/// `assert_equal(len(name), n)`
fn assert_len(name: &str, n: i64) -> Stmt {
    call_stmt(
        "assert_equal",
        vec![Expr::name("len").call(vec![Expr::name(name)]), Expr::lit(n)],
    )
}

/// Sample `i` of `samples`, wrapping around short lists.
fn sample(samples: &[Literal], i: usize) -> Literal {
    match samples {
        [] => Literal::None,
        _ => samples[i % samples.len()].clone(),
    }
}
