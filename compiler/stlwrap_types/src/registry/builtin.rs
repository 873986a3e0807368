//! Built-in element types for the Cython/C++ target.

use stlwrap_ir::{ConversionTemplate, Expr, Stmt};

use super::{PrimitiveEntry, Registry};
use crate::{NativeType, Primitive};

/// `<ty> value`
fn cast(ty: &str) -> ConversionTemplate {
    ConversionTemplate::expr(Expr::cast(ty, Expr::Hole))
}

/// `func(value)`
fn wrap(func: &str) -> ConversionTemplate {
    ConversionTemplate::expr(Expr::name(func).call(vec![Expr::Hole]))
}

fn str_to_storage() -> ConversionTemplate {
    ConversionTemplate::new(
        vec![Stmt::decl("bytes", Expr::scratch("bytes"))],
        vec![Stmt::assign(
            Expr::scratch("bytes"),
            Expr::Hole.method("encode", vec![]),
        )],
        Expr::construct("std_string", vec![Expr::cast("char *", Expr::scratch("bytes"))]),
    )
}

fn str_to_native() -> ConversionTemplate {
    ConversionTemplate::expr(
        Expr::name("bytes")
            .call(vec![Expr::cast("char *", Expr::Hole.method("c_str", vec![]))])
            .method("decode", vec![]),
    )
}

fn complex_to_storage() -> ConversionTemplate {
    ConversionTemplate::new(
        vec![Stmt::decl(
            "xdress_extra_types.complex_t",
            Expr::scratch("proxy"),
        )],
        vec![
            Stmt::assign(Expr::scratch("proxy").attr("re"), Expr::Hole.attr("real")),
            Stmt::assign(Expr::scratch("proxy").attr("im"), Expr::Hole.attr("imag")),
        ],
        Expr::scratch("proxy"),
    )
}

fn complex_to_native() -> ConversionTemplate {
    let float = |field: &str| Expr::name("float").call(vec![Expr::Hole.attr(field)]);
    ConversionTemplate::expr(Expr::name("complex").call(vec![float("re"), float("im")]))
}

struct Spec {
    primitive: Primitive,
    aliases: &'static [&'static str],
    human: &'static str,
    class: &'static str,
    func: &'static str,
    storage: &'static str,
    accepts: &'static [NativeType],
}

const INTEGRAL: &[NativeType] = &[NativeType::Int];
const REAL: &[NativeType] = &[NativeType::Float, NativeType::Int];

const SPECS: &[Spec] = &[
    Spec {
        primitive: Primitive::Str,
        aliases: &["string", "std::string"],
        human: "str",
        class: "Str",
        func: "str",
        storage: "std_string",
        accepts: &[NativeType::Str],
    },
    Spec {
        primitive: Primitive::Int32,
        aliases: &["int", "i32"],
        human: "int",
        class: "Int",
        func: "int",
        storage: "int",
        accepts: INTEGRAL,
    },
    Spec {
        primitive: Primitive::UInt32,
        aliases: &["uint", "unsigned int", "u32"],
        human: "unsigned int",
        class: "UInt",
        func: "uint",
        storage: "unsigned int",
        accepts: INTEGRAL,
    },
    Spec {
        primitive: Primitive::Int64,
        aliases: &["long", "i64"],
        human: "long",
        class: "Long",
        func: "long",
        storage: "long long",
        accepts: INTEGRAL,
    },
    Spec {
        primitive: Primitive::UInt64,
        aliases: &["ulong", "u64"],
        human: "unsigned long",
        class: "ULong",
        func: "ulong",
        storage: "unsigned long long",
        accepts: INTEGRAL,
    },
    Spec {
        primitive: Primitive::Float32,
        aliases: &["float", "f32"],
        human: "float",
        class: "Float",
        func: "flt",
        storage: "float",
        accepts: REAL,
    },
    Spec {
        primitive: Primitive::Float64,
        aliases: &["double", "f64"],
        human: "double",
        class: "Double",
        func: "dbl",
        storage: "double",
        accepts: REAL,
    },
    Spec {
        primitive: Primitive::Complex128,
        aliases: &["complex"],
        human: "complex",
        class: "Complex",
        func: "cmplx",
        storage: "xdress_extra_types.complex_t",
        accepts: &[NativeType::Complex, NativeType::Float, NativeType::Int],
    },
];

impl Registry {
    /// The registry for the Cython/C++ standard library target.
    pub fn builtin() -> Self {
        let mut registry = Registry::new();
        for spec in SPECS {
            let (to_storage, to_native) = match spec.primitive {
                Primitive::Str => (str_to_storage(), str_to_native()),
                Primitive::Complex128 => (complex_to_storage(), complex_to_native()),
                Primitive::Float32 | Primitive::Float64 => (cast(spec.storage), wrap("float")),
                Primitive::Int32 | Primitive::UInt32 | Primitive::Int64 | Primitive::UInt64 => {
                    (cast(spec.storage), wrap("int"))
                }
            };
            registry.register(
                spec.primitive,
                spec.aliases,
                PrimitiveEntry {
                    human_name: spec.human.to_string(),
                    class_fragment: spec.class.to_string(),
                    func_fragment: spec.func.to_string(),
                    storage_type: spec.storage.to_string(),
                    accepts: spec.accepts.to_vec(),
                    to_storage,
                    to_native,
                },
            );
        }
        tracing::debug!(count = SPECS.len(), "registered builtin element types");
        registry
    }
}
