//! Primitive element types.

/// A primitive element type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Str,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    Complex128,
}

impl Primitive {
    /// Every primitive, in registry order.
    pub const ALL: [Primitive; 8] = [
        Primitive::Str,
        Primitive::Int32,
        Primitive::UInt32,
        Primitive::Int64,
        Primitive::UInt64,
        Primitive::Float32,
        Primitive::Float64,
        Primitive::Complex128,
    ];

    /// The canonical token, as written in canonical descriptors.
    pub fn token(self) -> &'static str {
        match self {
            Primitive::Str => "str",
            Primitive::Int32 => "int32",
            Primitive::UInt32 => "uint32",
            Primitive::Int64 => "int64",
            Primitive::UInt64 => "uint64",
            Primitive::Float32 => "float32",
            Primitive::Float64 => "float64",
            Primitive::Complex128 => "complex128",
        }
    }

    /// Whether storage is a fixed-width integer, so conversion can overflow.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Primitive::Int32 | Primitive::UInt32 | Primitive::Int64 | Primitive::UInt64
        )
    }

    /// Whether values have a total order usable by set elements and map keys.
    pub fn is_ordered(self) -> bool {
        !matches!(self, Primitive::Complex128)
    }
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}
