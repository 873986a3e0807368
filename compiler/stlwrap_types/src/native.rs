//! Host-language (native) type tags.

/// A native host type a wrapper accepts for conversion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NativeType {
    Str,
    Int,
    Float,
    Complex,
    List,
    Tuple,
    NdArray,
    Set,
    FrozenSet,
    Dict,
}

impl NativeType {
    /// Name of the type in the host language.
    pub fn host_name(self) -> &'static str {
        match self {
            NativeType::Str => "str",
            NativeType::Int => "int",
            NativeType::Float => "float",
            NativeType::Complex => "complex",
            NativeType::List => "list",
            NativeType::Tuple => "tuple",
            NativeType::NdArray => "np.ndarray",
            NativeType::Set => "set",
            NativeType::FrozenSet => "frozenset",
            NativeType::Dict => "dict",
        }
    }
}
