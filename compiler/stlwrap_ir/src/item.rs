//! Top-level items: functions, classes and the fragments that group them.

use crate::{Expr, Stmt};

/// A function or method parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    /// Empty for type-only parameters in interface declarations.
    pub name: String,
    pub ty: Option<String>,
    pub default: Option<Expr>,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            default: None,
        }
    }

    pub fn typed(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty.into()),
            default: None,
        }
    }

    /// A parameter that only carries its type (`cdef void init(T, U *)`).
    pub fn anonymous(ty: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            ty: Some(ty.into()),
            default: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: Expr) -> Self {
        self.default = Some(default);
        self
    }
}

/// How a function is exposed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    /// Host-visible function (`def`).
    Def,
    /// Storage-level function callable only from generated code (`cdef`).
    Cdef,
}

/// A function, method, or (when `body` is `None`) a bare declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub kind: FunctionKind,
    pub name: String,
    pub params: Vec<Param>,
    pub returns: Option<String>,
    pub doc: Option<String>,
    pub body: Option<Vec<Stmt>>,
}

impl Function {
    pub fn def(name: impl Into<String>, params: Vec<Param>, body: Vec<Stmt>) -> Self {
        Self {
            kind: FunctionKind::Def,
            name: name.into(),
            params,
            returns: None,
            doc: None,
            body: Some(body),
        }
    }

    pub fn cdef(
        returns: impl Into<String>,
        name: impl Into<String>,
        params: Vec<Param>,
        body: Vec<Stmt>,
    ) -> Self {
        Self {
            kind: FunctionKind::Cdef,
            name: name.into(),
            params,
            returns: Some(returns.into()),
            doc: None,
            body: Some(body),
        }
    }

    /// Signature only, with the body dropped.
    #[must_use]
    pub fn declaration(&self) -> Self {
        Self {
            body: None,
            doc: None,
            ..self.clone()
        }
    }

    pub fn is_declaration(&self) -> bool {
        self.body.is_none()
    }
}

/// Class flavour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// Extension type with storage fields (`cdef class`).
    Extension,
    /// Ordinary host-language class.
    Host,
}

/// A typed storage field of an extension class.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    pub ty: String,
    pub name: String,
    pub public: bool,
}

impl Field {
    pub fn private(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            public: false,
        }
    }

    pub fn public(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            public: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Class {
    pub kind: ClassKind,
    pub name: String,
    pub bases: Vec<String>,
    pub doc: Option<String>,
    pub fields: Vec<Field>,
    pub methods: Vec<Function>,
}

impl Class {
    pub fn new(kind: ClassKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            bases: Vec::new(),
            doc: None,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_bases(mut self, bases: &[&str]) -> Self {
        self.bases = bases.iter().map(|b| (*b).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: Function) -> Self {
        self.methods.push(method);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    Comment(String),
    Class(Class),
    Function(Function),
}

/// The generated code for one instantiation in one output unit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fragment {
    pub items: Vec<Item>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
