//! Type descriptors as written in requests.
//!
//! A descriptor is either a bare token (`int`, `unsigned int`, `std::string`)
//! or a head applied to arguments (`map<str, vector<double>>`). Descriptors
//! are not yet resolved; see [`crate::Registry::canonicalize`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DescriptorError;

/// Deepest container nesting a descriptor may have.
pub const MAX_NESTING: usize = 64;

/// An unresolved type descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeDescriptor {
    Token(String),
    Applied {
        head: String,
        args: Vec<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    pub fn token(token: impl Into<String>) -> Self {
        TypeDescriptor::Token(token.into())
    }

    pub fn applied(head: impl Into<String>, args: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Applied {
            head: head.into(),
            args,
        }
    }

    /// Parse descriptor text such as `map<str, vector<float64>>`.
    pub fn parse(text: &str) -> Result<Self, DescriptorError> {
        let mut parser = Parser {
            text,
            pos: 0,
            depth: 0,
        };
        let desc = parser.descriptor()?;
        parser.skip_ws();
        if parser.pos < text.len() {
            return Err(parser.malformed("unexpected trailing input"));
        }
        Ok(desc)
    }
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn malformed(&self, reason: &'static str) -> DescriptorError {
        DescriptorError::Malformed {
            text: self.text.to_string(),
            reason,
        }
    }

    fn descriptor(&mut self) -> Result<TypeDescriptor, DescriptorError> {
        let head = self.token()?;
        self.skip_ws();
        if self.peek() != Some('<') {
            return Ok(TypeDescriptor::Token(head));
        }
        self.bump();
        if self.depth == MAX_NESTING {
            return Err(self.malformed("nesting too deep"));
        }
        self.depth += 1;
        let args = self.arguments()?;
        self.depth -= 1;
        Ok(TypeDescriptor::Applied { head, args })
    }

    fn arguments(&mut self) -> Result<Vec<TypeDescriptor>, DescriptorError> {
        let mut args = vec![self.descriptor()?];
        loop {
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.bump();
                    args.push(self.descriptor()?);
                }
                Some('>') => {
                    self.bump();
                    return Ok(args);
                }
                _ => return Err(self.malformed("expected `,` or `>`")),
            }
        }
    }

    /// A token runs up to the next delimiter; inner whitespace collapses to
    /// one space so `unsigned   int` and `unsigned int` are the same token.
    fn token(&mut self) -> Result<String, DescriptorError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| !matches!(c, '<' | ',' | '>')) {
            self.bump();
        }
        let raw = &self.text[start..self.pos];
        let token = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if token.is_empty() {
            return Err(self.malformed("expected a type name"));
        }
        Ok(token)
    }
}

impl FromStr for TypeDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeDescriptor::parse(s)
    }
}

impl TryFrom<String> for TypeDescriptor {
    type Error = DescriptorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        TypeDescriptor::parse(&s)
    }
}

impl From<TypeDescriptor> for String {
    fn from(desc: TypeDescriptor) -> Self {
        desc.to_string()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Token(token) => f.write_str(token),
            TypeDescriptor::Applied { head, args } => {
                write!(f, "{head}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
        }
    }
}

#[cfg(test)]
mod tests;
