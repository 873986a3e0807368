//! Cython back-end.
//!
//! Renders fragments as `.pyx` / `.pxd` / test-module text. Whether a class
//! renders as an implementation or an interface follows from its content:
//! fields render as `cdef` attributes and body-less functions as bare
//! declarations.
//!
//! # Layout
//!
//! - Top-level items are separated by one blank line, except after a
//!   comment and between consecutive declarations
//! - Methods with bodies are separated by one blank line
//! - Empty blocks render as `pass`

use stlwrap_ir::{
    BinaryOp, Class, ClassKind, Expr, Fragment, Function, FunctionKind, Item, Literal, Param,
    Stmt,
};

use super::Backend;
use crate::emitter::{Emitter, StringEmitter};

/// Renders IR as Cython source.
#[derive(Copy, Clone, Debug, Default)]
pub struct CythonBackend;

impl CythonBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for CythonBackend {
    fn render_fragment(&self, fragment: &Fragment) -> String {
        let mut emitter = StringEmitter::new();
        let mut printer = Printer { out: &mut emitter };
        let mut prev: Option<&Item> = None;
        for item in &fragment.items {
            if let Some(prev) = prev {
                if needs_gap(prev, item) {
                    printer.out.blank_line();
                }
            }
            printer.item(item);
            prev = Some(item);
        }
        emitter.output()
    }

    fn render_expr(&self, expr: &Expr) -> String {
        expr_text(expr).0
    }

    fn render_literal(&self, literal: &Literal) -> String {
        literal_text(literal)
    }
}

fn needs_gap(prev: &Item, next: &Item) -> bool {
    match (prev, next) {
        (Item::Comment(_), _) => false,
        (Item::Function(a), Item::Function(b)) => !(a.is_declaration() && b.is_declaration()),
        _ => true,
    }
}

struct Printer<'e, E: Emitter> {
    out: &'e mut E,
}

impl<E: Emitter> Printer<'_, E> {
    fn line(&mut self, level: usize, text: &str) {
        self.out.line(level, text);
    }

    fn item(&mut self, item: &Item) {
        match item {
            Item::Comment(text) => self.line(0, &format!("# {text}")),
            Item::Class(class) => self.class(0, class),
            Item::Function(function) => self.function(0, function),
        }
    }

    fn class(&mut self, level: usize, class: &Class) {
        let keyword = match class.kind {
            ClassKind::Extension => "cdef class",
            ClassKind::Host => "class",
        };
        let bases = if class.bases.is_empty() {
            String::new()
        } else {
            format!("({})", class.bases.join(", "))
        };
        self.line(level, &format!("{keyword} {}{bases}:", class.name));

        let inner = level + 1;
        let mut wrote = false;
        if let Some(doc) = &class.doc {
            self.docstring(inner, doc);
            wrote = true;
        }
        for field in &class.fields {
            let public = if field.public { "public " } else { "" };
            self.line(inner, &format!("cdef {public}{} {}", field.ty, field.name));
            wrote = true;
        }
        for method in &class.methods {
            if wrote && !method.is_declaration() {
                self.out.blank_line();
            }
            self.function(inner, method);
            wrote = true;
        }
        if !wrote {
            self.line(inner, "pass");
        }
    }

    fn function(&mut self, level: usize, function: &Function) {
        let params = function
            .params
            .iter()
            .map(param_text)
            .collect::<Vec<_>>()
            .join(", ");
        let head = match (function.kind, &function.returns) {
            (FunctionKind::Def, _) => format!("def {}({params})", function.name),
            (FunctionKind::Cdef, Some(ret)) => format!("cdef {ret} {}({params})", function.name),
            (FunctionKind::Cdef, None) => format!("cdef {}({params})", function.name),
        };
        let Some(body) = &function.body else {
            self.line(level, &head);
            return;
        };
        self.line(level, &format!("{head}:"));
        if let Some(doc) = &function.doc {
            self.docstring(level + 1, doc);
            if body.is_empty() {
                return;
            }
        }
        self.block(level + 1, body);
    }

    fn docstring(&mut self, level: usize, doc: &str) {
        let mut lines = doc.lines();
        let first = lines.next().unwrap_or_default();
        self.line(level, &format!("\"\"\"{first}"));
        for line in lines {
            if line.is_empty() {
                self.out.blank_line();
            } else {
                self.line(level, line);
            }
        }
        self.line(level, "\"\"\"");
    }

    fn block(&mut self, level: usize, stmts: &[Stmt]) {
        if stmts.is_empty() {
            self.line(level, "pass");
            return;
        }
        for stmt in stmts {
            self.stmt(level, stmt);
        }
    }

    fn stmt(&mut self, level: usize, stmt: &Stmt) {
        match stmt {
            Stmt::Decl { ty, target } => {
                self.line(level, &format!("cdef {ty} {}", expr_text(target).0));
            }
            Stmt::Assign { target, value } => {
                let text = format!("{} = {}", expr_text(target).0, expr_text(value).0);
                self.line(level, &text);
            }
            Stmt::Expr(expr) => self.line(level, &expr_text(expr).0),
            Stmt::If {
                branches,
                otherwise,
            } => {
                for (i, (cond, body)) in branches.iter().enumerate() {
                    let keyword = if i == 0 { "if" } else { "elif" };
                    self.line(level, &format!("{keyword} {}:", expr_text(cond).0));
                    self.block(level + 1, body);
                }
                if let Some(body) = otherwise {
                    self.line(level, "else:");
                    self.block(level + 1, body);
                }
            }
            Stmt::For {
                targets,
                iter,
                body,
            } => {
                let text = format!("for {} in {}:", targets.join(", "), expr_text(iter).0);
                self.line(level, &text);
                self.block(level + 1, body);
            }
            Stmt::While { cond, body } => {
                self.line(level, &format!("while {}:", expr_text(cond).0));
                self.block(level + 1, body);
            }
            Stmt::Return(None) => self.line(level, "return"),
            Stmt::Return(Some(value)) => {
                self.line(level, &format!("return {}", expr_text(value).0));
            }
            Stmt::Raise(expr) => self.line(level, &format!("raise {}", expr_text(expr).0)),
            Stmt::Try {
                body,
                exception,
                handler,
            } => {
                self.line(level, "try:");
                self.block(level + 1, body);
                self.line(level, &format!("except {exception}:"));
                self.block(level + 1, handler);
            }
            Stmt::Delete(expr) => self.line(level, &format!("del {}", expr_text(expr).0)),
            Stmt::Comment(text) => self.line(level, &format!("# {text}")),
            Stmt::Blank => self.out.blank_line(),
        }
    }
}

fn param_text(param: &Param) -> String {
    let mut text = match (&param.ty, param.name.is_empty()) {
        (Some(ty), true) => ty.clone(),
        (Some(ty), false) => format!("{ty} {}", param.name),
        (None, _) => param.name.clone(),
    };
    if let Some(default) = &param.default {
        text.push('=');
        text.push_str(&expr_text(default).0);
    }
    text
}

const PREC_OR: u8 = 1;
const PREC_AND: u8 = 2;
const PREC_NOT: u8 = 3;
const PREC_CMP: u8 = 4;
const PREC_CAST: u8 = 5;
const PREC_ATOM: u8 = 6;

fn binary_op(op: BinaryOp) -> (&'static str, u8) {
    match op {
        BinaryOp::Or => ("or", PREC_OR),
        BinaryOp::And => ("and", PREC_AND),
        BinaryOp::Eq => ("==", PREC_CMP),
        BinaryOp::NotEq => ("!=", PREC_CMP),
        BinaryOp::Lt => ("<", PREC_CMP),
        BinaryOp::In => ("in", PREC_CMP),
        BinaryOp::NotIn => ("not in", PREC_CMP),
        BinaryOp::Is => ("is", PREC_CMP),
        BinaryOp::IsNot => ("is not", PREC_CMP),
    }
}

/// Render `expr` wrapped in parentheses when it binds looser than `min`.
fn operand(expr: &Expr, min: u8) -> String {
    let (text, prec) = expr_text(expr);
    if prec < min {
        format!("({text})")
    } else {
        text
    }
}

fn args_text(args: &[Expr]) -> String {
    args.iter()
        .map(|a| expr_text(a).0)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render an expression and report its precedence.
fn expr_text(expr: &Expr) -> (String, u8) {
    match expr {
        // Unbound template slots never reach a back-end from the engine.
        Expr::Hole => ("_".to_string(), PREC_ATOM),
        Expr::Scratch(name) | Expr::Name(name) => (name.clone(), PREC_ATOM),
        Expr::Literal(literal) => (literal_text(literal), PREC_ATOM),
        Expr::Attr { receiver, name } => {
            (format!("{}.{name}", operand(receiver, PREC_ATOM)), PREC_ATOM)
        }
        Expr::Call { callee, args } => (
            format!("{}({})", operand(callee, PREC_ATOM), args_text(args)),
            PREC_ATOM,
        ),
        Expr::Index { receiver, index } => (
            format!("{}[{}]", operand(receiver, PREC_ATOM), expr_text(index).0),
            PREC_ATOM,
        ),
        Expr::Cast { ty, expr } => (format!("<{ty}> {}", operand(expr, PREC_CAST)), PREC_CAST),
        Expr::Deref(inner) => (format!("deref({})", expr_text(inner).0), PREC_ATOM),
        Expr::Inc(inner) => (format!("inc({})", expr_text(inner).0), PREC_ATOM),
        Expr::Binary { op, lhs, rhs } => {
            let (symbol, prec) = binary_op(*op);
            // Comparisons chain in the target language; nested ones need parens.
            let min = if prec == PREC_CMP { prec + 1 } else { prec };
            (
                format!("{} {symbol} {}", operand(lhs, min), operand(rhs, min)),
                prec,
            )
        }
        Expr::Not(inner) => (format!("not {}", operand(inner, PREC_NOT)), PREC_NOT),
        Expr::IsInstance { expr, types } => {
            let types = match types.as_slice() {
                [single] => single.clone(),
                many => format!("({})", many.join(", ")),
            };
            (
                format!("isinstance({}, {types})", expr_text(expr).0),
                PREC_ATOM,
            )
        }
        Expr::HasAttr { expr, attr } => (
            format!("hasattr({}, {})", expr_text(expr).0, string_literal(attr)),
            PREC_ATOM,
        ),
        Expr::Construct { ty, args } => (format!("{ty}({})", args_text(args)), PREC_ATOM),
        Expr::New(ty) => (format!("new {ty}()"), PREC_CAST),
        Expr::List(items) => (format!("[{}]", args_text(items)), PREC_ATOM),
        Expr::Dict(pairs) => {
            let body = pairs
                .iter()
                .map(|(k, v)| format!("{}: {}", expr_text(k).0, expr_text(v).0))
                .collect::<Vec<_>>()
                .join(", ");
            (format!("{{{body}}}"), PREC_ATOM)
        }
    }
}

fn float_text(f: f64) -> String {
    if f.is_nan() {
        "float(\"nan\")".to_string()
    } else if f.is_infinite() {
        if f.is_sign_positive() { "float(\"inf\")" } else { "float(\"-inf\")" }.to_string()
    } else {
        format!("{f:?}")
    }
}

fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn join_literals(items: &[Literal]) -> String {
    items
        .iter()
        .map(literal_text)
        .collect::<Vec<_>>()
        .join(", ")
}

fn literal_text(literal: &Literal) -> String {
    match literal {
        Literal::None => "None".to_string(),
        Literal::Bool(true) => "True".to_string(),
        Literal::Bool(false) => "False".to_string(),
        Literal::Int(n) => n.to_string(),
        Literal::Float(f) => float_text(*f),
        Literal::Complex { re, im } => {
            if re.to_bits() == 0 {
                format!("{}j", float_text(*im))
            } else {
                let sign = if im.is_sign_negative() { '-' } else { '+' };
                format!("({}{sign}{}j)", float_text(*re), float_text(im.abs()))
            }
        }
        Literal::Str(s) => string_literal(s),
        Literal::List(items) => format!("[{}]", join_literals(items)),
        Literal::Set(items) if items.is_empty() => "set()".to_string(),
        Literal::Set(items) => format!("{{{}}}", join_literals(items)),
        Literal::Dict(pairs) => {
            let body = pairs
                .iter()
                .map(|(k, v)| format!("{}: {}", literal_text(k), literal_text(v)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{body}}}")
        }
    }
}
