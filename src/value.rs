// ABOUTME: Value types representing Lispy data and code, plus the calling
// convention shared by builtins and user-defined callables

use crate::env::Environment;
use crate::error::LispError;
use crate::eval;
use crate::parser;
use std::fmt;
use std::rc::Rc;

pub const TYPE_INTEGER: &str = "Integer";
pub const TYPE_DECIMAL: &str = "Decimal";
pub const TYPE_NUMBER: &str = "Number";
pub const TYPE_BOOLEAN: &str = "Boolean";
pub const TYPE_STRING: &str = "String";
pub const TYPE_SYMBOL: &str = "Symbol";
pub const TYPE_SEXPR: &str = "S-Expression";
pub const TYPE_QEXPR: &str = "Q-Expression";

/// Native callable: receives the caller's environment and the argument
/// cells (an S-expression for eager calls, a Q-expression for quoting ones).
pub type LBuiltin = fn(&Rc<Environment>, Value) -> Value;

#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    String(String),
    Symbol(String),
    CName(String),
    Error { message: String, code: i32 },
    SExpr(Vec<Value>),
    QExpr(Vec<Value>),
    Function(Callable),
    Macro(Callable),
    Command(LBuiltin),
}

/// A function or macro is either builtin-backed or a user closure; the two
/// shapes are mutually exclusive by construction.
#[derive(Debug, Clone)]
pub enum Callable {
    Builtin(LBuiltin),
    Lambda(Box<Closure>),
}

/// User-defined callable: formal parameter symbols, a Q-expression body,
/// and the environment captured at creation. The captured environment's
/// parent link is re-pointed at the caller on every full invocation.
#[derive(Debug)]
pub struct Closure {
    pub formals: Vec<Value>,
    pub body: Value,
    pub env: Rc<Environment>,
}

impl Clone for Closure {
    fn clone(&self) -> Self {
        Closure {
            formals: self.formals.clone(),
            body: self.body.clone(),
            env: self.env.deep_clone(),
        }
    }
}

impl Value {
    pub fn error(err: LispError) -> Value {
        Value::Error {
            message: err.to_string(),
            code: 1,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Decimal(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => TYPE_INTEGER,
            Value::Decimal(_) => TYPE_DECIMAL,
            Value::Boolean(_) => TYPE_BOOLEAN,
            Value::String(_) => TYPE_STRING,
            Value::Symbol(_) => TYPE_SYMBOL,
            Value::CName(_) => "Command name",
            Value::Error { .. } => "Error",
            Value::SExpr(_) => TYPE_SEXPR,
            Value::QExpr(_) => TYPE_QEXPR,
            Value::Function(_) => "Function",
            Value::Macro(_) => "Macro",
            Value::Command(_) => "Command",
        }
    }

    /// Invoke a callable. `args` holds the argument cells: already
    /// evaluated for functions, raw for macros and commands.
    pub fn call(self, env: &Rc<Environment>, args: Value) -> Value {
        match self {
            Value::Function(Callable::Builtin(func))
            | Value::Macro(Callable::Builtin(func))
            | Value::Command(func) => func(env, args),
            Value::Function(Callable::Lambda(closure)) => apply_lambda(closure, env, args, false),
            Value::Macro(Callable::Lambda(closure)) => apply_lambda(closure, env, args, true),
            other => Value::error(LispError::NotAFunction(other.type_name())),
        }
    }
}

/// The partial-application binder. Consumes arguments into the closure's
/// captured environment; a fully saturated call evaluates the body with the
/// parent link pointed at the caller, an unsaturated one returns the
/// partially-applied callable.
fn apply_lambda(
    mut closure: Box<Closure>,
    env: &Rc<Environment>,
    args: Value,
    is_macro: bool,
) -> Value {
    let mut args = match args {
        Value::SExpr(cells) | Value::QExpr(cells) => cells,
        other => vec![other],
    };

    let given = args.len();
    let total = closure.formals.len();

    while !args.is_empty() {
        if closure.formals.is_empty() {
            return Value::error(LispError::too_many_args(given, total));
        }

        let name = match closure.formals.remove(0) {
            Value::Symbol(name) => name,
            _ => return Value::error(LispError::InvalidFormat),
        };

        if name == "&" {
            if closure.formals.len() != 1 {
                return Value::error(LispError::InvalidFormat);
            }
            let rest = match closure.formals.remove(0) {
                Value::Symbol(name) => name,
                _ => return Value::error(LispError::InvalidFormat),
            };
            let mut gathered = Vec::with_capacity(args.len());
            for arg in args.drain(..) {
                gathered.push(if is_macro { Value::QExpr(vec![arg]) } else { arg });
            }
            closure.env.put(&rest, Value::QExpr(gathered));
            break;
        }

        let arg = args.remove(0);
        let arg = if is_macro { Value::QExpr(vec![arg]) } else { arg };
        closure.env.put(&name, arg);
    }

    // A leftover `& rest` collects the empty list.
    if matches!(closure.formals.first(), Some(Value::Symbol(name)) if name == "&") {
        if closure.formals.len() != 2 {
            return Value::error(LispError::InvalidFormat);
        }
        closure.formals.remove(0);
        if let Value::Symbol(rest) = closure.formals.remove(0) {
            closure.env.put(&rest, Value::QExpr(Vec::new()));
        }
    }

    if closure.formals.is_empty() {
        closure.env.set_parent(env);
        let Closure { body, env: captured, .. } = *closure;
        return eval::eval_qexpr(&captured, body);
    }

    if is_macro {
        Value::Macro(Callable::Lambda(closure))
    } else {
        Value::Function(Callable::Lambda(closure))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        if self.is_number() && other.is_number() {
            return match (self, other) {
                (Value::Integer(a), Value::Integer(b)) => a == b,
                _ => self.as_number() == other.as_number(),
            };
        }

        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) | (Value::CName(a), Value::CName(b)) => a == b,
            (
                Value::Error { message: a, code: ca },
                Value::Error { message: b, code: cb },
            ) => a == b && ca == cb,
            (Value::SExpr(a), Value::SExpr(b)) | (Value::QExpr(a), Value::QExpr(b)) => a == b,
            (Value::Function(a), Value::Function(b)) | (Value::Macro(a), Value::Macro(b)) => a == b,
            (Value::Command(a), Value::Command(b)) => std::ptr::fn_addr_eq(*a, *b),
            _ => false,
        }
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Callable) -> bool {
        match (self, other) {
            (Callable::Builtin(a), Callable::Builtin(b)) => std::ptr::fn_addr_eq(*a, *b),
            (Callable::Lambda(a), Callable::Lambda(b)) => {
                a.formals == b.formals && a.body == b.body
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Symbol(name) | Value::CName(name) => write!(f, "{name}"),
            Value::String(text) => write!(f, "\"{}\"", parser::escape(text)),
            Value::Error { message, .. } => write!(f, "Error: {message}"),
            Value::Function(Callable::Builtin(_)) => write!(f, "<builtin function>"),
            Value::Macro(Callable::Builtin(_)) => write!(f, "<builtin macro>"),
            Value::Command(_) => write!(f, "<command>"),
            Value::Function(Callable::Lambda(closure)) => {
                write!(f, "(\\ ")?;
                write_expr(f, &closure.formals, '{', '}')?;
                write!(f, " {})", closure.body)
            }
            Value::Macro(Callable::Lambda(closure)) => {
                write!(f, "(\\! ")?;
                write_expr(f, &closure.formals, '{', '}')?;
                write!(f, " {})", closure.body)
            }
            Value::SExpr(cells) => write_expr(f, cells, '(', ')'),
            Value::QExpr(cells) => write_expr(f, cells, '{', '}'),
        }
    }
}

fn write_expr(f: &mut fmt::Formatter<'_>, cells: &[Value], open: char, close: char) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{cell}")?;
    }
    write!(f, "{close}")
}
