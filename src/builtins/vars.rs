//! Variable binding and callable construction: def, =, \, \!
//!
//! All four are builtin macros, so their arguments arrive unevaluated: a
//! bare symbol stays a symbol and a Q-expression stays inert. Value cells
//! and S-expression arguments are evaluated here, which is what lets a
//! definition like the prelude's `fun` compute its own symbol list and
//! formals.

use super::{cells_of, ensure};
use crate::env::Environment;
use crate::error::LispError;
use crate::eval;
use crate::value::{Callable, Closure, Value, TYPE_QEXPR, TYPE_SEXPR, TYPE_SYMBOL};
use std::rc::Rc;

/// The symbol-list argument of `def`/`=`: a bare symbol is wrapped as-is,
/// a Q-expression is taken as-is, an S-expression is evaluated to one of
/// those.
fn resolve_symbol_list(
    env: &Rc<Environment>,
    first: Value,
    func: &str,
) -> Result<Vec<Value>, Value> {
    match first {
        sym @ Value::Symbol(_) => Ok(vec![sym]),
        Value::QExpr(items) => Ok(items),
        expr @ Value::SExpr(_) => match eval::eval(env, expr) {
            sym @ Value::Symbol(_) => Ok(vec![sym]),
            Value::QExpr(items) => Ok(items),
            err @ Value::Error { .. } => Err(err),
            other => Err(Value::error(LispError::incorrect_type(
                func,
                other.type_name(),
                &[TYPE_QEXPR, TYPE_SYMBOL],
            ))),
        },
        other => Err(Value::error(LispError::incorrect_type(
            func,
            other.type_name(),
            &[TYPE_QEXPR, TYPE_SYMBOL, TYPE_SEXPR],
        ))),
    }
}

fn var(env: &Rc<Environment>, args: Value, func: &str) -> Value {
    let mut cells = cells_of(args);
    ensure!(
        !cells.is_empty(),
        LispError::mismatched_arg_count(func, 0, 1)
    );

    let syms = match resolve_symbol_list(env, cells.remove(0), func) {
        Ok(syms) => syms,
        Err(err) => return err,
    };

    let mut names = Vec::with_capacity(syms.len());
    for sym in &syms {
        match sym {
            Value::Symbol(name) => names.push(name.clone()),
            other => {
                return Value::error(LispError::define_non_symbol(func, other.type_name()))
            }
        }
    }

    ensure!(
        names.len() == cells.len(),
        LispError::define_mismatched_values(func)
    );

    let mut values = Vec::with_capacity(cells.len());
    for cell in cells {
        match eval::eval(env, cell) {
            err @ Value::Error { .. } => return err,
            value => values.push(value),
        }
    }

    for (name, value) in names.into_iter().zip(values) {
        if func == "def" {
            env.def(&name, value);
        } else {
            env.put(&name, value);
        }
    }

    Value::SExpr(Vec::new())
}

/// Binds symbols at the root environment
pub fn builtin_def(env: &Rc<Environment>, args: Value) -> Value {
    var(env, args, "def")
}

/// Binds symbols in the current frame
pub fn builtin_put(env: &Rc<Environment>, args: Value) -> Value {
    var(env, args, "=")
}

/// Formals or body of a lambda form: a literal Q-expression, or an
/// expression that evaluates to one.
fn resolve_qexpr(env: &Rc<Environment>, v: Value, func: &str) -> Result<Value, Value> {
    match v {
        quoted @ Value::QExpr(_) => Ok(quoted),
        expr @ (Value::SExpr(_) | Value::Symbol(_)) => match eval::eval(env, expr) {
            quoted @ Value::QExpr(_) => Ok(quoted),
            err @ Value::Error { .. } => Err(err),
            other => Err(Value::error(LispError::incorrect_type(
                func,
                other.type_name(),
                &[TYPE_QEXPR],
            ))),
        },
        other => Err(Value::error(LispError::incorrect_type(
            func,
            other.type_name(),
            &[TYPE_QEXPR],
        ))),
    }
}

fn lambda(env: &Rc<Environment>, args: Value, func: &str) -> Result<Box<Closure>, Value> {
    let mut cells = cells_of(args);
    if cells.len() != 2 {
        return Err(Value::error(LispError::mismatched_arg_count(
            func,
            cells.len(),
            2,
        )));
    }

    let formals = match resolve_qexpr(env, cells.remove(0), func)? {
        Value::QExpr(items) => items,
        other => {
            return Err(Value::error(LispError::incorrect_type(
                func,
                other.type_name(),
                &[TYPE_QEXPR],
            )))
        }
    };
    let body = resolve_qexpr(env, cells.remove(0), func)?;

    for item in &formals {
        if !matches!(item, Value::Symbol(_)) {
            return Err(Value::error(LispError::define_non_symbol(
                func,
                item.type_name(),
            )));
        }
    }

    Ok(Box::new(Closure {
        formals,
        body,
        env: Environment::new(),
    }))
}

/// Builds a user function
pub fn builtin_lambda(env: &Rc<Environment>, args: Value) -> Value {
    match lambda(env, args, "\\") {
        Ok(closure) => Value::Function(Callable::Lambda(closure)),
        Err(err) => err,
    }
}

/// Builds a user macro
pub fn builtin_macro(env: &Rc<Environment>, args: Value) -> Value {
    match lambda(env, args, "\\!") {
        Ok(closure) => Value::Macro(Callable::Lambda(closure)),
        Err(err) => err,
    }
}

/// Register the binding macros in the environment
pub fn register(env: &Rc<Environment>) {
    env.add_builtin_macro("def", builtin_def);
    env.add_builtin_macro("=", builtin_put);
    env.add_builtin_macro("\\", builtin_lambda);
    env.add_builtin_macro("\\!", builtin_macro);
}
