//! List and string operations: list, eval, head, tail, init, cons, join, len
//!
//! `head`, `tail`, `join`, and `len` also work on strings; `init` and
//! `cons` are Q-expression only.

use super::{cells_of, ensure};
use crate::env::Environment;
use crate::error::LispError;
use crate::eval;
use crate::value::{Value, TYPE_QEXPR, TYPE_STRING};
use std::rc::Rc;

/// Gathers the arguments into a Q-expression
pub fn builtin_list(_env: &Rc<Environment>, args: Value) -> Value {
    Value::QExpr(cells_of(args))
}

/// Runs a Q-expression as code
pub fn builtin_eval(env: &Rc<Environment>, args: Value) -> Value {
    let mut cells = cells_of(args);
    ensure!(
        cells.len() == 1,
        LispError::mismatched_arg_count("eval", cells.len(), 1)
    );

    match cells.remove(0) {
        quoted @ Value::QExpr(_) => eval::eval_qexpr(env, quoted),
        other => Value::error(LispError::incorrect_type(
            "eval",
            other.type_name(),
            &[TYPE_QEXPR],
        )),
    }
}

/// First element as a one-element Q-expression, or first character of a
/// string as a one-character string
pub fn builtin_head(_env: &Rc<Environment>, args: Value) -> Value {
    let mut cells = cells_of(args);
    ensure!(
        cells.len() == 1,
        LispError::mismatched_arg_count("head", cells.len(), 1)
    );

    match cells.remove(0) {
        Value::QExpr(mut items) => {
            ensure!(!items.is_empty(), LispError::empty_qexpr("head"));
            items.truncate(1);
            Value::QExpr(items)
        }
        Value::String(text) => {
            ensure!(!text.is_empty(), LispError::empty_string("head"));
            Value::String(text.chars().take(1).collect())
        }
        other => Value::error(LispError::incorrect_type(
            "head",
            other.type_name(),
            &[TYPE_QEXPR, TYPE_STRING],
        )),
    }
}

/// Everything but the first element or character
pub fn builtin_tail(_env: &Rc<Environment>, args: Value) -> Value {
    let mut cells = cells_of(args);
    ensure!(
        cells.len() == 1,
        LispError::mismatched_arg_count("tail", cells.len(), 1)
    );

    match cells.remove(0) {
        Value::QExpr(mut items) => {
            ensure!(!items.is_empty(), LispError::empty_qexpr("tail"));
            items.remove(0);
            Value::QExpr(items)
        }
        Value::String(text) => {
            ensure!(!text.is_empty(), LispError::empty_string("tail"));
            Value::String(text.chars().skip(1).collect())
        }
        other => Value::error(LispError::incorrect_type(
            "tail",
            other.type_name(),
            &[TYPE_QEXPR, TYPE_STRING],
        )),
    }
}

/// Everything but the last element
pub fn builtin_init(_env: &Rc<Environment>, args: Value) -> Value {
    let mut cells = cells_of(args);
    ensure!(
        cells.len() == 1,
        LispError::mismatched_arg_count("init", cells.len(), 1)
    );

    match cells.remove(0) {
        Value::QExpr(mut items) => {
            ensure!(!items.is_empty(), LispError::empty_qexpr("init"));
            items.pop();
            Value::QExpr(items)
        }
        other => Value::error(LispError::incorrect_type(
            "init",
            other.type_name(),
            &[TYPE_QEXPR],
        )),
    }
}

/// Prepends a value to a Q-expression
pub fn builtin_cons(_env: &Rc<Environment>, args: Value) -> Value {
    let mut cells = cells_of(args);
    ensure!(
        cells.len() == 2,
        LispError::mismatched_arg_count("cons", cells.len(), 2)
    );

    let list = cells.remove(1);
    let value = cells.remove(0);
    match list {
        Value::QExpr(mut items) => {
            items.insert(0, value);
            Value::QExpr(items)
        }
        other => Value::error(LispError::incorrect_type(
            "cons",
            other.type_name(),
            &[TYPE_QEXPR],
        )),
    }
}

/// Concatenates Q-expressions or strings; every argument must share the
/// first one's type
pub fn builtin_join(_env: &Rc<Environment>, args: Value) -> Value {
    let mut cells = cells_of(args).into_iter();
    let first = match cells.next() {
        Some(first) => first,
        None => return Value::error(LispError::mismatched_arg_count("join", 0, 1)),
    };

    match first {
        Value::QExpr(mut items) => {
            for cell in cells {
                match cell {
                    Value::QExpr(mut more) => items.append(&mut more),
                    other => {
                        return Value::error(LispError::incorrect_type(
                            "join",
                            other.type_name(),
                            &[TYPE_QEXPR],
                        ))
                    }
                }
            }
            Value::QExpr(items)
        }
        Value::String(mut text) => {
            for cell in cells {
                match cell {
                    Value::String(more) => text.push_str(&more),
                    other => {
                        return Value::error(LispError::incorrect_type(
                            "join",
                            other.type_name(),
                            &[TYPE_STRING],
                        ))
                    }
                }
            }
            Value::String(text)
        }
        other => Value::error(LispError::incorrect_type(
            "join",
            other.type_name(),
            &[TYPE_QEXPR, TYPE_STRING],
        )),
    }
}

/// Number of cells in a Q-expression, or bytes in a string
pub fn builtin_len(_env: &Rc<Environment>, args: Value) -> Value {
    let mut cells = cells_of(args);
    ensure!(
        cells.len() == 1,
        LispError::mismatched_arg_count("len", cells.len(), 1)
    );

    match cells.remove(0) {
        Value::QExpr(items) => Value::Integer(items.len() as i64),
        Value::String(text) => Value::Integer(text.len() as i64),
        other => Value::error(LispError::incorrect_type(
            "len",
            other.type_name(),
            &[TYPE_QEXPR, TYPE_STRING],
        )),
    }
}

/// Register all list builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.add_builtin_function("list", builtin_list);
    env.add_builtin_function("eval", builtin_eval);
    env.add_builtin_function("head", builtin_head);
    env.add_builtin_function("tail", builtin_tail);
    env.add_builtin_function("init", builtin_init);
    env.add_builtin_function("cons", builtin_cons);
    env.add_builtin_function("join", builtin_join);
    env.add_builtin_function("len", builtin_len);
}
