//! Source text operations: read, load
//!
//! `read` parses a string into a Q-expression of its top-level forms;
//! `load` parses a file and evaluates every form, stopping at the first
//! error.

use super::{cells_of, ensure};
use crate::env::Environment;
use crate::error::LispError;
use crate::eval;
use crate::parser;
use crate::reader;
use crate::value::{Value, TYPE_STRING};
use std::path::Path;
use std::rc::Rc;

/// Parses a string and returns its top-level forms as a Q-expression
pub fn builtin_read(_env: &Rc<Environment>, args: Value) -> Value {
    let mut cells = cells_of(args);
    ensure!(
        cells.len() == 1,
        LispError::mismatched_arg_count("read", cells.len(), 1)
    );

    match cells.remove(0) {
        Value::String(source) => match parser::parse_string(&source, "<read>") {
            Ok(ast) => match reader::read(&ast) {
                Value::SExpr(forms) => Value::QExpr(forms),
                other => other,
            },
            Err(err) => Value::error(LispError::CouldNotLoadLibrary(err.to_string())),
        },
        other => Value::error(LispError::incorrect_type(
            "read",
            other.type_name(),
            &[TYPE_STRING],
        )),
    }
}

/// Parses a file and evaluates every top-level form in order
pub fn builtin_load(env: &Rc<Environment>, args: Value) -> Value {
    let mut cells = cells_of(args);
    ensure!(
        cells.len() == 1,
        LispError::mismatched_arg_count("load", cells.len(), 1)
    );

    match cells.remove(0) {
        Value::String(path) => match parser::parse_file(Path::new(&path)) {
            Ok(ast) => {
                if let Value::SExpr(forms) = reader::read(&ast) {
                    for form in forms {
                        if let err @ Value::Error { .. } = eval::eval(env, form) {
                            return err;
                        }
                    }
                }
                Value::SExpr(Vec::new())
            }
            Err(err) => Value::error(LispError::CouldNotLoadLibrary(err.to_string())),
        },
        other => Value::error(LispError::incorrect_type(
            "load",
            other.type_name(),
            &[TYPE_STRING],
        )),
    }
}

/// Register the source builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.add_builtin_function("read", builtin_read);
    env.add_builtin_function("load", builtin_load);
}
