//! Error construction and termination: error, exit
//!
//! `error` builds a first-class error value. `exit` reuses the error value
//! to carry the exit status: an Integer argument becomes the exit code
//! with an empty message, a String argument becomes the message with code
//! 1. Both raise the driver's exit flag.

use super::{cells_of, ensure};
use crate::driver;
use crate::env::Environment;
use crate::error::LispError;
use crate::value::{Value, TYPE_INTEGER, TYPE_STRING};
use std::rc::Rc;

/// Constructs an error value from a message string
pub fn builtin_error(_env: &Rc<Environment>, args: Value) -> Value {
    let mut cells = cells_of(args);
    ensure!(
        cells.len() == 1,
        LispError::mismatched_arg_count("error", cells.len(), 1)
    );

    match cells.remove(0) {
        Value::String(message) => Value::Error { message, code: 1 },
        other => Value::error(LispError::incorrect_type(
            "error",
            other.type_name(),
            &[TYPE_STRING],
        )),
    }
}

/// Requests interpreter termination
pub fn builtin_exit(_env: &Rc<Environment>, args: Value) -> Value {
    let mut cells = cells_of(args);
    ensure!(
        cells.len() == 1,
        LispError::mismatched_arg_count("exit", cells.len(), 1)
    );

    let result = match cells.remove(0) {
        Value::Integer(code) => Value::Error {
            message: String::new(),
            code: code as i32,
        },
        Value::String(message) => Value::Error { message, code: 1 },
        other => {
            return Value::error(LispError::incorrect_type(
                "exit",
                other.type_name(),
                &[TYPE_INTEGER, TYPE_STRING],
            ))
        }
    };

    driver::raise_flag(driver::FLAG_EXIT);
    result
}

/// Register the error builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.add_builtin_function("error", builtin_error);
    env.add_builtin_function("exit", builtin_exit);
}
