//! REPL commands: .clear, .printenv, .quit
//!
//! Commands are only installed in interactive mode and take no arguments.
//! They communicate with the driver through its session flags.

use super::{cells_of, ensure};
use crate::driver;
use crate::env::Environment;
use crate::error::LispError;
use crate::value::Value;
use std::rc::Rc;

/// Requests a screen clear before the next prompt
pub fn builtin_clear(_env: &Rc<Environment>, args: Value) -> Value {
    let cells = cells_of(args);
    ensure!(
        cells.is_empty(),
        LispError::mismatched_arg_count(".clear", cells.len(), 0)
    );

    driver::raise_flag(driver::FLAG_CLEAR_OUTPUT);
    Value::SExpr(Vec::new())
}

/// Prints every binding in the current environment
pub fn builtin_printenv(env: &Rc<Environment>, args: Value) -> Value {
    let cells = cells_of(args);
    ensure!(
        cells.is_empty(),
        LispError::mismatched_arg_count(".printenv", cells.len(), 0)
    );

    let mut names = env.keys();
    names.sort();
    for name in names {
        println!("{name}: {}", env.get(&name));
    }
    Value::SExpr(Vec::new())
}

/// Requests a clean interpreter exit
pub fn builtin_quit(_env: &Rc<Environment>, args: Value) -> Value {
    let cells = cells_of(args);
    ensure!(
        cells.is_empty(),
        LispError::mismatched_arg_count(".quit", cells.len(), 0)
    );

    driver::raise_flag(driver::FLAG_EXIT);
    Value::SExpr(Vec::new())
}

/// Register the REPL commands in the environment
pub fn register(env: &Rc<Environment>) {
    env.add_builtin_command(".clear", builtin_clear);
    env.add_builtin_command(".printenv", builtin_printenv);
    env.add_builtin_command(".quit", builtin_quit);
}
