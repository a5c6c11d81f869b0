//! Console output: print, show
//!
//! `print` renders any value in its printed form; `show` takes strings
//! only and prints their raw contents, without quotes or escapes.

use super::cells_of;
use crate::env::Environment;
use crate::error::LispError;
use crate::value::{Value, TYPE_STRING};
use std::rc::Rc;

/// Prints each argument's printed form separated by spaces
pub fn builtin_print(_env: &Rc<Environment>, args: Value) -> Value {
    let rendered: Vec<String> = cells_of(args).iter().map(Value::to_string).collect();
    println!("{}", rendered.join(" "));
    Value::SExpr(Vec::new())
}

/// Prints raw string contents separated by spaces
pub fn builtin_show(_env: &Rc<Environment>, args: Value) -> Value {
    let cells = cells_of(args);
    let mut parts = Vec::with_capacity(cells.len());
    for cell in &cells {
        match cell {
            Value::String(text) => parts.push(text.as_str()),
            other => {
                return Value::error(LispError::incorrect_type(
                    "show",
                    other.type_name(),
                    &[TYPE_STRING],
                ))
            }
        }
    }
    println!("{}", parts.join(" "));
    Value::SExpr(Vec::new())
}

/// Register the console builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.add_builtin_function("print", builtin_print);
    env.add_builtin_function("show", builtin_show);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_returns_the_empty_sexpr() {
        let env = Environment::new();
        let result = builtin_print(&env, Value::SExpr(vec![Value::Integer(1)]));
        assert_eq!(result, Value::SExpr(Vec::new()));
    }

    #[test]
    fn test_show_requires_strings() {
        let env = Environment::new();
        let result = builtin_show(&env, Value::SExpr(vec![Value::Integer(1)]));
        assert_eq!(
            result.to_string(),
            "Error: Function 'show' passed incorrect type. Got Integer, Expected String."
        );

        let result = builtin_show(
            &env,
            Value::SExpr(vec![Value::String("raw text".to_string())]),
        );
        assert_eq!(result, Value::SExpr(Vec::new()));
    }
}
