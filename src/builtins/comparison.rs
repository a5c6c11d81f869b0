//! Comparison operations: ==, !=, >, <, >=, <=, if
//!
//! Equality is structural and works on any pair of values; the orderings
//! are numeric-only and strictly binary. `if` takes a Boolean condition
//! and two Q-expression branches, running the chosen one.

use super::{cells_of, ensure};
use crate::env::Environment;
use crate::error::LispError;
use crate::eval;
use crate::value::{Value, TYPE_BOOLEAN, TYPE_NUMBER, TYPE_QEXPR};
use std::rc::Rc;

fn compare(name: &str, args: Value, same: bool) -> Value {
    let cells = cells_of(args);
    ensure!(
        cells.len() == 2,
        LispError::mismatched_arg_count(name, cells.len(), 2)
    );

    Value::Boolean((cells[0] == cells[1]) == same)
}

pub fn builtin_eq(_env: &Rc<Environment>, args: Value) -> Value {
    compare("==", args, true)
}

pub fn builtin_ne(_env: &Rc<Environment>, args: Value) -> Value {
    compare("!=", args, false)
}

fn ord(name: &str, args: Value, cmp: fn(f64, f64) -> bool) -> Value {
    let cells = cells_of(args);
    ensure!(
        cells.len() == 2,
        LispError::mismatched_arg_count(name, cells.len(), 2)
    );

    let mut operands = [0.0; 2];
    for (slot, cell) in operands.iter_mut().zip(&cells) {
        match cell.as_number() {
            Some(n) => *slot = n,
            None => {
                return Value::error(LispError::incorrect_type(
                    name,
                    cell.type_name(),
                    &[TYPE_NUMBER],
                ))
            }
        }
    }

    Value::Boolean(cmp(operands[0], operands[1]))
}

pub fn builtin_gt(_env: &Rc<Environment>, args: Value) -> Value {
    ord(">", args, |a, b| a > b)
}

pub fn builtin_lt(_env: &Rc<Environment>, args: Value) -> Value {
    ord("<", args, |a, b| a < b)
}

pub fn builtin_ge(_env: &Rc<Environment>, args: Value) -> Value {
    ord(">=", args, |a, b| a >= b)
}

pub fn builtin_le(_env: &Rc<Environment>, args: Value) -> Value {
    ord("<=", args, |a, b| a <= b)
}

/// Evaluates and returns the branch picked by the condition
pub fn builtin_if(env: &Rc<Environment>, args: Value) -> Value {
    let mut cells = cells_of(args);
    ensure!(
        cells.len() == 3,
        LispError::mismatched_arg_count("if", cells.len(), 3)
    );
    ensure!(
        matches!(cells[0], Value::Boolean(_)),
        LispError::incorrect_type("if", cells[0].type_name(), &[TYPE_BOOLEAN])
    );
    ensure!(
        matches!(cells[1], Value::QExpr(_)),
        LispError::incorrect_type("if", cells[1].type_name(), &[TYPE_QEXPR])
    );
    ensure!(
        matches!(cells[2], Value::QExpr(_)),
        LispError::incorrect_type("if", cells[2].type_name(), &[TYPE_QEXPR])
    );

    let chosen = match cells.remove(0) {
        Value::Boolean(true) => cells.remove(0),
        _ => cells.remove(1),
    };
    eval::eval_qexpr(env, chosen)
}

/// Register all comparison builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.add_builtin_function("==", builtin_eq);
    env.add_builtin_function("!=", builtin_ne);
    env.add_builtin_function(">", builtin_gt);
    env.add_builtin_function("<", builtin_lt);
    env.add_builtin_function(">=", builtin_ge);
    env.add_builtin_function("<=", builtin_le);
    env.add_builtin_function("if", builtin_if);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;

    fn env() -> Rc<Environment> {
        let env = Environment::new();
        register_builtins(&env);
        env
    }

    fn args(values: Vec<Value>) -> Value {
        Value::SExpr(values)
    }

    #[test]
    fn test_equality_crosses_numeric_variants() {
        let result = builtin_eq(&env(), args(vec![Value::Integer(1), Value::Decimal(1.0)]));
        assert_eq!(result, Value::Boolean(true));

        let result = builtin_ne(&env(), args(vec![Value::Integer(1), Value::Integer(2)]));
        assert_eq!(result, Value::Boolean(true));
    }

    #[test]
    fn test_equality_works_on_any_pair() {
        let result = builtin_eq(
            &env(),
            args(vec![
                Value::QExpr(vec![Value::Integer(1)]),
                Value::QExpr(vec![Value::Integer(1)]),
            ]),
        );
        assert_eq!(result, Value::Boolean(true));

        let result = builtin_eq(
            &env(),
            args(vec![Value::Integer(1), Value::String("1".to_string())]),
        );
        assert_eq!(result, Value::Boolean(false));
    }

    #[test]
    fn test_orderings_are_numeric_only() {
        assert_eq!(
            builtin_gt(&env(), args(vec![Value::Integer(2), Value::Integer(1)])),
            Value::Boolean(true)
        );
        assert_eq!(
            builtin_le(&env(), args(vec![Value::Decimal(1.5), Value::Integer(2)])),
            Value::Boolean(true)
        );
        assert_eq!(
            builtin_lt(&env(), args(vec![Value::String("a".to_string()), Value::Integer(1)]))
                .to_string(),
            "Error: Function '<' passed incorrect type. Got String, Expected Number."
        );
    }

    #[test]
    fn test_orderings_are_binary() {
        assert_eq!(
            builtin_gt(&env(), args(vec![Value::Integer(1)])).to_string(),
            "Error: Function '>' passed incorrect number of arguments. Got 1, Expected 2."
        );
    }

    #[test]
    fn test_if_picks_and_runs_a_branch() {
        let env = env();
        let result = builtin_if(
            &env,
            args(vec![
                Value::Boolean(true),
                Value::QExpr(vec![Value::Integer(10)]),
                Value::QExpr(vec![Value::Integer(20)]),
            ]),
        );
        assert_eq!(result, Value::Integer(10));

        let result = builtin_if(
            &env,
            args(vec![
                Value::Boolean(false),
                Value::QExpr(vec![Value::Integer(10)]),
                Value::QExpr(vec![
                    Value::Symbol("+".to_string()),
                    Value::Integer(1),
                    Value::Integer(2),
                ]),
            ]),
        );
        assert_eq!(result, Value::Integer(3));
    }

    #[test]
    fn test_if_requires_a_boolean_condition() {
        let result = builtin_if(
            &env(),
            args(vec![
                Value::Integer(1),
                Value::QExpr(Vec::new()),
                Value::QExpr(Vec::new()),
            ]),
        );
        assert_eq!(
            result.to_string(),
            "Error: Function 'if' passed incorrect type. Got Integer, Expected Boolean."
        );
    }
}
