// ABOUTME: Evaluator module reducing values to values; errors propagate as
// in-band Error values, never as Rust errors

use crate::env::Environment;
use crate::error::LispError;
use crate::value::Value;
use std::rc::Rc;

/// Reduce a value: symbols and command names resolve through the
/// environment, S-expressions evaluate as call sites, everything else is
/// already a result.
pub fn eval(env: &Rc<Environment>, v: Value) -> Value {
    match v {
        Value::Symbol(name) | Value::CName(name) => env.get(&name),
        Value::SExpr(_) => eval_sexpr(env, v),
        other => other,
    }
}

/// Evaluate an S-expression. The head is resolved first; dispatch then
/// depends on its kind: eager for functions, quoting for macros and
/// commands. Evaluation consumes the expression.
pub fn eval_sexpr(env: &Rc<Environment>, v: Value) -> Value {
    let mut cells = match v {
        Value::SExpr(cells) => cells,
        other => return other,
    };

    if cells.is_empty() {
        return Value::SExpr(cells);
    }

    let head = eval(env, cells.remove(0));

    if cells.is_empty() {
        // Parentheses around a single value, except that a resolved
        // command runs immediately with no arguments.
        return match head {
            command @ Value::Command(_) => command.call(env, Value::SExpr(Vec::new())),
            value => value,
        };
    }

    match head {
        err @ Value::Error { .. } => err,
        function @ Value::Function(_) => match eval_cells(env, Value::SExpr(cells)) {
            err @ Value::Error { .. } => err,
            args => function.call(env, args),
        },
        quoting @ (Value::Macro(_) | Value::Command(_)) => {
            quoting.call(env, Value::QExpr(cells))
        }
        other => Value::error(LispError::NotAFunction(other.type_name())),
    }
}

/// Run a Q-expression: retag it as an S-expression and evaluate. This is
/// the bridge that executes quoted bodies.
pub fn eval_qexpr(env: &Rc<Environment>, v: Value) -> Value {
    match v {
        Value::QExpr(cells) => eval_sexpr(env, Value::SExpr(cells)),
        other => eval(env, other),
    }
}

/// Evaluate every cell left to right; the first error wins and the rest
/// are discarded.
pub fn eval_cells(env: &Rc<Environment>, v: Value) -> Value {
    let cells = match v {
        Value::SExpr(cells) | Value::QExpr(cells) => cells,
        other => return eval(env, other),
    };

    let mut evaluated = Vec::with_capacity(cells.len());
    for cell in cells {
        match eval(env, cell) {
            err @ Value::Error { .. } => return err,
            value => evaluated.push(value),
        }
    }
    Value::SExpr(evaluated)
}
