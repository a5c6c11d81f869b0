//! Arithmetic operations: +, -, *, /, %, ^, min, max
//!
//! All are variadic with at least one operand and fold left to right.
//! Mixing an Integer with a Decimal promotes the result to Decimal; `-`
//! with a single operand negates; `%` is integer-only.

use crate::env::Environment;
use crate::error::LispError;
use crate::value::{Value, TYPE_NUMBER};
use std::rc::Rc;

/// The two-variant numeric union arithmetic folds over
#[derive(Debug, Clone, Copy)]
enum Num {
    Int(i64),
    Dec(f64),
}

impl Num {
    fn from_value(v: &Value) -> Option<Num> {
        match v {
            Value::Integer(n) => Some(Num::Int(*n)),
            Value::Decimal(d) => Some(Num::Dec(*d)),
            _ => None,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Dec(d) => d,
        }
    }

    fn negate(self) -> Num {
        match self {
            Num::Int(n) => Num::Int(n.wrapping_neg()),
            Num::Dec(d) => Num::Dec(-d),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Num::Int(n) => Value::Integer(n),
            Num::Dec(d) => Value::Decimal(d),
        }
    }
}

/// Check every cell is numeric and split off the first operand. Type
/// errors are reported before any arithmetic happens.
fn numeric_args(name: &str, args: Value) -> Result<(Num, Vec<Num>), Value> {
    let cells = super::cells_of(args);

    let mut nums = Vec::with_capacity(cells.len());
    for cell in &cells {
        match Num::from_value(cell) {
            Some(num) => nums.push(num),
            None => {
                return Err(Value::error(LispError::incorrect_type(
                    name,
                    cell.type_name(),
                    &[TYPE_NUMBER],
                )))
            }
        }
    }

    let mut nums = nums.into_iter();
    match nums.next() {
        Some(first) => Ok((first, nums.collect())),
        None => Err(Value::error(LispError::mismatched_arg_count(name, 0, 1))),
    }
}

fn fold(first: Num, rest: Vec<Num>, op: fn(Num, Num) -> Result<Num, LispError>) -> Value {
    let mut acc = first;
    for operand in rest {
        match op(acc, operand) {
            Ok(num) => acc = num,
            Err(err) => return Value::error(err),
        }
    }
    acc.into_value()
}

fn num_add(x: Num, y: Num) -> Result<Num, LispError> {
    Ok(match (x, y) {
        (Num::Int(a), Num::Int(b)) => Num::Int(a.wrapping_add(b)),
        _ => Num::Dec(x.as_f64() + y.as_f64()),
    })
}

fn num_sub(x: Num, y: Num) -> Result<Num, LispError> {
    Ok(match (x, y) {
        (Num::Int(a), Num::Int(b)) => Num::Int(a.wrapping_sub(b)),
        _ => Num::Dec(x.as_f64() - y.as_f64()),
    })
}

fn num_mul(x: Num, y: Num) -> Result<Num, LispError> {
    Ok(match (x, y) {
        (Num::Int(a), Num::Int(b)) => Num::Int(a.wrapping_mul(b)),
        _ => Num::Dec(x.as_f64() * y.as_f64()),
    })
}

fn num_div(x: Num, y: Num) -> Result<Num, LispError> {
    match (x, y) {
        (_, Num::Int(0)) => Err(LispError::DivisionByZero),
        (Num::Int(a), Num::Int(b)) => Ok(Num::Int(a.wrapping_div(b))),
        _ => {
            let divisor = y.as_f64();
            if divisor == 0.0 {
                Err(LispError::DivisionByZero)
            } else {
                Ok(Num::Dec(x.as_f64() / divisor))
            }
        }
    }
}

fn num_rem(x: Num, y: Num) -> Result<Num, LispError> {
    match (x, y) {
        (Num::Int(_), Num::Int(0)) => Err(LispError::DivisionByZero),
        (Num::Int(a), Num::Int(b)) => Ok(Num::Int(a.wrapping_rem(b))),
        _ => Err(LispError::IntegerModulo),
    }
}

fn num_pow(x: Num, y: Num) -> Result<Num, LispError> {
    Ok(match (x, y) {
        (Num::Int(a), Num::Int(b)) => Num::Int((a as f64).powf(b as f64) as i64),
        _ => Num::Dec(x.as_f64().powf(y.as_f64())),
    })
}

// Ties keep the left operand.
fn num_min(x: Num, y: Num) -> Result<Num, LispError> {
    Ok(if x.as_f64() <= y.as_f64() { x } else { y })
}

fn num_max(x: Num, y: Num) -> Result<Num, LispError> {
    Ok(if x.as_f64() >= y.as_f64() { x } else { y })
}

pub fn builtin_add(_env: &Rc<Environment>, args: Value) -> Value {
    match numeric_args("+", args) {
        Ok((first, rest)) => fold(first, rest, num_add),
        Err(err) => err,
    }
}

/// Subtracts subsequent operands from the first; a single operand negates
pub fn builtin_sub(_env: &Rc<Environment>, args: Value) -> Value {
    match numeric_args("-", args) {
        Ok((first, rest)) if rest.is_empty() => first.negate().into_value(),
        Ok((first, rest)) => fold(first, rest, num_sub),
        Err(err) => err,
    }
}

pub fn builtin_mul(_env: &Rc<Environment>, args: Value) -> Value {
    match numeric_args("*", args) {
        Ok((first, rest)) => fold(first, rest, num_mul),
        Err(err) => err,
    }
}

pub fn builtin_div(_env: &Rc<Environment>, args: Value) -> Value {
    match numeric_args("/", args) {
        Ok((first, rest)) => fold(first, rest, num_div),
        Err(err) => err,
    }
}

pub fn builtin_rem(_env: &Rc<Environment>, args: Value) -> Value {
    match numeric_args("%", args) {
        Ok((first, rest)) => fold(first, rest, num_rem),
        Err(err) => err,
    }
}

pub fn builtin_pow(_env: &Rc<Environment>, args: Value) -> Value {
    match numeric_args("^", args) {
        Ok((first, rest)) => fold(first, rest, num_pow),
        Err(err) => err,
    }
}

pub fn builtin_min(_env: &Rc<Environment>, args: Value) -> Value {
    match numeric_args("min", args) {
        Ok((first, rest)) => fold(first, rest, num_min),
        Err(err) => err,
    }
}

pub fn builtin_max(_env: &Rc<Environment>, args: Value) -> Value {
    match numeric_args("max", args) {
        Ok((first, rest)) => fold(first, rest, num_max),
        Err(err) => err,
    }
}

/// Register all arithmetic builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.add_builtin_function("+", builtin_add);
    env.add_builtin_function("-", builtin_sub);
    env.add_builtin_function("*", builtin_mul);
    env.add_builtin_function("/", builtin_div);
    env.add_builtin_function("%", builtin_rem);
    env.add_builtin_function("^", builtin_pow);
    env.add_builtin_function("min", builtin_min);
    env.add_builtin_function("max", builtin_max);
}
