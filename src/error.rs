// ABOUTME: Canonical runtime error catalog; every failure the evaluator can
// produce is one of these variants, rendered into an in-band Error value

use thiserror::Error;

/// Every runtime failure the interpreter can produce. Errors travel as
/// in-band `Value::Error` values, so this enum only exists long enough to
/// render the canonical message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LispError {
    #[error("Invalid number!")]
    InvalidNumber,

    #[error("Unbound symbol '{0}'!")]
    UnboundSymbol(String),

    #[error("Division by zero!")]
    DivisionByZero,

    #[error("Module operation can only be applied to integers!")]
    IntegerModulo,

    #[error("S-expression does not start with function!. Got {0}.")]
    NotAFunction(&'static str),

    #[error("Function '{func}' passed incorrect number of arguments. Got {got}, Expected {expected}.")]
    MismatchedArgCount {
        func: String,
        got: usize,
        expected: usize,
    },

    #[error("Function passed too many arguments. Got {got}, Expected {expected}.")]
    TooManyArgs { got: usize, expected: usize },

    #[error("Function '{func}' passed incorrect type. Got {got}, Expected {expected}.")]
    IncorrectType {
        func: String,
        got: &'static str,
        expected: String,
    },

    #[error("Function '{0}' passed {{}}!")]
    EmptyQExpr(String),

    #[error("Function '{0}' passed empty string!")]
    EmptyString(String),

    #[error("Function '{func}' cannot define non-symbol!. Got {got}.")]
    DefineNonSymbol { func: String, got: &'static str },

    #[error("Function '{0}' cannot define incorrect number of values to symbols")]
    DefineMismatchedValues(String),

    #[error("Function format invalid. Symbol '&' not followed by single symbol.")]
    InvalidFormat,

    // The misspelling is load-bearing: scripts match on this exact text.
    #[error("Cound not load library {0}")]
    CouldNotLoadLibrary(String),
}

impl LispError {
    pub fn mismatched_arg_count(func: &str, got: usize, expected: usize) -> Self {
        LispError::MismatchedArgCount {
            func: func.to_string(),
            got,
            expected,
        }
    }

    pub fn too_many_args(got: usize, expected: usize) -> Self {
        LispError::TooManyArgs { got, expected }
    }

    /// Type mismatch with one or more acceptable types. A single entry
    /// renders as `Expected X.`, several as `Expected one of X, Y.`
    pub fn incorrect_type(func: &str, got: &'static str, expected: &[&str]) -> Self {
        let expected = match expected {
            [single] => (*single).to_string(),
            many => format!("one of {}", many.join(", ")),
        };
        LispError::IncorrectType {
            func: func.to_string(),
            got,
            expected,
        }
    }

    pub fn empty_qexpr(func: &str) -> Self {
        LispError::EmptyQExpr(func.to_string())
    }

    pub fn empty_string(func: &str) -> Self {
        LispError::EmptyString(func.to_string())
    }

    pub fn define_non_symbol(func: &str, got: &'static str) -> Self {
        LispError::DefineNonSymbol {
            func: func.to_string(),
            got,
        }
    }

    pub fn define_mismatched_values(func: &str) -> Self {
        LispError::DefineMismatchedValues(func.to_string())
    }
}
