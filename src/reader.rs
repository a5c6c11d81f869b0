// ABOUTME: Reader module transforming parse tree nodes into values

use crate::error::LispError;
use crate::parser::{self, Ast};
use crate::value::Value;

const SKIP_CONTENTS: [&str; 4] = ["(", ")", "{", "}"];

/// Turn a parse tree node into a value, dispatching on tag substrings so
/// combined grammar tags keep working.
pub fn read(node: &Ast) -> Value {
    if node.tag.contains("integer") {
        return read_integer(node);
    }
    if node.tag.contains("decimal") {
        return read_decimal(node);
    }
    if node.tag.contains("string") {
        return read_string(node);
    }
    if node.tag.contains("cname") {
        return Value::CName(node.contents.clone());
    }
    if node.tag.contains("symbol") {
        return Value::Symbol(node.contents.clone());
    }

    let cells: Vec<Value> = node
        .children
        .iter()
        .filter(|child| !should_skip(child))
        .map(read)
        .collect();

    if node.tag.contains("qexpr") {
        Value::QExpr(cells)
    } else {
        // the root node `>` and sexpr nodes
        Value::SExpr(cells)
    }
}

fn should_skip(child: &Ast) -> bool {
    SKIP_CONTENTS.contains(&child.contents.as_str())
        || child.tag == "regex"
        || child.tag.contains("comment")
}

fn read_integer(node: &Ast) -> Value {
    match node.contents.parse::<i64>() {
        Ok(n) => Value::Integer(n),
        Err(_) => Value::error(LispError::InvalidNumber),
    }
}

fn read_decimal(node: &Ast) -> Value {
    match node.contents.parse::<f64>() {
        Ok(d) => Value::Decimal(d),
        Err(_) => Value::error(LispError::InvalidNumber),
    }
}

fn read_string(node: &Ast) -> Value {
    let raw = &node.contents;
    let body = &raw[1..raw.len() - 1];
    Value::String(parser::unescape(body))
}
