// ABOUTME: Parser module turning source text into a parse tree using nom
// combinators; the reader consumes the tree by tag

use nom::{
    branch::alt,
    bytes::complete::escaped,
    character::complete::{anychar, char, digit1, none_of},
    combinator::{opt, recognize},
    multi::many0,
    IResult, Parser,
};
use std::path::Path;
use thiserror::Error;

/// Parse tree node. `tag` names the grammar rule that produced the node,
/// `contents` is the matched text for leaves, and `children` keeps the
/// punctuation and comment nodes so the reader can skip them itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    pub tag: &'static str,
    pub contents: String,
    pub children: Vec<Ast>,
}

impl Ast {
    fn leaf(tag: &'static str, contents: &str) -> Ast {
        Ast {
            tag,
            contents: contents.to_string(),
            children: Vec::new(),
        }
    }

    fn node(tag: &'static str, children: Vec<Ast>) -> Ast {
        Ast {
            tag,
            contents: String::new(),
            children,
        }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{origin}: syntax error near '{fragment}'")]
    Syntax { origin: String, fragment: String },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    fn syntax(origin: &str, near: &str) -> Self {
        ParseError::Syntax {
            origin: origin.to_string(),
            fragment: near.chars().take(30).collect(),
        }
    }
}

/// Parse a whole source text into a root node tagged `>` whose children
/// are the top-level forms.
pub fn parse_string(source: &str, origin: &str) -> Result<Ast, ParseError> {
    match root(source) {
        Ok((rest, ast)) if rest.is_empty() => Ok(ast),
        Ok((rest, _)) => Err(ParseError::syntax(origin, rest)),
        Err(e) => Err(ParseError::syntax(origin, &e.to_string())),
    }
}

pub fn parse_file(path: &Path) -> Result<Ast, ParseError> {
    let source = std::fs::read_to_string(path)?;
    parse_string(&source, &path.display().to_string())
}

fn root(input: &str) -> IResult<&str, Ast> {
    let (input, children) = many0(padded_expr).parse(input)?;
    let (input, _) = ws(input)?;
    Ok((input, Ast::node(">", children)))
}

fn ws(input: &str) -> IResult<&str, &str> {
    nom::bytes::complete::take_while(|c: char| c.is_whitespace())(input)
}

fn padded_expr(input: &str) -> IResult<&str, Ast> {
    let (input, _) = ws(input)?;
    alt((comment_node, expr_node)).parse(input)
}

fn expr_node(input: &str) -> IResult<&str, Ast> {
    alt((
        decimal_node,
        integer_node,
        string_node,
        cname_node,
        symbol_node,
        sexpr_node,
        qexpr_node,
    ))
    .parse(input)
}

/// `-?[0-9]+\.[0-9]+`
fn decimal_node(input: &str) -> IResult<&str, Ast> {
    recognize((opt(char('-')), digit1, char('.'), digit1))
        .map(|matched: &str| Ast::leaf("decimal", matched))
        .parse(input)
}

/// `-?[0-9]+`
fn integer_node(input: &str) -> IResult<&str, Ast> {
    recognize((opt(char('-')), digit1))
        .map(|matched: &str| Ast::leaf("integer", matched))
        .parse(input)
}

/// Double-quoted with backslash escapes; the contents keep the quotes,
/// the reader strips and unescapes them.
fn string_node(input: &str) -> IResult<&str, Ast> {
    recognize((
        char('"'),
        opt(escaped(none_of("\"\\"), '\\', anychar)),
        char('"'),
    ))
    .map(|matched: &str| Ast::leaf("string", matched))
    .parse(input)
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_+-*/\\=<>!&%^".contains(c)
}

fn symbol_node(input: &str) -> IResult<&str, Ast> {
    nom::bytes::complete::take_while1(is_symbol_char)
        .map(|matched: &str| Ast::leaf("symbol", matched))
        .parse(input)
}

/// `.` followed by a symbol body; the dot stays in the name
fn cname_node(input: &str) -> IResult<&str, Ast> {
    recognize((char('.'), nom::bytes::complete::take_while1(is_symbol_char)))
        .map(|matched: &str| Ast::leaf("cname", matched))
        .parse(input)
}

/// `;` to end of line
fn comment_node(input: &str) -> IResult<&str, Ast> {
    recognize((char(';'), nom::bytes::complete::take_while(|c| c != '\n')))
        .map(|matched: &str| Ast::leaf("comment", matched))
        .parse(input)
}

fn sexpr_node(input: &str) -> IResult<&str, Ast> {
    expr_list(input, '(', ')', "sexpr")
}

fn qexpr_node(input: &str) -> IResult<&str, Ast> {
    expr_list(input, '{', '}', "qexpr")
}

fn expr_list<'a>(input: &'a str, open: char, close: char, tag: &'static str) -> IResult<&'a str, Ast> {
    let (input, _) = char(open)(input)?;
    let (input, mut inner) = many0(padded_expr).parse(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char(close)(input)?;

    let mut children = Vec::with_capacity(inner.len() + 2);
    children.push(Ast::leaf("char", &open.to_string()));
    children.append(&mut inner);
    children.push(Ast::leaf("char", &close.to_string()));

    Ok((input, Ast::node(tag, children)))
}

/// Expand backslash escapes inside a string literal's body
pub fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('a') => result.push('\x07'),
            Some('b') => result.push('\x08'),
            Some('f') => result.push('\x0C'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('v') => result.push('\x0B'),
            Some('0') => result.push('\0'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }

    result
}

/// Inverse of [`unescape`], used by the printer
pub fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\x07' => result.push_str("\\a"),
            '\x08' => result.push_str("\\b"),
            '\x0C' => result.push_str("\\f"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\x0B' => result.push_str("\\v"),
            '\0' => result.push_str("\\0"),
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            other => result.push(other),
        }
    }

    result
}
