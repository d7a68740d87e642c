//! Formula tokenizing and evaluation.
//!
//! A formula is computed in three passes:
//!
//! 1. split the text on the arithmetic operators, resolving each operand
//!    token (aggregate call, cell reference, or number literal) to a number,
//! 2. reorder the flat token stream into postfix with an operator stack
//!    (shunting-yard), respecting precedence,
//! 3. fold the postfix stream with a value stack.
//!
//! Expression text is never handed to a host interpreter; the grammar is
//! exactly what these passes accept.

use crate::builtins;
use crate::error::EvalError;

use super::cell::{Sheet, Value};
use super::cell_ref::{CellRef, expand_range};

/// Evaluate a cell's raw text against a sheet snapshot.
///
/// Text without a leading `=` passes through as a literal. Formulas always
/// produce a number; division by zero follows IEEE semantics (inf/NaN)
/// rather than raising. The empty formula (`=`) evaluates to 0.
///
/// Reads only `sheet` and `headers`; evaluating the same inputs twice
/// always yields the same result.
pub fn evaluate(sheet: &Sheet, headers: &[String], raw: &str) -> Result<Value, EvalError> {
    let raw = raw.trim();
    let Some(expr) = raw.strip_prefix('=') else {
        return Ok(Value::from_input(raw));
    };

    let expr = expr.to_uppercase();
    if expr.trim().is_empty() {
        return Ok(Value::Number(0.0));
    }

    let mut tokens = Vec::new();
    for raw_token in split_on_operators(&expr) {
        match raw_token {
            RawToken::Operator(op) => tokens.push(Token::Operator(op)),
            RawToken::Operand(text) => {
                let n = resolve_operand(sheet, headers, text.trim())?;
                tokens.push(Token::Operand(n));
            }
        }
    }

    let postfix = to_postfix(tokens);
    eval_postfix(&postfix).map(Value::Number)
}

#[derive(Debug, Clone, Copy)]
enum Token {
    Operand(f64),
    Operator(char),
}

enum RawToken {
    Operand(String),
    Operator(char),
}

/// Split an expression into alternating operand/operator tokens. Operators
/// stay as standalone tokens; everything between them is one operand.
fn split_on_operators(expr: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in expr.chars() {
        if matches!(ch, '*' | '/' | '+' | '-') {
            tokens.push(RawToken::Operand(std::mem::take(&mut current)));
            tokens.push(RawToken::Operator(ch));
        } else {
            current.push(ch);
        }
    }
    tokens.push(RawToken::Operand(current));
    tokens
}

/// Resolve one operand token to a number.
///
/// Tried in order: aggregate function call, cell present in the sheet
/// (empty value reads as 0), number literal, syntactically valid but
/// never-written address (reads as 0). Anything else is an invalid
/// reference.
fn resolve_operand(sheet: &Sheet, headers: &[String], token: &str) -> Result<f64, EvalError> {
    if token.is_empty() {
        return Err(EvalError::MalformedExpression(
            "operator is missing an operand".to_string(),
        ));
    }
    if token.contains('(') {
        return eval_function_call(sheet, headers, token);
    }
    if let Some(cell) = sheet.get(token) {
        return Ok(cell.value.as_number());
    }
    if let Ok(n) = token.parse::<f64>() {
        return Ok(n);
    }
    if CellRef::from_str(token).is_some() {
        return Ok(0.0);
    }
    Err(EvalError::InvalidReference(token.to_string()))
}

/// Evaluate an aggregate call like `SUM(A1:B5)`.
///
/// Members resolve from currently stored values only - a formula cell in
/// the range contributes its last computed value, never a re-evaluation.
fn eval_function_call(sheet: &Sheet, headers: &[String], token: &str) -> Result<f64, EvalError> {
    let caps = builtins::range_fn_re()
        .captures(token)
        .ok_or_else(|| EvalError::InvalidFunctionCall(token.to_string()))?;

    let members = expand_range(headers, &caps[2], &caps[3])?;
    let values: Vec<f64> = members
        .iter()
        .map(|address| sheet.get(address).map_or(0.0, |c| c.value.as_number()))
        .collect();

    builtins::apply(&caps[1], &values)
        .ok_or_else(|| EvalError::InvalidFunctionCall(token.to_string()))
}

fn precedence(op: char) -> u8 {
    match op {
        '^' => 4,
        '*' | '/' => 3,
        '+' | '-' => 2,
        _ => 0,
    }
}

/// Shunting-yard pass: operators pop to the output while the stack top has
/// precedence >= the incoming operator, which gives left-to-right grouping
/// within a precedence level.
fn to_postfix(tokens: Vec<Token>) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut ops: Vec<char> = Vec::new();

    for token in tokens {
        match token {
            Token::Operand(_) => output.push(token),
            Token::Operator(op) => {
                while ops
                    .last()
                    .is_some_and(|&top| precedence(top) >= precedence(op))
                {
                    if let Some(top) = ops.pop() {
                        output.push(Token::Operator(top));
                    }
                }
                ops.push(op);
            }
        }
    }
    while let Some(op) = ops.pop() {
        output.push(Token::Operator(op));
    }
    output
}

fn apply_operator(lhs: f64, op: char, rhs: f64) -> f64 {
    match op {
        '+' => lhs + rhs,
        '-' => lhs - rhs,
        '*' => lhs * rhs,
        '/' => lhs / rhs,
        '^' => lhs.powf(rhs),
        _ => f64::NAN,
    }
}

/// Single-pass stack machine over the postfix stream.
fn eval_postfix(tokens: &[Token]) -> Result<f64, EvalError> {
    let mut stack: Vec<f64> = Vec::new();

    for token in tokens {
        match *token {
            Token::Operand(n) => stack.push(n),
            Token::Operator(op) => {
                let rhs = stack.pop();
                let lhs = stack.pop();
                let (Some(lhs), Some(rhs)) = (lhs, rhs) else {
                    return Err(EvalError::MalformedExpression(format!(
                        "operator '{}' is missing an operand",
                        op
                    )));
                };
                stack.push(apply_operator(lhs, op, rhs));
            }
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(result), true) => Ok(result),
        _ => Err(EvalError::MalformedExpression(
            "expression did not reduce to a single value".to_string(),
        )),
    }
}
