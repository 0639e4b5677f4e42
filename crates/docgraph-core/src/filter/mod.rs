//! Filter interpretation - the trust boundary of the query surface.
//!
//! Client filter values arrive as raw JSON and leave this module as
//! validated [`FilterExpr`] values or compiled [`Predicate`]s. The
//! operator set is a closed allow-list; anything outside it, and any
//! operand of the wrong shape, is rejected with
//! [`Error::InvalidFilter`](crate::error::Error::InvalidFilter) before a
//! storage adapter is ever touched. Every accepted operator is
//! interpreted here - nothing client-shaped is forwarded to a backend.

pub mod eval;
pub mod expr;
pub mod predicate;

pub use eval::FilterEvaluator;
pub use expr::FilterExpr;
pub use predicate::Predicate;

use crate::error::Error;
use docgraph_proto::Value;

/// How a bare scalar filter value is interpreted.
///
/// The mode is chosen per operation: a name search treats a bare string
/// as substring containment, a title search treats a bare scalar as
/// equality. Structured operator objects behave identically in both
/// modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarMode {
    /// Bare scalar means exact equality.
    Equality,
    /// Bare string means case-sensitive substring containment.
    Substring,
}

/// The recognized operator names, in the order they are documented.
const OPERATORS: [&str; 5] = ["equals", "contains", "notEquals", "matchesPattern", "exists"];

/// Interpret a client-supplied filter value against one field.
///
/// Returns the validated expression, or `InvalidFilter` naming the
/// rejected operator or operand shape and the violated constraint.
pub fn parse(field: &str, input: &serde_json::Value, mode: ScalarMode) -> Result<FilterExpr, Error> {
    match input {
        serde_json::Value::Object(operators) => parse_operators(field, operators),
        serde_json::Value::Null => Err(Error::InvalidFilter(
            "filter value must not be null".to_string(),
        )),
        serde_json::Value::Array(_) => Err(Error::InvalidFilter(
            "filter value must be a scalar or an operator object, got an array".to_string(),
        )),
        scalar => parse_scalar(field, scalar, mode),
    }
}

/// Interpret a bare scalar per the operation's scalar mode.
fn parse_scalar(
    field: &str,
    scalar: &serde_json::Value,
    mode: ScalarMode,
) -> Result<FilterExpr, Error> {
    match mode {
        ScalarMode::Substring => match scalar {
            serde_json::Value::String(s) => Ok(FilterExpr::contains(field, s.clone())),
            _ => Err(Error::InvalidFilter(
                "substring filter requires a string value".to_string(),
            )),
        },
        ScalarMode::Equality => {
            let value = scalar_value(scalar).ok_or_else(|| {
                Error::InvalidFilter(
                    "equality filter requires a string, integer, or boolean value".to_string(),
                )
            })?;
            Ok(FilterExpr::eq(field, value))
        }
    }
}

/// Interpret a structured operator object.
///
/// Multiple recognized operators conjoin. An empty object carries no
/// meaning and is rejected rather than matching everything.
fn parse_operators(
    field: &str,
    operators: &serde_json::Map<String, serde_json::Value>,
) -> Result<FilterExpr, Error> {
    if operators.is_empty() {
        return Err(Error::InvalidFilter(
            "filter object contains no operators".to_string(),
        ));
    }

    let mut exprs = Vec::with_capacity(operators.len());
    for (name, operand) in operators {
        let expr = match name.as_str() {
            "equals" => FilterExpr::Eq {
                field: field.to_string(),
                value: scalar_operand("equals", operand)?,
            },
            "notEquals" => FilterExpr::Ne {
                field: field.to_string(),
                value: scalar_operand("notEquals", operand)?,
            },
            "contains" => FilterExpr::Contains {
                field: field.to_string(),
                needle: string_operand("contains", operand)?,
            },
            "matchesPattern" => FilterExpr::Pattern {
                field: field.to_string(),
                pattern: pattern_operand(operand)?,
            },
            "exists" => FilterExpr::Exists {
                field: field.to_string(),
                expected: bool_operand("exists", operand)?,
            },
            other => {
                return Err(Error::InvalidFilter(format!(
                    "unrecognized filter operator '{}'; allowed operators are {}",
                    other,
                    OPERATORS.join(", ")
                )));
            }
        };
        exprs.push(expr);
    }

    if exprs.len() == 1 {
        Ok(exprs.remove(0))
    } else {
        Ok(FilterExpr::and(exprs))
    }
}

/// Convert a JSON scalar to a runtime value; `None` for anything else.
fn scalar_value(json: &serde_json::Value) -> Option<Value> {
    match json {
        serde_json::Value::String(s) => Some(Value::String(s.clone())),
        serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
        serde_json::Value::Number(n) => n.as_i64().map(Value::Int),
        _ => None,
    }
}

fn scalar_operand(operator: &str, operand: &serde_json::Value) -> Result<Value, Error> {
    scalar_value(operand).ok_or_else(|| {
        Error::InvalidFilter(format!(
            "operator '{}' requires a scalar argument, got {}",
            operator,
            shape_name(operand)
        ))
    })
}

fn string_operand(operator: &str, operand: &serde_json::Value) -> Result<String, Error> {
    match operand {
        serde_json::Value::String(s) => Ok(s.clone()),
        _ => Err(Error::InvalidFilter(format!(
            "operator '{}' requires a string argument, got {}",
            operator,
            shape_name(operand)
        ))),
    }
}

fn bool_operand(operator: &str, operand: &serde_json::Value) -> Result<bool, Error> {
    match operand {
        serde_json::Value::Bool(b) => Ok(*b),
        _ => Err(Error::InvalidFilter(format!(
            "operator '{}' requires a boolean argument, got {}",
            operator,
            shape_name(operand)
        ))),
    }
}

/// Validate a `matchesPattern` argument: non-empty, `[A-Za-z0-9]` only.
fn pattern_operand(operand: &serde_json::Value) -> Result<String, Error> {
    let pattern = string_operand("matchesPattern", operand)?;
    if pattern.is_empty() {
        return Err(Error::InvalidFilter(
            "matchesPattern argument must not be empty".to_string(),
        ));
    }
    if !pattern.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::InvalidFilter(format!(
            "matchesPattern argument '{}' contains characters outside [A-Za-z0-9]",
            pattern
        )));
    }
    Ok(pattern)
}

/// Name a JSON shape for error messages without echoing its contents.
fn shape_name(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(n) if n.as_i64().is_some() => "an integer",
        serde_json::Value::Number(_) => "a non-integer number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
