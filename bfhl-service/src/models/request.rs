use crate::error::BfhlError;
use serde_json::{Map, Value};
use std::fmt;

/// The operation selected by the single key of a `/bfhl` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fibonacci,
    Prime,
    Lcm,
    Hcf,
    Ai,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Fibonacci,
        Operation::Prime,
        Operation::Lcm,
        Operation::Hcf,
        Operation::Ai,
    ];

    /// The JSON key that selects this operation.
    pub fn key(self) -> &'static str {
        match self {
            Operation::Fibonacci => "fibonacci",
            Operation::Prime => "prime",
            Operation::Lcm => "lcm",
            Operation::Hcf => "hcf",
            Operation::Ai => "AI",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.key() == key)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A validated `/bfhl` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BfhlRequest {
    Fibonacci(u64),
    Prime(Vec<i64>),
    Lcm(Vec<i64>),
    Hcf(Vec<i64>),
    Ai(String),
}

impl BfhlRequest {
    /// Validate a raw JSON body.
    ///
    /// The body must be an object with exactly one recognized key whose value
    /// has the type that operation expects.
    pub fn from_value(value: Value) -> Result<Self, BfhlError> {
        let Value::Object(map) = value else {
            return Err(BfhlError::invalid("request body must be a JSON object"));
        };

        let (key, value) = single_entry(map)?;
        let operation = Operation::from_key(&key)
            .ok_or_else(|| BfhlError::invalid(format!("unrecognized key '{}'", key)))?;

        match operation {
            Operation::Fibonacci => {
                let n = as_integer(&value)
                    .filter(|n| *n >= 0)
                    .ok_or_else(|| BfhlError::invalid("fibonacci expects a non-negative integer"))?;
                Ok(BfhlRequest::Fibonacci(n as u64))
            }
            Operation::Prime => Ok(BfhlRequest::Prime(integer_list(operation, &value)?)),
            Operation::Lcm => Ok(BfhlRequest::Lcm(integer_list(operation, &value)?)),
            Operation::Hcf => Ok(BfhlRequest::Hcf(integer_list(operation, &value)?)),
            Operation::Ai => match value {
                Value::String(prompt) if !prompt.trim().is_empty() => Ok(BfhlRequest::Ai(prompt)),
                Value::String(_) => Err(BfhlError::invalid("AI prompt must not be blank")),
                _ => Err(BfhlError::invalid("AI expects a string")),
            },
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            BfhlRequest::Fibonacci(_) => Operation::Fibonacci,
            BfhlRequest::Prime(_) => Operation::Prime,
            BfhlRequest::Lcm(_) => Operation::Lcm,
            BfhlRequest::Hcf(_) => Operation::Hcf,
            BfhlRequest::Ai(_) => Operation::Ai,
        }
    }
}

fn single_entry(map: Map<String, Value>) -> Result<(String, Value), BfhlError> {
    if map.len() != 1 {
        return Err(BfhlError::invalid(format!(
            "expected exactly one key, got {}",
            map.len()
        )));
    }
    map.into_iter()
        .next()
        .ok_or_else(|| BfhlError::invalid("expected exactly one key, got 0"))
}

/// Integers may arrive as `7` or `7.0`; anything with a fraction is rejected.
fn as_integer(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(n) = number.as_i64() {
        return Some(n);
    }
    let f = number.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn integer_list(operation: Operation, value: &Value) -> Result<Vec<i64>, BfhlError> {
    let items = value
        .as_array()
        .ok_or_else(|| BfhlError::invalid(format!("{} expects an array", operation)))?;

    items
        .iter()
        .map(|item| {
            as_integer(item).ok_or_else(|| {
                BfhlError::invalid(format!("{} expects an array of integers", operation))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> Result<BfhlRequest, BfhlError> {
        BfhlRequest::from_value(body)
    }

    #[test]
    fn parses_each_operation() {
        assert_eq!(
            parse(json!({ "fibonacci": 7 })).unwrap(),
            BfhlRequest::Fibonacci(7)
        );
        assert_eq!(
            parse(json!({ "prime": [2, 4, 7] })).unwrap(),
            BfhlRequest::Prime(vec![2, 4, 7])
        );
        assert_eq!(
            parse(json!({ "lcm": [4, 6] })).unwrap(),
            BfhlRequest::Lcm(vec![4, 6])
        );
        assert_eq!(
            parse(json!({ "hcf": [] })).unwrap(),
            BfhlRequest::Hcf(vec![])
        );
        assert_eq!(
            parse(json!({ "AI": "Capital of France?" })).unwrap(),
            BfhlRequest::Ai("Capital of France?".to_string())
        );
    }

    #[test]
    fn rejects_wrong_key_count() {
        assert!(parse(json!({})).is_err());
        assert!(parse(json!({ "fibonacci": 3, "prime": [2] })).is_err());
    }

    #[test]
    fn rejects_unknown_and_miscased_keys() {
        assert!(parse(json!({ "factorial": 3 })).is_err());
        assert!(parse(json!({ "ai": "hello" })).is_err());
        assert!(parse(json!({ "Fibonacci": 3 })).is_err());
    }

    #[test]
    fn rejects_non_object_bodies() {
        assert!(parse(json!([1, 2, 3])).is_err());
        assert!(parse(json!("fibonacci")).is_err());
        assert!(parse(Value::Null).is_err());
    }

    #[test]
    fn fibonacci_requires_non_negative_integer() {
        assert!(parse(json!({ "fibonacci": -1 })).is_err());
        assert!(parse(json!({ "fibonacci": 2.5 })).is_err());
        assert!(parse(json!({ "fibonacci": "5" })).is_err());
        assert!(parse(json!({ "fibonacci": [5] })).is_err());
        assert_eq!(
            parse(json!({ "fibonacci": 5.0 })).unwrap(),
            BfhlRequest::Fibonacci(5)
        );
    }

    #[test]
    fn lists_require_integer_elements() {
        assert!(parse(json!({ "prime": 7 })).is_err());
        assert!(parse(json!({ "lcm": [1, "2"] })).is_err());
        assert!(parse(json!({ "hcf": [1.5, 3] })).is_err());
        assert!(parse(json!({ "prime": [2, null] })).is_err());
        assert_eq!(
            parse(json!({ "prime": [-3, 0, 11] })).unwrap(),
            BfhlRequest::Prime(vec![-3, 0, 11])
        );
    }

    #[test]
    fn ai_requires_non_blank_string() {
        assert!(parse(json!({ "AI": 42 })).is_err());
        assert!(parse(json!({ "AI": "   " })).is_err());
    }

    #[test]
    fn operation_keys_round_trip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_key(op.key()), Some(op));
        }
        assert_eq!(Operation::Ai.to_string(), "AI");
    }
}
