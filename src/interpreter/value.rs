use std::cmp::Ordering;
use std::fmt;

use crate::interpreter::{Procedure, RuntimeError};
use crate::runtime_error;

#[derive(Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
    // result of a loop that never ran, of `print`, of a missing argument
    Undefined,

    Procedure(Procedure),
}

impl std::ops::Add for Value {
    type Output = Result<Value, RuntimeError>;

    // integer results that leave the i64 range are promoted to floats
    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Value::Integer(a), Value::Integer(b)) => match a.checked_add(b) {
                Some(n) => Ok(Value::Integer(n)),
                None => Ok(Value::Float(a as f64 + b as f64)),
            },
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
            (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(a as f64 + b)),
            (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a + b as f64)),
            (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
            (a, b) => runtime_error!(InvalidArguments, "Cannot `+` {:?} and {:?}", a, b),
        }
    }
}

impl std::ops::Sub for Value {
    type Output = Result<Value, RuntimeError>;

    fn sub(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Value::Integer(a), Value::Integer(b)) => match a.checked_sub(b) {
                Some(n) => Ok(Value::Integer(n)),
                None => Ok(Value::Float(a as f64 - b as f64)),
            },
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a - b)),
            (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(a as f64 - b)),
            (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a - b as f64)),
            (a, b) => runtime_error!(InvalidArguments, "Cannot `-` {:?} and {:?}", a, b),
        }
    }
}

impl std::ops::Mul for Value {
    type Output = Result<Value, RuntimeError>;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Value::Integer(a), Value::Integer(b)) => match a.checked_mul(b) {
                Some(n) => Ok(Value::Integer(n)),
                None => Ok(Value::Float(a as f64 * b as f64)),
            },
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a * b)),
            (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(a as f64 * b)),
            (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a * b as f64)),
            (a, b) => runtime_error!(InvalidArguments, "Cannot `*` {:?} and {:?}", a, b),
        }
    }
}

impl std::ops::Div for Value {
    type Output = Result<Value, RuntimeError>;

    fn div(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            // exact integer quotients stay integers, everything else is float division
            (Value::Integer(a), Value::Integer(b)) if b != 0 && a.checked_rem(b) == Some(0) => Ok(Value::Integer(a / b)),
            (Value::Integer(a), Value::Integer(b)) => Ok(Value::Float(a as f64 / b as f64)),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a / b)),
            (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(a as f64 / b)),
            (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a / b as f64)),
            (a, b) => runtime_error!(InvalidArguments, "Cannot `/` {:?} and {:?}", a, b),
        }
    }
}

impl std::ops::Neg for Value {
    type Output = Result<Value, RuntimeError>;

    fn neg(self) -> Self::Output {
        match self {
            Value::Integer(a) => match a.checked_neg() {
                Some(n) => Ok(Value::Integer(n)),
                None => Ok(Value::Float(-(a as f64))),
            },
            Value::Float(a) => Ok(Value::Float(-a)),
            x => runtime_error!(InvalidArguments, "Cannot `-` {:?}", x),
        }
    }
}

impl Value {
    /// Only `false` is falsy; `0`, `""` and `null` all take the consequent branch.
    pub fn is_truthy(&self) -> bool { !matches!(self, Value::Boolean(false)) }

    /// Ordering for `<`, `<=`, `>`, `>=`: numbers with numbers, strings with strings.
    pub fn compare(&self, other: &Value) -> Result<Ordering, RuntimeError> {
        let ordering = match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => runtime_error!(InvalidArguments, "Cannot compare {:?} and {:?}", self, other),
            },
        };
        // NaN never orders; every comparison with it is false
        ordering.ok_or_else(|| RuntimeError::InvalidArguments(format!("Cannot order {:?} and {:?}", self, other)))
    }

    /// Value equality as `=` sees it. Procedures are equal only to themselves.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
            (Value::Procedure(a), Value::Procedure(b)) => a.same(b),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Integer(n) => Some(n as f64),
            Value::Float(n) => Some(n),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Integer(n) => serde_json::Value::from(*n),
            // non-finite floats have no JSON number and come out as null
            Value::Float(n) => serde_json::Value::from(*n),
            Value::String(s) => serde_json::Value::from(s.as_str()),
            Value::Boolean(b) => serde_json::Value::from(*b),
            Value::Null | Value::Undefined => serde_json::Value::Null,
            Value::Procedure(p) => serde_json::Value::from(format!("{:?}", p)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Value::Integer(val) => write!(f, "{}", val),
            Value::Float(val) if val.is_nan() => write!(f, "NaN"),
            Value::Float(val) if val.is_infinite() => write!(f, "{}Infinity", if val < 0.0 { "-" } else { "" }),
            Value::Float(val) => write!(f, "{}", val),
            Value::String(ref val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
            Value::Null => write!(f, "null"),
            Value::Undefined => write!(f, "undefined"),
            Value::Procedure(ref p) => write!(f, "{:?}", p),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Value::String(ref val) => write!(f, "\"{}\"", val),
            _ => write!(f, "{}", self),
        }
    }
}
