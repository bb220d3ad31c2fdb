use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::interpreter::env::Env;
use crate::interpreter::{Expr, Output, RuntimeError, Value};
use crate::runtime_error;

/// Names bound to native operations in every global environment.
pub const NATIVE_NAMES: [&str; 10] = ["+", "-", "*", "/", ">", ">=", "<", "<=", "=", "print"];

#[derive(Clone)]
pub enum Procedure {
    Native(&'static str),
    Closure(Rc<Closure>),
}

/// A `lambda` value. `env` aliases the scope the lambda was evaluated in.
pub struct Closure {
    pub params: Vec<String>,
    pub body: Expr,
    pub env: Rc<RefCell<Env>>,
}

impl Procedure {
    /// Identity: the same native, or the very same closure object.
    pub fn same(&self, other: &Procedure) -> bool {
        match (self, other) {
            (Procedure::Native(a), Procedure::Native(b)) => a == b,
            (Procedure::Closure(a), Procedure::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Procedure::Closure(_) => write!(f, "#<procedure>"),
            Procedure::Native(ref s) => write!(f, "#<procedure:{}>", s),
        }
    }
}

fn binary(name: &str, args: Vec<Value>) -> Result<(Value, Value), RuntimeError> {
    if args.len() != 2 {
        runtime_error!(InvalidArguments, "Must supply exactly two arguments to {}: {:?}", name, args);
    }
    let mut iter = args.into_iter();
    match (iter.next(), iter.next()) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => runtime_error!(InvalidArguments, "Must supply exactly two arguments to {}", name),
    }
}

fn ordering(name: &str, args: Vec<Value>, accept: fn(Ordering) -> bool) -> Result<Value, RuntimeError> {
    let (l, r) = binary(name, args)?;
    Ok(Value::Boolean(accept(l.compare(&r)?)))
}

pub fn primitive(f: &'static str, args: Vec<Value>, out: &Output) -> Result<Value, RuntimeError> {
    match f {
        "+" => binary(f, args).and_then(|(l, r)| l + r),
        "*" => binary(f, args).and_then(|(l, r)| l * r),
        "/" => binary(f, args).and_then(|(l, r)| l / r),
        "-" => match args.len() {
            1 => {
                let mut iter = args.into_iter();
                match iter.next() {
                    Some(val) => -val,
                    None => runtime_error!(InvalidArguments, "`-` requires one or two arguments"),
                }
            }
            _ => binary(f, args).and_then(|(l, r)| l - r),
        },
        ">" => ordering(f, args, Ordering::is_gt),
        ">=" => ordering(f, args, Ordering::is_ge),
        "<" => ordering(f, args, Ordering::is_lt),
        "<=" => ordering(f, args, Ordering::is_le),
        "=" => binary(f, args).map(|(l, r)| Value::Boolean(l.equals(&r))),
        "print" => {
            let strs: Vec<String> = args.iter().map(|v| v.to_string()).collect();
            out.println(&strs.join(" "));
            Ok(Value::Undefined)
        }
        _ => runtime_error!(NameResolution, "Unknown primitive: {:?}", f),
    }
}
