#![cfg_attr(test, recursion_limit = "256")]

pub mod interpreter;

pub use crate::interpreter::{Env, Expr, Interpreter, Output, RuntimeError, Value};
