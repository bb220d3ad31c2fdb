pub mod env;
pub mod error;
pub mod eval;
pub mod expr;
pub mod form_match;
pub mod output;
pub mod procedure;
pub mod special;
pub mod transform;
pub mod value;


use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

pub use crate::interpreter::env::Env;
pub use crate::interpreter::error::RuntimeError;
pub use crate::interpreter::expr::Expr;
pub use crate::interpreter::output::Output;
pub use crate::interpreter::procedure::{Closure, Procedure};
pub use crate::interpreter::value::Value;

/// One evaluation session: a global environment and the sink `print` writes to.
///
/// Sessions share nothing; two interpreters never see each other's definitions.
#[derive(Clone)]
pub struct Interpreter {
    root: Rc<RefCell<Env>>,
    output: Output,
}

impl Default for Interpreter {
    fn default() -> Self { Interpreter::new() }
}

impl Interpreter {
    pub fn new() -> Interpreter { Interpreter::with_output(Output::Stdout) }

    pub fn with_output(output: Output) -> Interpreter {
        Interpreter {
            root: Env::new_root(),
            output,
        }
    }

    pub fn global(&self) -> Rc<RefCell<Env>> { self.root.clone() }

    pub fn output(&self) -> &Output { &self.output }

    /// Evaluates one expression in the global environment. A top-level `begin` still
    /// opens its own block scope.
    pub fn eval(&self, expr: &Expr) -> Result<Value, RuntimeError> { self.eval_in(expr, self.root.clone()) }

    /// Evaluates a whole program: the body of a top-level `begin` runs directly in the
    /// global environment, so its definitions outlive the call.
    pub fn eval_global(&self, program: &Expr) -> Result<Value, RuntimeError> {
        debug!("eval_global / {}", program);
        self.eval_body(program, self.root.clone())
    }

    /// Parses a JSON syntax tree and evaluates it as a program.
    pub fn run_json(&self, src: &str) -> Result<Value, String> {
        let program = Expr::from_json(src).map_err(|e| format!("Invalid syntax tree: {}", e))?;
        self.eval_global(&program).map_err(|e| e.to_string())
    }
}
