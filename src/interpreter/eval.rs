use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::interpreter::procedure::{primitive, Closure};
use crate::interpreter::special::{Form, SpecialForm};
use crate::interpreter::{transform, Env, Expr, Interpreter, Procedure, RuntimeError, Value};
use crate::{match_form, runtime_error};

impl Interpreter {
    /// Evaluates `expr` in `env`.
    ///
    /// Recursion depth follows the nesting of the program and of its calls; only the
    /// loop forms iterate.
    pub fn eval_in(&self, expr: &Expr, env: Rc<RefCell<Env>>) -> Result<Value, RuntimeError> {
        trace!("eval / {}", expr);
        match Form::classify(expr) {
            Form::Literal(val) => Ok(val),
            Form::Identifier(name) => Env::lookup(&env, name),
            Form::Special(sf, rest) => self.eval_special(sf, rest, env),
            Form::Application(head, args) => self.eval_application(head, args, env),
            Form::Unrecognized => runtime_error!(UnrecognizedForm, "Unrecognized expression: {}", expr),
        }
    }

    /// A body is evaluated in `env` itself when it is a `begin` block, otherwise as one expression.
    pub fn eval_body(&self, body: &Expr, env: Rc<RefCell<Env>>) -> Result<Value, RuntimeError> {
        match (body.head_tag(), body) {
            (Some("begin"), Expr::List(items)) => self.eval_block(&items[1..], env),
            _ => self.eval_in(body, env),
        }
    }

    fn eval_block(&self, exprs: &[Expr], env: Rc<RefCell<Env>>) -> Result<Value, RuntimeError> {
        let (last, init) = match exprs.split_last() {
            Some(split) => split,
            None => runtime_error!(MalformedForm, "(begin) needs at least one expression"),
        };
        for expr in init {
            self.eval_in(expr, env.clone())?;
        }
        self.eval_in(last, env)
    }

    fn eval_special(&self, sf: SpecialForm, rest: &[Expr], env: Rc<RefCell<Env>>) -> Result<Value, RuntimeError> {
        match sf {
            SpecialForm::Var => {
                let (name, value) = match_form!(rest, "var", [name, value] => (name, value))?;
                let name = name.as_name("var")?;
                let val = self.eval_in(value, env.clone())?;
                Ok(env.borrow_mut().define(name.to_string(), val))
            }
            SpecialForm::Begin => self.eval_block(rest, Env::new_child(env)),
            SpecialForm::Set => {
                let (name, value) = match_form!(rest, "set", [name, value] => (name, value))?;
                let name = name.as_name("set")?;
                let val = self.eval_in(value, env.clone())?;
                Env::assign(&env, name, val)
            }
            SpecialForm::If => {
                let (cond, consequent, alternate) = match_form!(rest, "if", [cond, consequent, alternate] => (cond, consequent, alternate))?;
                match self.eval_in(cond, env.clone())?.is_truthy() {
                    true => self.eval_in(consequent, env),
                    false => self.eval_in(alternate, env),
                }
            }
            SpecialForm::While => {
                let (cond, body) = match_form!(rest, "while", [cond, body] => (cond, body))?;
                let mut result = Value::Undefined;
                while self.eval_in(cond, env.clone())?.is_truthy() {
                    result = self.eval_in(body, env.clone())?;
                }
                Ok(result)
            }
            SpecialForm::Lambda => {
                let (params, body) = match_form!(rest, "lambda", [params, body] => (params, body))?;
                let params = params
                    .as_list("lambda parameters")?
                    .iter()
                    .map(|p| p.as_name("lambda parameter").map(String::from))
                    .collect::<Result<Vec<String>, RuntimeError>>()?;
                let closure = Closure {
                    params,
                    body: body.clone(),
                    env,
                };
                Ok(Value::Procedure(Procedure::Closure(Rc::new(closure))))
            }
            SpecialForm::Def | SpecialForm::Switch | SpecialForm::Decrement | SpecialForm::Increment | SpecialForm::For => {
                let core = desugar(sf, rest)?;
                debug!("desugar / {} => {}", sf.tag(), core);
                self.eval_in(&core, env)
            }
        }
    }

    fn eval_application(&self, head: &Expr, args: &[Expr], env: Rc<RefCell<Env>>) -> Result<Value, RuntimeError> {
        let f = self.eval_in(head, env.clone())?;
        let args = args
            .iter()
            .map(|arg| self.eval_in(arg, env.clone()))
            .collect::<Result<Vec<Value>, RuntimeError>>()?;
        self.apply(f, args)
    }

    pub fn apply(&self, f: Value, args: Vec<Value>) -> Result<Value, RuntimeError> {
        match f {
            Value::Procedure(Procedure::Native(name)) => primitive(name, args, &self.output),
            Value::Procedure(Procedure::Closure(closure)) => {
                debug!("apply / {} params={:?} args={:?}", closure.body, closure.params, args);

                // activation environment: parameters bound positionally, missing ones are undefined
                let activation = Env::new_child(closure.env.clone());
                let mut args = args.into_iter();
                for name in &closure.params {
                    let value = args.next().unwrap_or(Value::Undefined);
                    activation.borrow_mut().define(name.clone(), value);
                }

                self.eval_body(&closure.body, activation)
            }
            _ => runtime_error!(NotCallable, "Don't know how to apply: {:?}", f),
        }
    }
}

fn desugar(sf: SpecialForm, rest: &[Expr]) -> Result<Expr, RuntimeError> {
    match sf {
        SpecialForm::Def => transform::def_to_var_lambda(rest),
        SpecialForm::Switch => transform::switch_to_if(rest),
        SpecialForm::Decrement => transform::dec_to_set(rest),
        SpecialForm::Increment => transform::inc_to_set(rest),
        SpecialForm::For => transform::for_to_while(rest),
        _ => runtime_error!(MalformedForm, "({} ...) is not a sugar form", sf.tag()),
    }
}
