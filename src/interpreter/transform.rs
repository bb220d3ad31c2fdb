//! Desugaring of surface forms into core forms.
//!
//! Every rewrite takes the operands of a form (everything after its tag) and returns a new
//! tree; none of them evaluate anything.

use crate::interpreter::{Expr, RuntimeError};
use crate::match_form;

fn tagged(tag: &str, mut items: Vec<Expr>) -> Expr {
    items.insert(0, Expr::atom(tag));
    Expr::List(items)
}

/// `(def name (params…) body)` => `(var name (lambda (params…) body))`
pub fn def_to_var_lambda(rest: &[Expr]) -> Result<Expr, RuntimeError> {
    let (name, params, body) = match_form!(rest, "def", [name, params, body] => (name, params, body))?;
    Ok(tagged("var", vec![name.clone(), tagged("lambda", vec![params.clone(), body.clone()])]))
}

/// `(switch (c1 b1) (c2 b2) … (else e))` => `(if c1 b1 (if c2 b2 (… e)))`
///
/// Folds from the back: the `else` block is the innermost alternate.
pub fn switch_to_if(rest: &[Expr]) -> Result<Expr, RuntimeError> {
    let (last, cases) = match rest.split_last() {
        Some(split) => split,
        None => return Err(RuntimeError::MalformedForm("(switch ...) needs at least an else case".into())),
    };

    let (else_tag, else_block) = switch_case(last)?;
    if *else_tag != Expr::atom("else") {
        return Err(RuntimeError::MalformedForm(format!("(switch ...) must end with an else case, got {}", last)));
    }

    cases.iter().rev().try_fold(else_block.clone(), |alternate, case| {
        let (cond, block) = switch_case(case)?;
        if *cond == Expr::atom("else") {
            return Err(RuntimeError::MalformedForm("else must be the last case of (switch ...)".into()));
        }
        Ok(tagged("if", vec![cond.clone(), block.clone(), alternate]))
    })
}

fn switch_case(case: &Expr) -> Result<(&Expr, &Expr), RuntimeError> {
    match_form!(case.as_list("switch case")?, "switch case", [cond, block] => (cond, block))
}

/// `(-- name)` => `(set name (- name 1))`
pub fn dec_to_set(rest: &[Expr]) -> Result<Expr, RuntimeError> { step_to_set("--", "-", rest) }

/// `(++ name)` => `(set name (+ name 1))`
pub fn inc_to_set(rest: &[Expr]) -> Result<Expr, RuntimeError> { step_to_set("++", "+", rest) }

fn step_to_set(tag: &str, op: &str, rest: &[Expr]) -> Result<Expr, RuntimeError> {
    let name = match_form!(rest, tag, [name] => name)?;
    name.as_name(tag)?;
    Ok(tagged("set", vec![name.clone(), tagged(op, vec![name.clone(), Expr::Integer(1)])]))
}

/// `(for decl cond step body…)` => `(begin decl (while cond (begin body… step)))`
///
/// The step runs after the body on every iteration, the first included.
pub fn for_to_while(rest: &[Expr]) -> Result<Expr, RuntimeError> {
    let (decl, cond, step, body) = match_form!(rest, "for", [decl, cond, step; body] => (decl, cond, step, body))?;
    let mut block: Vec<Expr> = body.to_vec();
    block.push(step.clone());
    Ok(tagged("begin", vec![decl.clone(), tagged("while", vec![cond.clone(), tagged("begin", block)])]))
}
