use phf::phf_map;

use crate::interpreter::expr::{is_identifier, string_literal};
use crate::interpreter::{Expr, Value};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum SpecialForm {
    Var,
    Begin,
    Set,
    If,
    While,
    Def,
    Lambda,
    Switch,
    Decrement,
    Increment,
    For,
}

pub static SPECIAL_FORMS: phf::Map<&'static str, SpecialForm> = phf_map! {
    "var" => SpecialForm::Var,
    "begin" => SpecialForm::Begin,
    "set" => SpecialForm::Set,
    "if" => SpecialForm::If,
    "while" => SpecialForm::While,
    "def" => SpecialForm::Def,
    "lambda" => SpecialForm::Lambda,
    "switch" => SpecialForm::Switch,
    "--" => SpecialForm::Decrement,
    "++" => SpecialForm::Increment,
    "for" => SpecialForm::For,
};

impl SpecialForm {
    pub fn tag(self) -> &'static str {
        match self {
            SpecialForm::Var => "var",
            SpecialForm::Begin => "begin",
            SpecialForm::Set => "set",
            SpecialForm::If => "if",
            SpecialForm::While => "while",
            SpecialForm::Def => "def",
            SpecialForm::Lambda => "lambda",
            SpecialForm::Switch => "switch",
            SpecialForm::Decrement => "--",
            SpecialForm::Increment => "++",
            SpecialForm::For => "for",
        }
    }
}

/// What an expression is, by shape alone.
#[derive(Debug)]
pub enum Form<'a> {
    Literal(Value),
    Identifier(&'a str),
    Special(SpecialForm, &'a [Expr]),
    Application(&'a Expr, &'a [Expr]),
    Unrecognized,
}

impl<'a> Form<'a> {
    pub fn classify(expr: &'a Expr) -> Form<'a> {
        match expr {
            Expr::Integer(n) => Form::Literal(Value::Integer(*n)),
            Expr::Float(n) => Form::Literal(Value::Float(*n)),
            Expr::Atom(token) => match string_literal(token) {
                Some(s) => Form::Literal(Value::String(s.to_string())),
                None if is_identifier(token) => Form::Identifier(token.as_str()),
                None => Form::Unrecognized,
            },
            Expr::List(items) => match items.split_first() {
                Some((head, rest)) => match head {
                    Expr::Atom(tag) => match SPECIAL_FORMS.get(tag.as_str()) {
                        Some(sf) => Form::Special(*sf, rest),
                        None => Form::Application(head, rest),
                    },
                    _ => Form::Application(head, rest),
                },
                None => Form::Unrecognized,
            },
        }
    }
}
