/// Destructures the operands of a form (everything after its tag) by shape.
///
/// Evaluates to `Ok(body)` when the slice has the requested shape and to
/// `Err(RuntimeError::MalformedForm)` otherwise, so callers finish with `?`.
///
/// ```ignore
/// match_form!(rest, "set", [name, value] => (name, value))?;
/// match_form!(rest, "for", [decl, cond, step; body] => ..)?; // body: &[Expr], may be empty
/// ```
#[macro_export]
macro_rules! match_form {
    // fixed prefix followed by the remaining operands
    ($rest:expr, $tag:expr, [$($x:ident),+ ; $xs:ident] => $body:expr) => {
        match $rest {
            [$($x),+, $xs @ ..] => Ok($body),
            other => Err($crate::interpreter::RuntimeError::MalformedForm(format!(
                "({} ...) expects at least [{}], got {} operand(s)",
                $tag,
                stringify!($($x),+),
                other.len()
            ))),
        }
    };

    // exactly these operands
    ($rest:expr, $tag:expr, [$($x:ident),+] => $body:expr) => {
        match $rest {
            [$($x),+] => Ok($body),
            other => Err($crate::interpreter::RuntimeError::MalformedForm(format!(
                "({} ...) expects [{}], got {} operand(s)",
                $tag,
                stringify!($($x),+),
                other.len()
            ))),
        }
    };
}
