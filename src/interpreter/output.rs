//! Where `print` writes.
//!
//! Enum dispatch between stdout and an in-memory buffer; the buffer lets tests and
//! embedders read back what a program printed.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, Default)]
pub enum Output {
    #[default]
    Stdout,
    Buffer(Rc<RefCell<String>>),
}

impl Output {
    pub fn buffer() -> Output { Output::Buffer(Rc::new(RefCell::new(String::new()))) }

    pub fn println(&self, line: &str) {
        match self {
            Output::Stdout => println!("{}", line),
            Output::Buffer(buf) => {
                let mut buf = buf.borrow_mut();
                buf.push_str(line);
                buf.push('\n');
            }
        }
    }

    /// Everything captured so far. Always empty for stdout.
    pub fn captured(&self) -> String {
        match self {
            Output::Stdout => String::new(),
            Output::Buffer(buf) => buf.borrow().clone(),
        }
    }

    pub fn clear(&self) {
        if let Output::Buffer(buf) = self {
            buf.borrow_mut().clear();
        }
    }
}
