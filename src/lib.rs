#![allow(clippy::module_inception)]

use std::rc::Rc;

pub mod ast;
pub mod codegen;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A byte offset into a named source file.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line containing `position` in `source`.
///
/// Returns the 1-based line number, the line's text and the offset of
/// `position` within that line. Used by the driver to render diagnostics.
pub fn get_line_at_offset(source: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(source.len().saturating_sub(1));

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return (line_number, line.to_string(), line_pos);
        }

        start = end;
        line_number += 1;
    }

    (line_number, String::new(), 0)
}
