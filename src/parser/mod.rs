//! Parsers for SVG markup and path data

pub mod ast;
mod grammar;
pub mod lexer;
mod markup;

pub use ast::*;
pub use grammar::parse_path_data;
pub use markup::parse;
