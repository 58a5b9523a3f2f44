/// Core module for style auditing
///
/// This module contains the pattern definitions shared by both tools, the
/// scanner that reports unwrapped style declarations, and the fixer with its
/// import and wrapping passes.

pub mod fixer;
pub mod imports;
pub mod lexer;
pub mod patterns;
pub mod scanner;
pub mod wrapper;
