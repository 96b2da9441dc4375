pub(crate) mod ast;
pub(crate) mod bind;
pub(crate) mod builtins;
pub(crate) mod bytecode;
pub(crate) mod closure;
pub mod error;
pub(crate) mod lexer;
pub(crate) mod lower;
pub(crate) mod parser;
pub(crate) mod vm;
