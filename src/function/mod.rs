pub mod backend;
pub mod compiler;
