pub mod ast;
pub mod filter;
mod lexer;
mod parser;
mod render;
mod symtab;
pub mod template;

pub use ast::Node;
pub use filter::Filter;
pub use lexer::{LEFT_DELIMITER, RIGHT_DELIMITER};
pub use parser::DEPTH_LIMIT;
pub(crate) use render::Renderer;
pub use render::INCLUDE_DEPTH_LIMIT;
pub(crate) use symtab::SymTab;
pub use template::{Template, template_name};
