//! A small logic-less template engine.
//!
//! Templates are compiled once with [`Template::parse`] and rendered any
//! number of times against a [`Value`]. Templates added to a [`Set`] can
//! include each other with `{{>name}}`.
//!
//! ```
//! use stem::{Set, Template};
//!
//! let set = Set::new();
//! set.add(Template::parse_named("row", "<{{*}}>").unwrap());
//! set.add(Template::parse_named("list", "{{#items}}{{>row}}{{/items}}").unwrap());
//!
//! let data = stem::from_json(r#"{"items": [1, 2]}"#).unwrap();
//! assert_eq!(set.render("list", &data).unwrap(), "<1><2>");
//! ```

pub mod error;
pub mod loader;
pub mod set;
pub mod tpl;
pub mod value;

#[doc(hidden)]
pub use ctor;
pub use stem_macros::{Data, template_assets};

pub use error::TemplateError;
pub use set::{Set, TEMPLATES};
pub use tpl::{DEPTH_LIMIT, Filter, INCLUDE_DEPTH_LIMIT, Node, Template, template_name};
pub use value::{Kind, ToValue, Value, from_json, string_equal, to_value};

pub type Result<T> = std::result::Result<T, TemplateError>;
