use crate::Result;
use crate::error::TemplateError;
use crate::tpl::ast::Node;
use crate::tpl::filter::{self, Filter};
use crate::tpl::parser;
use crate::tpl::render::Renderer;
use crate::tpl::symtab::SymTab;
use crate::value::{self, ToValue, Value};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// A compiled template ready to be combined with data.
///
/// A `Template` can be renamed and filtered while the caller owns it. Once it
/// is added to a [`Set`](crate::Set) it is frozen and shared between
/// concurrent renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    name: String,
    tree: Vec<Node>,
}

impl Template {
    /// Parses an unnamed template.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_named("", text)
    }

    /// Parses a template; `name` is used in errors and as the key in a set.
    pub fn parse_named(name: impl Into<String>, text: &str) -> Result<Self> {
        let name = name.into();
        let tree = parser::parse(&name, text)?;
        Ok(Self { name, tree })
    }

    /// Parses a template file, named after the file (see [`template_name`]).
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            TemplateError::LoadError(format!("couldn't open file {:?}: {}", path.display(), e))
        })?;
        Self::parse_named(template_name(path), &text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the name the template can be included by in a set.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    pub fn nodes(&self) -> &[Node] {
        &self.tree
    }

    /// Filters every literal in the template. Run once, before rendering.
    pub fn filter(&mut self, flags: Filter) {
        filter::filter(&mut self.tree, flags);
    }

    pub fn filtered(mut self, flags: Filter) -> Self {
        self.filter(flags);
        self
    }

    /// Combines the template with `data` and writes the result to `wr`.
    /// Includes render nothing outside of a set.
    pub fn execute<W: Write + ?Sized>(&self, wr: &mut W, data: &Value) -> Result<()> {
        Renderer::new(None, wr).render(&self.tree, &SymTab::new(data))
    }

    /// Combines the template with a JSON object and writes the result to `wr`.
    pub fn execute_json<W: Write + ?Sized>(&self, wr: &mut W, json: &str) -> Result<()> {
        let data = value::from_json(json)?;
        self.execute(wr, &data)
    }

    /// Renders the template into a string.
    pub fn render<T: ToValue + ?Sized>(&self, data: &T) -> Result<String> {
        let mut buf = Vec::new();
        self.execute(&mut buf, &data.to_value())?;
        into_string(buf)
    }
}

/// Name of the template for the file at `path`: its final component.
pub fn template_name(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub(crate) fn into_string(buf: Vec<u8>) -> Result<String> {
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}
