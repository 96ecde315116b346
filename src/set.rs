use std::io::Write;
use std::path::Path;
use std::sync::{Arc, LazyLock};
use std::time::Instant;

use dashmap::DashMap;
use log::{debug, trace};

use crate::Result;
use crate::error::TemplateError;
use crate::loader;
use crate::tpl::template::into_string;
use crate::tpl::{Renderer, SymTab, Template};
use crate::value::{self, ToValue, Value};

/// The process-wide set. `template_assets!` registers into it.
pub static TEMPLATES: LazyLock<Set> = LazyLock::new(Set::new);

/// A set of templates which can include each other.
///
/// A `Set` is meant to be shared between threads. Templates are frozen when
/// they are added: there is no way to get a mutable template back out, so
/// concurrent renders only ever need shared access. Replacing or deleting a
/// template does not disturb renders that already hold it.
#[derive(Default)]
pub struct Set {
    templates: DashMap<String, Arc<Template>>,
}

impl Set {
    /// Creates a new, empty `Set`.
    pub fn new() -> Self {
        Self {
            templates: DashMap::new(),
        }
    }

    /// Adds a template under its name, replacing any template with that name.
    pub fn add(&self, template: Template) {
        let name = template.name().to_string();
        if self.templates.insert(name.clone(), Arc::new(template)).is_some() {
            debug!("Template replaced: name={:?}", name);
        } else {
            debug!("Template added: name={:?}", name);
        }
    }

    /// Removes a template. Returns whether it was present.
    pub fn delete(&self, name: &str) -> bool {
        let removed = self.templates.remove(name).is_some();
        if removed {
            debug!("Template deleted: name={:?}", name);
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Names of all templates, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.templates.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Looks up a template for rendering. Not exported: templates in a set
    /// are only ever dereferenced by the set itself.
    pub(crate) fn template(&self, name: &str) -> Option<Arc<Template>> {
        self.templates.get(name).map(|t| t.value().clone())
    }

    /// Executes the template `name` with `data`, writing the result to `wr`.
    ///
    /// # Errors
    /// `TemplateNotFound` if no such template was added, `Io` if writing fails.
    /// On a write error the sink holds partial output.
    pub fn execute<W: Write + ?Sized>(&self, wr: &mut W, name: &str, data: &Value) -> Result<()> {
        let template = self.require(name)?;
        self.execute_template(wr, &template, data)
    }

    /// Executes the template `name` with a JSON object. The template is
    /// resolved before the payload is decoded.
    pub fn execute_json<W: Write + ?Sized>(&self, wr: &mut W, name: &str, json: &str) -> Result<()> {
        let template = self.require(name)?;
        let data = value::from_json(json)?;
        self.execute_template(wr, &template, &data)
    }

    fn require(&self, name: &str) -> Result<Arc<Template>> {
        self.template(name)
            .ok_or_else(|| TemplateError::TemplateNotFound(name.to_string()))
    }

    fn execute_template<W: Write + ?Sized>(
        &self,
        wr: &mut W,
        template: &Template,
        data: &Value,
    ) -> Result<()> {
        let start = Instant::now();
        let result = Renderer::new(Some(self), wr).render(template.nodes(), &SymTab::new(data));
        trace!(
            "Execute: template={:?}, elapsed={}us, ok={}",
            template.name(),
            start.elapsed().as_micros(),
            result.is_ok()
        );
        result
    }

    /// Renders the template `name` into a string.
    pub fn render<T: ToValue + ?Sized>(&self, name: &str, data: &T) -> Result<String> {
        let mut buf = Vec::new();
        self.execute(&mut buf, name, &data.to_value())?;
        into_string(buf)
    }

    /// Parses and adds every file matching a glob pattern, each named after
    /// its file. Returns the number of templates added.
    ///
    /// # Arguments
    /// * `pattern` - A glob pattern (e.g., "templates/**/*.html").
    pub fn load(&self, pattern: &str) -> Result<usize> {
        loader::load(self, pattern)
    }

    /// Parses and adds a single template file.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<()> {
        loader::load_file(self, path.as_ref())
    }

    /// Parses and adds embedded `(path, text)` pairs, each named after its path.
    pub fn load_assets(&self, assets: &[(&str, &str)]) -> Result<()> {
        loader::load_assets(self, assets)
    }
}
