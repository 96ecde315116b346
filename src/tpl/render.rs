use crate::Result;
use crate::error::TemplateError;
use crate::set::Set;
use crate::tpl::ast::Node;
use crate::tpl::symtab::SymTab;
use log::debug;
use std::io::Write;

/// Maximum include nesting while rendering. Stops mutually including
/// templates from recursing without bound.
pub const INCLUDE_DEPTH_LIMIT: usize = 32;

/// Walks a tree and writes the output straight to the sink.
pub(crate) struct Renderer<'r, W: Write + ?Sized> {
    /// Set used to resolve `{{>name}}`; includes render nothing without one.
    set: Option<&'r Set>,
    out: &'r mut W,
    include_depth: usize,
}

impl<'r, W: Write + ?Sized> Renderer<'r, W> {
    pub fn new(set: Option<&'r Set>, out: &'r mut W) -> Self {
        Self {
            set,
            out,
            include_depth: 0,
        }
    }

    /// Renders `nodes` against `sym`. The first failed write aborts the
    /// render; whatever was already written stays in the sink.
    pub fn render(&mut self, nodes: &[Node], sym: &SymTab<'_>) -> Result<()> {
        for node in nodes {
            match node {
                Node::Text(text) => self.out.write_all(text.as_bytes())?,
                Node::Print { name } => self.out.write_all(sym.print(name).as_bytes())?,
                Node::Array { name, nodes } => {
                    let Some(list) = sym.array(name) else {
                        continue;
                    };
                    for elem in list {
                        match elem.as_map() {
                            Some(scope) => self.render(nodes, &sym.enter_object(scope))?,
                            None => self.render(nodes, &sym.enter_array_elem(elem))?,
                        }
                    }
                }
                Node::Ifdef { name, nodes } => {
                    if sym.ifdef(name) {
                        self.render(nodes, sym)?;
                    }
                }
                Node::Ifndef { name, nodes } => {
                    if sym.ifndef(name) {
                        self.render(nodes, sym)?;
                    }
                }
                Node::Object { name, nodes } => {
                    if let Some(scope) = sym.object(name) {
                        self.render(nodes, &sym.enter_object(scope))?;
                    }
                }
                Node::Include { name } => self.include(name, sym)?,
            }
        }
        Ok(())
    }

    /// Renders the template registered as `name` with the caller's scopes.
    fn include(&mut self, name: &str, sym: &SymTab<'_>) -> Result<()> {
        let Some(set) = self.set else {
            return Ok(());
        };
        let Some(template) = set.template(name) else {
            debug!("Include skipped: template {:?} is not in the set", name);
            return Ok(());
        };
        if self.include_depth >= INCLUDE_DEPTH_LIMIT {
            return Err(TemplateError::IncludeDepthExceeded {
                name: name.to_string(),
                limit: INCLUDE_DEPTH_LIMIT,
            });
        }

        self.include_depth += 1;
        let result = self.render(template.nodes(), sym);
        self.include_depth -= 1;
        result
    }
}
