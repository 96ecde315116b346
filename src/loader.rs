use crate::Result;
use crate::error::TemplateError;
use crate::set::Set;
use crate::tpl::{Template, template_name};
use glob::glob;
use log::{debug, error};
use std::path::Path;

/// Loads every file matching `pattern` into `set`.
pub fn load(set: &Set, pattern: &str) -> Result<usize> {
    let paths = glob(pattern)
        .map_err(|e| TemplateError::LoadError(format!("invalid glob pattern {:?}: {}", pattern, e)))?;
    let mut count = 0;
    for entry in paths {
        let path = entry.map_err(|e| {
            TemplateError::LoadError(format!("couldn't read path for {:?}: {}", pattern, e))
        })?;
        if path.is_file() {
            load_file(set, &path)?;
            count += 1;
        }
    }
    debug!("Templates loaded: pattern={:?}, count={}", pattern, count);
    Ok(count)
}

pub fn load_file(set: &Set, path: &Path) -> Result<()> {
    set.add(Template::parse_file(path)?);
    Ok(())
}

/// Loads embedded `(path, text)` pairs, typically produced by
/// `template_assets!`. Every pair is parsed before any is added, so a broken
/// asset leaves the set untouched.
pub fn load_assets(set: &Set, assets: &[(&str, &str)]) -> Result<()> {
    let templates = assets
        .iter()
        .map(|(path, text)| Template::parse_named(template_name(path), text))
        .collect::<Result<Vec<_>>>()
        .inspect_err(|e| error!("Template assets rejected: {}", e))?;
    let count = templates.len();
    for template in templates {
        set.add(template);
    }
    debug!("Template assets loaded: count={}", count);
    Ok(())
}
