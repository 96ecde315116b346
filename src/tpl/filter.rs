use crate::tpl::ast::Node;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

bitflags::bitflags! {
    /// Whitespace normalization applied to literal text after parsing.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Filter: u8 {
        /// Collapse consecutive newlines into one. Removes the blank lines
        /// left behind by tags written on their own line.
        const NO_BLANK_LINES = 1 << 0;
        /// Remove spaces and tabs at the start of a line.
        const TRIM_LEFT_SPACE = 1 << 1;
        /// Remove spaces and tabs at the end of a line.
        const TRIM_RIGHT_SPACE = 1 << 2;
    }
}

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid blank lines regex"));
static LEFT_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]+").expect("valid left space regex"));
static RIGHT_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\n").expect("valid right space regex"));

/// Applies `flags` to every text node of the tree. Each text node is
/// filtered on its own, so whitespace around a tag is never joined.
pub(crate) fn filter(nodes: &mut [Node], flags: Filter) {
    for node in nodes {
        match node {
            Node::Text(text) => filter_text(text, flags),
            _ => {
                if let Some(children) = node.children_mut() {
                    filter(children, flags);
                }
            }
        }
    }
}

fn filter_text(text: &mut String, flags: Filter) {
    let passes = [
        (Filter::TRIM_LEFT_SPACE, &*LEFT_SPACE),
        (Filter::TRIM_RIGHT_SPACE, &*RIGHT_SPACE),
        (Filter::NO_BLANK_LINES, &*BLANK_LINES),
    ];
    for (flag, re) in passes {
        if !flags.contains(flag) {
            continue;
        }
        let replaced = match re.replace_all(text, "\n") {
            Cow::Owned(replaced) => replaced,
            Cow::Borrowed(_) => continue,
        };
        *text = replaced;
    }
}
