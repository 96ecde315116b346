use crate::Result;
use crate::error::TemplateError;
use crate::tpl::ast::Node;
use crate::tpl::lexer::{Lexer, Token, TokenKind};

/// Maximum section nesting. Guards against pathological templates.
pub const DEPTH_LIMIT: usize = 32;

/// A recursive-descent parser over the token stream of a single template.
///
/// Every section tag (`{{#a}}`, `{{+a}}`, `{{-a}}`, `{{$a}}`) opens a new level of
/// recursion that collects children until the matching `{{/a}}`. Leaf tags
/// (`{{*a}}`, `{{>a}}`) and literal text become nodes directly.
struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    fn new(name: &'a str, src: &'a str) -> Self {
        Self {
            lexer: Lexer::new(name, src),
        }
    }

    /// Parses the whole template and returns the root-level nodes.
    fn parse(mut self) -> Result<Vec<Node>> {
        self.parse_nodes(None, 0)
    }

    /// Collects sibling nodes until the end tag matching `open`, or until the
    /// end of input when parsing the root level.
    fn parse_nodes(&mut self, open: Option<&Token<'a>>, depth: usize) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();
        loop {
            let Some(token) = self.lexer.next_token()? else {
                return match open {
                    Some(open) => Err(TemplateError::UnclosedScope {
                        name: self.name(),
                        line: open.line,
                        tag: open.text.to_string(),
                    }),
                    None => Ok(nodes),
                };
            };

            let node = match token.kind {
                TokenKind::End => return self.close(open, &token).map(|()| nodes),
                TokenKind::Array => Node::Array {
                    name: token.text.to_string(),
                    nodes: self.parse_section(&token, depth)?,
                },
                TokenKind::Ifdef => Node::Ifdef {
                    name: token.text.to_string(),
                    nodes: self.parse_section(&token, depth)?,
                },
                TokenKind::Ifndef => Node::Ifndef {
                    name: token.text.to_string(),
                    nodes: self.parse_section(&token, depth)?,
                },
                TokenKind::Object => Node::Object {
                    name: token.text.to_string(),
                    nodes: self.parse_section(&token, depth)?,
                },
                TokenKind::Include => Node::Include {
                    name: token.text.to_string(),
                },
                TokenKind::Print => Node::Print {
                    name: token.text.to_string(),
                },
                TokenKind::Text => Node::Text(token.text.to_string()),
            };
            nodes.push(node);
        }
    }

    /// Parses the children of the section opened by `open`.
    fn parse_section(&mut self, open: &Token<'a>, depth: usize) -> Result<Vec<Node>> {
        let depth = depth + 1;
        if depth > DEPTH_LIMIT {
            return Err(TemplateError::DepthLimitExceeded {
                name: self.name(),
                line: open.line,
                limit: DEPTH_LIMIT,
            });
        }
        self.parse_nodes(Some(open), depth)
    }

    /// Checks an end tag against the innermost open section.
    fn close(&self, open: Option<&Token<'a>>, end: &Token<'a>) -> Result<()> {
        match open {
            None => Err(TemplateError::UnopenedScope {
                name: self.name(),
                line: end.line,
                tag: end.text.to_string(),
            }),
            Some(open) if open.text != end.text => Err(TemplateError::UnmatchedTag {
                name: self.name(),
                line: end.line,
                tag: end.text.to_string(),
                expected: open.text.to_string(),
            }),
            Some(_) => Ok(()),
        }
    }

    fn name(&self) -> String {
        self.lexer.name().to_string()
    }
}

/// Main entry point: parse template text into a tree. `name` is only used in
/// error messages.
pub(crate) fn parse(name: &str, text: &str) -> Result<Vec<Node>> {
    Parser::new(name, text).parse()
}
