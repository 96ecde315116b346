use crate::Result;
use crate::error::TemplateError;

/// Default left delimiter.
pub const LEFT_DELIMITER: &str = "{{";
/// Default right delimiter.
pub const RIGHT_DELIMITER: &str = "}}";

/// Token kinds handed to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Array,
    End,
    Ifdef,
    Ifndef,
    Include,
    Object,
    Print,
    Text,
}

/// What the character after a left delimiter classifies a tag as. Delimiter
/// changes and comments are handled inside the lexer and never become tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Token(TokenKind),
    ChangeDelimiter,
    Comment,
}

impl Tag {
    fn classify(c: char) -> Option<Tag> {
        let tag = match c {
            '#' => Tag::Token(TokenKind::Array),
            '=' => Tag::ChangeDelimiter,
            '!' => Tag::Comment,
            '/' => Tag::Token(TokenKind::End),
            '+' => Tag::Token(TokenKind::Ifdef),
            '-' => Tag::Token(TokenKind::Ifndef),
            '>' => Tag::Token(TokenKind::Include),
            '$' => Tag::Token(TokenKind::Object),
            '*' => Tag::Token(TokenKind::Print),
            _ => return None,
        };
        Some(tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    /// Tag name or literal text.
    pub text: &'a str,
    /// Line the token starts on.
    pub line: usize,
}

/// Splits raw template text into tokens, tracking the active delimiters.
pub(crate) struct Lexer<'a> {
    name: &'a str,
    ldel: &'a str,
    rdel: &'a str,
    line: usize,
    src: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(name: &'a str, src: &'a str) -> Self {
        Self {
            name,
            ldel: LEFT_DELIMITER,
            rdel: RIGHT_DELIMITER,
            line: 1,
            src,
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Returns the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        while !self.src.is_empty() {
            if !self.src.starts_with(self.ldel) {
                return Ok(Some(self.lex_text()));
            }
            let (tag, text, line) = self.lex_tag()?;
            match tag {
                Tag::Token(kind) => return Ok(Some(Token { kind, text, line })),
                Tag::ChangeDelimiter => self.change_delimiters(text)?,
                Tag::Comment => {}
            }
        }
        Ok(None)
    }

    fn lex_text(&mut self) -> Token<'a> {
        let src = self.src;
        let end = src.find(self.ldel).unwrap_or(src.len());
        let token = Token {
            kind: TokenKind::Text,
            text: &src[..end],
            line: self.line,
        };
        self.src = &src[end..];
        self.line += count_newlines(token.text);
        token
    }

    fn lex_tag(&mut self) -> Result<(Tag, &'a str, usize)> {
        let src = self.src;
        let mut rest = src[self.ldel.len()..].chars();
        let Some(c) = rest.next() else {
            return Err(self.fail(|name, line| TemplateError::IncompleteTag { name, line }));
        };
        let Some(tag) = Tag::classify(c) else {
            return Err(self.fail(|name, line| TemplateError::UnrecognizedTag { name, line }));
        };
        let rest = rest.as_str();
        let Some(end) = rest.find(self.rdel) else {
            return Err(self.fail(|name, line| TemplateError::IncompleteTag { name, line }));
        };

        let text = &rest[..end];
        let line = self.line;
        self.src = &rest[end + self.rdel.len()..];
        // A tag name may span lines.
        self.line += count_newlines(text);
        Ok((tag, text, line))
    }

    fn change_delimiters(&mut self, text: &'a str) -> Result<()> {
        let mut parts = text.split(' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(ldel), Some(rdel), None) if !ldel.is_empty() && !rdel.is_empty() => {
                self.ldel = ldel;
                self.rdel = rdel;
                Ok(())
            }
            _ => Err(self.fail(|name, line| TemplateError::MalformedTag { name, line })),
        }
    }

    /// Builds an error at the current position and exhausts the input.
    fn fail(&mut self, make: impl FnOnce(String, usize) -> TemplateError) -> TemplateError {
        self.src = "";
        make(self.name.to_string(), self.line)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

fn count_newlines(s: &str) -> usize {
    s.bytes().filter(|&b| b == b'\n').count()
}
