//! A small markup parser.
//!
//! Builds document nodes straight from template markup: elements with
//! quoted, unquoted or valueless attributes, text, comments and void
//! elements. Attribute names are taken verbatim, so directive syntax such
//! as `v-on:click` and `@input` survives untouched.

use htmlize::unescape;
use pochoir_relief::{NodeId, RenderTree};

use crate::document::Document;
use crate::serialize::is_void_tag;

/// Markup parse failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },
    #[error("unexpected closing tag </{tag}> at offset {offset}")]
    UnexpectedCloseTag { tag: String, offset: usize },
    #[error("element <{tag}> is missing its end tag")]
    MissingEndTag { tag: String },
    #[error("invalid tag name at offset {offset}")]
    InvalidTagName { offset: usize },
}

struct Parser<'a> {
    source: &'a str,
    pos: usize,
}

/// Parse `markup` and append the resulting nodes to `parent`.
pub(crate) fn parse_into(doc: &Document, parent: NodeId, markup: &str) -> Result<(), ParseError> {
    let mut parser = Parser {
        source: markup,
        pos: 0,
    };
    // (node, tag) of every open element
    let mut stack: Vec<(NodeId, String)> = Vec::new();

    while parser.pos < markup.len() {
        let current = stack.last().map_or(parent, |(node, _)| *node);
        let rest = parser.rest();

        if rest.starts_with("<!--") {
            let body_start = parser.pos + 4;
            let end = markup[body_start..]
                .find("-->")
                .ok_or(ParseError::UnexpectedEof { offset: markup.len() })?;
            let comment = doc.create_comment(&markup[body_start..body_start + end]);
            append(doc, current, comment);
            parser.pos = body_start + end + 3;
        } else if rest.starts_with("</") {
            let start = parser.pos;
            parser.pos += 2;
            let tag = parser.take_while(|c| c != '>').trim().to_ascii_lowercase();
            parser.expect('>')?;
            match stack.pop() {
                Some((_, open)) if open == tag => {}
                _ => return Err(ParseError::UnexpectedCloseTag { tag, offset: start }),
            }
        } else if rest.starts_with('<') {
            let (node, tag, self_closing) = parser.open_tag(doc)?;
            append(doc, current, node);
            if !self_closing && !is_void_tag(&tag) {
                stack.push((node, tag));
            }
        } else {
            let text = parser.take_while(|c| c != '<');
            let text = doc.create_text(&unescape(text));
            append(doc, current, text);
        }
    }

    match stack.pop() {
        Some((_, tag)) => Err(ParseError::MissingEndTag { tag }),
        None => Ok(()),
    }
}

fn append(doc: &Document, parent: NodeId, child: NodeId) {
    // Freshly created nodes can always be appended to an element.
    let appended = doc.append_child(parent, child);
    debug_assert!(appended.is_ok(), "{appended:?}");
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn expect(&mut self, c: char) -> Result<(), ParseError> {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            Ok(())
        } else {
            Err(ParseError::UnexpectedEof { offset: self.pos })
        }
    }

    /// Parse `<tag attr...>` or `<tag attr.../>`.
    fn open_tag(&mut self, doc: &Document) -> Result<(NodeId, String, bool), ParseError> {
        let start = self.pos;
        self.pos += 1;
        let tag = self.take_while(|c| c.is_ascii_alphanumeric() || c == '-');
        if tag.is_empty() {
            return Err(ParseError::InvalidTagName { offset: start });
        }
        let tag = tag.to_ascii_lowercase();
        let node = doc.create_element(&tag);

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(ParseError::UnexpectedEof { offset: self.pos }),
                Some('>') => {
                    self.pos += 1;
                    return Ok((node, tag, false));
                }
                Some('/') => {
                    self.pos += 1;
                    self.expect('>')?;
                    return Ok((node, tag, true));
                }
                Some(_) => {
                    let name = self.take_while(|c| {
                        !c.is_whitespace() && c != '=' && c != '>' && c != '/'
                    });
                    if name.is_empty() {
                        return Err(ParseError::UnexpectedEof { offset: self.pos });
                    }
                    self.skip_whitespace();
                    let value = if self.peek() == Some('=') {
                        self.pos += 1;
                        self.skip_whitespace();
                        self.attr_value()?
                    } else {
                        String::new()
                    };
                    // Attributes are only ever set on the element just created.
                    let _ = doc.set_attribute(node, name, &value);
                }
            }
        }
    }

    fn attr_value(&mut self) -> Result<String, ParseError> {
        let raw = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let value = self.take_while(|c| c != quote);
                self.expect(quote)?;
                value
            }
            _ => self.take_while(|c| !c.is_whitespace() && c != '>'),
        };
        Ok(unescape(raw).into_owned())
    }
}
