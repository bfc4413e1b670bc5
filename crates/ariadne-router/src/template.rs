//! Path template parsing and pattern generation.
//!
//! Templates are plain path text with `{resource.field}` placeholders and
//! parenthesised alternations:
//!
//! ```text
//! /repo/({repository.id}|{repository.slug})/branch/{branch.name}
//! ```
//!
//! Each placeholder becomes a named capture group in an anchored regular
//! expression. Alternations become non-capturing groups; the regex engine
//! tries alternatives left to right, so the first one that matches wins and
//! only its placeholder is captured.

use std::fmt::Write;

use regex::Regex;

use crate::constraint::Constraints;
use crate::error::RouteError;

/// One parsed piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Text matched verbatim.
    Literal(String),
    /// A `{resource.field}` placeholder.
    Placeholder {
        /// Resource part of the capture key.
        resource: String,
        /// Field part of the capture key.
        field: String,
    },
    /// `(a|b|c)`; each alternative is a sequence of segments.
    Alternation(Vec<Vec<Segment>>),
}

/// A parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parses a template.
    pub(crate) fn parse(source: &str) -> Result<Self, RouteError> {
        let mut parser = Parser {
            source,
            chars: source.chars().collect(),
            pos: 0,
        };
        let segments = parser.sequence(0)?;
        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The template text as written.
    pub(crate) fn source(&self) -> &str {
        &self.source
    }

    /// Capture keys of every placeholder, in template order.
    #[cfg(test)]
    pub(crate) fn capture_keys(&self) -> Vec<String> {
        fn collect(segments: &[Segment], out: &mut Vec<String>) {
            for segment in segments {
                match segment {
                    Segment::Literal(_) => {}
                    Segment::Placeholder { resource, field } => out.push(format!("{resource}.{field}")),
                    Segment::Alternation(alternatives) => {
                        for alternative in alternatives {
                            collect(alternative, out);
                        }
                    }
                }
            }
        }

        let mut keys = Vec::new();
        collect(&self.segments, &mut keys);
        keys
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl Parser<'_> {
    fn sequence(&mut self, depth: usize) -> Result<Vec<Segment>, RouteError> {
        let mut segments = Vec::new();
        let mut literal = String::new();

        while let Some(&c) = self.chars.get(self.pos) {
            match c {
                '{' => {
                    flush(&mut literal, &mut segments);
                    self.pos += 1;
                    segments.push(self.placeholder()?);
                }
                '(' => {
                    flush(&mut literal, &mut segments);
                    self.pos += 1;
                    segments.push(self.alternation(depth + 1)?);
                }
                ')' | '|' if depth > 0 => break,
                ')' | '|' | '}' => {
                    return Err(self.error(format!("unexpected '{c}' at offset {}", self.pos)));
                }
                _ => {
                    literal.push(c);
                    self.pos += 1;
                }
            }
        }

        flush(&mut literal, &mut segments);
        Ok(segments)
    }

    fn alternation(&mut self, depth: usize) -> Result<Segment, RouteError> {
        let mut alternatives = Vec::new();
        loop {
            alternatives.push(self.sequence(depth)?);
            match self.chars.get(self.pos) {
                Some('|') => self.pos += 1,
                Some(')') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.error("unclosed '('")),
            }
        }
        Ok(Segment::Alternation(alternatives))
    }

    fn placeholder(&mut self) -> Result<Segment, RouteError> {
        let start = self.pos;
        let end = self.chars[start..]
            .iter()
            .position(|&c| c == '}')
            .map(|offset| start + offset)
            .ok_or_else(|| self.error("unclosed placeholder"))?;
        let name: String = self.chars[start..end].iter().collect();
        self.pos = end + 1;

        let (resource, field) = name
            .split_once('.')
            .ok_or_else(|| self.error(format!("placeholder '{{{name}}}' must be resource.field")))?;
        if !is_identifier(resource) || !is_identifier(field) {
            return Err(self.error(format!("invalid placeholder '{{{name}}}'")));
        }

        Ok(Segment::Placeholder {
            resource: resource.to_string(),
            field: field.to_string(),
        })
    }

    fn error(&self, reason: impl Into<String>) -> RouteError {
        RouteError::invalid_template(self.source, reason)
    }
}

fn flush(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A named group in a compiled pattern and the capture key it fills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CaptureGroup {
    pub(crate) name: String,
    pub(crate) key: String,
}

/// Accumulates regex source for a chain of templates.
#[derive(Debug, Default)]
pub(crate) struct PatternBuilder {
    source: String,
    groups: Vec<CaptureGroup>,
}

impl PatternBuilder {
    pub(crate) fn push(&mut self, template: &Template, constraints: &Constraints) {
        self.push_segments(&template.segments, constraints);
    }

    fn push_segments(&mut self, segments: &[Segment], constraints: &Constraints) {
        for segment in segments {
            match segment {
                Segment::Literal(text) => self.source.push_str(&regex::escape(text)),
                Segment::Placeholder { resource, field } => {
                    let name = format!("c{}", self.groups.len());
                    let _ = write!(
                        self.source,
                        "(?P<{name}>{})",
                        constraints.regex_for(resource, field)
                    );
                    self.groups.push(CaptureGroup {
                        name,
                        key: format!("{resource}.{field}"),
                    });
                }
                Segment::Alternation(alternatives) => {
                    self.source.push_str("(?:");
                    for (i, alternative) in alternatives.iter().enumerate() {
                        if i > 0 {
                            self.source.push('|');
                        }
                        self.push_segments(alternative, constraints);
                    }
                    self.source.push(')');
                }
            }
        }
    }

    /// Compiles the accumulated source into an anchored regex.
    pub(crate) fn finish(self, template: &str) -> Result<(Regex, Vec<CaptureGroup>), RouteError> {
        let regex = Regex::new(&format!("^{}$", self.source))
            .map_err(|e| RouteError::invalid_template(template, e.to_string()))?;
        Ok((regex, self.groups))
    }
}
