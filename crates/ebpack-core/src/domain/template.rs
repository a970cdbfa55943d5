//! Strict placeholder templates.
//!
//! ## Syntax
//!
//! | Source        | Renders as              |
//! |---------------|-------------------------|
//! | `{name}`      | value of variable `name` |
//! | `{{`          | `{`                     |
//! | `}}`          | `}`                     |
//!
//! Shell snippets therefore write `${{OS_DEPS}}` to produce `${OS_DEPS}`.
//!
//! ## Strictness
//!
//! Rendering never emits a literal placeholder. A template is rejected when
//! it is malformed, and a render is rejected when the context lacks a
//! placeholder value or carries a variable the template never uses.

use std::collections::BTreeMap;

use crate::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed template, ready to render any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorTemplate {
    name: String,
    segments: Vec<Segment>,
    placeholders: Vec<String>,
}

impl DescriptorTemplate {
    /// Parse `source`. `name` only identifies the template in errors.
    pub fn parse(name: impl Into<String>, source: &str) -> Result<Self, DomainError> {
        let name = name.into();
        let segments = parse_segments(&name, source)?;

        let mut placeholders: Vec<String> = Vec::new();
        for segment in &segments {
            if let Segment::Placeholder(p) = segment {
                if !placeholders.contains(p) {
                    placeholders.push(p.clone());
                }
            }
        }

        Ok(Self {
            name,
            segments,
            placeholders,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distinct placeholder names in order of first appearance.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Substitute every placeholder from `context`.
    pub fn render(&self, context: &RenderContext) -> Result<String, DomainError> {
        if let Some(missing) = self
            .placeholders
            .iter()
            .find(|p| !context.variables.contains_key(p.as_str()))
        {
            return Err(DomainError::UnresolvedPlaceholder {
                template: self.name.clone(),
                placeholder: missing.clone(),
            });
        }

        if let Some(unused) = context
            .variables
            .keys()
            .find(|k| !self.placeholders.contains(k))
        {
            return Err(DomainError::UnusedParameter {
                template: self.name.clone(),
                parameter: unused.clone(),
            });
        }

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(p) => out.push_str(&context.variables[p.as_str()]),
            }
        }
        Ok(out)
    }
}

/// Variables available to a render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a context with `key` set to `value`, replacing any earlier value.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

fn parse_segments(template: &str, source: &str) -> Result<Vec<Segment>, DomainError> {
    let malformed = |position: usize, reason: &str| DomainError::MalformedTemplate {
        template: template.to_string(),
        position,
        reason: reason.to_string(),
    };

    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = source.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, n)| n == '{').is_some() {
                    literal.push('{');
                    continue;
                }
                let mut ident = String::new();
                let mut closed = false;
                for (_, n) in chars.by_ref() {
                    if n == '}' {
                        closed = true;
                        break;
                    }
                    ident.push(n);
                }
                if !closed {
                    return Err(malformed(pos, "unterminated placeholder"));
                }
                if !is_identifier(&ident) {
                    return Err(malformed(
                        pos,
                        &format!("invalid placeholder name '{ident}'"),
                    ));
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(ident));
            }
            '}' => {
                if chars.next_if(|&(_, n)| n == '}').is_some() {
                    literal.push('}');
                } else {
                    return Err(malformed(pos, "single '}' must be written as '}}'"));
                }
            }
            other => literal.push(other),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
