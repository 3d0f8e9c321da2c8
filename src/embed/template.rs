//! Template types for typed variable injection.
//!
//! Templates are plain HTML with `__NAME__` placeholders. Substitution is a
//! single pass, so inserted values are never scanned for placeholders again.

use regex::{Captures, Regex};
use std::marker::PhantomData;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([A-Z0-9]+(?:_[A-Z0-9]+)*)__").expect("valid regex"));

/// Trait for template variable sets
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Embedded template with typed variable injection.
///
/// `name` is the file name looked up in the templates directory before
/// falling back to the embedded `content`.
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    name: &'static str,
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(name: &'static str, content: &'static str) -> Self {
        Self {
            name,
            content,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn content(&self) -> &'static str {
        self.content
    }
}

/// Replace every `__NAME__` in `content` whose `NAME` appears in `vars`.
///
/// Unknown placeholders are left as they are.
pub fn substitute(content: &str, vars: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(content, |caps: &Captures<'_>| {
            vars.iter()
                .find(|(name, _)| *name == &caps[1])
                .map_or_else(|| caps[0].to_owned(), |(_, value)| (*value).to_owned())
        })
        .into_owned()
}
