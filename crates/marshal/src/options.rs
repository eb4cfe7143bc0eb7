use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::value::{BoxError, FieldType, Kind, Value};

/// Output of a formatting rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Text that the encoder quotes and escapes as a JSON string
    Text(String),
    /// Bytes spliced verbatim; must hold exactly one JSON value
    Raw(Vec<u8>),
    /// Decline and let the next rule (or the built-in rendering) handle the value
    Defer,
}

impl Rendered {
    pub fn text(s: impl Into<String>) -> Self {
        Rendered::Text(s.into())
    }

    pub fn raw(bytes: impl Into<Vec<u8>>) -> Self {
        Rendered::Raw(bytes.into())
    }
}

/// A formatting rule. Closures taking `&Value` implement it.
pub trait Formatter: Send + Sync {
    fn format(&self, value: &Value) -> Result<Rendered, BoxError>;
}

impl<F> Formatter for F
where
    F: Fn(&Value) -> Result<Rendered, BoxError> + Send + Sync,
{
    fn format(&self, value: &Value) -> Result<Rendered, BoxError> {
        self(value)
    }
}

/// Adapts a closure over a concrete Rust type into a [`Formatter`].
/// Nulls and values of another kind are deferred.
struct Typed<T, F> {
    f: F,
    _ty: PhantomData<fn(&T)>,
}

impl<T, F> Formatter for Typed<T, F>
where
    T: FieldType,
    F: Fn(&T) -> Result<Rendered, BoxError> + Send + Sync,
{
    fn format(&self, value: &Value) -> Result<Rendered, BoxError> {
        match T::from_value(value) {
            Some(v) => (self.f)(v),
            None => Ok(Rendered::Defer),
        }
    }
}

/// Encoding configuration.
///
/// Rules are looked up per field in this order: the rule registered for the
/// field's dotted path, then the rule registered for its declared kind, then
/// the built-in rendering. Registering a second rule under the same key
/// replaces the first.
#[derive(Clone)]
pub struct Options {
    /// Quote built-in renderings of integers, floats and decimals
    pub stringify_numbers: bool,
    /// Drop fields holding the zero value of their kind
    pub omit_zero_fields: bool,
    /// Escape `<`, `>` and `&` inside strings
    pub escape_html: bool,
    /// One field per line with nested records indented
    pub multiline: bool,
    /// Indentation width used when `multiline` is set (default: 2 spaces)
    pub indent: usize,
    type_rules: HashMap<Kind, Arc<dyn Formatter>>,
    field_rules: HashMap<String, Arc<dyn Formatter>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            stringify_numbers: false,
            omit_zero_fields: false,
            escape_html: false,
            multiline: false,
            indent: 2,
            type_rules: HashMap::new(),
            field_rules: HashMap::new(),
        }
    }
}

impl Options {
    /// Rule for every field whose declared kind is `kind`.
    pub fn with_type_formatter<F>(self, kind: Kind, f: F) -> Self
    where
        F: Fn(&Value) -> Result<Rendered, BoxError> + Send + Sync + 'static,
    {
        self.with_type_rule(kind, f)
    }

    /// Same as [`Options::with_type_formatter`] for any [`Formatter`] implementation.
    pub fn with_type_rule(mut self, kind: Kind, rule: impl Formatter + 'static) -> Self {
        self.type_rules.insert(kind, Arc::new(rule));
        self
    }

    /// Rule over a concrete Rust type, registered under `T::KIND`.
    pub fn with_formatter<T, F>(self, f: F) -> Self
    where
        T: FieldType,
        F: Fn(&T) -> Result<Rendered, BoxError> + Send + Sync + 'static,
    {
        self.with_type_rule(
            T::KIND,
            Typed {
                f,
                _ty: PhantomData,
            },
        )
    }

    /// Rule for the field at a dotted path such as `"outer.inner"`.
    pub fn with_field_formatter<F>(mut self, path: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> Result<Rendered, BoxError> + Send + Sync + 'static,
    {
        self.field_rules.insert(path.into(), Arc::new(f));
        self
    }

    pub(crate) fn field_rule(&self, path: &str) -> Option<&dyn Formatter> {
        if self.field_rules.is_empty() {
            return None;
        }
        self.field_rules.get(path).map(|r| r.as_ref())
    }

    pub(crate) fn type_rule(&self, kind: Kind) -> Option<&dyn Formatter> {
        self.type_rules.get(&kind).map(|r| r.as_ref())
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.type_rules.keys().collect();
        kinds.sort();
        let mut paths: Vec<_> = self.field_rules.keys().collect();
        paths.sort();
        f.debug_struct("Options")
            .field("stringify_numbers", &self.stringify_numbers)
            .field("omit_zero_fields", &self.omit_zero_fields)
            .field("escape_html", &self.escape_html)
            .field("multiline", &self.multiline)
            .field("indent", &self.indent)
            .field("type_rules", &kinds)
            .field("field_rules", &paths)
            .finish()
    }
}
