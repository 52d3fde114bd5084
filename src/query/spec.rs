//! # Query Specification
//!
//! Declarative description of expected query fields: value types, defaults,
//! mandatory flags, and cross-field validation rules.
//!
//! Field order is significant: rules are fed the result accumulated so far,
//! so a rule comparing two fields must be placed on the field declared last
//! (e.g. a `max < min` rule lives on `max`, declared after `min`).

use std::collections::HashMap;
use std::fmt;

/// Value types a query field can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// Any raw string value is accepted unmodified
    String,
    /// The raw value must coerce to a number
    Number,
}

/// A resolved query value
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Num(f64),
}

impl QueryValue {
    /// Returns the string value, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::Str(s) => Some(s),
            QueryValue::Num(_) => None,
        }
    }

    /// Returns the numeric value, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            QueryValue::Str(_) => None,
            QueryValue::Num(n) => Some(*n),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Str(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Num(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Num(value as f64)
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Str(s) => write!(f, "{}", s),
            QueryValue::Num(n) => write!(f, "{}", n),
        }
    }
}

/// The strongly typed result of evaluating a raw query against a spec
///
/// Contains one entry per field that resolved to a value (present-and-valid,
/// or defaulted). Fields that were absent and had no default are simply
/// missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypedQuery {
    values: HashMap<String, QueryValue>,
}

impl TypedQuery {
    /// Returns the resolved value for a field, if any
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.values.get(key)
    }

    /// Returns the resolved string value for a field
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(QueryValue::as_str)
    }

    /// Returns the resolved numeric value for a field
    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(QueryValue::as_number)
    }

    /// Returns whether a field resolved to a value
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of resolved fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether no field resolved
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn insert(&mut self, key: &str, value: QueryValue) {
        self.values.insert(key.to_string(), value);
    }
}

/// A cross-field validation rule
///
/// `triggers` is fed the result accumulated so far (fields declared earlier
/// in the spec that already resolved) plus the candidate value for the
/// current field, and returns true when the combination is invalid.
pub trait Rule {
    /// Returns true if the rule fires, i.e. the value combination is invalid
    fn triggers(&self, resolved: &TypedQuery, candidate: &QueryValue) -> bool;

    /// The error message surfaced when the rule fires
    fn message(&self) -> &str;
}

/// A rule backed by a closure or function pointer
pub struct FnRule<F> {
    message: String,
    trigger: F,
}

impl<F> FnRule<F>
where
    F: Fn(&TypedQuery, &QueryValue) -> bool,
{
    pub fn new(message: impl Into<String>, trigger: F) -> Self {
        Self {
            message: message.into(),
            trigger,
        }
    }
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&TypedQuery, &QueryValue) -> bool,
{
    fn triggers(&self, resolved: &TypedQuery, candidate: &QueryValue) -> bool {
        (self.trigger)(resolved, candidate)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Specification for a single query field
pub struct FieldSpec {
    pub(crate) value_type: ValueType,
    pub(crate) default_value: Option<QueryValue>,
    pub(crate) is_mandatory: bool,
    pub(crate) rules: Vec<Box<dyn Rule>>,
}

impl FieldSpec {
    /// A field accepting any string value
    pub fn string() -> Self {
        Self::of(ValueType::String)
    }

    /// A field that must coerce to a number
    pub fn number() -> Self {
        Self::of(ValueType::Number)
    }

    fn of(value_type: ValueType) -> Self {
        Self {
            value_type,
            default_value: None,
            is_mandatory: false,
            rules: Vec::new(),
        }
    }

    /// Marks the field mandatory: its absence is an error
    pub fn mandatory(mut self) -> Self {
        self.is_mandatory = true;
        self
    }

    /// Value used when the field is absent from the raw query
    pub fn default_value(mut self, value: impl Into<QueryValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Appends a validation rule; rules run in the order they were added
    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("value_type", &self.value_type)
            .field("default_value", &self.default_value)
            .field("is_mandatory", &self.is_mandatory)
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Ordered specification of all expected query fields
///
/// Declaration order is evaluation order, so fields referenced by another
/// field's rules must be declared first.
#[derive(Default)]
pub struct QuerySpec {
    fields: Vec<(String, FieldSpec)>,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field to the spec
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.push((name.into(), spec));
        self
    }

    pub(crate) fn fields(&self) -> &[(String, FieldSpec)] {
        &self.fields
    }
}

impl fmt::Debug for QuerySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.fields.iter().map(|(name, spec)| (name, spec)))
            .finish()
    }
}
