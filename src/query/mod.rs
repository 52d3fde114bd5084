//! # Query Evaluation Module
//!
//! Validates and coerces raw HTTP query strings into strongly typed values
//! following a declarative per-field specification.

pub mod evaluator;
pub mod spec;

pub use evaluator::{QueryEvaluator, RawQuery};
pub use spec::{FieldSpec, FnRule, QuerySpec, QueryValue, Rule, TypedQuery, ValueType};
