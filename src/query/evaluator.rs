//! # Query Evaluator
//!
//! Builds a strongly typed query from a raw, weakly typed query map by
//! walking a declarative spec in declaration order: presence and mandatory
//! checks first, then type coercion, then cross-field rules against the
//! result accumulated so far. Evaluation is all-or-nothing: the first
//! violation aborts and no partial result escapes.

use std::collections::HashMap;

use super::spec::{QuerySpec, QueryValue, TypedQuery, ValueType};
use crate::error::{CustomError, INVALID_QUERY_ERROR_CODE};

/// Raw query map as delivered by the HTTP layer
///
/// Keys are expected lower-cased; spec keys are lower-cased before lookup,
/// making the match case-insensitive.
pub type RawQuery = HashMap<String, String>;

/// Stateless evaluator of raw queries against a [`QuerySpec`]
pub struct QueryEvaluator;

impl QueryEvaluator {
    /// Validates and coerces `raw` according to `spec`
    ///
    /// Fields are processed in declaration order. Returns the accumulated
    /// [`TypedQuery`] on success, or a [`CustomError`] carrying
    /// [`INVALID_QUERY_ERROR_CODE`] on the first violation.
    pub fn get_query(raw: &RawQuery, spec: &QuerySpec) -> Result<TypedQuery, CustomError> {
        let mut result = TypedQuery::default();

        for (key, field) in spec.fields() {
            let lower_key = key.to_lowercase();
            let raw_value = raw.get(&lower_key).filter(|v| is_present(v.as_str()));

            let Some(raw_value) = raw_value else {
                // No hit on the query specification
                if field.is_mandatory {
                    return Err(invalid_query(format!(
                        "query parameter {key} is mandatory"
                    )));
                }
                if let Some(default) = &field.default_value {
                    result.insert(key, default.clone());
                }
                continue;
            };

            // The attribute is present, make sure it conforms to the rules
            let candidate = match field.value_type {
                ValueType::Number => match parse_number(raw_value) {
                    Some(n) => QueryValue::Num(n),
                    None => {
                        return Err(invalid_query(format!(
                            "query parameter {key} must be a number"
                        )));
                    }
                },
                // Treat it as a string: any value is OK
                ValueType::String => QueryValue::Str(raw_value.clone()),
            };

            for rule in &field.rules {
                if rule.triggers(&result, &candidate) {
                    return Err(invalid_query(rule.message()));
                }
            }

            result.insert(key, candidate);
        }

        Ok(result)
    }
}

fn invalid_query(message: impl Into<String>) -> CustomError {
    CustomError::new(INVALID_QUERY_ERROR_CODE, message)
}

/// Presence is truthiness, not key existence: an empty string or a literal
/// `"0"` counts as absent and goes through mandatory/default handling.
fn is_present(raw: &str) -> bool {
    !raw.is_empty() && raw != "0"
}

/// Numeric coercion; a parse that fails or yields NaN is rejected
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::spec::{FieldSpec, FnRule};

    fn raw(pairs: &[(&str, &str)]) -> RawQuery {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_string_passes_through_unchanged() {
        let spec = QuerySpec::new().field("name", FieldSpec::string());
        let query = QueryEvaluator::get_query(&raw(&[("name", "John Doe")]), &spec).unwrap();
        assert_eq!(query.get_str("name"), Some("John Doe"));
    }

    #[test]
    fn test_number_coercion() {
        let spec = QuerySpec::new().field("limit", FieldSpec::number());
        let query = QueryEvaluator::get_query(&raw(&[("limit", "25")]), &spec).unwrap();
        assert_eq!(query.get_number("limit"), Some(25.0));
    }

    #[test]
    fn test_non_numeric_rejected() {
        let spec = QuerySpec::new().field("limit", FieldSpec::number());
        let err = QueryEvaluator::get_query(&raw(&[("limit", "abc")]), &spec).unwrap_err();
        assert_eq!(err.status_code(), Some(INVALID_QUERY_ERROR_CODE));
        assert_eq!(err.message(), Some("query parameter limit must be a number"));
    }

    #[test]
    fn test_nan_literal_rejected() {
        let spec = QuerySpec::new().field("limit", FieldSpec::number());
        let err = QueryEvaluator::get_query(&raw(&[("limit", "NaN")]), &spec).unwrap_err();
        assert_eq!(err.message(), Some("query parameter limit must be a number"));
    }

    #[test]
    fn test_mandatory_absent_fails() {
        let spec = QuerySpec::new().field("name", FieldSpec::string().mandatory());
        let err = QueryEvaluator::get_query(&raw(&[]), &spec).unwrap_err();
        assert_eq!(err.message(), Some("query parameter name is mandatory"));
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let spec = QuerySpec::new().field("pageSize", FieldSpec::number());
        let query = QueryEvaluator::get_query(&raw(&[("pagesize", "10")]), &spec).unwrap();
        assert_eq!(query.get_number("pageSize"), Some(10.0));
    }

    #[test]
    fn test_default_applies_when_absent() {
        let spec = QuerySpec::new().field("limit", FieldSpec::number().default_value(100i64));
        let query = QueryEvaluator::get_query(&raw(&[]), &spec).unwrap();
        assert_eq!(query.get_number("limit"), Some(100.0));
    }

    #[test]
    fn test_default_never_overrides_present_value() {
        let spec = QuerySpec::new().field("limit", FieldSpec::number().default_value(100i64));
        let query = QueryEvaluator::get_query(&raw(&[("limit", "5")]), &spec).unwrap();
        assert_eq!(query.get_number("limit"), Some(5.0));
    }

    #[test]
    fn test_absent_without_default_stays_absent() {
        let spec = QuerySpec::new().field("name", FieldSpec::string());
        let query = QueryEvaluator::get_query(&raw(&[]), &spec).unwrap();
        assert!(!query.contains("name"));
        assert!(query.is_empty());
    }

    #[test]
    fn test_zero_literal_treated_as_absent() {
        // Presence is truthiness: "0" goes through the default path
        let spec = QuerySpec::new().field("offset", FieldSpec::number().default_value(10i64));
        let query = QueryEvaluator::get_query(&raw(&[("offset", "0")]), &spec).unwrap();
        assert_eq!(query.get_number("offset"), Some(10.0));
    }

    #[test]
    fn test_empty_string_treated_as_absent() {
        let spec = QuerySpec::new().field("name", FieldSpec::string().mandatory());
        let err = QueryEvaluator::get_query(&raw(&[("name", "")]), &spec).unwrap_err();
        assert_eq!(err.message(), Some("query parameter name is mandatory"));
    }

    #[test]
    fn test_rule_sees_earlier_fields() {
        let spec = QuerySpec::new()
            .field("min", FieldSpec::number())
            .field(
                "max",
                FieldSpec::number().rule(FnRule::new(
                    "max must not be smaller than min",
                    |q: &TypedQuery, v: &QueryValue| {
                        match (q.get_number("min"), v.as_number()) {
                            (Some(min), Some(max)) => max < min,
                            _ => false,
                        }
                    },
                )),
            );

        let err =
            QueryEvaluator::get_query(&raw(&[("min", "5"), ("max", "3")]), &spec).unwrap_err();
        assert_eq!(err.message(), Some("max must not be smaller than min"));

        let query = QueryEvaluator::get_query(&raw(&[("min", "3"), ("max", "5")]), &spec).unwrap();
        assert_eq!(query.get_number("min"), Some(3.0));
        assert_eq!(query.get_number("max"), Some(5.0));
    }

    #[test]
    fn test_first_firing_rule_wins() {
        let spec = QuerySpec::new().field(
            "limit",
            FieldSpec::number()
                .rule(FnRule::new("first", |_: &TypedQuery, _: &QueryValue| true))
                .rule(FnRule::new("second", |_: &TypedQuery, _: &QueryValue| {
                    panic!("later rules must never be evaluated")
                })),
        );

        let err = QueryEvaluator::get_query(&raw(&[("limit", "1")]), &spec).unwrap_err();
        assert_eq!(err.message(), Some("first"));
    }
}
