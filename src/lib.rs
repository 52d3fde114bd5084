//! webcommons - query validation and error translation utilities for HTTP services

pub mod error;
pub mod observability;
pub mod query;

pub use error::{CustomError, ErrorHandler, ErrorHandlerConfig, OutboundError};
pub use query::{FieldSpec, QueryEvaluator, QuerySpec, TypedQuery};
