//! Core error types for graph processing
//!
//! Every stage of the pipeline fails fast with one of these variants: the
//! first error aborts the load and no partial graph is kept.

use thiserror::Error;

use super::ElementRole;

/// Result alias used by the typed pipeline stages
pub type GraphResult<T> = Result<T, GraphError>;

/// Core error types for graph loading and path finding
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Malformed {role} element: {message}")]
    MalformedElement { role: ElementRole, message: String },

    #[error("Dangling reference: {role} '{element}' has {attribute}='{reference}' which matches no {expected}")]
    DanglingReference {
        role: ElementRole,
        element: String,
        attribute: &'static str,
        reference: String,
        expected: &'static str,
    },

    #[error("Invalid cost '{value}' on edge '{edge}'")]
    InvalidCost { edge: String, value: String },

    #[error("Invalid argument: {argument} {message}")]
    InvalidArgument {
        argument: &'static str,
        message: String,
    },

    #[error("Not found: no element with id '{id}'")]
    NotFound { id: String },

    #[error("XML error: {source}")]
    Xml {
        #[from]
        source: roxmltree::Error,
    },

    #[error("Document error: {message}")]
    Document { message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl GraphError {
    /// Create a new malformed element error
    pub fn malformed(role: ElementRole, message: String) -> Self {
        Self::MalformedElement { role, message }
    }

    /// Create a new missing attribute error
    pub fn missing_attribute(role: ElementRole, id: Option<&str>, attribute: &str) -> Self {
        let message = match id {
            Some(id) => format!("'{}' is missing required attribute '{}'", id, attribute),
            None => format!("missing required attribute '{}'", attribute),
        };
        Self::MalformedElement { role, message }
    }

    /// Create a new dangling reference error
    pub fn dangling(
        role: ElementRole,
        element: &str,
        attribute: &'static str,
        reference: &str,
        expected: &'static str,
    ) -> Self {
        Self::DanglingReference {
            role,
            element: element.to_string(),
            attribute,
            reference: reference.to_string(),
            expected,
        }
    }

    /// Create a new invalid cost error
    pub fn invalid_cost(edge: &str, value: &str) -> Self {
        Self::InvalidCost {
            edge: edge.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a new invalid argument error for an empty input
    pub fn empty_argument(argument: &'static str) -> Self {
        Self::InvalidArgument {
            argument,
            message: "must not be empty".to_string(),
        }
    }

    /// Create a new not found error
    pub fn not_found(id: &str) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    /// Create a new document error
    pub fn document(message: String) -> Self {
        Self::Document { message }
    }
}
