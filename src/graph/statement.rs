//! RDF term and quad model.

use serde::Serialize;

/// An RDF object term: a URI reference or a literal, optionally typed.
///
/// Literal values are carried as already-formatted strings so that a quad
/// built twice from identical inputs compares equal, and so confidence
/// values round-trip exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Term {
    Uri(String),
    Literal(String),
    Typed {
        value: String,
        datatype: &'static str,
    },
}

impl Term {
    pub fn uri(value: impl Into<String>) -> Self {
        Term::Uri(value.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal(value.into())
    }

    /// Typed integer literal (`xsd:integer`).
    pub fn integer(value: i64) -> Self {
        Term::Typed {
            value: value.to_string(),
            datatype: crate::graph::vocab::XSD_INTEGER,
        }
    }

    /// Typed float literal (`xsd:float`).
    ///
    /// Formatted with Rust's shortest round-trip representation, so `0.73`
    /// serializes as `"0.73"`.
    pub fn float(value: f64) -> Self {
        Term::Typed {
            value: value.to_string(),
            datatype: crate::graph::vocab::XSD_FLOAT,
        }
    }
}

/// One statement scoped to a named graph.
///
/// Subjects and predicates are always URIs. `graph` is `None` only for
/// ungraphed inserts; the publish pipeline always scopes quads to the
/// document's named graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Quad {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
    pub graph: Option<String>,
}

impl Quad {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: Term,
        graph: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
            graph: Some(graph.into()),
        }
    }
}
