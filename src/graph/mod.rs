//! Provenance graph construction and SPARQL serialization.
//!
//! - `vocab`: fixed namespace and predicate surface
//! - `statement`: RDF term and quad model
//! - `builder`: metadata + entity mentions → ordered quad sequence
//! - `sparql`: quad sequence → `INSERT DATA` update payload

pub mod builder;
pub mod sparql;
pub mod statement;
pub mod vocab;

pub use builder::{DocumentFacts, GraphBuilder};
pub use statement::{Quad, Term};
