//! SPARQL update serialization for quad batches.
//!
//! Renders a quad sequence into one `INSERT DATA` update, grouping quads by
//! named graph in first-seen order. Performs no semantic validation:
//! malformed statements pass through and fail only at the remote store.

use crate::graph::statement::{Quad, Term};

/// Render quads into a single `INSERT DATA` update payload.
///
/// Graph-scoped quads are wrapped in `GRAPH <uri> { ... }` blocks; ungraphed
/// quads are emitted directly inside the insert block.
pub fn insert_data(quads: &[Quad]) -> String {
    let mut payload = String::from("INSERT DATA {\n");

    for (graph, group) in group_by_graph(quads) {
        match graph {
            Some(graph_uri) => {
                payload.push_str(&format!("  GRAPH <{}> {{\n", graph_uri));
                for quad in group {
                    payload.push_str("    ");
                    payload.push_str(&format_triple(quad));
                    payload.push('\n');
                }
                payload.push_str("  }\n");
            }
            None => {
                for quad in group {
                    payload.push_str("  ");
                    payload.push_str(&format_triple(quad));
                    payload.push('\n');
                }
            }
        }
    }

    payload.push('}');
    payload
}

/// Group quads by graph, preserving first-seen graph order and quad order
/// within each group.
fn group_by_graph(quads: &[Quad]) -> Vec<(Option<&str>, Vec<&Quad>)> {
    let mut groups: Vec<(Option<&str>, Vec<&Quad>)> = Vec::new();
    for quad in quads {
        let key = quad.graph.as_deref();
        match groups.iter_mut().find(|(g, _)| *g == key) {
            Some((_, group)) => group.push(quad),
            None => groups.push((key, vec![quad])),
        }
    }
    groups
}

fn format_triple(quad: &Quad) -> String {
    format!(
        "<{}> <{}> {} .",
        quad.subject,
        quad.predicate,
        format_term(&quad.object)
    )
}

fn format_term(term: &Term) -> String {
    match term {
        Term::Uri(uri) => format!("<{}>", uri),
        Term::Literal(value) => format!("\"{}\"", escape_literal(value)),
        Term::Typed { value, datatype } => {
            format!("\"{}\"^^<{}>", escape_literal(value), datatype)
        }
    }
}

/// Escape a literal for SPARQL quoting.
fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_scoped_insert() {
        let quads = vec![Quad::new(
            "https://x/doc",
            "https://x/p",
            Term::literal("hello"),
            "https://x/g",
        )];
        let payload = insert_data(&quads);
        assert_eq!(
            payload,
            "INSERT DATA {\n  GRAPH <https://x/g> {\n    <https://x/doc> <https://x/p> \"hello\" .\n  }\n}"
        );
    }

    #[test]
    fn test_ungraphed_fallback() {
        let quads = vec![Quad {
            subject: "https://x/s".to_string(),
            predicate: "https://x/p".to_string(),
            object: Term::uri("https://x/o"),
            graph: None,
        }];
        let payload = insert_data(&quads);
        assert!(!payload.contains("GRAPH"));
        assert!(payload.contains("  <https://x/s> <https://x/p> <https://x/o> ."));
    }

    #[test]
    fn test_typed_literals_carry_datatype() {
        let quads = vec![
            Quad::new("https://x/s", "https://x/conf", Term::float(0.73), "https://x/g"),
            Quad::new("https://x/s", "https://x/line", Term::integer(5), "https://x/g"),
        ];
        let payload = insert_data(&quads);
        assert!(payload.contains("\"0.73\"^^<http://www.w3.org/2001/XMLSchema#float>"));
        assert!(payload.contains("\"5\"^^<http://www.w3.org/2001/XMLSchema#integer>"));
    }

    #[test]
    fn test_literal_escaping() {
        let quads = vec![Quad::new(
            "https://x/s",
            "https://x/p",
            Term::literal("say \"hi\"\nback\\slash\ttab"),
            "https://x/g",
        )];
        let payload = insert_data(&quads);
        assert!(payload.contains(r#""say \"hi\"\nback\\slash\ttab""#));
    }

    #[test]
    fn test_groups_preserve_first_seen_order() {
        let quads = vec![
            Quad::new("https://x/a", "https://x/p", Term::literal("1"), "https://x/g1"),
            Quad::new("https://x/b", "https://x/p", Term::literal("2"), "https://x/g2"),
            Quad::new("https://x/c", "https://x/p", Term::literal("3"), "https://x/g1"),
        ];
        let payload = insert_data(&quads);
        let g1 = payload.find("https://x/g1").unwrap();
        let g2 = payload.find("https://x/g2").unwrap();
        assert!(g1 < g2);
        // The second g1 quad lands in the first block
        assert_eq!(payload.matches("GRAPH <https://x/g1>").count(), 1);
    }
}
