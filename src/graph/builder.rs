//! Builds the per-document provenance graph from metadata and mentions.
//!
//! Every quad's subject, predicate, and object is a pure function of the
//! inputs, so rebuilding from identical inputs yields a set-identical quad
//! collection. Combined with set-based insertion at the store, this makes
//! the graph-build and sync stages safely re-runnable.

use crate::error::AppError;
use crate::graph::statement::{Quad, Term};
use crate::graph::vocab;
use crate::identity;
use crate::models::{EntityMention, Slop};

/// Document identity inputs for one graph build.
pub struct DocumentFacts<'a> {
    /// Canonical blob-at-commit address; every document-level quad's subject.
    pub document_uri: &'a str,
    /// Named graph scoping every emitted quad.
    pub graph_uri: &'a str,
    /// File name recorded as `nfo:fileName`.
    pub file_name: &'a str,
}

/// Assembles metadata and entity facts into a named-graph quad sequence.
pub struct GraphBuilder<'a> {
    /// Namespace base for minted entity URIs.
    base: &'a str,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(base: &'a str) -> Self {
        Self { base }
    }

    /// Emit the full quad sequence for one document.
    ///
    /// Order: document type assertions, file facts, present metadata fields,
    /// then per-mention facts in extraction output order. Absent optional
    /// metadata is omitted; a mention missing either line bound contributes
    /// no span-dependent quads.
    pub fn build(
        &self,
        facts: &DocumentFacts<'_>,
        slop: &Slop,
        mentions: &[EntityMention],
    ) -> Result<Vec<Quad>, AppError> {
        let mut quads = Vec::new();

        self.emit_document(&mut quads, facts, slop);
        for mention in mentions {
            self.emit_mention(&mut quads, facts, mention)?;
        }

        Ok(quads)
    }

    /// Document-level facts: type assertions plus one quad per present
    /// metadata field.
    fn emit_document(&self, quads: &mut Vec<Quad>, facts: &DocumentFacts<'_>, slop: &Slop) {
        let doc = facts.document_uri;
        let graph = facts.graph_uri;

        quads.push(Quad::new(
            doc,
            vocab::RDF_TYPE,
            Term::uri(vocab::NFO_FILE_DATA_OBJECT),
            graph,
        ));
        quads.push(Quad::new(
            doc,
            vocab::RDF_TYPE,
            Term::uri(vocab::SLOP_SLOP),
            graph,
        ));
        quads.push(Quad::new(
            doc,
            vocab::NFO_FILE_NAME,
            Term::literal(facts.file_name),
            graph,
        ));
        quads.push(Quad::new(doc, vocab::NFO_FILE_URL, Term::uri(doc), graph));

        if let Some(title) = &slop.title {
            quads.push(Quad::new(
                doc,
                vocab::DCTERMS_TITLE,
                Term::literal(title),
                graph,
            ));
        }
        if let Some(author) = &slop.author {
            quads.push(Quad::new(
                doc,
                vocab::DCTERMS_CREATOR,
                Term::literal(author),
                graph,
            ));
        }
        if let Some(created) = &slop.created {
            quads.push(Quad::new(
                doc,
                vocab::DCTERMS_CREATED,
                Term::literal(created.to_rfc3339()),
                graph,
            ));
        }
        for tag in &slop.tags {
            quads.push(Quad::new(
                doc,
                vocab::DCTERMS_SUBJECT,
                Term::literal(tag),
                graph,
            ));
        }
        quads.push(Quad::new(
            doc,
            vocab::SLOP_ID,
            Term::literal(slop.id.to_string()),
            graph,
        ));
    }

    /// Per-mention facts: type, display name, mentions link, confidence,
    /// and the line span with its source anchor when both bounds are present.
    fn emit_mention(
        &self,
        quads: &mut Vec<Quad>,
        facts: &DocumentFacts<'_>,
        mention: &EntityMention,
    ) -> Result<(), AppError> {
        let entity = identity::entity_uri(self.base, &mention.text);
        let doc = facts.document_uri;
        let graph = facts.graph_uri;

        quads.push(Quad::new(
            entity.clone(),
            vocab::RDF_TYPE,
            Term::uri(mention.label.ontology_class()),
            graph,
        ));
        quads.push(Quad::new(
            entity.clone(),
            vocab::SCHEMA_NAME,
            Term::literal(&mention.text),
            graph,
        ));
        quads.push(Quad::new(
            doc,
            vocab::SLOP_MENTIONS,
            Term::uri(entity.clone()),
            graph,
        ));
        quads.push(Quad::new(
            entity.clone(),
            vocab::SLOP_CONFIDENCE,
            Term::float(mention.confidence),
            graph,
        ));

        if let (Some(start), Some(end)) = (mention.line_start, mention.line_end) {
            if start > end {
                return Err(AppError::GraphBuild(format!(
                    "mention '{}' has line_start {} > line_end {}",
                    mention.text, start, end
                )));
            }
            quads.push(Quad::new(
                entity.clone(),
                vocab::SLOP_LINE_START,
                Term::integer(i64::from(start)),
                graph,
            ));
            quads.push(Quad::new(
                entity.clone(),
                vocab::SLOP_LINE_END,
                Term::integer(i64::from(end)),
                graph,
            ));
            quads.push(Quad::new(
                entity,
                vocab::SLOP_SOURCE_URL,
                Term::uri(source_anchor(doc, start, end)),
                graph,
            ));
        }

        Ok(())
    }
}

/// Source anchor for a line span: `#L{start}` for a single line,
/// `#L{start}-L{end}` for a range.
pub fn source_anchor(document_uri: &str, line_start: u32, line_end: u32) -> String {
    if line_start == line_end {
        format!("{}#L{}", document_uri, line_start)
    } else {
        format!("{}#L{}-L{}", document_uri, line_start, line_end)
    }
}
