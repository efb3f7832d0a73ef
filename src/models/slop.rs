//! Slop document model - the unit of publication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A short text document with frontmatter metadata.
///
/// A slop is immutable once published: its document URI is bound to the
/// commit that introduced it, so corrections are new publishes with new
/// identities. Metadata fields are optional; absent fields are simply
/// omitted from the provenance graph, never emitted as empty values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slop {
    /// Unique identifier (UUID v4), minted at draft time.
    pub id: Uuid,
    pub title: Option<String>,
    pub author: Option<String>,
    pub created: Option<DateTime<Utc>>,
    /// Ordered tags; order is preserved into subject statements.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Raw document text (frontmatter excluded).
    #[serde(skip)]
    pub content: String,
}

impl Slop {
    /// Draft a new slop with a fresh id and the current timestamp.
    pub fn draft(title: String, author: Option<String>, tags: Vec<String>, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: Some(title),
            author,
            created: Some(Utc::now()),
            tags,
            content,
        }
    }

    /// File path of this slop relative to the repository root.
    pub fn file_path(&self) -> String {
        format!("slops/{}.md", self.id)
    }

    /// File name component of [`Self::file_path`].
    pub fn file_name(&self) -> String {
        format!("{}.md", self.id)
    }

    /// Render the slop as markdown with a YAML frontmatter block.
    pub fn to_markdown(&self) -> String {
        let frontmatter = Frontmatter {
            slop_id: self.id,
            title: self.title.clone(),
            author: self.author.clone(),
            created: self.created,
            tags: self.tags.clone(),
        };
        // Frontmatter has no map keys that can fail to serialize
        let yaml = serde_yaml::to_string(&frontmatter).unwrap_or_default();
        format!("---\n{}---\n\n{}\n", yaml, self.content.trim_end())
    }
}

/// YAML frontmatter written into persisted slop files.
#[derive(Debug, Serialize)]
struct Frontmatter {
    slop_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_fills_identity() {
        let slop = Slop::draft(
            "Standup notes".to_string(),
            Some("alice".to_string()),
            vec!["work".to_string()],
            "Alice met Bob.".to_string(),
        );
        assert!(slop.created.is_some());
        assert_eq!(slop.file_path(), format!("slops/{}.md", slop.id));
    }

    #[test]
    fn test_markdown_has_frontmatter_block() {
        let slop = Slop::draft(
            "Notes".to_string(),
            None,
            vec![],
            "Body text".to_string(),
        );
        let md = slop.to_markdown();
        assert!(md.starts_with("---\n"));
        assert!(md.contains("slop_id:"));
        assert!(md.contains("title: Notes"));
        // Absent author is omitted entirely
        assert!(!md.contains("author"));
        assert!(md.ends_with("Body text\n"));
    }
}
