//! Stable URI derivation for entities, documents, and named graphs.
//!
//! All three derivations are pure functions: identical inputs yield identical
//! URIs across runs and processes. Entity merging across documents happens
//! purely through URI equality - there is no semantic disambiguation.

use sha2::{Digest, Sha256};

/// Hex characters of the digest kept in entity URIs.
const DIGEST_PREFIX_LEN: usize = 8;

/// Maximum slug length in entity URIs. The slug exists for readability only;
/// the digest carries identity.
const SLUG_MAX_LEN: usize = 50;

/// Normalize entity text for identity: trim, then lowercase.
///
/// Two mentions with the same normalized text anywhere, in any document,
/// collapse to the same entity subject.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Derive the stable URI for an entity: `{base}/entity/{digest}/{slug}`.
///
/// The digest is a fixed-width prefix of the SHA-256 of the normalized text.
/// The truncation trades collision resistance for URI brevity.
pub fn entity_uri(base: &str, text: &str) -> String {
    let normalized = normalize(text);
    let digest = Sha256::digest(normalized.as_bytes());
    let hex = format!("{:x}", digest);
    let slug: String = normalized.replace(' ', "-").chars().take(SLUG_MAX_LEN).collect();
    format!(
        "{}/entity/{}/{}",
        base.trim_end_matches('/'),
        &hex[..DIGEST_PREFIX_LEN],
        slug
    )
}

/// Derive the document URI: the canonical blob-at-commit address.
///
/// `github_repo` is in `org/name` form. Uniqueness follows from commit-hash
/// uniqueness; no hashing is needed.
pub fn document_uri(github_repo: &str, file_path: &str, commit_hash: &str) -> String {
    format!(
        "https://github.com/{}/blob/{}/{}",
        github_repo.trim_matches('/'),
        commit_hash,
        file_path.trim_start_matches('/')
    )
}

/// Derive the named-graph URI scoping one document's statements:
/// `{base}/graph/{author}/{repo}/{slop_id}`.
///
/// `repo_name` is the repository name without the org prefix. The graph URI
/// is used only to scope statements, never as a statement subject or object.
pub fn graph_uri(base: &str, author: &str, repo_name: &str, slop_id: &str) -> String {
    format!(
        "{}/graph/{}/{}/{}",
        base.trim_end_matches('/'),
        author,
        repo_name,
        slop_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://slop.at";

    #[test]
    fn test_entity_uri_deterministic() {
        assert_eq!(entity_uri(BASE, "Alice"), entity_uri(BASE, "Alice"));
    }

    #[test]
    fn test_entity_uri_normalization_equivalence() {
        // Equal iff normalized forms are equal
        assert_eq!(entity_uri(BASE, "Alice"), entity_uri(BASE, "  alice "));
        assert_eq!(entity_uri(BASE, "ACME Corp"), entity_uri(BASE, "acme corp"));
        assert_ne!(entity_uri(BASE, "Alice"), entity_uri(BASE, "Alic e"));
    }

    #[test]
    fn test_entity_uri_shape() {
        let uri = entity_uri(BASE, "Acme Corp");
        let suffix = uri.strip_prefix("https://slop.at/entity/").unwrap();
        let (digest, slug) = suffix.split_once('/').unwrap();
        assert_eq!(digest.len(), 8);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(slug, "acme-corp");
    }

    #[test]
    fn test_entity_uri_slug_truncated() {
        let long = "a".repeat(120);
        let uri = entity_uri(BASE, &long);
        let slug = uri.rsplit('/').next().unwrap();
        assert_eq!(slug.chars().count(), 50);
    }

    #[test]
    fn test_entity_uri_trailing_slash_base() {
        assert_eq!(entity_uri("https://slop.at/", "Bob"), entity_uri(BASE, "Bob"));
    }

    #[test]
    fn test_document_uri() {
        let uri = document_uri("alice/slops", "slops/abc.md", "deadbeef");
        assert_eq!(uri, "https://github.com/alice/slops/blob/deadbeef/slops/abc.md");
    }

    #[test]
    fn test_graph_uri() {
        let uri = graph_uri(BASE, "alice", "slops", "0c5e6f2a");
        assert_eq!(uri, "https://slop.at/graph/alice/slops/0c5e6f2a");
    }
}
