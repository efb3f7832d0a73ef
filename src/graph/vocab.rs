//! Fixed vocabulary surface: namespaces and predicates.
//!
//! The know.dev namespace supplies entity classes, schema.org the display
//! name, NFO the file-object vocabulary, Dublin Core the document metadata,
//! and the slop ontology the provenance predicates.

// Namespaces
pub const KNOW: &str = "https://know.dev/";
pub const SCHEMA: &str = "https://schema.org/";
pub const NFO: &str = "http://www.semanticdesktop.org/ontologies/2007/03/22/nfo#";
pub const SLOP: &str = "https://slop.at/ontology#";
pub const DCTERMS: &str = "http://purl.org/dc/terms/";

// Core RDF
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

// Datatypes
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

// File-object vocabulary
pub const NFO_FILE_DATA_OBJECT: &str =
    "http://www.semanticdesktop.org/ontologies/2007/03/22/nfo#FileDataObject";
pub const NFO_FILE_NAME: &str =
    "http://www.semanticdesktop.org/ontologies/2007/03/22/nfo#fileName";
pub const NFO_FILE_URL: &str = "http://www.semanticdesktop.org/ontologies/2007/03/22/nfo#fileUrl";

// Document metadata
pub const DCTERMS_TITLE: &str = "http://purl.org/dc/terms/title";
pub const DCTERMS_CREATOR: &str = "http://purl.org/dc/terms/creator";
pub const DCTERMS_CREATED: &str = "http://purl.org/dc/terms/created";
pub const DCTERMS_SUBJECT: &str = "http://purl.org/dc/terms/subject";

// Slop ontology
pub const SLOP_SLOP: &str = "https://slop.at/ontology#Slop";
pub const SLOP_ID: &str = "https://slop.at/ontology#slopId";
pub const SLOP_MENTIONS: &str = "https://slop.at/ontology#mentions";
pub const SLOP_CONFIDENCE: &str = "https://slop.at/ontology#confidence";
pub const SLOP_LINE_START: &str = "https://slop.at/ontology#lineStart";
pub const SLOP_LINE_END: &str = "https://slop.at/ontology#lineEnd";
pub const SLOP_SOURCE_URL: &str = "https://slop.at/ontology#sourceUrl";

// Display name
pub const SCHEMA_NAME: &str = "https://schema.org/name";
