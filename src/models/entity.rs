//! Entity mention model and the fixed label-to-ontology-class table.

use serde::{Deserialize, Serialize};

use crate::graph::vocab;

/// Entity-type labels the extraction schema can produce.
///
/// This is the closed vocabulary surface: each label maps to exactly one
/// know.dev ontology class via [`EntityLabel::ontology_class`]. Unknown
/// labels are rejected at the NER boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    Organization,
    Place,
    Event,
    Meeting,
    Activity,
    Conference,
    DefinedTerm,
    Topic,
    Family,
    Community,
    Company,
}

impl EntityLabel {
    /// All labels, in schema order.
    pub const ALL: [EntityLabel; 12] = [
        EntityLabel::Person,
        EntityLabel::Organization,
        EntityLabel::Place,
        EntityLabel::Event,
        EntityLabel::Meeting,
        EntityLabel::Activity,
        EntityLabel::Conference,
        EntityLabel::DefinedTerm,
        EntityLabel::Topic,
        EntityLabel::Family,
        EntityLabel::Community,
        EntityLabel::Company,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Person => "Person",
            EntityLabel::Organization => "Organization",
            EntityLabel::Place => "Place",
            EntityLabel::Event => "Event",
            EntityLabel::Meeting => "Meeting",
            EntityLabel::Activity => "Activity",
            EntityLabel::Conference => "Conference",
            EntityLabel::DefinedTerm => "DefinedTerm",
            EntityLabel::Topic => "Topic",
            EntityLabel::Family => "Family",
            EntityLabel::Community => "Community",
            EntityLabel::Company => "Company",
        }
    }

    /// Prompt description sent to the NER engine for this label.
    pub fn description(&self) -> &'static str {
        match self {
            EntityLabel::Person => "People mentioned by name",
            EntityLabel::Organization => "Companies, institutions, groups",
            EntityLabel::Place => "Locations, venues, cities, countries",
            EntityLabel::Event => "Meetings, conferences, activities, parties",
            EntityLabel::Meeting => "Scheduled meetings or gatherings",
            EntityLabel::Activity => "Actions or activities performed",
            EntityLabel::Conference => "Professional conferences or symposiums",
            EntityLabel::DefinedTerm => "Technical terms, concepts, or keywords",
            EntityLabel::Topic => "Subjects or topics discussed",
            EntityLabel::Family => "Family units or groups",
            EntityLabel::Community => "Communities or social groups",
            EntityLabel::Company => "Business entities or companies",
        }
    }

    /// know.dev ontology class URI for this label.
    pub fn ontology_class(&self) -> String {
        format!("{}{}", vocab::KNOW, self.as_str())
    }
}

impl std::str::FromStr for EntityLabel {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for labels outside the fixed vocabulary.
#[derive(Debug, Clone)]
pub struct UnknownLabel(pub String);

impl std::fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown entity label: {}", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

/// A typed entity mention extracted from slop text.
///
/// Produced only by boundary validation in [`crate::extraction`]; a value of
/// this type always satisfies `char_start <= char_end`,
/// `confidence ∈ [0, 1]`, and `line_start <= line_end` when both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityMention {
    /// Surface text as it appears in the document.
    pub text: String,
    pub label: EntityLabel,
    /// Character span within the document content.
    pub char_start: usize,
    pub char_end: usize,
    /// 1-indexed line span; span-dependent statements are emitted only when
    /// both bounds are present.
    pub line_start: Option<u32>,
    pub line_end: Option<u32>,
    /// Engine confidence, carried through unmodified.
    pub confidence: f64,
}
