use serde::{Deserialize, Serialize};

use super::Segment;

/// Ordered collection of time intervals for one recording
///
/// Segments are kept exactly as inserted: no merging, no deduplication,
/// no sorting. Loaders append in file order and callers own the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Recording identifier, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Segments in insertion order
    pub segments: Vec<Segment>,
}

impl Timeline {
    /// Empty timeline for the given uri
    pub fn new(uri: Option<String>) -> Self {
        Self {
            uri,
            segments: Vec::new(),
        }
    }

    /// Timeline over an already collected sequence of segments
    pub fn from_segments(segments: Vec<Segment>, uri: Option<String>) -> Self {
        Self { uri, segments }
    }

    /// Append a segment, preserving insertion order
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the timeline holds no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Smallest segment enclosing every segment, `None` when empty
    pub fn extent(&self) -> Option<Segment> {
        let mut segments = self.segments.iter();
        let first = *segments.next()?;
        Some(segments.fold(first, |acc, s| acc.union(s)))
    }

    /// Sum of all segment durations
    pub fn duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration()).sum()
    }
}
