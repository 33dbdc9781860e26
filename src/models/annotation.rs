use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{Segment, Timeline};

/// One `(segment, track) -> label` assignment within an annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSegment {
    pub segment: Segment,
    /// Positional disambiguator for segments sharing identical bounds
    pub track: usize,
    /// Speaker name or other label attached to the segment
    pub label: String,
}

/// "Who spoke when" for one recording
///
/// Entries are kept in insertion order; overlapping segments with the same
/// bounds are told apart by their track index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Recording identifier, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Labeled segments in insertion order
    pub entries: Vec<LabeledSegment>,
}

impl Annotation {
    /// Empty annotation for the given uri
    pub fn new(uri: Option<String>) -> Self {
        Self {
            uri,
            entries: Vec::new(),
        }
    }

    /// Assign `label` to `(segment, track)`, preserving insertion order
    pub fn insert(&mut self, segment: Segment, track: usize, label: impl Into<String>) {
        self.entries.push(LabeledSegment {
            segment,
            track,
            label: label.into(),
        });
    }

    /// Number of labeled segments
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the annotation holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabeledSegment> {
        self.entries.iter()
    }

    /// Sorted set of distinct labels used by this annotation
    pub fn labels(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.entries.iter().map(|e| e.label.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }

    /// Copy of this annotation with every label substituted via `mapping`
    ///
    /// Labels absent from the mapping are kept unchanged; segments and
    /// track indices are untouched.
    pub fn rename_labels(&self, mapping: &BTreeMap<String, String>) -> Annotation {
        let entries = self
            .entries
            .iter()
            .map(|e| LabeledSegment {
                segment: e.segment,
                track: e.track,
                label: mapping.get(&e.label).cloned().unwrap_or_else(|| e.label.clone()),
            })
            .collect();
        Annotation {
            uri: self.uri.clone(),
            entries,
        }
    }

    /// Timeline of this annotation's segments, in entry order
    pub fn get_timeline(&self) -> Timeline {
        Timeline::from_segments(
            self.entries.iter().map(|e| e.segment).collect(),
            self.uri.clone(),
        )
    }

    /// Smallest segment enclosing every entry, `None` when empty
    pub fn extent(&self) -> Option<Segment> {
        self.get_timeline().extent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Annotation {
        let mut annotation = Annotation::new(Some("rec1".to_string()));
        annotation.insert(Segment::new(0.0, 1.0), 0, "alice");
        annotation.insert(Segment::new(1.0, 2.0), 1, "bob");
        annotation.insert(Segment::new(1.0, 2.0), 2, "alice");
        annotation
    }

    #[test]
    fn test_labels_sorted_unique() {
        assert_eq!(sample().labels(), vec!["alice".to_string(), "bob".to_string()]);
    }

    #[test]
    fn test_rename_labels_passes_unmapped_through() {
        let mapping: BTreeMap<String, String> =
            [("alice".to_string(), "spk0".to_string())].into_iter().collect();

        let renamed = sample().rename_labels(&mapping);

        assert_eq!(renamed.entries[0].label, "spk0");
        assert_eq!(renamed.entries[1].label, "bob");
        assert_eq!(renamed.entries[2].label, "spk0");
        // Segments and tracks are untouched
        assert_eq!(renamed.entries[2].segment, Segment::new(1.0, 2.0));
        assert_eq!(renamed.entries[2].track, 2);
    }

    #[test]
    fn test_extent() {
        assert_eq!(sample().extent(), Some(Segment::new(0.0, 2.0)));
        assert_eq!(Annotation::new(None).extent(), None);
    }

    #[test]
    fn test_get_timeline_keeps_entry_order() {
        let timeline = sample().get_timeline();
        assert_eq!(timeline.uri.as_deref(), Some("rec1"));
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.segments[0], Segment::new(0.0, 1.0));
    }
}
