use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::models::{Annotation, FileRecord};

use super::Preprocessor;

/// Renames annotation labels through a source-to-target mapping
///
/// In strict mode (the default), a label with no mapping entry is an error.
/// With `keep_missing`, unmapped labels pass through unchanged.
#[derive(Debug, Clone)]
pub struct LabelMapper {
    mapping: BTreeMap<String, String>,
    keep_missing: bool,
}

impl LabelMapper {
    pub fn new(mapping: BTreeMap<String, String>, keep_missing: bool) -> Self {
        Self {
            mapping,
            keep_missing,
        }
    }
}

impl Preprocessor for LabelMapper {
    type Output = Annotation;

    fn process(&self, file: &FileRecord) -> Result<Annotation> {
        let annotation = file
            .annotation
            .as_ref()
            .ok_or(Error::MissingKey("annotation"))?;

        if !self.keep_missing {
            let missing = annotation
                .labels()
                .into_iter()
                .find(|label| !self.mapping.contains_key(label));
            if let Some(label) = missing {
                return Err(Error::UnmappedLabel(label));
            }
        }

        Ok(annotation.rename_labels(&self.mapping))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileRecord, Segment};

    fn file_with_labels(labels: &[&str]) -> FileRecord {
        let mut annotation = Annotation::new(Some("rec1".to_string()));
        for (track, label) in labels.iter().enumerate() {
            annotation.insert(Segment::new(track as f64, track as f64 + 1.0), track, *label);
        }
        let mut file = FileRecord::new("rec1");
        file.annotation = Some(annotation);
        file
    }

    fn mapping(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect()
    }

    #[test]
    fn test_strict_mapping_renames_when_complete() {
        let mapper = LabelMapper::new(mapping(&[("A", "M")]), false);
        let file = file_with_labels(&["A", "A"]);

        let renamed = mapper.process(&file).unwrap();
        assert_eq!(renamed.labels(), vec!["M".to_string()]);
        assert_eq!(renamed.entries[1].label, "M");
    }

    #[test]
    fn test_strict_mapping_fails_on_unmapped_label() {
        let mapper = LabelMapper::new(mapping(&[("A", "M")]), false);
        let file = file_with_labels(&["A", "B"]);

        let err = mapper.process(&file).unwrap_err();
        assert!(matches!(err, Error::UnmappedLabel(label) if label == "B"));
    }

    #[test]
    fn test_keep_missing_passes_unmapped_labels_through() {
        let mapper = LabelMapper::new(mapping(&[("A", "M")]), true);
        let file = file_with_labels(&["A", "B"]);

        let renamed = mapper.process(&file).unwrap();
        assert_eq!(renamed.labels(), vec!["B".to_string(), "M".to_string()]);
    }

    #[test]
    fn test_mapping_preserves_segments_and_tracks() {
        let mapper = LabelMapper::new(mapping(&[("A", "M"), ("B", "N")]), false);
        let file = file_with_labels(&["A", "B"]);

        let renamed = mapper.process(&file).unwrap();
        let input = file.annotation.as_ref().unwrap();
        assert_eq!(renamed.len(), input.len());
        for (before, after) in input.iter().zip(renamed.iter()) {
            assert_eq!(before.segment, after.segment);
            assert_eq!(before.track, after.track);
        }
    }

    #[test]
    fn test_mapping_requires_annotation() {
        let mapper = LabelMapper::new(mapping(&[]), true);
        let file = FileRecord::new("rec1");
        assert!(matches!(
            mapper.process(&file),
            Err(Error::MissingKey("annotation"))
        ));
    }
}
