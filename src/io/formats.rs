use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{Annotation, Segment, Timeline};

use super::table::{Column, TableSchema, read_rows};

/// RTTM type field kept by default: speech turns
pub const RTTM_SPEAKER: &str = "SPEAKER";

pub(crate) const RTTM: TableSchema = TableSchema {
    format: "RTTM",
    columns: &[
        Column::text("type"),
        Column::text("uri"),
        Column::skip(), // channel
        Column::number("start"),
        Column::number("duration"),
        Column::skip(), // orthography
        Column::skip(), // speaker type
        Column::text("speaker"),
        Column::skip(), // confidence
        Column::skip(), // lookahead
    ],
};

const STM: TableSchema = TableSchema {
    format: "STM",
    columns: &[
        Column::text("uri"),
        Column::skip(), // channel
        Column::text("speaker"),
        Column::number("start"),
        Column::number("end"),
        // transcript words follow and are ignored
    ],
};

const MDTM: TableSchema = TableSchema {
    format: "MDTM",
    columns: &[
        Column::text("uri"),
        Column::skip(), // channel
        Column::number("start"),
        Column::number("duration"),
        Column::skip(), // event type
        Column::skip(), // event subtype
        Column::skip(), // gender
        Column::text("speaker"),
    ],
};

pub(crate) const UEM: TableSchema = TableSchema {
    format: "UEM",
    columns: &[
        Column::text("uri"),
        Column::skip(), // channel
        Column::number("start"),
        Column::number("end"),
    ],
};

const LAB: TableSchema = TableSchema {
    format: "LAB",
    columns: &[
        Column::number("start"),
        Column::number("end"),
        Column::text("label"),
    ],
};

/// Fold `(uri, segment, label)` rows into one annotation per uri
///
/// Rows keep their file order within each uri group; the track index is
/// the group's entry count at insertion time, so tracks come out 0-based
/// and contiguous per uri.
pub(crate) fn fold_annotations<I>(rows: I) -> BTreeMap<String, Annotation>
where
    I: IntoIterator<Item = (String, Segment, String)>,
{
    let mut annotations: BTreeMap<String, Annotation> = BTreeMap::new();
    for (uri, segment, label) in rows {
        let annotation = annotations
            .entry(uri.clone())
            .or_insert_with(|| Annotation::new(Some(uri)));
        let track = annotation.len();
        annotation.insert(segment, track, label);
    }
    annotations
}

/// Fold `(uri, segment)` rows into one timeline per uri
pub(crate) fn fold_timelines<I>(rows: I) -> BTreeMap<String, Timeline>
where
    I: IntoIterator<Item = (String, Segment)>,
{
    let mut timelines: BTreeMap<String, Timeline> = BTreeMap::new();
    for (uri, segment) in rows {
        timelines
            .entry(uri.clone())
            .or_insert_with(|| Timeline::new(Some(uri)))
            .push(segment);
    }
    timelines
}

/// Load an RTTM file, keeping only `SPEAKER` rows
///
/// Speaker diarization as a `{uri: Annotation}` map.
pub fn load_rttm(path: &Path) -> Result<BTreeMap<String, Annotation>> {
    load_rttm_with_type(path, RTTM_SPEAKER)
}

/// Load an RTTM file, keeping only rows whose type field equals `keep_type`
pub fn load_rttm_with_type(
    path: &Path,
    keep_type: &str,
) -> Result<BTreeMap<String, Annotation>> {
    let rows = read_rows(path, &RTTM)?;
    Ok(fold_annotations(
        rows.iter()
            .filter(|row| row.text("type") == keep_type)
            .map(|row| {
                let start = row.number("start");
                let segment = Segment::new(start, start + row.number("duration"));
                (
                    row.text("uri").to_string(),
                    segment,
                    row.text("speaker").to_string(),
                )
            }),
    ))
}

/// Load an STM file (speaker info only; transcript text is ignored)
pub fn load_stm(path: &Path) -> Result<BTreeMap<String, Annotation>> {
    let rows = read_rows(path, &STM)?;
    Ok(fold_annotations(rows.iter().map(|row| {
        let segment = Segment::new(row.number("start"), row.number("end"));
        (
            row.text("uri").to_string(),
            segment,
            row.text("speaker").to_string(),
        )
    })))
}

/// Load an MDTM file
pub fn load_mdtm(path: &Path) -> Result<BTreeMap<String, Annotation>> {
    let rows = read_rows(path, &MDTM)?;
    Ok(fold_annotations(rows.iter().map(|row| {
        let start = row.number("start");
        let segment = Segment::new(start, start + row.number("duration"));
        (
            row.text("uri").to_string(),
            segment,
            row.text("speaker").to_string(),
        )
    })))
}

/// Load a UEM file: the evaluation map as a `{uri: Timeline}` map
pub fn load_uem(path: &Path) -> Result<BTreeMap<String, Timeline>> {
    let rows = read_rows(path, &UEM)?;
    Ok(fold_timelines(rows.iter().map(|row| {
        let segment = Segment::new(row.number("start"), row.number("end"));
        (row.text("uri").to_string(), segment)
    })))
}

/// Load a LAB file
///
/// LAB files describe a single recording and carry no uri column, so the
/// uri is taken from the caller (and may stay unset).
pub fn load_lab(path: &Path, uri: Option<&str>) -> Result<Annotation> {
    let rows = read_rows(path, &LAB)?;
    let mut annotation = Annotation::new(uri.map(String::from));
    for (track, row) in rows.iter().enumerate() {
        let segment = Segment::new(row.number("start"), row.number("end"));
        annotation.insert(segment, track, row.text("label"));
    }
    Ok(annotation)
}

/// Load an LST file: one uri per line, order preserved, no dedup
pub fn load_lst(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Load a two-column mapping file as a `{first token: second token}` map
///
/// Tokens past the second are ignored; when a key repeats, the last line
/// wins. Blank lines are skipped; a non-blank line with fewer than two
/// tokens is malformed.
pub fn load_mapping(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut mapping = BTreeMap::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let key = tokens.next();
        let value = tokens.next();
        match (key, value) {
            (Some(key), Some(value)) => {
                mapping.insert(key.to_string(), value.to_string());
            }
            _ => {
                return Err(Error::Parse {
                    path: path.to_path_buf(),
                    line: index + 1,
                    message: "mapping line needs a key and a value".to_string(),
                });
            }
        }
    }
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    #[test]
    fn test_load_rttm_filters_and_groups() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "ref.rttm",
            "SPEAKER rec1 1 0.0 1.0 <NA> <NA> alice <NA> <NA>\n\
             NON-SPEECH rec1 1 1.0 0.5 <NA> <NA> noise <NA> <NA>\n\
             SPEAKER rec2 1 0.5 2.0 <NA> <NA> carol <NA> <NA>\n\
             SPEAKER rec1 1 1.5 1.0 <NA> <NA> bob <NA> <NA>\n",
        );

        let annotations = load_rttm(&path).unwrap();

        assert_eq!(annotations.len(), 2);
        let rec1 = &annotations["rec1"];
        assert_eq!(rec1.uri.as_deref(), Some("rec1"));
        assert_eq!(rec1.len(), 2);
        // Intervals are [start, start + duration)
        assert_eq!(rec1.entries[0].segment, Segment::new(0.0, 1.0));
        assert_eq!(rec1.entries[1].segment, Segment::new(1.5, 2.5));
        // Tracks are 0-based and contiguous within each uri group
        assert_eq!(rec1.entries[0].track, 0);
        assert_eq!(rec1.entries[1].track, 1);
        assert_eq!(annotations["rec2"].entries[0].track, 0);
    }

    #[test]
    fn test_load_rttm_keep_type_is_noop_when_all_match() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "ref.rttm",
            "SPEAKER rec1 1 0.0 1.0 <NA> <NA> alice <NA> <NA>\n\
             SPEAKER rec1 1 1.0 1.0 <NA> <NA> bob <NA> <NA>\n",
        );

        let annotations = load_rttm_with_type(&path, "SPEAKER").unwrap();
        assert_eq!(annotations["rec1"].len(), 2);
    }

    #[test]
    fn test_load_rttm_rejects_unparsable_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "bad.rttm",
            "SPEAKER rec1 1 0.0 1.0 <NA> <NA> alice <NA> <NA>\n\
             SPEAKER rec1 1 oops 1.0 <NA> <NA> bob <NA> <NA>\n",
        );

        let err = load_rttm(&path).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_load_stm_ignores_transcript_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "ref.stm",
            "rec1 1 alice 0.0 1.5 <o,f0,female> hello there\n\
             rec1 1 bob 1.5 3.0 <o,f0,male> hi how are you\n",
        );

        let annotations = load_stm(&path).unwrap();

        let rec1 = &annotations["rec1"];
        assert_eq!(rec1.len(), 2);
        assert_eq!(rec1.entries[0].segment, Segment::new(0.0, 1.5));
        assert_eq!(rec1.entries[0].label, "alice");
        assert_eq!(rec1.entries[1].segment, Segment::new(1.5, 3.0));
    }

    #[test]
    fn test_load_mdtm() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "ref.mdtm",
            "rec1 1 0.0 1.5 speaker na unknown alice\n\
             rec2 1 2.0 0.5 speaker na unknown bob\n",
        );

        let annotations = load_mdtm(&path).unwrap();

        assert_eq!(annotations["rec1"].entries[0].segment, Segment::new(0.0, 1.5));
        assert_eq!(annotations["rec2"].entries[0].segment, Segment::new(2.0, 2.5));
        assert_eq!(annotations["rec2"].entries[0].label, "bob");
    }

    #[test]
    fn test_load_uem() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "eval.uem",
            "rec1 1 0.0 10.0\nrec1 1 20.0 30.0\nrec2 1 5.0 15.0\n",
        );

        let timelines = load_uem(&path).unwrap();

        assert_eq!(timelines.len(), 2);
        assert_eq!(timelines["rec1"].len(), 2);
        assert_eq!(timelines["rec1"].segments[1], Segment::new(20.0, 30.0));
        assert_eq!(timelines["rec2"].uri.as_deref(), Some("rec2"));
    }

    #[test]
    fn test_load_lab() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "rec1.lab", "0.0 1.0 speech\n1.0 2.0 sil\n2.0 4.0 speech\n");

        let annotation = load_lab(&path, Some("rec1")).unwrap();

        assert_eq!(annotation.uri.as_deref(), Some("rec1"));
        assert_eq!(annotation.len(), 3);
        assert_eq!(annotation.entries[1].label, "sil");
        let tracks: Vec<usize> = annotation.iter().map(|e| e.track).collect();
        assert_eq!(tracks, vec![0, 1, 2]);

        let unset = load_lab(&path, None).unwrap();
        assert!(unset.uri.is_none());
    }

    #[test]
    fn test_grouping_loses_no_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "ref.mdtm",
            "rec2 1 0.0 1.0 speaker na unknown a\n\
             rec1 1 0.0 1.0 speaker na unknown b\n\
             rec2 1 1.0 1.0 speaker na unknown c\n\
             rec3 1 0.0 1.0 speaker na unknown d\n",
        );

        let annotations = load_mdtm(&path).unwrap();
        let total: usize = annotations.values().map(|a| a.len()).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_load_lst_drops_blank_lines_keeps_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "train.lst", "rec1\nrec2\n\nrec1\n  \n");

        let uris = load_lst(&path).unwrap();
        assert_eq!(uris, vec!["rec1".to_string(), "rec2".to_string(), "rec1".to_string()]);
    }

    #[test]
    fn test_load_mapping_last_duplicate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "speakers.map",
            "alice spk0 extra tokens ignored\nbob spk1\nalice spk2\n",
        );

        let mapping = load_mapping(&path).unwrap();

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping["alice"], "spk2");
        assert_eq!(mapping["bob"], "spk1");
    }

    #[test]
    fn test_load_mapping_rejects_short_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "speakers.map", "alice spk0\njustakey\n");

        let err = load_mapping(&path).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }
}
