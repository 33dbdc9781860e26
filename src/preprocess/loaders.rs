//! File-backed preprocessors
//!
//! Each loader reads and groups its whole file at construction, so malformed
//! rows surface once up front instead of midway through a corpus pass.
//! `process` is then a per-uri lookup.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::io::formats::{RTTM, UEM, fold_annotations, fold_timelines};
use crate::io::table::{Column, TableSchema, read_rows};
use crate::models::{Annotation, FileRecord, Segment, TimedWord, Timeline};

use super::Preprocessor;

const CTM: TableSchema = TableSchema {
    format: "CTM",
    columns: &[
        Column::text("uri"),
        Column::skip(), // channel
        Column::number("start"),
        Column::number("duration"),
        Column::text("word"),
        Column::number("confidence"),
    ],
};

const MAP: TableSchema = TableSchema {
    format: "MAP",
    columns: &[Column::text("uri"), Column::number("value")],
};

/// Serves per-uri speaker annotations out of one RTTM file
///
/// Keeps every row regardless of its type field; filter beforehand if only
/// speech turns are wanted.
#[derive(Debug, Clone)]
pub struct RttmLoader {
    annotations: BTreeMap<String, Annotation>,
}

impl RttmLoader {
    pub fn new(path: &Path) -> Result<Self> {
        let rows = read_rows(path, &RTTM)?;
        let mut parsed = Vec::with_capacity(rows.len());
        for row in &rows {
            let uri = row.text("uri").to_string();
            let start = row.number("start");
            let segment = Segment::new(start, start + row.number("duration"));
            if segment.is_empty() {
                return Err(Error::EmptySegment {
                    path: path.to_path_buf(),
                    uri,
                    time: start,
                });
            }
            parsed.push((uri, segment, row.text("speaker").to_string()));
        }
        Ok(Self {
            annotations: fold_annotations(parsed),
        })
    }
}

impl Preprocessor for RttmLoader {
    type Output = Annotation;

    fn process(&self, file: &FileRecord) -> Result<Annotation> {
        Ok(self
            .annotations
            .get(&file.uri)
            .cloned()
            .unwrap_or_else(|| Annotation::new(Some(file.uri.clone()))))
    }
}

/// Serves per-uri evaluation-map timelines out of one UEM file
#[derive(Debug, Clone)]
pub struct UemLoader {
    timelines: BTreeMap<String, Timeline>,
}

impl UemLoader {
    pub fn new(path: &Path) -> Result<Self> {
        let rows = read_rows(path, &UEM)?;
        let mut parsed = Vec::with_capacity(rows.len());
        for row in &rows {
            let uri = row.text("uri").to_string();
            let start = row.number("start");
            let segment = Segment::new(start, row.number("end"));
            if segment.is_empty() {
                return Err(Error::EmptySegment {
                    path: path.to_path_buf(),
                    uri,
                    time: start,
                });
            }
            parsed.push((uri, segment));
        }
        Ok(Self {
            timelines: fold_timelines(parsed),
        })
    }
}

impl Preprocessor for UemLoader {
    type Output = Timeline;

    fn process(&self, file: &FileRecord) -> Result<Timeline> {
        Ok(self
            .timelines
            .get(&file.uri)
            .cloned()
            .unwrap_or_else(|| Timeline::new(Some(file.uri.clone()))))
    }
}

/// Serves per-uri word-level transcripts out of one CTM file
#[derive(Debug, Clone)]
pub struct CtmLoader {
    words: BTreeMap<String, Vec<TimedWord>>,
}

impl CtmLoader {
    pub fn new(path: &Path) -> Result<Self> {
        let rows = read_rows(path, &CTM)?;
        let mut words: BTreeMap<String, Vec<TimedWord>> = BTreeMap::new();
        for row in &rows {
            let start = row.number("start");
            words
                .entry(row.text("uri").to_string())
                .or_default()
                .push(TimedWord {
                    word: row.text("word").to_string(),
                    start,
                    end: start + row.number("duration"),
                    confidence: row.number("confidence"),
                });
        }
        Ok(Self { words })
    }
}

impl Preprocessor for CtmLoader {
    type Output = Vec<TimedWord>;

    fn process(&self, file: &FileRecord) -> Result<Vec<TimedWord>> {
        Ok(self.words.get(&file.uri).cloned().unwrap_or_default())
    }
}

/// Serves `[0, value)` timelines out of a generic `{uri} {value}` file
///
/// Typical use is a duration listing. When a uri repeats, the minimum
/// value wins: the shorter duration is the one every channel is known
/// to cover.
#[derive(Debug, Clone)]
pub struct MapLoader {
    path: PathBuf,
    values: BTreeMap<String, f64>,
}

impl MapLoader {
    pub fn new(path: &Path) -> Result<Self> {
        let rows = read_rows(path, &MAP)?;
        let mut values: BTreeMap<String, f64> = BTreeMap::new();
        for row in &rows {
            let value = row.number("value");
            values
                .entry(row.text("uri").to_string())
                .and_modify(|current| *current = f64::min(*current, value))
                .or_insert(value);
        }
        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }
}

impl Preprocessor for MapLoader {
    type Output = Timeline;

    fn process(&self, file: &FileRecord) -> Result<Timeline> {
        let value = self
            .values
            .get(&file.uri)
            .copied()
            .ok_or_else(|| Error::UnknownUri {
                uri: file.uri.clone(),
                path: self.path.clone(),
            })?;
        Ok(Timeline::from_segments(
            vec![Segment::new(0.0, value)],
            Some(file.uri.clone()),
        ))
    }
}
