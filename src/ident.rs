//! Record-level helpers: unique identifiers, scoped labels, annotated regions

use crate::diag::{DiagnosticSink, Warning};
use crate::error::{Error, Result};
use crate::models::{FileRecord, Segment, Timeline};

/// Build the `{database}/{uri}_{channel}` identifier for a record
///
/// The database prefix and channel suffix are dropped when unset, so a bare
/// record still gets a usable identifier (its uri).
pub fn get_unique_identifier(file: &FileRecord) -> String {
    let database = file
        .database
        .as_ref()
        .map(|database| format!("{}/", database))
        .unwrap_or_default();
    let channel = file
        .channel
        .map(|channel| format!("_{}", channel))
        .unwrap_or_default();
    format!("{}{}{}", database, file.uri, channel)
}

/// Qualify a label with its database as `{database}|{label}`
///
/// Labels like "A" or "spk1" collide across corpora, so cross-database
/// work needs them scoped. Fails if the record has no database.
pub fn get_label_identifier(label: &str, file: &FileRecord) -> Result<String> {
    let database = file
        .database
        .as_deref()
        .ok_or(Error::MissingKey("database"))?;
    Ok(format!("{}|{}", database, label))
}

/// Resolve the annotated region of a record
///
/// Prefers the explicit `annotated` timeline. Falls back to `[0, duration)`
/// when only a duration is known, then to the annotation extent as a last
/// resort; both fallbacks report through `sink` since evaluation against an
/// approximated region is less precise.
pub fn get_annotated(file: &FileRecord, sink: &mut dyn DiagnosticSink) -> Result<Timeline> {
    if let Some(annotated) = &file.annotated {
        return Ok(annotated.clone());
    }

    if let Some(duration) = file.duration {
        sink.warn(Warning::AnnotatedFromDuration {
            uri: file.uri.clone(),
        });
        let segment = Segment::new(0.0, duration);
        return Ok(Timeline::from_segments(vec![segment], Some(file.uri.clone())));
    }

    let annotation = file
        .annotation
        .as_ref()
        .ok_or(Error::MissingKey("annotation"))?;
    sink.warn(Warning::AnnotatedFromExtent {
        uri: file.uri.clone(),
    });
    let mut timeline = Timeline::new(Some(file.uri.clone()));
    if let Some(extent) = annotation.get_timeline().extent() {
        timeline.push(extent);
    }
    Ok(timeline)
}
