//! Non-fatal diagnostics for degraded-precision fallbacks

use std::fmt;

/// A warning emitted when a record value had to be approximated
///
/// These are non-fatal: processing continues with the approximated value,
/// but callers may want to log, count, or assert on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The annotated region was approximated by `[0, duration)`
    AnnotatedFromDuration { uri: String },
    /// The annotated region was approximated by the annotation extent
    AnnotatedFromExtent { uri: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::AnnotatedFromDuration { uri } => {
                write!(f, "annotated region of {} approximated by [0, duration)", uri)
            }
            Warning::AnnotatedFromExtent { uri } => {
                write!(
                    f,
                    "annotated region of {} approximated by the annotation extent; \
                     provide \"annotated\" directly or at least a \"duration\"",
                    uri
                )
            }
        }
    }
}

/// Receives non-fatal warnings from record-level helpers
pub trait DiagnosticSink {
    fn warn(&mut self, warning: Warning);
}

/// Default sink: forwards every warning to `tracing::warn!`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning);
    }
}

/// Collecting sink, mostly useful in tests
impl DiagnosticSink for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        self.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<Warning> = Vec::new();
        sink.warn(Warning::AnnotatedFromDuration {
            uri: "rec1".to_string(),
        });
        sink.warn(Warning::AnnotatedFromExtent {
            uri: "rec2".to_string(),
        });

        assert_eq!(sink.len(), 2);
        assert_eq!(
            sink[0],
            Warning::AnnotatedFromDuration {
                uri: "rec1".to_string()
            }
        );
    }

    #[test]
    fn test_warning_messages_name_the_uri() {
        let warning = Warning::AnnotatedFromExtent {
            uri: "meeting_04".to_string(),
        };
        let text = warning.to_string();
        assert!(text.contains("meeting_04"));
        assert!(text.contains("annotation extent"));
    }
}
