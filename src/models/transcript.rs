use serde::{Deserialize, Serialize};

/// A recognized word with time bounds and confidence (one CTM row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedWord {
    /// The recognized text
    pub word: String,
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds
    pub end: f64,
    /// Recognizer confidence (0-1)
    pub confidence: f64,
}

impl TimedWord {
    /// Duration of this word in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
