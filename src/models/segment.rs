use serde::{Deserialize, Serialize};

/// A time interval `[start, end)` in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl Segment {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Duration in seconds (negative when end precedes start)
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the interval covers no time at all
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Smallest segment covering both `self` and `other`
    pub fn union(&self, other: &Segment) -> Segment {
        Segment {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        assert_eq!(Segment::new(1.0, 3.5).duration(), 2.5);
        assert_eq!(Segment::new(2.0, 1.0).duration(), -1.0);
    }

    #[test]
    fn test_is_empty() {
        assert!(Segment::new(1.0, 1.0).is_empty());
        assert!(Segment::new(2.0, 1.5).is_empty());
        assert!(!Segment::new(0.0, 0.001).is_empty());
    }

    #[test]
    fn test_union() {
        let a = Segment::new(1.0, 2.0);
        let b = Segment::new(1.5, 4.0);
        assert_eq!(a.union(&b), Segment::new(1.0, 4.0));
        // Union of disjoint segments spans the gap
        let c = Segment::new(10.0, 11.0);
        assert_eq!(a.union(&c), Segment::new(1.0, 11.0));
    }
}
