//! Progress checkpoints reported at stage boundaries.
//!
//! The pipeline never renders progress itself; callers inject a sink.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Checkpoint {
    Started,
    Cleaned,
    Splitting,
    Saving,
    Complete,
}

impl Checkpoint {
    pub fn percent(&self) -> u8 {
        match self {
            Checkpoint::Started => 0,
            Checkpoint::Cleaned => 30,
            Checkpoint::Splitting => 60,
            Checkpoint::Saving => 80,
            Checkpoint::Complete => 100,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Checkpoint::Started => "Processing file...",
            Checkpoint::Cleaned => "Cleaning data...",
            Checkpoint::Splitting => "Separating income and expenses...",
            Checkpoint::Saving => "Saving to Excel...",
            Checkpoint::Complete => "Complete!",
        }
    }
}

pub trait ProgressSink {
    fn report(&mut self, checkpoint: Checkpoint);
}

impl<F: FnMut(Checkpoint)> ProgressSink for F {
    fn report(&mut self, checkpoint: Checkpoint) {
        self(checkpoint)
    }
}

/// Discards every checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _checkpoint: Checkpoint) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentages_increase() {
        let all = [
            Checkpoint::Started,
            Checkpoint::Cleaned,
            Checkpoint::Splitting,
            Checkpoint::Saving,
            Checkpoint::Complete,
        ];
        for w in all.windows(2) {
            assert!(w[0].percent() < w[1].percent());
        }
        assert_eq!(Checkpoint::Complete.percent(), 100);
    }

    #[test]
    fn test_closure_is_a_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |c: Checkpoint| seen.push(c.percent());
            sink.report(Checkpoint::Cleaned);
            sink.report(Checkpoint::Saving);
        }
        assert_eq!(seen, vec![30, 80]);
    }
}
