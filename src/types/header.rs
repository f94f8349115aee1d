#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One entry of the flight-mode timeline built from MODE records
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModeTransition {
    pub mode: String,
    pub mode_number: Option<i64>,
    pub start_us: u64,
    /// Start of the following transition; `None` for the last mode in the log
    pub end_us: Option<u64>,
}

impl ModeTransition {
    pub fn start_seconds(&self) -> f64 {
        self.start_us as f64 / 1_000_000.0
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.end_us
            .map(|end| end.saturating_sub(self.start_us) as f64 / 1_000_000.0)
    }
}

/// Builds the timeline from mode changes in log order, closing each entry at the
/// start of the next one.
pub fn build_mode_timeline(changes: &[(u64, String, Option<i64>)]) -> Vec<ModeTransition> {
    let mut timeline: Vec<ModeTransition> = Vec::with_capacity(changes.len());
    for (time_us, mode, mode_number) in changes {
        if let Some(previous) = timeline.last_mut() {
            previous.end_us = Some(*time_us);
        }
        timeline.push(ModeTransition {
            mode: mode.clone(),
            mode_number: *mode_number,
            start_us: *time_us,
            end_us: None,
        });
    }
    timeline
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_closes_previous_entries() {
        let changes = vec![
            (1_000_000, "MANUAL".to_string(), Some(0)),
            (4_500_000, "FBWA".to_string(), Some(5)),
            (10_000_000, "RTL".to_string(), Some(11)),
        ];
        let timeline = build_mode_timeline(&changes);

        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline[0].end_us, Some(4_500_000));
        assert_eq!(timeline[0].duration_seconds(), Some(3.5));
        assert_eq!(timeline[1].start_seconds(), 4.5);
        assert_eq!(timeline[2].end_us, None);
        assert_eq!(timeline[2].duration_seconds(), None);
    }

    #[test]
    fn test_empty_timeline() {
        assert!(build_mode_timeline(&[]).is_empty());
    }
}
