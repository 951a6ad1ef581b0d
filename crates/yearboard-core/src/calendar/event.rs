//! Sticker events: colored, resizable day-range annotations inside a topic.

use serde::{Deserialize, Serialize};

/// A sticker event spanning a range of days within one month.
///
/// `start` and `end` are 1-based days of the month with `start <= end`
/// (the constructor normalizes swapped arguments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerEvent {
    pub start: u32,
    pub end: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl StickerEvent {
    pub fn new(start: u32, end: u32, name: impl Into<String>) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Whether the given day falls inside this event (inclusive).
    pub fn contains(&self, day: u32) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of days the event covers.
    pub fn duration(&self) -> u32 {
        self.end - self.start + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_swapped_days() {
        let event = StickerEvent::new(7, 5, "Gym");
        assert_eq!(event.start, 5);
        assert_eq!(event.end, 7);
    }

    #[test]
    fn contains_is_inclusive() {
        let event = StickerEvent::new(5, 7, "Gym");
        assert!(event.contains(5));
        assert!(event.contains(6));
        assert!(event.contains(7));
        assert!(!event.contains(4));
        assert!(!event.contains(8));
    }

    #[test]
    fn duration_counts_both_endpoints() {
        assert_eq!(StickerEvent::new(5, 7, "Gym").duration(), 3);
        assert_eq!(StickerEvent::new(12, 12, "Rest").duration(), 1);
    }

    #[test]
    fn color_is_omitted_when_absent() {
        let json = serde_json::to_string(&StickerEvent::new(1, 2, "Run")).unwrap();
        assert!(!json.contains("color"));

        let json = serde_json::to_string(&StickerEvent::new(1, 2, "Run").with_color("#ff0000"))
            .unwrap();
        assert!(json.contains("#ff0000"));
    }
}
