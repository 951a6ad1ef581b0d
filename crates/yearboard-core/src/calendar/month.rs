//! Monthly topics: each month carries four named topic rows of events.

use serde::{Deserialize, Serialize};

use super::StickerEvent;

/// Topic slots per month.
pub const TOPICS_PER_MONTH: usize = 4;

/// Default topic ids, in display order.
pub const DEFAULT_TOPIC_IDS: [u32; TOPICS_PER_MONTH] = [0, 1, 2, 3];

/// One named topic row and its sticker events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTopic {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub events: Vec<StickerEvent>,
}

impl MonthlyTopic {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Vec::new(),
        }
    }

    /// No name and no events.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.events.is_empty()
    }
}

/// All topic data for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthDocument {
    /// Display order of topic ids, user-reorderable.
    #[serde(default = "default_topic_order")]
    pub topic_order: Vec<u32>,
    #[serde(default = "default_topics")]
    pub topics: Vec<MonthlyTopic>,
}

fn default_topic_order() -> Vec<u32> {
    DEFAULT_TOPIC_IDS.to_vec()
}

fn default_topics() -> Vec<MonthlyTopic> {
    vec![MonthlyTopic::default(); TOPICS_PER_MONTH]
}

impl Default for MonthDocument {
    fn default() -> Self {
        Self {
            topic_order: default_topic_order(),
            topics: default_topics(),
        }
    }
}

impl MonthDocument {
    pub fn is_empty(&self) -> bool {
        self.topics.iter().all(MonthlyTopic::is_empty)
    }

    pub fn topic(&self, topic_id: u32) -> Option<&MonthlyTopic> {
        self.topics.get(topic_id as usize)
    }

    pub fn topic_mut(&mut self, topic_id: u32) -> Option<&mut MonthlyTopic> {
        self.topics.get_mut(topic_id as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_month_has_four_unnamed_topics() {
        let month = MonthDocument::default();
        assert_eq!(month.topic_order, vec![0, 1, 2, 3]);
        assert_eq!(month.topics.len(), TOPICS_PER_MONTH);
        assert!(month.is_empty());
    }

    #[test]
    fn topic_order_serializes_camel_case() {
        let json = serde_json::to_string(&MonthDocument::default()).unwrap();
        assert!(json.contains("\"topicOrder\":[0,1,2,3]"));
    }

    #[test]
    fn named_topic_makes_month_non_empty() {
        let mut month = MonthDocument::default();
        month.topics[1] = MonthlyTopic::named("Fitness");
        assert!(!month.is_empty());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let month: MonthDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(month, MonthDocument::default());
    }
}
