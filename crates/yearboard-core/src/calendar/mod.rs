//! Calendar data model.
//!
//! One [`CalendarDocument`] holds everything a user puts on a single year:
//! sticky notes in the quarterly grid plus twelve months of named topics
//! with colored sticker events. The sync layer treats the whole document as
//! an opaque serializable blob; only the rendering and editing layers look
//! inside it.

mod document;
mod event;
mod month;
mod note;

pub use document::{CalendarDocument, MONTHS_PER_YEAR, QUARTERS, SUPPORTED_YEARS};
pub use month::{MonthDocument, MonthlyTopic, DEFAULT_TOPIC_IDS, TOPICS_PER_MONTH};
pub use note::QuarterlyNote;
pub use event::StickerEvent;
