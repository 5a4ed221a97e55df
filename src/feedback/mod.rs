//! Feedback: retaliation against controllers.

mod engine;

pub use engine::{FeedbackBatch, FeedbackEngine, FeedbackEvent, FeedbackKind};
