pub mod error_categories;
pub mod messenger;
pub mod outcome_classifier;
pub mod progress;
