pub mod broadcast;
pub mod message;
pub mod outcome;
pub mod progress;

pub use broadcast::{BroadcastJob, MAX_BUTTONS};
pub use message::{Button, MessageBody, OutboundMessage, ParseMode};
pub use outcome::{DeliveryStatus, ErrorCategory, FailedRecipient, SendOutcome};
pub use progress::ProgressSnapshot;
