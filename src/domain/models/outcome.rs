use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    Failed { reason: String },
}

/// Terminal result of one send attempt. Exactly one per recipient per job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    pub recipient: String,
    pub status: DeliveryStatus,
}

impl SendOutcome {
    pub fn delivered(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            status: DeliveryStatus::Delivered,
        }
    }

    pub fn failed(recipient: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            status: DeliveryStatus::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, DeliveryStatus::Delivered)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            DeliveryStatus::Delivered => None,
            DeliveryStatus::Failed { reason } => Some(reason),
        }
    }

    pub fn into_failure(self) -> Option<FailedRecipient> {
        match self.status {
            DeliveryStatus::Delivered => None,
            DeliveryStatus::Failed { reason } => Some(FailedRecipient {
                recipient: self.recipient,
                reason,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRecipient {
    pub recipient: String,
    pub reason: String,
}

const SEPARATOR: &str = ": ";

impl FailedRecipient {
    /// Reads the `"<id>: <reason>"` wire form. Only the first separator splits,
    /// so reasons containing `": "` survive intact. A line without a separator
    /// is taken as a bare identifier with an empty reason.
    pub fn parse(line: &str) -> Self {
        match line.split_once(SEPARATOR) {
            Some((recipient, reason)) => Self {
                recipient: recipient.to_string(),
                reason: reason.to_string(),
            },
            None => Self {
                recipient: line.to_string(),
                reason: String::new(),
            },
        }
    }
}

impl fmt::Display for FailedRecipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.recipient, SEPARATOR, self.reason)
    }
}

/// Failed recipients sharing one exact error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCategory {
    pub error_message: String,
    pub recipients: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_failure_line() {
        let failure = FailedRecipient::parse("42: Bot was blocked by the user");
        assert_eq!(failure.recipient, "42");
        assert_eq!(failure.reason, "Bot was blocked by the user");
    }

    #[test]
    fn keeps_colons_inside_the_reason() {
        let failure = FailedRecipient::parse("7: rate limit: exceeded");
        assert_eq!(failure.recipient, "7");
        assert_eq!(failure.reason, "rate limit: exceeded");
        assert_eq!(failure.to_string(), "7: rate limit: exceeded");
    }

    #[test]
    fn line_without_separator_is_bare_identifier() {
        let failure = FailedRecipient::parse("99");
        assert_eq!(failure.recipient, "99");
        assert_eq!(failure.reason, "");
    }

    #[test]
    fn delivered_outcome_has_no_failure() {
        let outcome = SendOutcome::delivered("a");
        assert!(outcome.is_success());
        assert_eq!(outcome.error(), None);
        assert_eq!(outcome.into_failure(), None);
    }
}
