use crate::{application::services::messenger::ProviderReply, domain::models::SendOutcome};

const UNKNOWN_ERROR: &str = "Unknown error";

/// Turns one send attempt into exactly one outcome. Never fails.
pub fn classify(recipient: &str, reply: anyhow::Result<ProviderReply>) -> SendOutcome {
    match reply {
        Err(err) => {
            let reason = format!("{err:#}");
            if reason.trim().is_empty() {
                SendOutcome::failed(recipient, UNKNOWN_ERROR)
            } else {
                SendOutcome::failed(recipient, reason)
            }
        }
        Ok(reply) if !(200..300).contains(&reply.status) || !reply.ok => {
            let reason = reply
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| match reply.error_code {
                    Some(code) => format!("Failed to send message: {code}"),
                    None => format!("Failed to send message: HTTP {}", reply.status),
                });
            SendOutcome::failed(recipient, reason)
        }
        Ok(_) => SendOutcome::delivered(recipient),
    }
}
