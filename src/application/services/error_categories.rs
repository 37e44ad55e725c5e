use std::collections::HashMap;

use crate::domain::models::{ErrorCategory, FailedRecipient};

/// Groups failures by exact error message, keeping the order in which each
/// message was first seen. Recipients keep their relative order too.
pub fn categorize<I>(failures: I) -> Vec<ErrorCategory>
where
    I: IntoIterator<Item = FailedRecipient>,
{
    let mut categories: Vec<ErrorCategory> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for failure in failures {
        match index.get(&failure.reason).copied() {
            Some(position) => categories[position].recipients.push(failure.recipient),
            None => {
                index.insert(failure.reason.clone(), categories.len());
                categories.push(ErrorCategory {
                    error_message: failure.reason,
                    recipients: vec![failure.recipient],
                });
            }
        }
    }

    categories
}

/// Same projection over the `"<id>: <reason>"` strings carried in progress events.
pub fn categorize_lines<S: AsRef<str>>(lines: &[S]) -> Vec<ErrorCategory> {
    categorize(lines.iter().map(|line| FailedRecipient::parse(line.as_ref())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_message_in_first_seen_order() {
        let lines = [
            "1: chat not found",
            "2: Forbidden: bot was blocked by the user",
            "3: chat not found",
            "4: rate limit: exceeded",
        ];
        let categories = categorize_lines(&lines);

        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0].error_message, "chat not found");
        assert_eq!(categories[0].recipients, vec!["1", "3"]);
        assert_eq!(
            categories[1].error_message,
            "Forbidden: bot was blocked by the user"
        );
        assert_eq!(categories[2].error_message, "rate limit: exceeded");
        assert_eq!(categories[2].recipients, vec!["4"]);
    }

    #[test]
    fn categories_partition_the_failed_set() {
        let lines: Vec<String> = (0..20)
            .map(|i| format!("{i}: error {}", i % 3))
            .collect();
        let categories = categorize_lines(&lines);

        let mut recipients: Vec<String> = categories
            .into_iter()
            .flat_map(|c| c.recipients)
            .collect();
        recipients.sort_by_key(|id| id.parse::<u32>().unwrap_or(u32::MAX));
        let expected: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        assert_eq!(recipients, expected);
    }

    #[test]
    fn empty_input_yields_no_categories() {
        let lines: [&str; 0] = [];
        assert!(categorize_lines(&lines).is_empty());
    }
}
