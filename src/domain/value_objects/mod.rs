#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientListFormat {
    /// One identifier per line, as in an uploaded single-column CSV.
    Lines,
    /// Comma separated, as typed into a manual entry field.
    Comma,
}

/// Splits raw operator input into recipient identifiers. Entries are trimmed and
/// blanks dropped; the identifiers themselves are not checked.
pub fn parse_recipients(format: RecipientListFormat, content: &str) -> Vec<String> {
    let separator = match format {
        RecipientListFormat::Lines => '\n',
        RecipientListFormat::Comma => ',',
    };
    content
        .split(separator)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_csv_lines_with_crlf_and_blanks() {
        let users = parse_recipients(RecipientListFormat::Lines, "101\r\n 202 \n\n303\n");
        assert_eq!(users, vec!["101", "202", "303"]);
    }

    #[test]
    fn parses_comma_separated_entry() {
        let users = parse_recipients(RecipientListFormat::Comma, " 1, 2,,3 ,");
        assert_eq!(users, vec!["1", "2", "3"]);
    }

    #[test]
    fn keeps_commas_inside_lines() {
        let users = parse_recipients(RecipientListFormat::Lines, "a,b\nc");
        assert_eq!(users, vec!["a,b", "c"]);
    }
}
