//! Label formatting for option names.

/// Turn a snake_case key into a title-cased label.
///
/// `due_date` becomes `Due Date`; keys without underscores are capitalised.
pub fn humanize_snake_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_snake_case() {
        assert_eq!(humanize_snake_case("due_date"), "Due Date");
        assert_eq!(humanize_snake_case("sub_issue_count"), "Sub Issue Count");
        assert_eq!(humanize_snake_case("labels"), "Labels");
        assert_eq!(humanize_snake_case(""), "");
    }
}
