//! Shared HTTP utilities for gateway implementations.

/// Extracts the `message` (or `error`) string from a JSON error body.
pub(super) fn extract_api_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        let trimmed = body.trim();
        return (!trimmed.is_empty()).then(|| truncate_for_message(trimmed, 160));
    };
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(ToOwned::to_owned)
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::extract_api_message;

    #[rstest]
    #[case(r#"{"message": "Invalid credentials"}"#, Some("Invalid credentials"))]
    #[case(r#"{"error": "Forbidden"}"#, Some("Forbidden"))]
    #[case(r#"{"status": 500}"#, None)]
    #[case("Bad Gateway", Some("Bad Gateway"))]
    #[case("  ", None)]
    fn message_is_taken_from_known_keys(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_api_message(body).as_deref(), expected);
    }

    #[test]
    fn plain_text_bodies_are_truncated() {
        let body = "x".repeat(200);
        let message = extract_api_message(&body).expect("message should be present");
        assert_eq!(message.chars().count(), 163);
        assert!(message.ends_with("..."));
    }
}
