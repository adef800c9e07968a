//! Query eligibility.

/// Whether a query may be sent to the backend.
///
/// Only the trimmed form is checked; the query itself is sent as typed.
pub fn is_submittable(query: &str) -> bool {
    !query.trim().is_empty()
}

/// `POST /ask` request body
#[derive(Debug, Clone, serde::Serialize)]
pub struct AskRequest<'a> {
    pub query: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_is_not_submittable() {
        assert!(!is_submittable(""));
        assert!(!is_submittable("   "));
        assert!(!is_submittable("\n\t \r\n"));
    }

    #[test]
    fn test_text_is_submittable() {
        assert!(is_submittable("What is the capital of France?"));
        assert!(is_submittable("  x  "));
    }

    #[test]
    fn test_request_body_has_only_query() {
        let body = serde_json::to_value(AskRequest { query: " Who? " }).unwrap();
        assert_eq!(body, serde_json::json!({ "query": " Who? " }));
    }
}
