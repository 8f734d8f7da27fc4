use serde_json::Value;

/// Accumulates model output and re-parses the whole buffer after every
/// fragment, yielding the array as soon as the text is a complete JSON array.
///
/// Re-parsing everything is quadratic over the life of a stream. That is fine
/// for chat-sized responses (a few hundred tokens) but not for bulk data.
#[derive(Debug, Default)]
pub struct JsonArrayExtractor {
    buffer: String,
    last_emitted: Option<Vec<Value>>,
}

impl JsonArrayExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `fragment` and tries to parse the buffer.
    ///
    /// Returns a snapshot of the array when the buffer parses as one, `None`
    /// for incomplete or non-array input. A miss is the normal outcome for
    /// most fragments and is never an error.
    pub fn feed(&mut self, fragment: &str) -> Option<Vec<Value>> {
        self.buffer.push_str(fragment);

        match serde_json::from_str::<Value>(&self.buffer) {
            Ok(Value::Array(items)) => {
                self.last_emitted = Some(items.clone());
                Some(items)
            }
            _ => None,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn last_emitted(&self) -> Option<&[Value]> {
        self.last_emitted.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yields_only_once_array_closes() {
        let mut extractor = JsonArrayExtractor::new();
        assert_eq!(extractor.feed("["), None);
        assert_eq!(extractor.feed("{\"a\":1}"), None);
        assert_eq!(extractor.feed("]"), Some(vec![json!({"a": 1})]));
    }

    #[test]
    fn test_final_result_matches_full_parse() {
        let text = r#"[{"name": "Ada", "age": 36}, {"name": "Linus", "tags": ["x", "y"]}]"#;
        let mut extractor = JsonArrayExtractor::new();
        let mut last = None;
        for chunk in text.as_bytes().chunks(7) {
            let fragment = std::str::from_utf8(chunk).unwrap();
            if let Some(items) = extractor.feed(fragment) {
                last = Some(items);
            }
        }
        let expected: Value = serde_json::from_str(text).unwrap();
        assert_eq!(last.map(Value::Array), Some(expected));
        assert_eq!(extractor.buffer(), text);
    }

    #[test]
    fn test_misses_before_valid_json() {
        let mut extractor = JsonArrayExtractor::new();
        for fragment in ["[{\"id\"", ": 1", ", \"v\": \"a]b\"", "}", ","] {
            assert!(extractor.feed(fragment).is_none(), "fragment {fragment:?} should miss");
        }
        assert!(extractor.last_emitted().is_none());
    }

    #[test]
    fn test_empty_fragment_keeps_last_array() {
        let mut extractor = JsonArrayExtractor::new();
        let first = extractor.feed("[1, 2]");
        assert_eq!(first, Some(vec![json!(1), json!(2)]));
        assert_eq!(extractor.feed(""), first);
        assert_eq!(extractor.last_emitted(), Some(&[json!(1), json!(2)][..]));
    }

    #[test]
    fn test_non_array_documents_miss() {
        let mut extractor = JsonArrayExtractor::new();
        assert_eq!(extractor.feed("{\"rows\": []}"), None);

        let mut extractor = JsonArrayExtractor::new();
        assert_eq!(extractor.feed("42"), None);
    }

    #[test]
    fn test_prose_preamble_never_parses() {
        let mut extractor = JsonArrayExtractor::new();
        assert_eq!(extractor.feed("Here is your data:\n"), None);
        assert_eq!(extractor.feed("[{\"a\": 1}]"), None);
    }

    #[test]
    fn test_trailing_garbage_invalidates_snapshot() {
        let mut extractor = JsonArrayExtractor::new();
        assert!(extractor.feed("[1]").is_some());
        assert_eq!(extractor.feed(" trailing"), None);
        // the last good snapshot is kept even though the buffer no longer parses
        assert_eq!(extractor.last_emitted(), Some(&[json!(1)][..]));
    }

    #[test]
    fn test_surrounding_whitespace_is_accepted() {
        let mut extractor = JsonArrayExtractor::new();
        assert_eq!(extractor.feed("\n  [true]  \n"), Some(vec![json!(true)]));
    }

    #[test]
    fn test_large_integers_pass_through_unchanged() {
        let mut extractor = JsonArrayExtractor::new();
        let snapshot = extractor
            .feed(r#"[{"id": 123456789012345678901234567890, "balance": 0.10}]"#)
            .unwrap();
        assert_eq!(
            serde_json::to_string(&snapshot).unwrap(),
            r#"[{"id":123456789012345678901234567890,"balance":0.10}]"#
        );
    }
}
