// Brand Factory Engine — Structured Response Helpers
// Models asked for JSON sometimes wrap it in a markdown fence or add a
// sentence around it. These helpers recover the JSON payload before serde
// sees it.

use serde::de::DeserializeOwned;

use crate::atoms::error::{EngineError, EngineResult};
use crate::engine::providers::openai::truncate_utf8;

/// Remove a surrounding ```json ... ``` fence, if present.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string ("json", "JSON", ...) up to the first newline.
    // A one-line fence has no newline, so only a leading "json" is dropped.
    let body = match rest.find('\n') {
        Some(nl) => &rest[nl + 1..],
        None => rest
            .strip_prefix("json")
            .or_else(|| rest.strip_prefix("JSON"))
            .unwrap_or(rest),
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Deserialize a model response as `T`, mapping failures to `Parse`.
pub fn parse_json<T: DeserializeOwned>(what: &str, text: &str) -> EngineResult<T> {
    let payload = strip_code_fence(text);
    serde_json::from_str(payload).map_err(|e| {
        EngineError::parse(format!(
            "{} response is not valid JSON ({}): {}",
            what,
            e,
            truncate_utf8(payload, 120)
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn fences_are_stripped() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n[1]\n```  "), "[1]");
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn one_line_fences_are_stripped() {
        assert_eq!(strip_code_fence("```json{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```JSON [1] ```"), "[1]");
        assert_eq!(strip_code_fence("```{\"a\":1}```"), "{\"a\":1}");
        let value: Value = parse_json("test", "```json{\"a\":1}```").unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = parse_json::<Value>("ideas", "Sure! Here you go").unwrap_err();
        assert!(matches!(err, EngineError::Parse(_)));
        assert!(err.to_string().contains("ideas response"));
    }
}
