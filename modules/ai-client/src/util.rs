/// Strip markdown code fences from a model response.
///
/// Even with a mandated JSON mime type, models occasionally wrap the payload
/// in ```json fences. Stripping before parsing keeps that a non-failure.
pub fn strip_code_blocks(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_blocks() {
        assert_eq!(strip_code_blocks("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("```\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("{}"), "{}");
    }

    #[test]
    fn test_strip_preserves_inner_content() {
        let wrapped = "```json\n{\"winner\": \"Lion\"}\n```";
        assert_eq!(strip_code_blocks(wrapped), "{\"winner\": \"Lion\"}");
    }
}
