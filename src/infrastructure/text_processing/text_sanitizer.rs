use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*```[A-Za-z]*[ \t]*\r?$\n?").unwrap());

/// Cleans model output without touching full-width characters: NFC composition,
/// markdown fences stripped, trailing blanks trimmed, blank-line runs collapsed.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let composed: String = raw.nfc().collect();
    let unfenced = CODE_FENCE.replace_all(&composed, "");

    let mut result = String::with_capacity(unfenced.len());
    let mut prev_was_blank = false;
    let mut first_content = true;

    for line in unfenced.lines() {
        let trimmed = line.trim_end();

        if trimmed.trim().is_empty() {
            prev_was_blank = true;
        } else {
            if !first_content && prev_was_blank {
                result.push_str("\n\n");
            } else if !first_content {
                result.push('\n');
            }
            result.push_str(trimmed);
            prev_was_blank = false;
            first_content = false;
        }
    }

    result
}
