use tategaki::infrastructure::text_processing::sanitize_extracted_text;

#[test]
fn given_full_width_text_when_sanitizing_then_width_preserved() {
    let input = "ＡＢＣ　１２３「引用」";
    assert_eq!(sanitize_extracted_text(input), input);
}

#[test]
fn given_decomposed_kana_when_sanitizing_then_composed() {
    let input = "\u{30AB}\u{3099}";
    assert_eq!(sanitize_extracted_text(input), "\u{30AC}");
}

#[test]
fn given_code_fenced_output_when_sanitizing_then_fences_removed() {
    let input = "```text\n[[segment:right]]\n本文\n```";
    assert_eq!(sanitize_extracted_text(input), "[[segment:right]]\n本文");
}

#[test]
fn given_excessive_blank_lines_when_sanitizing_then_collapsed() {
    let input = "一段落\r\n\r\n\r\n\r\n二段落   ";
    assert_eq!(sanitize_extracted_text(input), "一段落\n\n二段落");
}

#[test]
fn given_whitespace_only_text_when_sanitizing_then_returns_empty() {
    assert_eq!(sanitize_extracted_text("   \n\n  "), "");
}
