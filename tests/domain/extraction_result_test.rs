use tategaki::domain::{
    ExpectedSegment, ExtractionResult, ExtractionStatus, FAILURE_SENTINEL, FailureKind,
    GroupName, is_failure_text,
};

fn expected(file: &str, label: &str) -> ExpectedSegment {
    ExpectedSegment {
        source_file: file.to_string(),
        label: label.to_string(),
    }
}

#[test]
fn given_tagged_response_when_parsing_then_splits_segments_in_order() {
    let raw = "[[file:p1]]\n[[segment:right]]\n一行目\n[[segment:left]]\n二行目\n[[/file:p1]]";
    let want = [expected("p1", "right"), expected("p1", "left")];

    let result = ExtractionResult::from_response("a".into(), raw.to_string(), &want, &[]);

    assert_eq!(result.status, ExtractionStatus::Ok);
    let texts: Vec<(&str, &str)> = result
        .segments
        .iter()
        .map(|s| (s.label.as_str(), s.text.as_str()))
        .collect();
    assert_eq!(texts, vec![("right", "一行目"), ("left", "二行目")]);
    assert!(result.segments.iter().all(|s| s.source_file == "p1"));
}

#[test]
fn given_bracketed_file_names_when_parsing_then_segments_keep_their_source() {
    let raw = "[[file:scan[1].png]]\n[[segment:right]]\n右\n[[segment:left]]\n左\n[[/file:scan[1].png]]\n\
               [[file:page]]]\n[[segment:right]]\n次\n[[/file:page]]]";
    let want = [
        expected("scan[1].png", "right"),
        expected("scan[1].png", "left"),
        expected("page]", "right"),
    ];

    let result = ExtractionResult::from_response("a".into(), raw.to_string(), &want, &[]);

    assert_eq!(result.status, ExtractionStatus::Ok);
    let parsed: Vec<(&str, &str, &str)> = result
        .segments
        .iter()
        .map(|s| (s.source_file.as_str(), s.label.as_str(), s.text.as_str()))
        .collect();
    assert_eq!(
        parsed,
        vec![
            ("scan[1].png", "right", "右"),
            ("scan[1].png", "left", "左"),
            ("page]", "right", "次"),
        ]
    );
}

#[test]
fn given_missing_segment_when_parsing_then_partial_failure_lists_it() {
    let raw = "[[file:p1]]\n[[segment:right]]\n本文\n[[/file:p1]]";
    let want = [expected("p1", "right"), expected("p1", "left")];

    let result = ExtractionResult::from_response("a".into(), raw.to_string(), &want, &[]);

    assert_eq!(
        result.status,
        ExtractionStatus::PartialFailure {
            missing: vec!["p1/left".to_string()]
        }
    );
}

#[test]
fn given_unavailable_segment_when_parsing_then_reported_missing() {
    let raw = "[[file:p1]]\n[[segment:full-page]]\n本文\n[[/file:p1]]";
    let want = [expected("p1", "full-page")];
    let lost = [expected("p2", "full-page")];

    let result = ExtractionResult::from_response("a".into(), raw.to_string(), &want, &lost);

    assert_eq!(
        result.status,
        ExtractionStatus::PartialFailure {
            missing: vec!["p2/full-page".to_string()]
        }
    );
}

#[test]
fn given_untagged_text_for_single_segment_when_parsing_then_assigns_whole_text() {
    let want = [expected("p1", "full-page")];

    let result =
        ExtractionResult::from_response("a".into(), "  縦書きの本文  ".to_string(), &want, &[]);

    assert_eq!(result.status, ExtractionStatus::Ok);
    assert_eq!(result.segments.len(), 1);
    assert_eq!(result.segments[0].text, "縦書きの本文");
}

#[test]
fn given_failed_result_when_reading_text_then_starts_with_sentinel_and_names_group() {
    let result = ExtractionResult::failed(
        GroupName::from("article 2"),
        FailureKind::Exhausted,
        "rate limited",
    );

    assert!(result.raw_text.starts_with(FAILURE_SENTINEL));
    assert!(result.raw_text.contains("article 2"));
    assert!(result.raw_text.contains("rate limited"));
    assert!(result.is_failed());
    assert!(is_failure_text(&result.raw_text));
}

#[test]
fn given_empty_result_when_checking_then_ok_and_empty() {
    let result = ExtractionResult::empty("extra".into());

    assert!(result.is_empty());
    assert!(!result.is_failed());
    assert_eq!(result.status, ExtractionStatus::Ok);
}

#[test]
fn given_failed_status_when_serializing_then_tagged_by_status() {
    let result = ExtractionResult::failed("a".into(), FailureKind::Configuration, "bad key");

    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["status"]["status"], "failed");
    assert_eq!(json["status"]["kind"], "configuration");
}
