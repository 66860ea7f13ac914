use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::extraction_request::ExpectedSegment;
use super::source_group::GroupName;

/// Prefix that marks a failed extraction inside the text channel.
pub const FAILURE_SENTINEL: &str = "[extraction failed:";

// File ids are upload names and may contain brackets; a value runs to the last `]]`
// of its bracket run.
static POSITION_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[(?P<close>/)?(?P<kind>file|segment):(?P<value>.*?\]*)\]\]").unwrap()
});

pub fn is_failure_text(text: &str) -> bool {
    text.trim_start().starts_with(FAILURE_SENTINEL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Retry budget spent on transient errors.
    Exhausted,
    /// Credentials, model id or routing are wrong; retrying cannot help.
    Configuration,
    /// The service refused this particular request.
    Rejected,
    /// The extraction task itself crashed.
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionStatus {
    Ok,
    PartialFailure { missing: Vec<String> },
    Failed { kind: FailureKind, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentText {
    pub label: String,
    pub source_file: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub group: GroupName,
    pub raw_text: String,
    pub segments: Vec<SegmentText>,
    pub status: ExtractionStatus,
}

impl ExtractionResult {
    pub fn empty(group: GroupName) -> Self {
        Self {
            group,
            raw_text: String::new(),
            segments: Vec::new(),
            status: ExtractionStatus::Ok,
        }
    }

    pub fn failed(group: GroupName, kind: FailureKind, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            raw_text: format!("{FAILURE_SENTINEL} {group}: {reason}]"),
            group,
            segments: Vec::new(),
            status: ExtractionStatus::Failed { kind, reason },
        }
    }

    /// Splits tagged service output into per-segment text and checks it against what
    /// the request asked for.
    pub fn from_response(
        group: GroupName,
        raw_text: String,
        expected: &[ExpectedSegment],
        unavailable: &[ExpectedSegment],
    ) -> Self {
        let mut segments = parse_tagged_segments(&raw_text);

        if segments.is_empty() && expected.len() == 1 && !raw_text.trim().is_empty() {
            segments.push(SegmentText {
                label: expected[0].label.clone(),
                source_file: expected[0].source_file.clone(),
                text: raw_text.trim().to_string(),
            });
        }

        let mut missing: Vec<String> = expected
            .iter()
            .filter(|want| {
                !segments
                    .iter()
                    .any(|got| got.label == want.label && got.source_file == want.source_file)
            })
            .map(|want| format!("{}/{}", want.source_file, want.label))
            .collect();

        for lost in unavailable {
            let key = format!("{}/{}", lost.source_file, lost.label);
            if !missing.contains(&key) {
                missing.push(key);
            }
        }

        let status = if missing.is_empty() {
            ExtractionStatus::Ok
        } else {
            ExtractionStatus::PartialFailure { missing }
        };

        Self {
            group,
            raw_text,
            segments,
            status,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, ExtractionStatus::Failed { .. })
    }

    pub fn is_empty(&self) -> bool {
        self.raw_text.trim().is_empty()
    }
}

fn parse_tagged_segments(raw: &str) -> Vec<SegmentText> {
    let mut segments = Vec::new();
    let mut current_file: Option<String> = None;
    let mut open: Option<(String, String, usize)> = None;

    for caps in POSITION_TAG.captures_iter(raw) {
        let Some(whole) = caps.get(0) else { continue };

        if let Some((label, source_file, start)) = open.take() {
            segments.push(SegmentText {
                label,
                source_file,
                text: raw[start..whole.start()].trim().to_string(),
            });
        }

        let value = caps["value"].trim().to_string();
        let closing = caps.name("close").is_some();

        match (&caps["kind"], closing) {
            ("file", false) => current_file = Some(value),
            ("file", true) => current_file = None,
            ("segment", _) => {
                let source_file = current_file.clone().unwrap_or_default();
                open = Some((value, source_file, whole.end()));
            }
            _ => {}
        }
    }

    if let Some((label, source_file, start)) = open {
        segments.push(SegmentText {
            label,
            source_file,
            text: raw[start..].trim().to_string(),
        });
    }

    segments
}
