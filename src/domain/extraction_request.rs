/// Reserved mark for characters the model cannot read.
pub const ILLEGIBLE_PLACEHOLDER: &str = "〓";

pub fn file_open_tag(file_id: &str) -> String {
    format!("[[file:{file_id}]]")
}

pub fn file_close_tag(file_id: &str) -> String {
    format!("[[/file:{file_id}]]")
}

pub fn segment_tag(label: &str) -> String {
    format!("[[segment:{label}]]")
}

pub fn unavailable_placeholder(reason: &str) -> String {
    format!("[[segment unavailable: {reason}]]")
}

#[derive(Debug, Clone)]
pub enum RequestItem {
    Instruction(String),
    PositionTag(String),
    Image {
        source_file: String,
        label: String,
        png: Vec<u8>,
    },
}

impl RequestItem {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RequestItem::Instruction(text) | RequestItem::PositionTag(text) => Some(text),
            RequestItem::Image { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedSegment {
    pub source_file: String,
    pub label: String,
}

/// Ordered instruction/tag/image sequence sent to the vision service.
#[derive(Debug, Clone, Default)]
pub struct ExtractionRequest {
    items: Vec<RequestItem>,
    expected: Vec<ExpectedSegment>,
    unavailable: Vec<ExpectedSegment>,
}

impl ExtractionRequest {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            items: vec![RequestItem::Instruction(instruction.into())],
            expected: Vec::new(),
            unavailable: Vec::new(),
        }
    }

    pub fn push_tag(&mut self, tag: String) {
        self.items.push(RequestItem::PositionTag(tag));
    }

    pub fn push_image(&mut self, source_file: &str, label: &str, png: Vec<u8>) {
        self.items.push(RequestItem::Image {
            source_file: source_file.to_string(),
            label: label.to_string(),
            png,
        });
    }

    /// Records a unit that could not be prepared; the placeholder stays visible to the model.
    pub fn push_unavailable(&mut self, source_file: &str, label: &str, reason: &str) {
        self.items
            .push(RequestItem::PositionTag(unavailable_placeholder(reason)));
        self.unavailable.push(ExpectedSegment {
            source_file: source_file.to_string(),
            label: label.to_string(),
        });
    }

    pub fn expect(&mut self, source_file: &str, label: &str) {
        self.expected.push(ExpectedSegment {
            source_file: source_file.to_string(),
            label: label.to_string(),
        });
    }

    pub fn items(&self) -> &[RequestItem] {
        &self.items
    }

    pub fn expected(&self) -> &[ExpectedSegment] {
        &self.expected
    }

    pub fn unavailable(&self) -> &[ExpectedSegment] {
        &self.unavailable
    }

    pub fn image_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, RequestItem::Image { .. }))
            .count()
    }

    /// Source files in the order they appear in the request.
    pub fn source_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = Vec::new();
        for expected in &self.expected {
            if files.last() != Some(&expected.source_file.as_str()) {
                files.push(&expected.source_file);
            }
        }
        files
    }
}
