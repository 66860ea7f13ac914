use serde::{Deserialize, Serialize};

use super::source_group::GroupName;

/// Generated essay text. Replaced wholesale on every regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EssayDraft {
    pub text: String,
    pub basis_group: GroupName,
    #[serde(default)]
    pub feedback: Option<String>,
}

impl EssayDraft {
    pub fn new(text: String, basis_group: GroupName, feedback: Option<String>) -> Self {
        Self {
            text,
            basis_group,
            feedback,
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().filter(|c| !c.is_whitespace()).count()
    }
}
