use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::essay_draft::EssayDraft;
use super::extraction_result::ExtractionResult;
use super::source_group::GroupName;

/// What happens to the draft and feedback when the essay basis changes group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupSwitchPolicy {
    /// The draft was written from another group's text, so it is dropped.
    #[default]
    ClearDraft,
    KeepDraft,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("no extraction for group '{0}'")]
    UnknownGroup(GroupName),
    #[error("no group selected")]
    NoSelection,
}

/// Session state threaded through the pipeline stages by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineContext {
    #[serde(default)]
    pub extractions: BTreeMap<GroupName, ExtractionResult>,
    #[serde(default)]
    pub corrections: BTreeMap<GroupName, String>,
    #[serde(default)]
    pub selected: Option<GroupName>,
    #[serde(default)]
    pub feedback: Vec<String>,
    #[serde(default)]
    pub draft: Option<EssayDraft>,
}

impl PipelineContext {
    /// Supersedes every previous extraction; earlier corrections refer to stale text.
    pub fn with_extractions(mut self, results: BTreeMap<GroupName, ExtractionResult>) -> Self {
        self.corrections.clear();
        if let Some(selected) = &self.selected {
            if !results.contains_key(selected) {
                self.selected = None;
            }
        }
        if self.selected.is_none() {
            self.selected = results
                .iter()
                .find(|(_, result)| !result.is_empty() && !result.is_failed())
                .map(|(name, _)| name.clone());
        }
        self.extractions = results;
        self.draft = None;
        self
    }

    pub fn select_group(
        mut self,
        group: GroupName,
        policy: GroupSwitchPolicy,
    ) -> Result<Self, ContextError> {
        if !self.extractions.contains_key(&group) {
            return Err(ContextError::UnknownGroup(group));
        }
        let switched = self.selected.as_ref() != Some(&group);
        if switched && policy == GroupSwitchPolicy::ClearDraft {
            self.draft = None;
            self.feedback.clear();
        }
        self.selected = Some(group);
        Ok(self)
    }

    pub fn correct(mut self, group: GroupName, text: String) -> Result<Self, ContextError> {
        if !self.extractions.contains_key(&group) {
            return Err(ContextError::UnknownGroup(group));
        }
        self.corrections.insert(group, text);
        Ok(self)
    }

    pub fn add_feedback(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        if !note.trim().is_empty() {
            self.feedback.push(note);
        }
        self
    }

    pub fn with_draft(mut self, draft: EssayDraft) -> Self {
        self.draft = Some(draft);
        self
    }

    /// Text the essay is written from: the human correction if any, else the extraction.
    pub fn basis_text(&self) -> Result<(&GroupName, &str), ContextError> {
        let group = self.selected.as_ref().ok_or(ContextError::NoSelection)?;
        if let Some(corrected) = self.corrections.get(group) {
            return Ok((group, corrected));
        }
        self.extractions
            .get(group)
            .map(|result| (group, result.raw_text.as_str()))
            .ok_or_else(|| ContextError::UnknownGroup(group.clone()))
    }
}
