use std::sync::Arc;

use crate::application::ports::{GenerationError, TextGenerator};
use crate::domain::{ContextError, EssayDraft, PipelineContext, is_failure_text};

pub const DEFAULT_TARGET_LENGTH: usize = 400;

const WRITER_PROMPT: &str = "You are a staff member of a tax accounting office writing a reading report for the in-house study group.\n\
Write the report using only the extracted text below.\n\
\n\
[Extracted text]\n\
{basis}\n\
\n\
[Conditions]\n\
- Quote the original wording from the extracted text where you cite the author.\n\
- Do not invent episodes or claims that are not in the text.\n\
- Structure: (1) summary of the article, (2) words that left an impression (quoted), (3) how you will apply them to your own work.\n\
- Length: about {length} characters.\n\
- Register: polite (desu/masu) Japanese.\n\
- No title. Use line breaks only between paragraphs, because the text is laid into a spreadsheet.";

#[derive(Debug, Clone)]
pub struct EssaySettings {
    pub target_length: usize,
    pub style_exemplar: Option<String>,
}

impl Default for EssaySettings {
    fn default() -> Self {
        Self {
            target_length: DEFAULT_TARGET_LENGTH,
            style_exemplar: None,
        }
    }
}

/// Composes a draft from exactly one group's text. Every call supersedes the previous
/// draft in the context.
pub struct EssayService<G>
where
    G: TextGenerator + ?Sized,
{
    generator: Arc<G>,
    settings: EssaySettings,
}

impl<G> EssayService<G>
where
    G: TextGenerator + ?Sized,
{
    pub fn new(generator: Arc<G>, settings: EssaySettings) -> Self {
        Self {
            generator,
            settings,
        }
    }

    pub fn build_prompt(&self, basis: &str, feedback: &[String]) -> String {
        let mut prompt = WRITER_PROMPT
            .replace("{basis}", basis.trim())
            .replace("{length}", &self.settings.target_length.to_string());

        if let Some(exemplar) = &self.settings.style_exemplar {
            prompt.push_str("\n\n[Style example]\n");
            prompt.push_str(exemplar.trim());
        }

        if !feedback.is_empty() {
            prompt.push_str("\n\n[Notes from the author's review]\n");
            for note in feedback {
                prompt.push_str("- ");
                prompt.push_str(note.trim());
                prompt.push('\n');
            }
        }

        prompt
    }

    #[tracing::instrument(skip(self, context), fields(group = ?context.selected))]
    pub async fn compose(&self, context: PipelineContext) -> Result<PipelineContext, EssayError> {
        let (group, basis) = context.basis_text()?;

        if basis.trim().is_empty() || is_failure_text(basis) {
            return Err(EssayError::NoUsableExtraction(group.to_string()));
        }

        let prompt = self.build_prompt(basis, &context.feedback);
        tracing::debug!(prompt_chars = prompt.chars().count(), "Writer prompt built");

        let text = self
            .generator
            .generate(&prompt)
            .await
            .map_err(EssayError::Generation)?;

        let feedback = (!context.feedback.is_empty()).then(|| context.feedback.join("\n"));
        let draft = EssayDraft::new(text.trim().to_string(), group.clone(), feedback);

        tracing::info!(chars = draft.char_count(), "Essay draft generated");

        Ok(context.with_draft(draft))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EssayError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("group '{0}' has no usable extracted text")]
    NoUsableExtraction(String),
    #[error("generation: {0}")]
    Generation(GenerationError),
}
