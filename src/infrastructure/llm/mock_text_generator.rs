use crate::application::ports::{GenerationError, TextGenerator};

pub struct MockTextGenerator;

#[async_trait::async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        Ok(format!(
            "（下書き）この記事を読み、仕事への向き合い方を改めて考えました。\nプロンプト文字数: {}",
            prompt.chars().count()
        ))
    }
}
