mod backend_factory;
mod mock_text_generator;
mod mock_vision_extractor;
mod openai_text_client;
mod openai_vision_client;

pub use backend_factory::{BackendFactory, BackendFactoryError};
pub use mock_text_generator::MockTextGenerator;
pub use mock_vision_extractor::EchoVisionExtractor;
pub use openai_text_client::OpenAiTextClient;
pub use openai_vision_client::{OpenAiVisionClient, classify_failure};
