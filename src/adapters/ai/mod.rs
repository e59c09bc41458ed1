//! Analysis provider adapters.

mod mock_provider;
mod openai_provider;

pub use mock_provider::MockAnalysisProvider;
pub use openai_provider::{OpenAiAnalysisProvider, OpenAiConfig};
