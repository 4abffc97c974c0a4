//! Assistant client adapters.

mod mock;
mod openai;

pub use mock::{assistant_text, CallCounts, MockAssistantClient, MockFailure};
pub use openai::{OpenAiAssistantClient, OpenAiConfig};
