pub mod types;
pub mod traits;
pub mod config;
pub mod gemini;

pub use traits::{ChatClient, ChatRequest, ChatResponse, ChatOptions, TokenUsage};
pub use config::{ClientFactory, GeminiConfig, ProviderConfig, ProviderType};
pub use gemini::GeminiClient;
pub use types::{Content, InlineData, Part, Role};
