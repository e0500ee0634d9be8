mod client;

pub use client::{GeminiClient, DEFAULT_GEMINI_MODEL, GEMINI_API_BASE};
