pub mod chat;
pub mod data_uri;

pub use chat::{ChatFailure, ChatReply, ChatRequest, FAILURE_MESSAGE};
pub use data_uri::{DataUri, DataUriError};
