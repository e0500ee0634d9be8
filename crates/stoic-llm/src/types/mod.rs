pub mod content;
pub mod message;

pub use content::{InlineData, Part};
pub use message::{Content, Role};
