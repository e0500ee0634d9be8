pub mod controller;
pub mod error;
pub mod ids;
pub mod image;
pub mod models;
pub mod proxy;
pub mod storage;
pub mod throttle;
pub mod ticker;

pub use controller::{Delivery, PendingRequest, SessionController, SessionState, APOLOGY};
pub use error::{ProxyError, Result, SessionError};
pub use ids::SessionIdGenerator;
pub use image::load_image;
pub use models::{ChatHistory, ChatSession, Message, Role, DEFAULT_TITLE};
pub use proxy::{HttpProxyClient, ProxyClient};
pub use storage::{FileStorage, HistoryStore, MemoryStorage, Storage, GUIDE_KEY, HISTORY_KEY};
pub use throttle::{ThrottleConfig, ThrottleState};
pub use ticker::Ticker;
