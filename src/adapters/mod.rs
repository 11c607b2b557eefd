// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod notify;
pub mod storage;

pub use http::HttpProductApi;
pub use notify::ChannelNotifier;
pub use storage::{LocalStorage, MemoryStorage};
