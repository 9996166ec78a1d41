pub mod api_client;
pub mod feed_poller;
pub mod session_store;

pub use api_client::{ApiClient, RegisterRequest};
pub use feed_poller::FeedPoller;
pub use session_store::SessionStore;
