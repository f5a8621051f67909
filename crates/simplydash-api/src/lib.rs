// simplydash-api: Async Rust client for the simplydash dashboard backend

pub mod client;
pub mod error;
pub mod model;
pub mod push;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use push::{ConnectionState, PushListener, PushMessage, Subscription};
pub use transport::{TlsMode, TransportConfig};
