mod config;
mod docroot;
mod identity;
pub mod raw;
pub mod server;
pub mod tracing;

pub use docroot::{VIDEO_LEN, video_bytes};
pub use raw::RawResponse;
pub use server::{TestServer, access_events};
pub use tracing::{CapturedEvent, init_test_tracing};
