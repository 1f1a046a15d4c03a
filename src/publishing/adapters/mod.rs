//! Publisher adapters.

mod http;
mod recording;

pub use http::HttpPublisher;
pub use recording::RecordingPublisher;
