/// Remote inference module
///
/// - `client.rs` - HTTP client for the hosted text-to-image endpoint
/// - `worker.rs` - the background unit of work run for each "Generate" click

pub mod client;
pub mod worker;

pub use client::InferenceClient;
