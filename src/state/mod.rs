/// State management module
///
/// This module handles all application state, including:
/// - Prompt validation (prompt.rs)
/// - The current generated image (data.rs)
/// - Status text, in-flight requests and saving (session.rs)

pub mod data;
pub mod prompt;
pub mod session;
