/// UI components module
///
/// Contains custom widgets and view helpers:
/// - Indeterminate progress indicator (progress.rs)

pub mod progress;
