/// Image handling module
///
/// This module handles:
/// - Shrinking generated images to the display box (display.rs)
/// - Writing the current image to disk as a timestamped PNG (save.rs)

pub mod display;
pub mod save;
