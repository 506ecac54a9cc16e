/// Shared data structures for the application state
///
/// These structs represent the data model that flows from the
/// background worker to the UI layer.

use iced::widget::image::Handle;
use image::{DynamicImage, GenericImageView};
use std::sync::Arc;

use crate::imaging::display;

/// The most recent successful generation
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// Full-resolution image exactly as returned by the service.
    /// This is what gets saved.
    pub original: Arc<DynamicImage>,
    /// Display-sized copy ready for the image widget
    pub preview: Handle,
    /// Preview dimensions in pixels
    pub preview_size: (u32, u32),
    /// Prompt that produced this image
    pub prompt: String,
}

impl GeneratedImage {
    /// Wrap a decoded image, shrinking a copy to fit the display box.
    /// CPU-bound: call from a blocking task.
    pub fn new(original: DynamicImage, prompt: String, max_width: u32, max_height: u32) -> Self {
        let fitted = display::fit_within(&original, max_width, max_height);
        let preview_size = fitted.dimensions();
        let preview = display::to_handle(&fitted);

        GeneratedImage {
            original: Arc::new(original),
            preview,
            preview_size,
            prompt,
        }
    }
}
