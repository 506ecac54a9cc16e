use iced::widget::image::Handle;
use image::{imageops::FilterType, DynamicImage, GenericImageView};

/// Shrink an image to fit inside `max_width` x `max_height`, keeping its
/// aspect ratio. Images that already fit are returned unchanged (never upscaled).
pub fn fit_within(image: &DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    if width <= max_width && height <= max_height {
        return image.clone();
    }

    image.resize(max_width, max_height, FilterType::Lanczos3)
}

/// Convert decoded pixels into a handle the iced image widget can draw
pub fn to_handle(image: &DynamicImage) -> Handle {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Handle::from_rgba(width, height, rgba.into_raw())
}
