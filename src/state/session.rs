use image::DynamicImage;
use std::path::PathBuf;
use std::sync::Arc;

use super::data::GeneratedImage;
use super::prompt::Prompt;
use crate::error::{GenerateError, SaveError};

pub const STATUS_READY: &str = "Ready to generate images";
pub const STATUS_EMPTY_PROMPT: &str = "Please enter a prompt";
pub const STATUS_GENERATING: &str = "Generating image...";
pub const STATUS_GENERATED: &str = "Image generated successfully";
pub const STATUS_NOTHING_TO_SAVE: &str = "No image to save";

/// Everything the window shows apart from the prompt editor.
///
/// All mutation happens from `update` on the UI thread, so completions from
/// concurrent requests are applied one at a time; whichever is applied last
/// is what the user sees.
#[derive(Debug)]
pub struct Session {
    current: Option<GeneratedImage>,
    status: String,
    in_flight: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            current: None,
            status: STATUS_READY.to_string(),
            in_flight: 0,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn current(&self) -> Option<&GeneratedImage> {
        self.current.as_ref()
    }

    /// True while at least one request has not come back yet
    pub fn is_generating(&self) -> bool {
        self.in_flight > 0
    }

    /// Validate the editor text. Returns the prompt to send, or `None` (and an
    /// explanatory status) when there is nothing to send.
    pub fn begin_generation(&mut self, raw: &str) -> Option<Prompt> {
        let Some(prompt) = Prompt::parse(raw) else {
            self.status = STATUS_EMPTY_PROMPT.to_string();
            return None;
        };

        self.in_flight += 1;
        self.status = STATUS_GENERATING.to_string();
        Some(prompt)
    }

    /// Apply the outcome of one request
    pub fn finish_generation(&mut self, result: Result<GeneratedImage, GenerateError>) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            Ok(image) => {
                self.current = Some(image);
                self.status = STATUS_GENERATED.to_string();
            }
            Err(error) => {
                tracing::error!(%error, "generation failed");
                self.status = format!("Error: {error}");
            }
        }
    }

    /// Image to hand to a background save, or `None` (and a status message)
    /// when nothing has been generated yet. Having no image is not an error.
    pub fn begin_save(&mut self) -> Option<Arc<DynamicImage>> {
        match &self.current {
            Some(current) => Some(Arc::clone(&current.original)),
            None => {
                self.status = STATUS_NOTHING_TO_SAVE.to_string();
                None
            }
        }
    }

    /// Apply the outcome of a background save
    pub fn finish_save(&mut self, result: Result<PathBuf, SaveError>) {
        self.status = match result {
            Ok(path) => {
                let filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                format!("Image saved as {filename}")
            }
            Err(error) => {
                tracing::error!(%error, "save failed");
                format!("Error: {error}")
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::save;
    use chrono::{TimeZone, Utc};
    use image::{GenericImageView, RgbaImage};

    fn generated(width: u32, height: u32, prompt: &str) -> GeneratedImage {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(width, height));
        GeneratedImage::new(image, prompt.to_string(), 800, 600)
    }

    #[test]
    fn test_starts_ready_and_empty() {
        let session = Session::new();
        assert_eq!(session.status(), STATUS_READY);
        assert!(session.current().is_none());
        assert!(!session.is_generating());
    }

    #[test]
    fn test_blank_prompt_is_rejected_locally() {
        let mut session = Session::new();
        assert!(session.begin_generation(" \n\t").is_none());
        assert_eq!(session.status(), STATUS_EMPTY_PROMPT);
        assert!(!session.is_generating());
    }

    #[test]
    fn test_success_replaces_previous_image() {
        let mut session = Session::new();

        session.begin_generation("first").unwrap();
        session.finish_generation(Ok(generated(10, 10, "first")));
        let first = Arc::clone(&session.current().unwrap().original);

        session.begin_generation("second").unwrap();
        assert_eq!(session.status(), STATUS_GENERATING);
        session.finish_generation(Ok(generated(20, 10, "second")));

        let current = session.current().unwrap();
        assert_eq!(current.prompt, "second");
        assert_eq!(current.original.dimensions(), (20, 10));
        assert!(!Arc::ptr_eq(&first, &current.original));
        assert_eq!(session.status(), STATUS_GENERATED);
    }

    #[test]
    fn test_error_keeps_previous_image() {
        let mut session = Session::new();
        session.begin_generation("ok").unwrap();
        session.finish_generation(Ok(generated(10, 10, "ok")));

        session.begin_generation("fails").unwrap();
        session.finish_generation(Err(GenerateError::Api {
            status: 503,
            message: "Model is loading".into(),
        }));

        assert_eq!(session.status(), "Error: Model is loading (HTTP 503)");
        assert_eq!(session.current().unwrap().prompt, "ok");
    }

    #[test]
    fn test_overlapping_requests_last_completion_wins() {
        let mut session = Session::new();
        session.begin_generation("a").unwrap();
        session.begin_generation("b").unwrap();
        assert!(session.is_generating());

        session.finish_generation(Ok(generated(4, 4, "b")));
        assert!(session.is_generating());

        session.finish_generation(Ok(generated(4, 4, "a")));
        assert!(!session.is_generating());
        assert_eq!(session.current().unwrap().prompt, "a");
    }

    #[test]
    fn test_save_without_image_is_a_no_op() {
        let mut session = Session::new();
        assert!(session.begin_save().is_none());
        assert_eq!(session.status(), STATUS_NOTHING_TO_SAVE);
    }

    #[tokio::test]
    async fn test_save_writes_full_resolution_png() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("generated_images");
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();

        let mut session = Session::new();
        session.begin_generation("big").unwrap();
        session.finish_generation(Ok(generated(1200, 1200, "big")));

        let original = session.begin_save().unwrap();
        let result = save::save_png_async(original, dir.clone(), now).await;
        session.finish_save(result);
        assert_eq!(session.status(), "Image saved as generated_image_20250102_030405.png");

        let saved = image::open(dir.join("generated_image_20250102_030405.png")).unwrap();
        assert_eq!(saved.dimensions(), (1200, 1200));
    }

    #[test]
    fn test_failed_save_is_reported() {
        let mut session = Session::new();
        session.finish_save(Err(SaveError::Worker("task cancelled".into())));
        assert_eq!(session.status(), "Error: background task failed: task cancelled");
    }
}
