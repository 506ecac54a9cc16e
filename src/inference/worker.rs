use tokio::task;

use super::client::InferenceClient;
use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::error::GenerateError;
use crate::state::data::GeneratedImage;
use crate::state::prompt::Prompt;

/// One generation, start to finish.
///
/// Runs as an iced `Task` off the UI thread: the network call is awaited on the
/// executor, then decoding the preview moves to a blocking thread since resizing
/// large images is CPU-heavy. Nothing tracks or cancels this future; a second
/// click simply starts another one.
pub async fn generate(client: InferenceClient, prompt: Prompt) -> Result<GeneratedImage, GenerateError> {
    tracing::info!(prompt_chars = prompt.as_str().chars().count(), "🎨 generating image");
    tracing::debug!(prompt = %prompt, "prompt text");

    let image = client.text_to_image(&prompt).await?;
    let prompt_text = prompt.to_string();

    let generated = task::spawn_blocking(move || {
        GeneratedImage::new(image, prompt_text, DISPLAY_WIDTH, DISPLAY_HEIGHT)
    })
    .await?;

    tracing::info!(
        width = generated.original.width(),
        height = generated.original.height(),
        "✅ image generated"
    );

    Ok(generated)
}
