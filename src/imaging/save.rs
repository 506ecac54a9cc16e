use chrono::{DateTime, TimeZone};
use image::{DynamicImage, ImageFormat};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task;

use crate::error::SaveError;

/// Output filename for an image saved at `now`.
///
/// Resolution is one second; two saves within the same second share a name
/// and the later one overwrites the earlier file.
pub fn timestamped_filename<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("generated_image_{}.png", now.format("%Y%m%d_%H%M%S"))
}

/// Write `image` as a PNG into `dir`, creating the directory if needed.
/// Returns the full path of the written file.
pub fn save_png<Tz>(image: &DynamicImage, dir: &Path, now: &DateTime<Tz>) -> Result<PathBuf, SaveError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fs::create_dir_all(dir).map_err(|source| SaveError::Io {
        path: dir.display().to_string(),
        source: Arc::new(source),
    })?;

    let path = dir.join(timestamped_filename(now));
    image.save_with_format(&path, ImageFormat::Png)?;

    tracing::info!(path = %path.display(), "💾 saved image");
    Ok(path)
}

/// `save_png` on a blocking thread, so encoding a full-size PNG never stalls
/// the UI. Runs as an iced `Task`.
pub async fn save_png_async<Tz>(
    image: Arc<DynamicImage>,
    dir: PathBuf,
    now: DateTime<Tz>,
) -> Result<PathBuf, SaveError>
where
    Tz: TimeZone + Send + 'static,
    Tz::Offset: Display + Send + 'static,
{
    task::spawn_blocking(move || save_png(&image, &dir, &now)).await?
}
