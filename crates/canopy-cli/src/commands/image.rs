//! Image command implementation

use super::{build_controller, finish_analysis, print_analysis};
use crate::cli::ImageArgs;
use crate::errors;
use crate::output::OutputWriter;
use anyhow::Result;
use canopy_controller::ScriptedEvents;
use canopy_core::config::LayeredConfig;
use canopy_core::models::{ImageFile, UiEvent};
use std::path::Path;

pub async fn execute(args: ImageArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let image = read_image(&args.file).await?;
    tracing::info!(file = %image.name, bytes = image.len(), "Uploading image");

    let mut controller = build_controller(config, output);
    controller.page_mut().select_file(image);

    let mut events = ScriptedEvents::new([UiEvent::FormSubmitted]);
    let outcome = controller.run(&mut events).await.into_iter().next();

    let analysis = finish_analysis(&controller, outcome, args.analysis.save.as_deref()).await?;
    print_analysis(&controller, &analysis, output)
}

async fn read_image(path: &Path) -> Result<ImageFile> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|_| errors::image_not_found(&path.display().to_string()))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let image = ImageFile::new(name, bytes);
    Ok(match content_type(path) {
        Some(content_type) => image.with_content_type(content_type),
        None => image,
    })
}

/// MIME type a browser would attach for common image extensions
fn content_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "tif" | "tiff" => Some("image/tiff"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type() {
        assert_eq!(content_type(Path::new("a/b/Field.JPG")), Some("image/jpeg"));
        assert_eq!(content_type(Path::new("tile.tiff")), Some("image/tiff"));
        assert_eq!(content_type(Path::new("notes.txt")), None);
        assert_eq!(content_type(Path::new("noext")), None);
    }
}
