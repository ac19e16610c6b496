use rfd::AsyncFileDialog;
use std::path::PathBuf;

/// Extensions offered by the photo picker
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Show the native file picker restricted to images.
/// Returns `None` if the user cancels.
pub async fn pick_image() -> Option<PathBuf> {
    let file = AsyncFileDialog::new()
        .set_title("Choose Contact Photo")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
        .await?;

    Some(file.path().to_path_buf())
}

/// True if `path` has one of the picker's image extensions
pub fn is_image_path(path: &std::path::Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
