//! Deterministic export file names.

use super::types::ExportFormat;
use crate::draw::CanvasSpec;

/// Fallback base name when neither name nor initials yield anything.
pub const FALLBACK_NAME: &str = "signature";

/// Lower-cases `value` and collapses every run of non-alphanumeric characters
/// into a single hyphen. Leading and trailing hyphens are dropped.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_hyphen = false;

    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Builds `signature-{slug}-{W}x{H}[@{r}x].{ext}`.
///
/// The slug comes from `name`, else `initials`; when both are empty the bare
/// `signature` prefix is used. Dimensions are the canvas size before the pixel
/// ratio is applied, and the `@{r}x` suffix appears only when the ratio exceeds 1.
pub fn generate_file_name(
    name: &str,
    initials: &str,
    canvas: &CanvasSpec,
    format: ExportFormat,
) -> String {
    let slug = [name, initials]
        .into_iter()
        .map(slugify)
        .find(|slug| !slug.is_empty());

    let mut file_name = match slug {
        Some(slug) => format!("{FALLBACK_NAME}-{slug}"),
        None => FALLBACK_NAME.to_string(),
    };

    file_name.push_str(&format!("-{}x{}", canvas.width, canvas.height));
    let ratio = canvas.pixel_ratio.get();
    if ratio > 1 {
        file_name.push_str(&format!("@{ratio}x"));
    }
    file_name.push('.');
    file_name.push_str(format.extension());
    file_name
}
