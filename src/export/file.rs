//! Writing export artifacts to disk.

use super::types::{ExportArtifact, ExportError};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix inserted before the extension when the target name is taken.
const COLLISION_TIMESTAMP: &str = "%Y%m%d-%H%M%S";

/// Abstraction over artifact saving so the export queue can be tested without a disk.
pub trait ArtifactSaver: Send + Sync {
    fn save(&self, artifact: &ExportArtifact, directory: &Path) -> Result<PathBuf, ExportError>;
}

/// Saves artifacts with [`save_artifact`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FileArtifactSaver;

impl ArtifactSaver for FileArtifactSaver {
    fn save(&self, artifact: &ExportArtifact, directory: &Path) -> Result<PathBuf, ExportError> {
        save_artifact(artifact, directory)
    }
}

/// Default output directory: `~/Pictures/Signatures`, or the working directory.
pub fn default_output_dir() -> PathBuf {
    dirs::picture_dir()
        .map(|dir| dir.join("Signatures"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Ensure the output directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Path for `file_name` inside `directory` that does not overwrite anything.
///
/// A taken name gets a local timestamp inserted before the extension
/// (`signature-x-600x200-20250101-120000.png`); a numeric counter follows if
/// that is taken too.
pub fn available_path(directory: &Path, file_name: &str) -> PathBuf {
    let candidate = directory.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    };
    let stamped = format!("{}-{}", stem, Local::now().format(COLLISION_TIMESTAMP));
    let with_extension = |base: &str| match extension {
        Some(ext) => format!("{base}.{ext}"),
        None => base.to_string(),
    };

    let candidate = directory.join(with_extension(&stamped));
    if !candidate.exists() {
        return candidate;
    }

    let mut counter = 2;
    loop {
        let candidate = directory.join(with_extension(&format!("{stamped}-{counter}")));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Writes `artifact` into `directory` under its generated name.
///
/// Returns the path actually written.
pub fn save_artifact(artifact: &ExportArtifact, directory: &Path) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(directory)?;
    let file_path = available_path(&directory, &artifact.file_name);

    log::info!(
        "Saving {} to: {} ({} bytes)",
        artifact.format,
        file_path.display(),
        artifact.len()
    );

    fs::write(&file_path, &artifact.bytes)?;

    // Signatures are personal; keep them user read/write only
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file_path, Permissions::from_mode(0o600))?;
    }

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::types::ExportFormat;

    fn artifact(name: &str) -> ExportArtifact {
        ExportArtifact {
            bytes: vec![1, 2, 3, 4],
            file_name: name.to_string(),
            format: ExportFormat::Png,
            width: 2,
            height: 1,
            orientation: None,
        }
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with("~"));

        let no_tilde = expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn save_creates_directory_and_writes_bytes() {
        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().join("nested").join("out");
        let path = save_artifact(&artifact("signature-a-10x10.png"), &target).unwrap();

        assert!(path.ends_with("signature-a-10x10.png"));
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn collision_inserts_timestamp_before_extension() {
        let temp = tempfile::tempdir().unwrap();
        let first = save_artifact(&artifact("sig.png"), temp.path()).unwrap();
        let second = save_artifact(&artifact("sig.png"), temp.path()).unwrap();
        let third = save_artifact(&artifact("sig.png"), temp.path()).unwrap();

        assert_ne!(first, second);
        assert_ne!(second, third);
        let name = second.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("sig-"), "{name}");
        assert!(name.ends_with(".png"), "{name}");
        // sig-YYYYmmdd-HHMMSS.png
        assert_eq!(name.len(), "sig-".len() + 15 + ".png".len());
    }
}
