use crate::core::models::TrackDescriptor;
use crate::utils::SUPPORTED_EXTENSIONS;
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collect every supported audio file under `root` as the fixed track list.
///
/// Files are ordered by path so positions stay stable between runs.
pub fn scan_directory(root: &Path) -> Result<Vec<TrackDescriptor>> {
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file() && is_audio_file(e.path()))
        .map(|entry| entry.into_path())
        .collect();
    paths.sort();

    let tracks: Vec<TrackDescriptor> = paths
        .iter()
        .enumerate()
        .map(|(position, path)| TrackDescriptor::from_path(position, path))
        .collect();

    log::info!("Found {} tracks under {}", tracks.len(), root.display());
    Ok(tracks)
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}
