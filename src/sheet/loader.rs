use super::assemble::FrameRow;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load frame rows from a `base/<animation>/<direction>/*.png` tree,
/// one row per (animation, direction) pair in the given order.
///
/// Frames within a directory are ordered by filename. A missing directory
/// gets a warning and an empty row, so the rows after it keep their slots
/// in the sheet.
pub fn load_animation_rows(
    base: &Path,
    animations: &[String],
    directions: &[String],
) -> Result<Vec<FrameRow>> {
    let mut rows = Vec::with_capacity(animations.len() * directions.len());

    for animation in animations {
        for direction in directions {
            let dir = base.join(animation).join(direction);
            if !dir.is_dir() {
                tracing::warn!("Directory not found: {}", dir.display());
                rows.push(Vec::new());
                continue;
            }

            let mut paths: Vec<_> = fs::read_dir(&dir)
                .with_context(|| format!("Failed to read {}", dir.display()))?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
                .collect();
            paths.sort();

            tracing::info!(
                "{}/{} (row {}): {} frames",
                animation,
                direction,
                rows.len(),
                paths.len()
            );

            let mut frames = Vec::with_capacity(paths.len());
            for path in &paths {
                let frame = image::open(path)
                    .with_context(|| format!("Failed to decode {}", path.display()))?
                    .to_rgba8();
                frames.push(frame);
            }
            rows.push(frames);
        }
    }

    Ok(rows)
}
