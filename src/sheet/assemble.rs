use anyhow::{bail, Result};
use image::{imageops, Rgba, RgbaImage};

/// Grid geometry of the output sheet: square frames, a fixed number of
/// columns, one row per (animation, direction) pair.
#[derive(Debug, Clone, Copy)]
pub struct SheetLayout {
    pub frame_size: u32,
    pub max_frames: u32,
}

impl SheetLayout {
    /// Canvas dimensions for a sheet with the given number of rows.
    pub fn sheet_dimensions(&self, rows: u32) -> (u32, u32) {
        (self.max_frames * self.frame_size, rows * self.frame_size)
    }
}

/// The decoded frames of one animation/direction, in playback order.
/// An empty row leaves a blank (fully transparent) strip in the sheet.
pub type FrameRow = Vec<RgbaImage>;

/// Paste frame rows into a transparent RGBA canvas.
///
/// Frames are resized to `frame_size` square when they do not match, and
/// frames past `max_frames` in a row are dropped.
pub fn assemble_sheet(layout: &SheetLayout, rows: &[FrameRow]) -> Result<RgbaImage> {
    if layout.frame_size == 0 || layout.max_frames == 0 {
        bail!(
            "sheet layout must be nonzero (frame_size={}, max_frames={})",
            layout.frame_size,
            layout.max_frames
        );
    }
    if rows.is_empty() {
        bail!("no frame rows to assemble");
    }

    let (width, height) = layout.sheet_dimensions(rows.len() as u32);
    let mut sheet = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));

    for (row, frames) in rows.iter().enumerate() {
        if frames.len() > layout.max_frames as usize {
            tracing::warn!(
                "Row {}: dropping {} frames past the {}-column limit",
                row,
                frames.len() - layout.max_frames as usize,
                layout.max_frames
            );
        }

        for (col, frame) in frames.iter().take(layout.max_frames as usize).enumerate() {
            let size = (layout.frame_size, layout.frame_size);
            let resized;
            let frame = if frame.dimensions() != size {
                tracing::debug!(
                    "Row {} col {}: resizing {}x{} frame to {}x{}",
                    row,
                    col,
                    frame.width(),
                    frame.height(),
                    size.0,
                    size.1
                );
                resized = imageops::resize(frame, size.0, size.1, imageops::FilterType::Lanczos3);
                &resized
            } else {
                frame
            };

            imageops::replace(
                &mut sheet,
                frame,
                col as i64 * layout.frame_size as i64,
                row as i64 * layout.frame_size as i64,
            );
        }
    }

    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: SheetLayout = SheetLayout {
        frame_size: 4,
        max_frames: 3,
    };

    fn frame(color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(4, 4, Rgba(color))
    }

    #[test]
    fn frames_land_in_row_major_cells() {
        let red = [255, 0, 0, 255];
        let green = [0, 255, 0, 255];
        let blue = [0, 0, 255, 255];
        let rows = vec![vec![frame(red), frame(green)], vec![frame(blue)]];

        let sheet = assemble_sheet(&LAYOUT, &rows).unwrap();

        assert_eq!(sheet.dimensions(), (12, 8));
        assert_eq!(*sheet.get_pixel(0, 0), Rgba(red));
        assert_eq!(*sheet.get_pixel(4, 0), Rgba(green));
        assert_eq!(*sheet.get_pixel(0, 4), Rgba(blue));
        // Unfilled cells stay fully transparent.
        assert_eq!(*sheet.get_pixel(8, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*sheet.get_pixel(4, 4), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn extra_frames_are_dropped() {
        let red = [255, 0, 0, 255];
        let rows = vec![vec![frame(red), frame(red), frame(red), frame(red)]];

        let sheet = assemble_sheet(&LAYOUT, &rows).unwrap();

        assert_eq!(sheet.dimensions(), (12, 4));
        assert_eq!(*sheet.get_pixel(8, 0), Rgba(red));
    }

    #[test]
    fn empty_row_leaves_a_blank_strip() {
        let red = [255, 0, 0, 255];
        let rows = vec![Vec::new(), vec![frame(red)]];

        let sheet = assemble_sheet(&LAYOUT, &rows).unwrap();

        assert!(sheet
            .enumerate_pixels()
            .filter(|&(_, y, _)| y < 4)
            .all(|(_, _, p)| *p == Rgba([0, 0, 0, 0])));
        assert_eq!(*sheet.get_pixel(0, 4), Rgba(red));
    }

    #[test]
    fn off_size_frames_are_resized_into_their_cell() {
        let white = RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 255]));
        let rows = vec![vec![white]];

        let sheet = assemble_sheet(&LAYOUT, &rows).unwrap();

        // A solid frame resamples to the same solid color at any size.
        assert_eq!(*sheet.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(*sheet.get_pixel(3, 3), Rgba([255, 255, 255, 255]));
        assert_eq!(*sheet.get_pixel(4, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn degenerate_layouts_are_rejected() {
        let zero = SheetLayout {
            frame_size: 0,
            max_frames: 3,
        };
        assert!(assemble_sheet(&zero, &[vec![]]).is_err());
        assert!(assemble_sheet(&LAYOUT, &[]).is_err());
    }
}
