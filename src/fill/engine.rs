use super::types::{Classifier, FillError};
use image::{Rgba, RgbaImage};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

// 4-connectivity is safer for contours than 8: a 1-pixel diagonal outline
// still stops the flood.
const NEIGHBORS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Erase the background region connected to the image border.
///
/// Breadth-first flood fill seeded from every border pixel. Pixels the
/// classifier accepts are set fully transparent and their 4-neighbors
/// enqueued; pixels it rejects act as walls and stop the flood along that
/// path. Background-colored pixels fully enclosed by the subject (eye
/// highlights, teeth) are therefore left untouched, unlike a naive
/// per-pixel key.
///
/// Mutates the image in place and returns the number of pixels cleared.
pub fn flood_fill_background<C: Classifier>(
    image: &mut RgbaImage,
    classifier: &C,
) -> Result<u64, FillError> {
    fill(image, classifier, None)
}

/// Same as [`flood_fill_background`], checking `cancel` once per dequeued
/// pixel to bound latency on very large images. A raised flag aborts with
/// [`FillError::Cancelled`], leaving the image partially cleared.
pub fn flood_fill_background_cancellable<C: Classifier>(
    image: &mut RgbaImage,
    classifier: &C,
    cancel: &AtomicBool,
) -> Result<u64, FillError> {
    fill(image, classifier, Some(cancel))
}

fn fill<C: Classifier>(
    image: &mut RgbaImage,
    classifier: &C,
    cancel: Option<&AtomicBool>,
) -> Result<u64, FillError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(FillError::EmptyImage { width, height });
    }

    let idx = |x: u32, y: u32| y as usize * width as usize + x as usize;
    let mut visited = vec![false; width as usize * height as usize];
    let mut queue = VecDeque::new();

    // Seed every border coordinate unconditionally. A border pixel covered
    // by the subject gets dequeued, fails the classifier, and never expands.
    for x in 0..width {
        for y in [0, height - 1] {
            if !visited[idx(x, y)] {
                visited[idx(x, y)] = true;
                queue.push_back((x, y));
            }
        }
    }
    for y in 0..height {
        for x in [0, width - 1] {
            if !visited[idx(x, y)] {
                visited[idx(x, y)] = true;
                queue.push_back((x, y));
            }
        }
    }

    let mut cleared = 0u64;

    while let Some((x, y)) = queue.pop_front() {
        if let Some(flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(FillError::Cancelled { cleared });
            }
        }

        let pixel = *image.get_pixel(x, y);
        let background = classifier
            .is_background(pixel)
            .map_err(|source| FillError::Classifier { x, y, source })?;

        // Subject pixel: a wall. No clear, no expansion.
        if !background {
            continue;
        }

        image.put_pixel(x, y, TRANSPARENT);
        cleared += 1;

        for (dx, dy) in NEIGHBORS {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if !visited[idx(nx, ny)] {
                visited[idx(nx, ny)] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    tracing::debug!(
        "Flood fill cleared {} of {} pixels",
        cleared,
        width as u64 * height as u64
    );

    Ok(cleared)
}
