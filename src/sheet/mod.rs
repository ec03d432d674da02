mod assemble;
mod loader;

pub use assemble::{assemble_sheet, FrameRow, SheetLayout};
pub use loader::load_animation_rows;
