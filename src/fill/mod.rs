mod engine;
pub mod types;

pub use engine::{flood_fill_background, flood_fill_background_cancellable};
pub use types::{Classifier, FillError};
