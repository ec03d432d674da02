mod threshold;

pub use threshold::{key_out, NearBlack, NearWhite};
