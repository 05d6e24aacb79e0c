pub mod buffer2;
pub mod file_format;
pub mod float_ext;
pub mod log_setup;
pub mod parallel;
pub mod serde_io;
pub mod test_utils;

pub const EPSILON: f64 = 1e-9;
