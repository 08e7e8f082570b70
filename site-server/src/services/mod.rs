//! Services

pub mod storage;

pub use storage::{ImageStorage, StoredImage};
