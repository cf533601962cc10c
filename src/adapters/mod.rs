// Adapters layer: concrete implementations for the outside world (files, line format).

pub mod codec;
pub mod storage;

pub use storage::LocalStorage;
