//! Filesystem utilities for promptsmith.

pub mod atomic;

pub use atomic::atomic_write_file;
