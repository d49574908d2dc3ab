//! Filesystem utilities for promptforge.
//!
//! Persisted documents (library bundle, templates, history, config) are
//! always replaced atomically so a crash never leaves a half-written file
//! that would later fail to decode.

pub mod atomic;

pub use atomic::{atomic_write, atomic_write_file};
