//! libris application library.
//!
//! Domain modules live here; the kernel, storage, and HTTP plumbing live in
//! the workspace crates.

pub mod modules;
