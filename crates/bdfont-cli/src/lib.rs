//! Command-line interface for bdfont
//!
//! This crate provides the `bdfont` CLI binary for inspecting BDF fonts and
//! rendering text with them. The library portion is minimal; the main
//! functionality is in the binary.
//!
//! See `main.rs` for the CLI implementation.
