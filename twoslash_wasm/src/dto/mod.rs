//! JS-facing DTO types for `twoslash_wasm`.
//!
//! Offsets and columns use UTF-16 code units. Monaco positions are 1-based.
pub mod v1;
