//! Structural check modules, one per field type.
//!
//! Each `check` takes the trimmed cell value and returns `None` when the
//! value passes or a user-facing message naming the field when it fails.

pub mod boolean;
pub mod date;
pub mod email;
pub mod number;
pub mod pattern;
pub mod phone;
pub mod select;
pub mod text;
