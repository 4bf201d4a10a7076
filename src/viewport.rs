//! List viewport: maps scroll offset and pointer position to track rows.
//!
//! Rendering (`visible_rows`) and input (`hit_test`) use the same row rule,
//! `row = floor((y - top + offset) / row_height)`, so a row that is drawn at
//! some position is the row a pointer at that position resolves to.

mod model;

pub use model::*;
