//! Render pipelines and the bind group layouts they are built from.
//!
//! - `basic`: the lit, textured scene pipeline every primitive is drawn with

pub mod basic;
