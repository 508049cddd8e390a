//! Domain types shared across the Cradle workspace.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `handlers/`.

pub mod id;
pub mod pagination;
