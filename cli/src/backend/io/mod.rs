//! Presentation layer: the interactive menu and the domain→DTO mappers.

pub mod mappers;
pub mod menu;
