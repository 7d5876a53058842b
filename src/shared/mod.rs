//! Cross-cutting helpers shared by all layers.

pub mod config;
