// src/core/mod.rs
pub mod converter;
pub mod normalize;
pub mod syllable;
pub mod types;
