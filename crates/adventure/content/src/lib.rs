//! Data-driven content definitions and loaders.
//!
//! This crate turns files on disk into the in-memory structures
//! `adventure-core` runs on:
//! - Item catalog (RON): per-kind profiles with flags, flavor text and split
//!   products.
//! - Maps (RON): object groups with waypoints, placed items and exits,
//!   assembled into [`adventure_core::MapBlueprint`].
//! - Game configuration (TOML): strictness mode and the starting map.
//!
//! All parsing stays here; the core never touches a file. Loaders report
//! failures as `anyhow` errors carrying the offending path.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, ContentFactory, MapLoader};
