//! Atlas boundary
//!
//! Rasterizing emoji into an atlas is platform work done by an
//! [`AtlasProvider`]. This module defines that capability, the grid layout the
//! providers share, and the on-disk cache that decides when a provider has to
//! run at all.

pub mod cache;
pub mod layout;
pub mod provider;

pub use cache::{AtlasCache, AtlasFiles};
pub use layout::{GridLayout, TILE_SIZE};
pub use provider::{ATLAS_IMAGE_NAME, ATLAS_MANIFEST_NAME, AtlasProvider};
