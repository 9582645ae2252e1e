//! Common - Shared Types and Utilities for the Bridge Adapter Contracts
//!
//! This package provides shared type definitions and utility functions
//! used across the adapter contracts.

pub mod asset;

pub use asset::{Asset, AssetInfo};
