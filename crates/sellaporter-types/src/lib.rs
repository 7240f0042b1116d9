//! Shared type definitions for Sellaporter.
//!
//! This crate is the single source of truth for the phase data model used
//! across the workspace. Types that cross the HTTP boundary flow downstream
//! to `TypeScript` via `ts-rs` so page scripts can consume them.
//!
//! # Modules
//!
//! - [`phase`] -- [`PhaseLabel`] and the built-in [`BuiltinPhase`] tags
//! - [`launch`] -- Raw launch configuration records and the normalised
//!   [`LaunchWindow`] / [`CustomPhase`] forms
//! - [`context`] -- Per-request [`ResolutionContext`]

pub mod context;
pub mod launch;
pub mod phase;

// Re-export all public types at crate root for convenience.
pub use context::ResolutionContext;
pub use launch::{CustomPhase, CustomPhaseRecord, LaunchWindow, LaunchWindowConfig, RawOffset};
pub use phase::{BuiltinPhase, PhaseLabel};
