//! Phase resolution and block visibility for Sellaporter pages.
//!
//! A Sellaporter page carries a launch window and an ordered list of custom
//! phases. On every request the page is classified into exactly one phase,
//! and content blocks tagged with phases are shown or hidden accordingly.
//!
//! # Modules
//!
//! - [`normalize`] -- Free-form date/time input to absolute instants.
//! - [`resolver`] -- [`PhaseResolver`], the interval classification.
//! - [`request`] -- [`RequestPhase`], the per-request memo.
//! - [`source`] -- [`LaunchSource`] and [`Clock`] collaborator traits.
//! - [`visibility`] -- Block visibility policy and the markup seam.
//! - [`shortcode`] -- The `sp`, `spNotice`, and `spButton` shortcodes.
//! - [`config`] -- Site configuration loaded from `sellaporter.yaml`.
//!
//! [`PhaseResolver`]: resolver::PhaseResolver
//! [`RequestPhase`]: request::RequestPhase
//! [`LaunchSource`]: source::LaunchSource
//! [`Clock`]: source::Clock

pub mod config;
pub mod normalize;
pub mod request;
pub mod resolver;
pub mod shortcode;
pub mod source;
pub mod visibility;
