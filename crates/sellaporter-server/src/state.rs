//! Shared application state for the page API.
//!
//! [`AppState`] holds the loaded site configuration, the resolver built
//! from its UTC offset, and the clock requests are resolved against. All
//! of it is read-only after startup.

use std::sync::Arc;

use sellaporter_core::config::{PageConfig, SiteConfig};
use sellaporter_core::resolver::PhaseResolver;
use sellaporter_core::source::{Clock, SystemClock};

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// The loaded site configuration.
    pub site: Arc<SiteConfig>,
    /// Resolver reading authored times in the site's UTC offset.
    pub resolver: PhaseResolver,
    /// Source of "now" for requests without a test time.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create state for a site, resolving against wall-clock time.
    pub fn new(site: SiteConfig) -> Self {
        Self::with_clock(site, Arc::new(SystemClock))
    }

    /// Create state for a site with an explicit clock.
    pub fn with_clock(site: SiteConfig, clock: Arc<dyn Clock>) -> Self {
        let resolver = PhaseResolver::new(site.site.utc_offset.clone());
        Self {
            site: Arc::new(site),
            resolver,
            clock,
        }
    }

    /// Look up a page by slug.
    pub fn page(&self, slug: &str) -> Option<&PageConfig> {
        self.site.page(slug)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("site", &self.site.site.name)
            .field("pages", &self.site.pages.len())
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}
