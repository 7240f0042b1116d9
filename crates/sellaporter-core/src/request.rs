//! Per-request phase memo.
//!
//! A single render asks for the phase many times (the page field, every
//! block, every `sp` shortcode). [`RequestPhase`] resolves once on first use
//! and hands out the same label for the rest of the request. It is built per
//! request and dropped with it; nothing is shared between requests.

use std::cell::OnceCell;

use sellaporter_types::{PhaseLabel, ResolutionContext};

use crate::resolver::PhaseResolver;
use crate::source::LaunchSource;

/// The phase of one page for the lifetime of one request.
#[derive(Debug)]
pub struct RequestPhase<'a, S: LaunchSource + ?Sized> {
    resolver: &'a PhaseResolver,
    source: &'a S,
    context: ResolutionContext,
    resolved: OnceCell<PhaseLabel>,
}

impl<'a, S: LaunchSource + ?Sized> RequestPhase<'a, S> {
    /// Bind a page and request context. Nothing is resolved yet.
    pub const fn new(resolver: &'a PhaseResolver, source: &'a S, context: ResolutionContext) -> Self {
        Self {
            resolver,
            source,
            context,
            resolved: OnceCell::new(),
        }
    }

    /// The page's phase, resolving on first call.
    pub fn get(&self) -> &PhaseLabel {
        self.resolved
            .get_or_init(|| self.resolver.resolve_page(self.source, &self.context))
    }

    /// The context this request resolves against.
    pub const fn context(&self) -> &ResolutionContext {
        &self.context
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use chrono::{TimeZone, Utc};
    use sellaporter_types::LaunchWindowConfig;

    use super::*;

    /// Counts how often the resolver reads the configuration.
    struct CountingPage {
        config: LaunchWindowConfig,
        reads: Cell<u32>,
    }

    impl LaunchSource for CountingPage {
        fn is_phase_aware(&self) -> bool {
            true
        }

        fn launch_window(&self) -> Option<&LaunchWindowConfig> {
            self.reads.set(self.reads.get().saturating_add(1));
            Some(&self.config)
        }
    }

    #[test]
    fn resolves_once_per_request() {
        let page = CountingPage {
            config: LaunchWindowConfig {
                start_date: "2024-06-01".to_owned(),
                end_date: "2024-06-10".to_owned(),
                ..LaunchWindowConfig::default()
            },
            reads: Cell::new(0),
        };
        let resolver = PhaseResolver::default();
        let now = Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap();
        let request = RequestPhase::new(&resolver, &page, ResolutionContext::at(now));

        assert_eq!(page.reads.get(), 0);
        assert_eq!(request.get(), "sale");
        assert_eq!(request.get(), "sale");
        assert_eq!(page.reads.get(), 1);
    }

    #[test]
    fn separate_requests_resolve_separately() {
        let config = LaunchWindowConfig {
            start_date: "2024-06-01".to_owned(),
            end_date: "2024-06-10".to_owned(),
            ..LaunchWindowConfig::default()
        };
        let resolver = PhaseResolver::default();

        let before = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();

        let first = RequestPhase::new(&resolver, &config, ResolutionContext::at(before));
        let second = RequestPhase::new(&resolver, &config, ResolutionContext::at(after));
        assert_eq!(first.get(), "presale");
        assert_eq!(second.get(), "postsale");
    }
}
