//! Checks which diagnostics the parser emits.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use revalidate_core::{CacheControl, MaxStale};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;
use tracing_subscriber::layer::{Context, SubscriberExt};

/// Counts events emitted by this crate.
struct EventCounter {
    events: Arc<AtomicUsize>,
}

impl<S: Subscriber> Layer<S> for EventCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target().starts_with("revalidate_core") {
            self.events.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn count_events(f: impl FnOnce()) -> usize {
    let events = Arc::new(AtomicUsize::new(0));
    let subscriber = Registry::default().with(EventCounter {
        events: Arc::clone(&events),
    });
    tracing::subscriber::with_default(subscriber, f);
    events.load(Ordering::SeqCst)
}

#[test]
fn malformed_values_are_reported_once_at_parse_time() {
    let malformed = count_events(|| {
        let cc = CacheControl::parse("max-age=soon, max-stale=later, min-fresh=-1");
        for _ in 0..5 {
            assert_eq!(cc.max_age(), None);
            assert_eq!(cc.max_stale(), None);
            assert_eq!(cc.min_fresh(), None);
        }
    });
    assert_eq!(malformed, 3);

    let well_formed = count_events(|| {
        let cc = CacheControl::parse("max-age=60, max-stale, min-fresh=5, no-cache=\"a,b\"");
        for _ in 0..5 {
            assert_eq!(cc.max_age(), Some(60));
            assert_eq!(cc.max_stale(), Some(MaxStale::Any));
            assert_eq!(cc.min_fresh(), Some(5));
        }
    });
    assert_eq!(well_formed, 0);
}
