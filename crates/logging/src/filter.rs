use crate::level::Level;
use crate::record::event_severity;
use tracing::level_filters::LevelFilter;
use tracing::subscriber::Interest;
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Drops records below the context threshold.
///
/// Callsites are judged by their `tracing` level alone, which always agrees
/// with the advertised max level. `CRITICAL` shares the `tracing` level
/// `ERROR`, so the final decision is made per event on the 10..50 scale.
pub(crate) struct Threshold {
    level: Level,
}

impl Threshold {
    pub fn new(level: Level) -> Self {
        Threshold { level }
    }

    fn admits(&self, meta: &Metadata<'_>) -> bool {
        *meta.level() <= self.level.as_tracing()
    }
}

impl<S: Subscriber> Layer<S> for Threshold {
    fn register_callsite(&self, meta: &'static Metadata<'static>) -> Interest {
        if self.admits(meta) {
            Interest::always()
        } else {
            Interest::never()
        }
    }

    fn enabled(&self, meta: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.admits(meta)
    }

    fn event_enabled(&self, event: &Event<'_>, _ctx: Context<'_, S>) -> bool {
        event_severity(event) >= self.level.value()
    }

    fn max_level_hint(&self) -> Option<LevelFilter> {
        Some(self.level.as_level_filter())
    }
}
