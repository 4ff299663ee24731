//! Vendor-agnostic metrics collection via a pluggable sink.
//!
//! The library does not depend on a metrics backend. Implement
//! [`MetricsSink`] and install it once with [`set_sink`] to receive a
//! [`CheckStats`] after every check run and an [`EntityStats`] after every
//! entity validated by [`crate::ValidationEngine`].
//!
//! ```ignore
//! use restriction_checks::metrics::{CheckStats, MetricsSink};
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::sync::Arc;
//!
//! struct FindingCounter(AtomicU64);
//!
//! impl MetricsSink for FindingCounter {
//!     fn on_check(&self, stats: &CheckStats) {
//!         self.0.fetch_add(stats.diagnostics as u64, Ordering::Relaxed);
//!     }
//! }
//!
//! restriction_checks::metrics::set_sink(Arc::new(FindingCounter(AtomicU64::new(0))));
//! ```

use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::warn;

use crate::types::EntityId;

/// One check run against one entity.
///
/// # Fields
///
/// * `check` - Name of the check, as returned by [`crate::Check::name`].
/// * `entity` - The entity the check ran on.
/// * `duration` - Wall-clock time spent in the check's `flag` call.
/// * `diagnostics` - Number of diagnostics the run produced.
///
/// # Example
///
/// ```ignore
/// use restriction_checks::metrics::CheckStats;
/// use restriction_checks::EntityId;
/// use std::time::Duration;
///
/// let stats = CheckStats {
///     check: "InvalidTurnRestrictionCheck",
///     entity: EntityId::relation(42),
///     duration: Duration::from_micros(80),
///     diagnostics: 1,
/// };
/// println!("{} on {}: {} finding(s) in {:?}", stats.check, stats.entity, stats.diagnostics, stats.duration);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CheckStats {
    pub check: &'static str,
    pub entity: EntityId,
    pub duration: Duration,
    /// Number of diagnostics the run produced.
    pub diagnostics: usize,
}

/// All applicable checks run against one entity.
///
/// # Fields
///
/// * `entity` - The entity that was validated.
/// * `duration` - Total wall-clock time of the engine's `validate` call,
///   including checks that did not apply.
/// * `checks_run` - Number of checks whose precondition held.
/// * `diagnostics` - Diagnostics produced across all of them.
///
#[derive(Debug, Clone, Serialize)]
pub struct EntityStats {
    pub entity: EntityId,
    pub duration: Duration,
    pub checks_run: usize,
    pub diagnostics: usize,
}

/// Receiver for check metrics.
///
/// Called synchronously on the validation path, possibly from many threads
/// at once; implementations should be cheap and must not block.
pub trait MetricsSink: Send + Sync {
    fn on_check(&self, stats: &CheckStats);

    fn on_entity(&self, _stats: &EntityStats) {}
}

struct NoOpSink;

impl MetricsSink for NoOpSink {
    fn on_check(&self, _stats: &CheckStats) {}
}

static SINK: Lazy<RwLock<Arc<dyn MetricsSink>>> = Lazy::new(|| RwLock::new(Arc::new(NoOpSink)));
static SINK_INSTALLED: AtomicBool = AtomicBool::new(false);

fn sink() -> Arc<dyn MetricsSink> {
    SINK.read()
        .map(|guard| guard.clone())
        .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
}

/// Set the global metrics sink.
///
/// Replaces whatever sink was installed before. Checks already in flight may
/// still report to the previous sink.
pub fn set_sink(sink: Arc<dyn MetricsSink>) {
    if SINK_INSTALLED.swap(true, Ordering::AcqRel) {
        warn!("Metrics sink was already set. Replacing the previous sink.");
    }
    match SINK.write() {
        Ok(mut guard) => *guard = sink,
        Err(poisoned) => *poisoned.into_inner() = sink,
    }
}

pub(crate) fn record_check(check: &'static str, entity: EntityId, duration: Duration, diagnostics: usize) {
    sink().on_check(&CheckStats {
        check,
        entity,
        duration,
        diagnostics,
    });
}

pub(crate) fn record_entity(entity: EntityId, duration: Duration, checks_run: usize, diagnostics: usize) {
    sink().on_entity(&EntityStats {
        entity,
        duration,
        checks_run,
        diagnostics,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_stats_serialization() {
        let stats = CheckStats {
            check: "ConditionalRestrictionCheck",
            entity: EntityId::edge(3),
            duration: Duration::from_millis(2),
            diagnostics: 1,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["check"], "ConditionalRestrictionCheck");
        assert_eq!(json["diagnostics"], 1);
        assert_eq!(json["entity"]["osm_id"], 3);
    }

    #[test]
    fn test_record_with_no_op_sink() {
        record_check("InvalidTurnRestrictionCheck", EntityId::relation(1), Duration::ZERO, 0);
        record_entity(EntityId::relation(1), Duration::ZERO, 1, 0);
    }

    #[test]
    fn test_noop_sink_default_entity_hook() {
        let sink = NoOpSink;
        sink.on_entity(&EntityStats {
            entity: EntityId::node(1),
            duration: Duration::from_micros(5),
            checks_run: 0,
            diagnostics: 0,
        });
    }
}
