//! Per-construction-call collection of field failures.

use indexmap::IndexMap;
use salvage_path::FieldPath;

use crate::error::ErrorDetail;
use crate::report::ErrorReport;

/// Collects field-level failures raised while constructing one model
/// instance.
///
/// One aggregator exists per construction call and is consumed by
/// [`finalize`](Self::finalize); there is no shared or global state, so
/// concurrent construction calls need no coordination.
#[derive(Debug, Default)]
pub struct Aggregator {
    entries: IndexMap<FieldPath, Vec<ErrorDetail>>,
}

impl Aggregator {
    /// Create an empty aggregator for one construction call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure at the given path.
    ///
    /// Recording the same path twice retains both details; nothing is
    /// overwritten.
    pub fn record(&mut self, path: FieldPath, detail: ErrorDetail) {
        self.entries.entry(path).or_default().push(detail);
    }

    /// Check whether any failure has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the collected failures into an immutable [`ErrorReport`].
    ///
    /// Consumes the aggregator, so a report cannot be re-collected after
    /// finalization.
    pub fn finalize(self) -> ErrorReport {
        ErrorReport::from_entries(self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorDetail, ErrorKind};

    #[test]
    fn test_duplicate_paths_are_retained() {
        let mut agg = Aggregator::new();
        agg.record(FieldPath::field("age"), ErrorDetail::missing());
        agg.record(
            FieldPath::field("age"),
            ErrorDetail::new(ErrorKind::Invalid, "second opinion"),
        );

        let report = agg.finalize();
        assert_eq!(report.len(), 1);
        assert_eq!(report.total(), 2);
        let details = report.get("age").unwrap();
        assert_eq!(details[0].kind(), &ErrorKind::Missing);
        assert_eq!(details[1].message(), "second opinion");
    }

    #[test]
    fn test_recording_order_is_preserved() {
        let mut agg = Aggregator::new();
        agg.record(FieldPath::field("b"), ErrorDetail::missing());
        agg.record(FieldPath::field("a"), ErrorDetail::missing());

        let report = agg.finalize();
        let paths: Vec<String> = report.paths().map(|p| p.format()).collect();
        assert_eq!(paths, ["b", "a"]);
    }

    #[test]
    fn test_empty_aggregator_finalizes_to_empty_report() {
        let agg = Aggregator::new();
        assert!(agg.is_empty());
        assert!(agg.finalize().is_empty());
    }
}
