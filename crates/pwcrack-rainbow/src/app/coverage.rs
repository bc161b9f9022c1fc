//! Coverage measurement
//!
//! Estimates a table set's success probability by querying digests of known
//! plaintexts and counting recoveries. A 95% confidence half-width is
//! derived from the running success rate.

use crate::domain::alphabet::startpoint_of;
use crate::domain::hash::HashPrimitive;
use crate::domain::params::TableParams;
use crate::domain::table::RainbowTable;

use super::searcher::online_search;

/// Running tally of a coverage measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoverageReport {
    /// Digests queried so far.
    pub queried: u64,
    /// Queries whose plaintext was recovered exactly.
    pub recovered: u64,
}

impl CoverageReport {
    /// Fraction of queries recovered, in [0, 1].
    pub fn success_rate(&self) -> f64 {
        if self.queried == 0 {
            return 0.0;
        }
        self.recovered as f64 / self.queried as f64
    }

    /// Half-width of the 95% confidence interval around the success rate.
    pub fn confidence_95(&self) -> f64 {
        if self.queried == 0 {
            return 0.0;
        }
        let rate = self.success_rate();
        1.96 * (rate * (1.0 - rate) / self.queried as f64).sqrt()
    }
}

/// Measure recovery success over the plaintexts of the given counters.
pub fn measure_coverage<H: HashPrimitive>(
    params: &TableParams,
    hasher: &H,
    tables: &[RainbowTable],
    counters: impl IntoIterator<Item = u64>,
) -> CoverageReport {
    measure_coverage_with_progress(params, hasher, tables, counters, |_| {})
}

/// Measure recovery success, observing the running tally after each query.
pub fn measure_coverage_with_progress<H, I, F>(
    params: &TableParams,
    hasher: &H,
    tables: &[RainbowTable],
    counters: I,
    mut on_sample: F,
) -> CoverageReport
where
    H: HashPrimitive,
    I: IntoIterator<Item = u64>,
    F: FnMut(&CoverageReport),
{
    let mut report = CoverageReport::default();

    for counter in counters {
        let plaintext = startpoint_of(counter, params.password_length());
        let digest = hasher.digest(plaintext.as_bytes());

        report.queried += 1;
        if online_search(&digest, tables, params, hasher).is_some_and(|found| found == plaintext) {
            report.recovered += 1;
        }

        on_sample(&report);
    }

    report
}
