// Report assembly: raw page bytes through extraction, statistics and classification
use crate::extractor;
use crate::grid::{self, Grid};
use crate::stats::ContributionStats;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub account: String,
    pub stats: ContributionStats,
    pub grid: Grid,
    pub today_count: Option<u64>,
}

impl Report {
    /// Build a report from a fetched page. Never fails: unrecognized markup yields an empty report.
    pub fn from_page(account: &str, page: &[u8], today: &str) -> Self {
        let page = extractor::extract(page);
        let stats = ContributionStats::compute(&page.fragments, page.aggregate_total, today);
        let classified = grid::classify(&page.fragments, &stats, today);

        if classified.grid.is_empty() {
            debug!("No day entries found on the contributions page");
        }

        debug!(
            "Laid out {} days in {} rows, today: {:?}",
            classified.grid.cell_count(),
            classified.grid.rows.len(),
            classified.today_count
        );

        Self {
            account: account.to_string(),
            stats,
            grid: classified.grid,
            today_count: classified.today_count,
        }
    }
}
