// Contribution statistics derived from the extracted day fragments
use crate::extractor::DayFragment;
use chrono::{Local, NaiveDate};
use tracing::debug;

/// Label the tooltips use for a calendar day, e.g. "March 4"
pub fn date_label(date: NaiveDate) -> String {
    date.format("%B %-d").to_string()
}

pub fn today_label() -> String {
    date_label(Local::now().date_naive())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContributionStats {
    /// From the summary heading, not a sum of days
    pub total: u64,
    pub most: u64,
    pub active_days: u64,
    /// `total / active_days`, truncated; 0 with no active days
    pub average: u64,
    /// Fragments mentioning today's label
    pub same_date_count: usize,
}

impl ContributionStats {
    pub fn compute(fragments: &[DayFragment], aggregate_total: u64, today: &str) -> Self {
        let mut most = 0;
        let mut active_days = 0;
        let mut same_date_count = 0;

        for fragment in fragments {
            let count = fragment.count();
            most = most.max(count);
            if count >= 1 {
                active_days += 1;
            }
            if fragment.mentions(today) {
                same_date_count += 1;
            }
        }

        let average = if active_days == 0 {
            0
        } else {
            aggregate_total / active_days
        };

        let stats = Self {
            total: aggregate_total,
            most,
            active_days,
            average,
            same_date_count,
        };
        debug!(?stats, "Computed contribution statistics");
        stats
    }
}
