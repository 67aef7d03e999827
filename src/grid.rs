// Grid classifier - maps each day to an activity level and lays the days out in rows
//
// The upstream weekly grid is one week wider than a year in the rows that
// precede today, so rows are 53 wide until the row holding today's entry
// has been closed and 52 wide from then on.
use crate::extractor::DayFragment;
use crate::stats::ContributionStats;
use tracing::debug;

pub const INITIAL_COLUMN_LIMIT: usize = 53;
pub const ADJUSTED_COLUMN_LIMIT: usize = 52;

/// Five-step activity scale, from no activity to the busiest day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActivityLevel {
    None,
    Low,
    Medium,
    High,
    Peak,
}

impl ActivityLevel {
    /// First matching rule wins
    pub fn classify(count: u64, stats: &ContributionStats) -> Self {
        if count == 0 {
            ActivityLevel::None
        } else if count < stats.average {
            ActivityLevel::Low
        } else if count < stats.most / 2 {
            ActivityLevel::Medium
        } else if count < stats.most {
            ActivityLevel::High
        } else {
            ActivityLevel::Peak
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Row-major activity levels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    pub rows: Vec<Vec<ActivityLevel>>,
}

impl Grid {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// Progress of today's entry through the single scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// No today-match consumed yet
    Normal,
    /// First of several today-matches was discarded as last year's day
    SkippedSpurious,
    /// Today recorded; the limit drops when the current row closes
    PendingAdjust,
    /// Limit is 52 for good
    Adjusted,
}

/// Classified grid plus today's count, if any today-match was recorded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedGrid {
    pub grid: Grid,
    pub today_count: Option<u64>,
}

struct GridBuilder {
    rows: Vec<Vec<ActivityLevel>>,
    column: usize,
    column_limit: usize,
    state: ScanState,
    today_count: Option<u64>,
}

impl GridBuilder {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            column: 0,
            column_limit: INITIAL_COLUMN_LIMIT,
            state: ScanState::Normal,
            today_count: None,
        }
    }

    fn on_today_match(&mut self, count: u64, same_date_count: usize) {
        self.state = match self.state {
            ScanState::Normal if same_date_count > 1 => ScanState::SkippedSpurious,
            ScanState::Normal | ScanState::SkippedSpurious | ScanState::PendingAdjust => {
                self.today_count = Some(count);
                ScanState::PendingAdjust
            }
            ScanState::Adjusted => {
                self.today_count = Some(count);
                ScanState::Adjusted
            }
        };
    }

    fn push(&mut self, level: ActivityLevel) {
        if self.column == 0 {
            self.rows.push(Vec::with_capacity(self.column_limit));
        }
        if let Some(row) = self.rows.last_mut() {
            row.push(level);
        }

        self.column += 1;
        if self.column == self.column_limit {
            if self.state == ScanState::PendingAdjust {
                debug!(
                    "Today's row closed at row {}, column limit now {}",
                    self.rows.len(),
                    ADJUSTED_COLUMN_LIMIT
                );
                self.column_limit = ADJUSTED_COLUMN_LIMIT;
                self.state = ScanState::Adjusted;
            }
            self.column = 0;
        }
    }

    fn finish(self) -> ClassifiedGrid {
        ClassifiedGrid {
            grid: Grid { rows: self.rows },
            today_count: self.today_count,
        }
    }
}

/// Classify every fragment in order and wrap the levels into rows
pub fn classify(fragments: &[DayFragment], stats: &ContributionStats, today: &str) -> ClassifiedGrid {
    let mut builder = GridBuilder::new();

    for fragment in fragments {
        let count = fragment.count();
        if fragment.mentions(today) {
            builder.on_today_match(count, stats.same_date_count);
        }
        builder.push(ActivityLevel::classify(count, stats));
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(most: u64, average: u64, same_date_count: usize) -> ContributionStats {
        ContributionStats {
            total: 0,
            most,
            active_days: 0,
            average,
            same_date_count,
        }
    }

    fn days(n: usize) -> Vec<DayFragment> {
        (0..n).map(|i| DayFragment::new(format!("1 contributions on day {}.", i))).collect()
    }

    fn row_lengths(grid: &Grid) -> Vec<usize> {
        grid.rows.iter().map(Vec::len).collect()
    }

    #[test]
    fn test_classify_priority() {
        let s = stats(12, 8, 0);
        let cases = vec![
            (0, ActivityLevel::None),
            (1, ActivityLevel::Low),
            (5, ActivityLevel::Low),
            // equal to the average skips Low; 8 >= 12/2 so High
            (8, ActivityLevel::High),
            (11, ActivityLevel::High),
            (12, ActivityLevel::Peak),
            (40, ActivityLevel::Peak),
        ];

        for (count, expected) in cases {
            assert_eq!(ActivityLevel::classify(count, &s), expected, "count: {}", count);
        }
    }

    #[test]
    fn test_classify_medium_band() {
        let s = stats(20, 2, 0);
        assert_eq!(ActivityLevel::classify(1, &s), ActivityLevel::Low);
        assert_eq!(ActivityLevel::classify(2, &s), ActivityLevel::Medium);
        assert_eq!(ActivityLevel::classify(9, &s), ActivityLevel::Medium);
        assert_eq!(ActivityLevel::classify(10, &s), ActivityLevel::High);
    }

    #[test]
    fn test_scenario_levels() {
        let fragments = vec![
            DayFragment::new("0 Jan 1"),
            DayFragment::new("5 Jan 2"),
            DayFragment::new("12 Jan 3"),
        ];
        let s = ContributionStats::compute(&fragments, 17, "Feb 1");
        let result = classify(&fragments, &s, "Feb 1");

        assert_eq!(
            result.grid.rows,
            vec![vec![ActivityLevel::None, ActivityLevel::Low, ActivityLevel::Peak]]
        );
        assert_eq!(result.today_count, None);
    }

    #[test]
    fn test_empty_input_has_no_rows() {
        let result = classify(&[], &ContributionStats::default(), "March 4");
        assert!(result.grid.is_empty());
        assert_eq!(result.today_count, None);
    }

    #[test]
    fn test_rows_stay_53_without_today() {
        let fragments = days(53 * 3 + 10);
        let result = classify(&fragments, &stats(1, 1, 0), "never");

        assert_eq!(row_lengths(&result.grid), vec![53, 53, 53, 10]);
        assert_eq!(result.grid.cell_count(), fragments.len());
    }

    #[test]
    fn test_limit_drops_after_today_row() {
        let mut fragments = days(200);
        fragments[60] = DayFragment::new("3 contributions on March 4th.");
        let s = ContributionStats::compute(&fragments, 200, "March 4");
        let result = classify(&fragments, &s, "March 4");

        // today sits in the second row, which still closes at 53
        assert_eq!(row_lengths(&result.grid), vec![53, 53, 52, 42]);
        assert_eq!(result.today_count, Some(3));
    }

    #[test]
    fn test_today_on_row_boundary() {
        let mut fragments = days(120);
        fragments[52] = DayFragment::new("2 contributions on March 4th.");
        let s = ContributionStats::compute(&fragments, 120, "March 4");
        let result = classify(&fragments, &s, "March 4");

        assert_eq!(row_lengths(&result.grid), vec![53, 52, 15]);
    }

    #[test]
    fn test_single_today_match_is_recorded() {
        let mut fragments = days(10);
        fragments[9] = DayFragment::new("6 contributions on March 4th.");
        let s = ContributionStats::compute(&fragments, 15, "March 4");
        assert_eq!(s.same_date_count, 1);

        let result = classify(&fragments, &s, "March 4");
        assert_eq!(result.today_count, Some(6));
    }

    #[test]
    fn test_first_of_duplicate_matches_is_skipped() {
        let mut fragments = days(366);
        fragments[0] = DayFragment::new("9 contributions on March 4th.");
        fragments[365] = DayFragment::new("No contributions on March 4th.");
        let s = ContributionStats::compute(&fragments, 400, "March 4");
        assert_eq!(s.same_date_count, 2);

        let result = classify(&fragments, &s, "March 4");
        assert_eq!(result.today_count, Some(0));
        // the skipped match at index 0 must not shorten later rows
        assert_eq!(row_lengths(&result.grid), vec![53, 53, 53, 53, 53, 53, 48]);
    }

    #[test]
    fn test_later_matches_overwrite_and_adjust_once() {
        let mut fragments = days(300);
        fragments[10] = DayFragment::new("1 contributions on March 4th.");
        fragments[20] = DayFragment::new("2 contributions on March 4th.");
        fragments[120] = DayFragment::new("7 contributions on March 4th.");
        let s = ContributionStats::compute(&fragments, 300, "March 4");
        let result = classify(&fragments, &s, "March 4");

        assert_eq!(result.today_count, Some(7));
        assert_eq!(row_lengths(&result.grid), vec![53, 52, 52, 52, 52, 39]);
    }

    #[test]
    fn test_level_index_order() {
        let levels = [
            ActivityLevel::None,
            ActivityLevel::Low,
            ActivityLevel::Medium,
            ActivityLevel::High,
            ActivityLevel::Peak,
        ];
        let indices: Vec<usize> = levels.iter().map(|l| l.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }
}
