// Contribution page extractor - pulls day tooltips and the yearly total out of raw markup
//
// This is not an HTML parser. It only knows the two tag shapes the
// contributions page uses and returns empty/zero values when they are absent.
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    /// One block per calendar day, e.g. `<tool-tip id=".." for="..">3 contributions on March 4th.</tool-tip>`
    static ref DAY_BLOCK: Regex = Regex::new(r"(?s)<tool-tip[^>]*>(.*?)</tool-tip>").unwrap();
    /// Year summary heading, e.g. `<h2 class="f4 text-normal mb-2">1,234 contributions in the last year</h2>`
    static ref TOTAL_BLOCK: Regex = Regex::new(r"(?s)<h2[^>]*>.*?</h2>").unwrap();
    static ref TOTAL_TAGS: Regex = Regex::new(r"</?h2[^>]*>").unwrap();
    static ref DIGIT_RUN: Regex = Regex::new(r"[\d,]+").unwrap();
}

/// Text of a single day's tooltip: `"<count> <free text>"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayFragment {
    text: String,
}

impl DayFragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Leading whitespace-delimited token as a number; anything unparsable counts as 0
    pub fn count(&self) -> u64 {
        self.text
            .split_whitespace()
            .next()
            .and_then(|token| token.parse().ok())
            .unwrap_or(0)
    }

    pub fn mentions(&self, date_label: &str) -> bool {
        !date_label.is_empty() && self.text.contains(date_label)
    }
}

/// Everything the rest of the pipeline needs from a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Day fragments in source order (oldest first)
    pub fragments: Vec<DayFragment>,
    /// Total from the summary heading; authoritative over the sum of fragments
    pub aggregate_total: u64,
}

pub fn extract(page: &[u8]) -> ExtractedPage {
    let html = String::from_utf8_lossy(page);

    let fragments = extract_fragments(&html);
    let aggregate_total = extract_aggregate_total(&html);

    debug!(
        "Extracted {} day fragments, aggregate total {}",
        fragments.len(),
        aggregate_total
    );

    ExtractedPage {
        fragments,
        aggregate_total,
    }
}

fn extract_fragments(html: &str) -> Vec<DayFragment> {
    DAY_BLOCK
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|inner| inner.as_str().trim())
        .filter(|text| !text.is_empty())
        .map(DayFragment::new)
        .collect()
}

fn extract_aggregate_total(html: &str) -> u64 {
    let Some(block) = TOTAL_BLOCK.find(html) else {
        debug!("No summary heading found, aggregate total is 0");
        return 0;
    };

    let heading = TOTAL_TAGS.replace_all(block.as_str(), "");
    let heading = heading.trim();

    DIGIT_RUN
        .find(heading)
        .and_then(|run| run.as_str().replace(',', "").parse().ok())
        .unwrap_or(0)
}
