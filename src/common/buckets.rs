//! Cached/uncached summary printed by the histogram tool
//!
//! [`BucketSummary`] holds the two threshold buckets; [`format_bucket_table`]
//! renders them plus a totals row with [`tabled`].

use tabled::{Table, Tabled};

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct BucketRow {
    #[tabled(rename = "Bucket")]
    pub label: String,
    /// Latency range covered, e.g. "<50 ms"
    #[tabled(rename = "Range")]
    pub range: String,
    #[tabled(rename = "Samples")]
    pub count: usize,
    /// Share of all samples, two decimals
    #[tabled(rename = "Share")]
    pub share: String,
}

/// Sample counts on either side of the cache threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketSummary {
    pub threshold: i64,
    pub cached: usize,
    pub uncached: usize,
}

impl BucketSummary {
    pub fn total(&self) -> usize {
        self.cached + self.uncached
    }

    /// Cached row, uncached row and a totals row, in print order.
    pub fn rows(&self) -> [BucketRow; 3] {
        let total = self.total();
        let row = |label: &str, range: String, count: usize| BucketRow {
            label: label.to_string(),
            range,
            count,
            share: share_of(count, total),
        };

        [
            row("Cached", format!("<{} ms", self.threshold), self.cached),
            row("Uncached", format!(">={} ms", self.threshold), self.uncached),
            row("Total", "all".to_string(), total),
        ]
    }
}

fn share_of(count: usize, total: usize) -> String {
    if total == 0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", count as f64 * 100.0 / total as f64)
}

/// Renders `summary` under an underlined `title`.
pub fn format_bucket_table(summary: &BucketSummary, title: &str) -> String {
    let table = Table::new(summary.rows()).to_string();
    format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::even_split(2, 2, "50.00%", "50.00%")]
    #[case::thirds(1, 2, "33.33%", "66.67%")]
    #[case::all_uncached(0, 7, "0.00%", "100.00%")]
    #[case::empty(0, 0, "0.00%", "0.00%")]
    fn rows_carry_shares(
        #[case] cached: usize,
        #[case] uncached: usize,
        #[case] cached_share: &str,
        #[case] uncached_share: &str,
    ) {
        let summary = BucketSummary {
            threshold: 50,
            cached,
            uncached,
        };
        let [cached_row, uncached_row, total_row] = summary.rows();

        assert_eq!(cached_row.share, cached_share);
        assert_eq!(uncached_row.share, uncached_share);
        assert_eq!(total_row.count, cached + uncached);
    }

    #[test]
    fn ranges_follow_threshold() {
        let summary = BucketSummary {
            threshold: 75,
            cached: 1,
            uncached: 1,
        };
        let rows = summary.rows();

        assert_eq!(rows[0].range, "<75 ms");
        assert_eq!(rows[1].range, ">=75 ms");
    }

    #[test]
    fn table_has_title_headers_and_totals() {
        let summary = BucketSummary {
            threshold: 50,
            cached: 3,
            uncached: 1,
        };

        let table = format_bucket_table(&summary, "Response Time Buckets");
        assert!(table.starts_with("Response Time Buckets\n=====================\n"));
        assert!(table.contains("Samples"));
        assert!(table.contains("Uncached"));
        assert!(table.contains("Total"));
        assert!(table.contains("75.00%"));
        assert!(table.contains("100.00%"));
    }
}
