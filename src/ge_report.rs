//! Delivery report
//!
//! Turns an `AggregatedResult` into per-round full-coverage percentages.
//! A trial counts as delivered only when every host ended up with the
//! message.

use std::fmt;

use crate::ge_interface::RoundCount;
use crate::ge_trials::AggregatedResult;

/// One line of the report
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub rounds: RoundCount,
    pub full_coverage: usize,
    pub trials: usize,
}

impl SummaryRow {
    /// Fraction of trials in this bucket that reached everybody
    pub fn delivery_rate(&self) -> Option<f64> {
        rate(self.full_coverage, self.trials)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub rows: Vec<SummaryRow>,
    pub full_coverage: usize,
    pub trials: usize,
}

impl Summary {
    pub fn overall_rate(&self) -> Option<f64> {
        rate(self.full_coverage, self.trials)
    }
}

fn rate(hits: usize, total: usize) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(hits as f64 / total as f64)
    }
}

pub fn summarize(result: &AggregatedResult, population_size: usize) -> Summary {
    let rows: Vec<SummaryRow> = result
        .buckets()
        .map(|(rounds, bucket)| SummaryRow {
            rounds,
            full_coverage: bucket.get(&population_size).copied().unwrap_or(0),
            trials: bucket.values().sum(),
        })
        .collect();

    Summary {
        full_coverage: rows.iter().map(|r| r.full_coverage).sum(),
        trials: rows.iter().map(|r| r.trials).sum(),
        rows,
    }
}

/// Summary text preceded by a strategy header line
pub fn report(strategy_name: &str, result: &AggregatedResult, population_size: usize) -> String {
    format!("{}\n{}", strategy_name, summarize(result, population_size))
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            match row.delivery_rate() {
                Some(r) => writeln!(f, "Iterations {:2}: {:6.2}%", row.rounds, r * 100.0)?,
                None => writeln!(f, "Iterations {:2}: undefined", row.rounds)?,
            }
        }
        match self.overall_rate() {
            Some(r) => writeln!(f, "Overall:      {:6.2}%", r * 100.0),
            None => writeln!(f, "Overall:      undefined"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_table() {
        let result: AggregatedResult = vec![(0, 100, 3), (1, 100, 2), (1, 90, 1)]
            .into_iter()
            .collect();

        let text = summarize(&result, 100).to_string();

        assert_eq!(
            text,
            "Iterations  0: 100.00%\nIterations  1:  66.67%\nOverall:       83.33%\n"
        );
    }

    #[test]
    fn test_rows_ascending_with_counts() {
        let result: AggregatedResult = vec![(7, 10, 1), (3, 9, 2), (5, 10, 4)]
            .into_iter()
            .collect();

        let summary = summarize(&result, 10);

        let rounds: Vec<_> = summary.rows.iter().map(|r| r.rounds).collect();
        assert_eq!(rounds, vec![3, 5, 7]);
        assert_eq!(summary.rows[0].delivery_rate(), Some(0.0));
        assert_eq!(summary.rows[1].trials, 4);
        assert_eq!(summary.full_coverage, 5);
        assert_eq!(summary.trials, 7);
    }

    #[test]
    fn test_empty_result_is_undefined() {
        let summary = summarize(&AggregatedResult::new(), 100);

        assert!(summary.rows.is_empty());
        assert_eq!(summary.overall_rate(), None);
        assert_eq!(summary.to_string(), "Overall:      undefined\n");
    }

    #[test]
    fn test_empty_bucket_row_is_undefined() {
        let summary = Summary {
            rows: vec![SummaryRow {
                rounds: 4,
                full_coverage: 0,
                trials: 0,
            }],
            full_coverage: 0,
            trials: 0,
        };

        assert_eq!(
            summary.to_string(),
            "Iterations  4: undefined\nOverall:      undefined\n"
        );
    }

    #[test]
    fn test_report_has_header() {
        let result: AggregatedResult = vec![(2, 5, 1)].into_iter().collect();

        let text = report("Pair gossip", &result, 5);

        assert!(text.starts_with("Pair gossip\nIterations  2: 100.00%\n"));
        assert!(text.ends_with("Overall:      100.00%\n"));
    }
}
