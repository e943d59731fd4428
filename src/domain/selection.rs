//! Selection primitives: deterministic bottom-K / top-K over (symbol, metric).
//!
//! Ties on the metric are always broken by ascending symbol name, for both
//! directions, so identical inputs produce identical output order.

use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub symbol: String,
    pub metric: f64,
}

impl Candidate {
    pub fn new(symbol: &str, metric: f64) -> Self {
        Candidate {
            symbol: symbol.to_string(),
            metric,
        }
    }
}

impl From<(&str, f64)> for Candidate {
    fn from((symbol, metric): (&str, f64)) -> Self {
        Candidate::new(symbol, metric)
    }
}

/// Which end of the ranking a selection takes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOrder {
    Bottom,
    Top,
}

impl SelectionOrder {
    pub fn select(&self, candidates: &[Candidate], k: usize) -> Vec<Candidate> {
        match self {
            SelectionOrder::Bottom => select_bottom(candidates, k),
            SelectionOrder::Top => select_top(candidates, k),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SelectionOrder::Bottom => "lowest",
            SelectionOrder::Top => "highest",
        }
    }
}

/// The `k` candidates with the smallest metric, ascending.
pub fn select_bottom(candidates: &[Candidate], k: usize) -> Vec<Candidate> {
    ranked(candidates, |a, b| a.metric.total_cmp(&b.metric), k)
}

/// The `k` candidates with the largest metric, descending.
pub fn select_top(candidates: &[Candidate], k: usize) -> Vec<Candidate> {
    ranked(candidates, |a, b| b.metric.total_cmp(&a.metric), k)
}

fn ranked<F>(candidates: &[Candidate], by_metric: F, k: usize) -> Vec<Candidate>
where
    F: Fn(&Candidate, &Candidate) -> Ordering,
{
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| by_metric(a, b).then_with(|| a.symbol.cmp(&b.symbol)));
    sorted.truncate(k);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cands(pairs: &[(&str, f64)]) -> Vec<Candidate> {
        pairs.iter().map(|&p| Candidate::from(p)).collect()
    }

    #[test]
    fn bottom_two_ascending() {
        let input = cands(&[("A", 3.0), ("B", 1.0), ("C", 2.0)]);
        assert_eq!(
            select_bottom(&input, 2),
            cands(&[("B", 1.0), ("C", 2.0)])
        );
    }

    #[test]
    fn top_one() {
        let input = cands(&[("A", 3.0), ("B", 1.0), ("C", 2.0)]);
        assert_eq!(select_top(&input, 1), cands(&[("A", 3.0)]));
    }

    #[test]
    fn top_orders_descending() {
        let input = cands(&[("A", 3.0), ("B", 1.0), ("C", 2.0)]);
        assert_eq!(
            select_top(&input, 3),
            cands(&[("A", 3.0), ("C", 2.0), ("B", 1.0)])
        );
    }

    #[test]
    fn bottom_tie_breaks_alphabetically() {
        let input = cands(&[("B", 1.0), ("A", 1.0)]);
        assert_eq!(select_bottom(&input, 1), cands(&[("A", 1.0)]));
    }

    #[test]
    fn top_tie_breaks_alphabetically() {
        let input = cands(&[("TLT", 55.0), ("SQQQ", 55.0)]);
        assert_eq!(select_top(&input, 1), cands(&[("SQQQ", 55.0)]));
    }

    #[test]
    fn fewer_than_k_returns_all() {
        let input = cands(&[("X", 2.0)]);
        assert_eq!(select_bottom(&input, 3), cands(&[("X", 2.0)]));
        assert_eq!(select_top(&input, 3), cands(&[("X", 2.0)]));
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(select_bottom(&[], 1).is_empty());
        assert!(select_top(&[], 2).is_empty());
    }

    #[test]
    fn k_zero_returns_empty() {
        let input = cands(&[("A", 1.0)]);
        assert!(select_bottom(&input, 0).is_empty());
    }

    #[test]
    fn input_order_does_not_matter() {
        let a = cands(&[("TECL", 40.0), ("SOXL", 35.0), ("SVIX", 35.0)]);
        let b = cands(&[("SVIX", 35.0), ("TECL", 40.0), ("SOXL", 35.0)]);
        assert_eq!(select_bottom(&a, 2), select_bottom(&b, 2));
        assert_eq!(select_bottom(&a, 2)[0].symbol, "SOXL");
    }

    #[test]
    fn selection_order_dispatch() {
        let input = cands(&[("A", 3.0), ("B", 1.0)]);
        assert_eq!(SelectionOrder::Bottom.select(&input, 1)[0].symbol, "B");
        assert_eq!(SelectionOrder::Top.select(&input, 1)[0].symbol, "A");
    }
}
