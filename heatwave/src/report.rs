//! The summary one executor run yields, whether it finished cleanly or was
//! cut short by cancellation.

use heatwave_types::QueryResult;

/// Outcome of one end-to-end run: everything a caller needs to derive the
/// exit status and hand Phase 1+2 articles to downstream stages.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Phase 1 (state-level) results produced this run. Excludes
    /// fingerprints that were already checkpointed by a prior run.
    pub phase1_results: Vec<QueryResult>,
    /// Phase 2 (district-level) results produced this run.
    pub phase2_results: Vec<QueryResult>,
    /// Region slugs Phase 1 found active (at least one `ok` result with at
    /// least one article), including slugs that were active purely by
    /// replaying a prior run's checkpoint. Sorted for reproducible output.
    pub active_regions: Vec<String>,
    /// Whether Phase 1 was cut short by cancellation. When true, Phase 2
    /// never runs: district drill-down requires a complete state sweep.
    pub phase1_aborted: bool,
    /// Whether the cancellation signal (deadline or interrupt) fired at
    /// any point during the run.
    pub cancelled: bool,
}

impl RunReport {
    /// Every result from both phases, in no particular order.
    pub fn all_results(&self) -> impl Iterator<Item = &QueryResult> {
        self.phase1_results.iter().chain(self.phase2_results.iter())
    }

    /// Fraction of this run's dispatched queries with a terminal `ok`
    /// outcome, the run's health signal per the exit-status rule. Replayed
    /// (checkpoint-skipped) queries from a prior run don't count, since
    /// this run never dispatched them.
    #[must_use]
    pub fn ok_fraction(&self) -> f64 {
        let total = self.phase1_results.len() + self.phase2_results.len();
        if total == 0 {
            return 1.0;
        }
        let ok = self.all_results().filter(|r| r.outcome.is_ok()).count();
        ok as f64 / total as f64
    }

    /// Enforce `max_articles`, a hard cap on the total number of articles
    /// carried forward from Phase 1+2 combined. Walks results in Phase 1
    /// then Phase 2 order, keeping whole results until the cap is reached
    /// and truncating the result that would cross it; later results are
    /// dropped to zero articles. The dispatched queries and their outcomes
    /// are left untouched — only the `articles` payload handed to
    /// downstream stages shrinks. Returns the number of articles dropped.
    pub fn apply_max_articles(&mut self, cap: Option<usize>) -> usize {
        let Some(cap) = cap else { return 0 };
        let mut remaining = cap;
        let mut dropped = 0usize;
        for result in self.phase1_results.iter_mut().chain(self.phase2_results.iter_mut()) {
            if result.articles.len() <= remaining {
                remaining -= result.articles.len();
            } else {
                dropped += result.articles.len() - remaining;
                result.articles.truncate(remaining);
                remaining = 0;
            }
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatwave_types::{ArticleRef, Level, LanguageCode, ProviderKind, Query};

    fn result_with_articles(region: &str, count: usize) -> QueryResult {
        let query = Query::new(
            format!("(heat) {region}"),
            LanguageCode::Hi,
            region.to_string(),
            region.to_string(),
            Level::State,
            None,
            vec![],
            ProviderKind::Google,
        );
        let articles = (0..count)
            .map(|i| ArticleRef {
                title: format!("article {i}"),
                url: format!("https://example.test/{region}/{i}"),
                source: "example".to_string(),
                published_at: None,
                language: LanguageCode::Hi,
                region_slug: region.to_string(),
                search_term: query.query_string.clone(),
            })
            .collect();
        QueryResult::ok(query, "google", articles)
    }

    #[test]
    fn no_cap_leaves_articles_untouched() {
        let mut report = RunReport {
            phase1_results: vec![result_with_articles("rajasthan", 5)],
            ..RunReport::default()
        };
        let dropped = report.apply_max_articles(None);
        assert_eq!(dropped, 0);
        assert_eq!(report.phase1_results[0].articles.len(), 5);
    }

    #[test]
    fn cap_truncates_the_result_that_crosses_the_boundary() {
        let mut report = RunReport {
            phase1_results: vec![result_with_articles("rajasthan", 3)],
            phase2_results: vec![result_with_articles("jaipur", 4)],
            ..RunReport::default()
        };
        let dropped = report.apply_max_articles(Some(5));
        assert_eq!(dropped, 2);
        assert_eq!(report.phase1_results[0].articles.len(), 3);
        assert_eq!(report.phase2_results[0].articles.len(), 2);
    }

    #[test]
    fn cap_of_zero_drops_everything() {
        let mut report = RunReport {
            phase1_results: vec![result_with_articles("rajasthan", 2)],
            ..RunReport::default()
        };
        let dropped = report.apply_max_articles(Some(0));
        assert_eq!(dropped, 2);
        assert!(report.phase1_results[0].articles.is_empty());
    }
}
