//! Query-string construction: OR-clause assembly, quoting, and greedy
//! length-budget packing.
//!
//! Every helper here is pure and allocation-only; none of it touches the
//! network or the checkpoint store. The normative rules from the
//! specification live entirely in this module so the two call sites
//! (state-level and district-level emission) can't drift apart:
//!
//! - the OR-clause is always parenthesized (`(a OR b) X`, never `a OR b X`)
//! - multi-word terms and multi-word district names are double-quoted
//! - terms are packed highest-priority first, so truncation always drops
//!   the lowest-priority (borrowed) terms first

use heatwave_types::{DistrictName, HeatTerm};

fn quote_if_multiword(text: &str) -> String {
    if text.split_whitespace().count() > 1 {
        format!("\"{text}\"")
    } else {
        text.to_string()
    }
}

fn quote_term(term: &HeatTerm) -> String {
    quote_if_multiword(&term.text)
}

fn quote_district(district: &DistrictName) -> String {
    quote_if_multiword(district.as_str())
}

fn render_clause(rendered_terms: &[String]) -> String {
    format!("({})", rendered_terms.join(" OR "))
}

/// Render `terms` (already in the priority order the caller wants
/// preserved) as a parenthesized OR-clause followed by `suffix`, e.g.
/// `(loo OR "heat wave") Rajasthan`.
fn render_query(terms: &[&HeatTerm], suffix: &str) -> String {
    let rendered: Vec<String> = terms.iter().map(|t| quote_term(t)).collect();
    format!("{} {suffix}", render_clause(&rendered))
}

/// Greedily pack `terms` (sorted highest priority first) into an OR-clause
/// query no longer than `max_len` bytes, adding terms one at a time and
/// stopping before the first one that would overflow the budget. Because
/// terms are considered in descending priority order, whatever gets left
/// out is always the lowest-priority (most borrowed) remainder — this is
/// the concrete mechanism behind "truncate by dropping lowest-priority
/// terms" (register order: `borrowed < journalistic < colloquial <
/// formal`).
///
/// Returns `None` if there are no terms, or if even the single
/// highest-priority term doesn't fit under `max_len`.
pub fn pack_or_clause(terms: &[&HeatTerm], suffix: &str, max_len: usize) -> Option<String> {
    let mut included: Vec<&HeatTerm> = Vec::new();
    for term in terms {
        let mut candidate = included.clone();
        candidate.push(term);
        let rendered = render_query(&candidate, suffix);
        if rendered.len() <= max_len {
            included = candidate;
        } else if included.is_empty() {
            return None;
        } else {
            break;
        }
    }
    if included.is_empty() {
        None
    } else {
        Some(render_query(&included, suffix))
    }
}

/// Build the district-level query string: a short curated heat-term
/// phrase (top-priority terms, capped at `max_terms`) combined with a
/// parenthesized OR-clause of the district batch, followed by the region's
/// display name. Falls back to a single term if the full phrase doesn't
/// fit under `max_len`; returns `None` if nothing fits.
pub fn district_query_string(
    curated_terms: &[&HeatTerm],
    districts: &[&DistrictName],
    region_display: &str,
    max_terms: usize,
    max_len: usize,
) -> Option<String> {
    if curated_terms.is_empty() || districts.is_empty() {
        return None;
    }
    let district_clause = render_clause(&districts.iter().map(|d| quote_district(d)).collect::<Vec<_>>());

    let try_with = |terms: &[&HeatTerm]| -> Option<String> {
        let term_clause = render_clause(&terms.iter().map(|t| quote_term(t)).collect::<Vec<_>>());
        let rendered = format!("{term_clause} {district_clause} {region_display}");
        (rendered.len() <= max_len).then_some(rendered)
    };

    let capped = &curated_terms[..curated_terms.len().min(max_terms)];
    try_with(capped).or_else(|| try_with(&curated_terms[..1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatwave_types::Register;

    fn term(text: &str, register: Register) -> HeatTerm {
        HeatTerm { text: text.to_string(), register }
    }

    #[test]
    fn wraps_or_clause_in_parens() {
        let a = term("loo", Register::Formal);
        let b = term("garmi", Register::Colloquial);
        let rendered = pack_or_clause(&[&a, &b], "Rajasthan", 2048).unwrap();
        assert!(rendered.starts_with('('));
        assert!(rendered.contains("Rajasthan"));
        assert!(!rendered.contains("Rajasthan)"));
    }

    #[test]
    fn quotes_multi_word_terms() {
        let a = term("heat wave", Register::Formal);
        let rendered = pack_or_clause(&[&a], "Rajasthan", 2048).unwrap();
        assert!(rendered.contains("\"heat wave\""));
    }

    #[test]
    fn drops_lowest_priority_terms_under_budget() {
        let formal = term("loo", Register::Formal);
        let borrowed = term("heatwave emergency situation today", Register::Borrowed);
        // Budget fits the formal term plus the literal suffix, but not both
        // terms combined.
        let rendered = pack_or_clause(&[&formal, &borrowed], "X", 10).unwrap();
        assert!(rendered.contains("loo"));
        assert!(!rendered.contains("emergency"));
    }

    #[test]
    fn returns_none_when_nothing_fits() {
        let huge = term(&"a".repeat(1000), Register::Formal);
        assert!(pack_or_clause(&[&huge], "X", 10).is_none());
    }

    #[test]
    fn district_query_quotes_multi_word_district_names() {
        let heat = term("loo", Register::Formal);
        let d1 = DistrictName("Jaipur".into());
        let d2 = DistrictName("Sri Ganganagar".into());
        let rendered =
            district_query_string(&[&heat], &[&d1, &d2], "Rajasthan", 2, 2048).unwrap();
        assert!(rendered.contains("\"Sri Ganganagar\""));
        assert!(rendered.contains("Rajasthan"));
    }

    #[test]
    fn district_query_falls_back_to_single_term_under_tight_budget() {
        let a = term("loo", Register::Formal);
        let b = term("bahut garmi", Register::Colloquial);
        let d1 = DistrictName("Jaipur".into());
        let rendered = district_query_string(&[&a, &b], &[&d1], "Rajasthan", 2, 30).unwrap();
        assert!(!rendered.contains("garmi"));
    }
}
