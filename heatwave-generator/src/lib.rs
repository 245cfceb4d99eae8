//! heatwave-generator
//!
//! Turns a read-only geography catalogue and a read-only term dictionary
//! into a provider-specific, rate-limit-aware list of [`Query`] objects.
//! Construction of the catalogue and dictionary themselves is out of
//! scope here; this crate only consumes their shape.

mod query_string;

use heatwave_types::{
    DistrictName, Level, LanguageCode, ProviderKind, ProviderProfile, Query, Region, RunConfig,
    TermCatalogue, TermCategory,
};
use std::collections::HashMap;

/// How many top-priority heatwave terms to curate into a district-level
/// query's phrase; district batching trades term breadth for district
/// breadth, so only a small, high-priority phrase is carried.
const DISTRICT_CURATED_TERM_COUNT: usize = 2;

/// Regions sorted by slug — the stable iteration order fingerprints and
/// reproducible runs require.
fn sorted_regions<'a>(regions: &'a [Region]) -> Vec<&'a Region> {
    let mut out: Vec<&Region> = regions.iter().collect();
    out.sort_by(|a, b| a.slug.cmp(&b.slug));
    out
}

/// A region's languages sorted by BCP-47 code, for stable iteration
/// independent of how the caller happened to order them.
fn sorted_languages(region: &Region) -> Vec<LanguageCode> {
    let mut out = region.languages.clone();
    out.sort_by_key(LanguageCode::as_str);
    out
}

/// Generate Phase 1 (state-level sweep) queries for every in-scope
/// provider, region, and language.
///
/// - **google**: one query per `(region, language, category)`, the full
///   per-category term expansion, truncated to the provider's character
///   budget by dropping lowest-priority terms first.
/// - **newsdata** / **gnews**: one broad query per `(region, language)`,
///   terms greedy-packed across all categories in priority order.
///   **gnews** is additionally restricted to its 8 supported languages.
#[must_use]
pub fn state_level(
    regions: &[Region],
    catalogue: &TermCatalogue,
    config: &RunConfig,
) -> HashMap<ProviderKind, Vec<Query>> {
    let mut out: HashMap<ProviderKind, Vec<Query>> =
        ProviderKind::ALL.into_iter().map(|p| (p, Vec::new())).collect();

    for region in sorted_regions(regions) {
        if !config.region_in_scope(&region.slug) {
            continue;
        }
        for language in sorted_languages(region) {
            if !config.language_in_scope(language) {
                continue;
            }
            for provider in ProviderKind::ALL {
                if !config.provider_in_scope(provider) {
                    continue;
                }
                if !profile_supports(provider, language) {
                    continue;
                }
                let profile = ProviderProfile::default_for(provider);
                let queries = state_level_queries_for(region, language, catalogue, &profile);
                out.get_mut(&provider)
                    .expect("ProviderKind::ALL seeds every key")
                    .extend(queries);
            }
        }
    }
    out
}

fn profile_supports(provider: ProviderKind, language: LanguageCode) -> bool {
    match provider {
        ProviderKind::Gnews => language.gnews_supported(),
        ProviderKind::Google | ProviderKind::Newsdata => true,
    }
}

fn state_level_queries_for(
    region: &Region,
    language: LanguageCode,
    catalogue: &TermCatalogue,
    profile: &ProviderProfile,
) -> Vec<Query> {
    match profile.kind {
        ProviderKind::Google => TermCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let mut terms: Vec<_> = catalogue.terms(language, category).iter().collect();
                terms.sort_by(|a, b| b.register.cmp(&a.register));
                let query_string =
                    query_string::pack_or_clause(&terms, &region.display_name, profile.max_query_len)?;
                Some(Query::new(
                    query_string,
                    language,
                    region.slug.clone(),
                    region.display_name.clone(),
                    Level::State,
                    Some(category),
                    Vec::new(),
                    profile.kind,
                ))
            })
            .collect(),
        ProviderKind::Newsdata | ProviderKind::Gnews => {
            let terms = catalogue.terms_by_priority(language);
            query_string::pack_or_clause(&terms, &region.display_name, profile.max_query_len)
                .into_iter()
                .map(|query_string| {
                    Query::new(
                        query_string,
                        language,
                        region.slug.clone(),
                        region.display_name.clone(),
                        Level::State,
                        None,
                        Vec::new(),
                        profile.kind,
                    )
                })
                .collect()
        }
    }
}

/// Generate Phase 2 (district drill-down) queries for the given active
/// regions only. Batches each region's districts by the provider's
/// approximate batch size and pairs each batch with a short curated
/// heatwave-category phrase rather than the full category expansion.
#[must_use]
pub fn district_level(
    active_regions: &[&Region],
    catalogue: &TermCatalogue,
    config: &RunConfig,
) -> HashMap<ProviderKind, Vec<Query>> {
    let mut out: HashMap<ProviderKind, Vec<Query>> =
        ProviderKind::ALL.into_iter().map(|p| (p, Vec::new())).collect();

    let mut regions: Vec<&&Region> = active_regions.iter().collect();
    regions.sort_by(|a, b| a.slug.cmp(&b.slug));

    for region in regions {
        if !config.region_in_scope(&region.slug) {
            continue;
        }
        let districts = region.districts_sorted();
        if districts.is_empty() {
            continue;
        }
        for language in sorted_languages(region) {
            if !config.language_in_scope(language) {
                continue;
            }
            let curated: Vec<_> = {
                let mut terms: Vec<_> =
                    catalogue.terms(language, TermCategory::Heatwave).iter().collect();
                terms.sort_by(|a, b| b.register.cmp(&a.register));
                terms
            };
            if curated.is_empty() {
                continue;
            }
            for provider in ProviderKind::ALL {
                if !config.provider_in_scope(provider) || !profile_supports(provider, language) {
                    continue;
                }
                let profile = ProviderProfile::default_for(provider);
                let batches: Vec<Vec<&DistrictName>> = districts
                    .chunks(profile.district_batch_size)
                    .map(<[&DistrictName]>::to_vec)
                    .collect();
                for batch in batches {
                    let Some(query_string) = query_string::district_query_string(
                        &curated,
                        &batch,
                        &region.display_name,
                        DISTRICT_CURATED_TERM_COUNT,
                        profile.max_query_len,
                    ) else {
                        continue;
                    };
                    let query = Query::new(
                        query_string,
                        language,
                        region.slug.clone(),
                        region.display_name.clone(),
                        Level::District,
                        None,
                        batch.into_iter().cloned().collect(),
                        profile.kind,
                    );
                    out.get_mut(&provider)
                        .expect("ProviderKind::ALL seeds every key")
                        .push(query);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatwave_types::{HeatTerm, Register, RegionKind};

    fn sample_catalogue() -> TermCatalogue {
        let mut cat = TermCatalogue::new();
        cat.insert(
            LanguageCode::Hi,
            TermCategory::Heatwave,
            vec![
                HeatTerm { text: "loo".into(), register: Register::Formal },
                HeatTerm { text: "garmi".into(), register: Register::Colloquial },
            ],
        );
        cat.insert(
            LanguageCode::Hi,
            TermCategory::DeathOrStroke,
            vec![HeatTerm { text: "heatstroke".into(), register: Register::Formal }],
        );
        cat
    }

    fn rajasthan() -> Region {
        Region::new(
            "rajasthan",
            "Rajasthan",
            RegionKind::State,
            vec![LanguageCode::Hi],
            vec![DistrictName("Jaipur".into()), DistrictName("Alwar".into())],
        )
        .unwrap()
    }

    #[test]
    fn google_emits_one_query_per_category_with_terms() {
        let regions = vec![rajasthan()];
        let catalogue = sample_catalogue();
        let config = RunConfig::new();
        let plan = state_level(&regions, &catalogue, &config);
        let google = &plan[&ProviderKind::Google];
        // Only Heatwave and DeathOrStroke have terms in the sample catalogue.
        assert_eq!(google.len(), 2);
        assert!(google.iter().all(|q| q.level == Level::State));
        assert!(google.iter().any(|q| q.category == Some(TermCategory::Heatwave)));
    }

    #[test]
    fn newsdata_emits_one_broad_query_per_region_language() {
        let regions = vec![rajasthan()];
        let catalogue = sample_catalogue();
        let config = RunConfig::new();
        let plan = state_level(&regions, &catalogue, &config);
        let newsdata = &plan[&ProviderKind::Newsdata];
        assert_eq!(newsdata.len(), 1);
        assert_eq!(newsdata[0].category, None);
    }

    #[test]
    fn gnews_skips_unsupported_language() {
        let region = Region::new(
            "mizoram",
            "Mizoram",
            RegionKind::State,
            vec![LanguageCode::Ne],
            vec![],
        )
        .unwrap();
        let mut catalogue = TermCatalogue::new();
        catalogue.insert(
            LanguageCode::Ne,
            TermCategory::Heatwave,
            vec![HeatTerm { text: "garmi".into(), register: Register::Formal }],
        );
        let config = RunConfig::new();
        let plan = state_level(&[region], &catalogue, &config);
        assert!(plan[&ProviderKind::Gnews].is_empty());
    }

    #[test]
    fn fingerprints_are_stable_across_two_identical_generations() {
        let regions = vec![rajasthan()];
        let catalogue = sample_catalogue();
        let config = RunConfig::new();
        let a = state_level(&regions, &catalogue, &config);
        let b = state_level(&regions, &catalogue, &config);
        let fa: Vec<_> = a[&ProviderKind::Google].iter().map(|q| q.fingerprint.clone()).collect();
        let fb: Vec<_> = b[&ProviderKind::Google].iter().map(|q| q.fingerprint.clone()).collect();
        assert_eq!(fa, fb);
    }

    #[test]
    fn district_level_batches_and_uses_curated_phrase() {
        let region = rajasthan();
        let active = vec![&region];
        let catalogue = sample_catalogue();
        let config = RunConfig::new();
        let plan = district_level(&active, &catalogue, &config);
        let google = &plan[&ProviderKind::Google];
        assert_eq!(google.len(), 1); // 2 districts fit in one batch of 30
        assert_eq!(google[0].level, Level::District);
        assert_eq!(google[0].district_batch.len(), 2);
        assert!(google[0].query_string.contains("Jaipur"));
    }

    #[test]
    fn region_selection_filters_state_level_output() {
        let regions = vec![rajasthan()];
        let catalogue = sample_catalogue();
        let config = RunConfig::new().with_regions(vec!["mizoram".into()]);
        let plan = state_level(&regions, &catalogue, &config);
        assert!(plan[&ProviderKind::Google].is_empty());
    }
}
