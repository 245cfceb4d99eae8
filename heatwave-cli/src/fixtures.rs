//! A small embedded geography and term catalogue, purely so this binary is
//! runnable end-to-end in this repository. A production deployment would
//! load both from an external catalogue service or data file; this is a
//! stand-in, not a deliverable of the query-orchestration engine itself.

use heatwave_types::{
    DistrictName, HeatTerm, LanguageCode, Region, RegionKind, Register, TermCatalogue, TermCategory,
};

/// Four states/UTs with a handful of districts each, enough to exercise
/// both Phase 1 and Phase 2 without a real geography service.
#[must_use]
pub fn demo_regions() -> Vec<Region> {
    vec![
        Region::new(
            "rajasthan",
            "Rajasthan",
            RegionKind::State,
            vec![LanguageCode::Hi, LanguageCode::En],
            vec![
                DistrictName("Jaipur".into()),
                DistrictName("Jodhpur".into()),
                DistrictName("Bikaner".into()),
                DistrictName("Barmer".into()),
            ],
        )
        .expect("demo region invariants hold"),
        Region::new(
            "gujarat",
            "Gujarat",
            RegionKind::State,
            vec![LanguageCode::Gu, LanguageCode::En],
            vec![
                DistrictName("Ahmedabad".into()),
                DistrictName("Surat".into()),
                DistrictName("Vadodara".into()),
            ],
        )
        .expect("demo region invariants hold"),
        Region::new(
            "delhi",
            "Delhi",
            RegionKind::Ut,
            vec![LanguageCode::Hi, LanguageCode::En],
            vec![DistrictName("New Delhi".into()), DistrictName("North Delhi".into())],
        )
        .expect("demo region invariants hold"),
        Region::new(
            "mizoram",
            "Mizoram",
            RegionKind::State,
            vec![LanguageCode::En],
            vec![DistrictName("Aizawl".into())],
        )
        .expect("demo region invariants hold"),
    ]
}

/// A handful of curated heat terms across 2 of the 8 categories, in Hindi,
/// Gujarati, and English. Every other `(language, category)` pair simply
/// contributes nothing to a generated query, which the Query Generator
/// already treats as a normal case rather than an error.
#[must_use]
pub fn demo_catalogue() -> TermCatalogue {
    let mut catalogue = TermCatalogue::new();

    catalogue.insert(
        LanguageCode::Hi,
        TermCategory::Heatwave,
        vec![
            HeatTerm { text: "loo".into(), register: Register::Borrowed },
            HeatTerm { text: "garmi".into(), register: Register::Colloquial },
            HeatTerm { text: "lu chalna".into(), register: Register::Journalistic },
            HeatTerm { text: "heatwave".into(), register: Register::Formal },
        ],
    );
    catalogue.insert(
        LanguageCode::Hi,
        TermCategory::DeathOrStroke,
        vec![HeatTerm { text: "loo se maut".into(), register: Register::Journalistic }],
    );

    catalogue.insert(
        LanguageCode::Gu,
        TermCategory::Heatwave,
        vec![
            HeatTerm { text: "garmi nu mojun".into(), register: Register::Colloquial },
            HeatTerm { text: "heatwave".into(), register: Register::Formal },
        ],
    );

    catalogue.insert(
        LanguageCode::En,
        TermCategory::Heatwave,
        vec![
            HeatTerm { text: "heatwave".into(), register: Register::Formal },
            HeatTerm { text: "scorching heat".into(), register: Register::Journalistic },
        ],
    );
    catalogue.insert(
        LanguageCode::En,
        TermCategory::DeathOrStroke,
        vec![HeatTerm { text: "heatstroke death".into(), register: Register::Formal }],
    );
    catalogue.insert(
        LanguageCode::En,
        TermCategory::GovernmentResponse,
        vec![HeatTerm { text: "heat advisory".into(), register: Register::Formal }],
    );

    catalogue
}
