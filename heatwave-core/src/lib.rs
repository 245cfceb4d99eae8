//! heatwave-core
//!
//! The provider adapter contract and a convenience re-export of
//! `heatwave-types`, so downstream crates can depend on `heatwave-core`
//! alone for everyday use.

mod provider;

pub use provider::NewsProvider;

pub use heatwave_types::{
    ArticleRef, BreakerState, CheckpointRecord, DistrictName, Fingerprint, HeatTerm,
    HeatwaveError, LanguageCode, Level, Outcome, ProviderKind, ProviderProfile, Query,
    QueryResult, Region, RegionContext, RegionKind, Register, RunConfig, TermCatalogue,
    TermCategory,
};
