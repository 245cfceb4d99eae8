//! heatwave-providers
//!
//! Thin `reqwest`-based adapters implementing
//! [`heatwave_core::NewsProvider`] for the three news providers this
//! pipeline queries. Each adapter owns only HTTP, auth, and minimal
//! single-page response parsing; everything else (pacing, breakers,
//! retries, the never-raise contract) lives one layer up in
//! `heatwave-scheduler`. These adapters are downstream-facing detail, not
//! load-bearing for the core's tested invariants — the core is proven
//! against any conforming adapter via `heatwave-mock`.

mod gnews;
mod google;
mod http;
mod newsdata;

pub use gnews::GnewsProvider;
pub use google::GoogleProvider;
pub use newsdata::NewsdataProvider;
