//! duster - quarantine stale files into dated boxes and expire them on
//! schedule
//!
//! The library holds the retention engine: policy parsing and storage, the
//! ignore predicate, the bottom-up dust classifier, the warehouse
//! (quarantine boxes and their expiry), the crontab registrar, and the
//! confirmation gate. The binary in `src/main.rs` is a thin clap layer over
//! these modules.

#![deny(
    clippy::all,
    missing_docs,
    missing_debug_implementations,
    unsafe_code,
    unused_qualifications
)]
#![allow(clippy::module_name_repetitions)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod classify;
pub mod config;
pub mod confirm;
pub mod error;
pub mod ignore;
pub mod paths;
pub mod policy;
pub mod schedule;
pub mod warehouse;
