//! # In-Memory Repositories
//!
//! Thread-safe in-memory implementations of the rate repositories, used by
//! tests and by local runs without a database.

pub mod rate_repository;

pub use rate_repository::{
    InMemoryCourierRateRepository, InMemoryDealerRateRepository, InMemoryRateRepository,
    InMemoryRegionRateRepository, StoredRate,
};
