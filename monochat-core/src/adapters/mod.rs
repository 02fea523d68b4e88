//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - DuckDB for the KeyValueStore and MappingRepository ports
//! - Monobank HTTP client for BankApi
//! - In-memory store for tests and throwaway runs

pub mod duckdb;
pub mod memory;
pub mod monobank;

#[cfg(test)]
pub mod monobank_mock;
