//! # Data Retrieval Module
//!
//! This module provides a centralized location for generic data retrieval
//! clients and utilities, primarily focused on HTTP-based interactions.
//!
//! ## Purpose:
//! The goal of the `retrieve` module is to offer a consistent and robust way
//! to fetch data from external services, encapsulating common concerns such
//! as HTTP request building, error handling, and retry mechanisms. This
//! keeps networking plumbing out of the cache and query logic.
//!
//! ## Contained Modules:
//!
//! - **`http_client`**: A generic HTTP `ApiClient` built on `reqwest` and
//!   `reqwest-middleware`, featuring automatic retries with exponential
//!   backoff. It is the foundation for the specific API clients.
//! - **`airtable`**: The Airtable implementation of `CopySource`, fetching
//!   every record of a table with offset pagination.

/// Generic HTTP API client with retry middleware for resilient network requests.
pub mod http_client;

/// Airtable-backed implementation of the `CopySource` trait.
pub mod airtable;

pub use airtable::AirtableSource;
pub use http_client::{ApiClient, ApiResponse};
