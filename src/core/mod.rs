//! Core components of the `quote-returns` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`QuoteClient`] and its builder.
//! - The primary [`QrError`] type and its validation/credential companions.
//! - Shared data models like [`Symbol`], [`Quote`] and [`ReturnResult`].
//! - Internal networking and credential logic.

/// The main client (`QuoteClient`), builder, credential cache and retry configuration.
pub mod client;
/// The primary error type (`QrError`) for the crate.
pub mod error;
/// Shared data models used across the pipeline stages.
pub mod models;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::QuoteClient`
pub use client::{QuoteClient, QuoteClientBuilder};
pub use error::{CredentialError, QrError, ValidationError};
pub use models::{Quote, ReferencePrice, ReturnResult, Symbol};
