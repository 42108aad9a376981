//! # dt-core
//!
//! Core types and error definitions for diettrack.
//!
//! This crate provides the building blocks shared by the other crates in the
//! workspace: the error hierarchy with its `ensure!` / `fail!` macros, and a
//! few numeric type aliases.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used for every measured quantity.
pub type Real = f64;

/// An energy amount in kilocalories.
pub type Kcal = Real;

/// A percentage in [0, 100].
pub type Percent = Real;

/// Probability in [0, 1] (p-values, significance levels).
pub type Probability = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
