//! Mixed-radix evaluation domains for finite-field FFTs.
//!
//! A classic radix-2 FFT needs the field's multiplicative group to contain a
//! power-of-two subgroup at least as large as the polynomial being
//! transformed. Some otherwise FFT-friendly fields run out of two-adicity
//! early; when the field also defines a small subgroup of size `q^a` for a
//! small prime `q`, the two subgroups combine into a domain of size
//! `2^j * q^i`, and the Cooley-Tukey butterfly network generalizes to this
//! mixed radix.
//!
//! The crate provides:
//! - [`SmallSubgroupConfig`]: the per-field subgroup description, injected at
//!   domain construction time,
//! - [`MixedRadixEvaluationDomain`]: the mixed-radix domain with in-place
//!   forward and inverse transforms,
//! - [`Radix2EvaluationDomain`] and [`GeneralEvaluationDomain`]: the pure
//!   power-of-two domain and the enum that falls back from it to mixed radix.

pub mod config;
pub mod domain;
pub mod errors;
pub mod utils;

pub use config::{Factorization, SmallSubgroupConfig, adicity_of};
pub use domain::{
    general::GeneralEvaluationDomain, mixed_radix::MixedRadixEvaluationDomain,
    radix2::Radix2EvaluationDomain,
};
pub use errors::DomainError;
