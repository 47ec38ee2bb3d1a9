//! Evaluation domains over multiplicative subgroups of a finite field.
//!
//! [`radix2::Radix2EvaluationDomain`] covers the usual power-of-two case;
//! [`mixed_radix::MixedRadixEvaluationDomain`] combines the power-of-two
//! subgroup with a small subgroup of prime-power order when the field's
//! two-adicity alone is too small. [`general::GeneralEvaluationDomain`]
//! picks between the two.

pub mod general;
pub mod mixed_radix;
pub mod radix2;
