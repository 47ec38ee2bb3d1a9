//! Per-field description of the subgroups a mixed-radix domain is built from.
//!
//! A field supports mixed-radix FFTs when its multiplicative group contains
//! both a power-of-two subgroup of size `2^two_adicity` and a small subgroup
//! of size `base^adicity` for a small prime `base`. The combined subgroup of
//! size `2^two_adicity * base^adicity` is generated by the large-subgroup
//! root of unity. [`SmallSubgroupConfig`] carries these constants as a plain
//! value so that tests can work with restricted synthetic configurations
//! instead of a single set of per-field compile-time constants.

use p3_field::{Field, PrimeField64, TwoAdicField};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// The exact exponent of `q` dividing `n` (the `q`-adic valuation of `n`).
///
/// `q` must be at least 2 and `n` must be positive.
pub const fn adicity_of(q: u64, mut n: u64) -> u32 {
    assert!(q >= 2);
    assert!(n > 0);
    let mut adicity = 0;
    while n % q == 0 {
        n /= q;
        adicity += 1;
    }
    adicity
}

/// The factorization `size == 2^two_adicity * base^q_adicity` of a domain
/// size, as returned by [`SmallSubgroupConfig::decompose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Factorization {
    /// Exponent of the power-of-two component.
    pub two_adicity: u32,
    /// Exponent of the small-subgroup component.
    pub q_adicity: u32,
}

/// Subgroup constants of a field that supports mixed-radix FFTs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmallSubgroupConfig<F> {
    /// Largest power-of-two exponent usable for domains under this config.
    pub two_adicity: u32,
    /// The small prime `q` of the secondary subgroup.
    pub small_subgroup_base: u64,
    /// Largest exponent of `q` the field's multiplicative group supports.
    pub small_subgroup_adicity: u32,
    /// Primitive root of unity of order
    /// `2^two_adicity * small_subgroup_base^small_subgroup_adicity`, or
    /// `None` when the field has no subgroup of that order. Without it no
    /// mixed-radix domain can be constructed.
    pub large_subgroup_root_of_unity: Option<F>,
    /// Largest polynomial degree representable: domains are capped at
    /// `max_degree + 1` elements.
    pub max_degree: u64,
}

impl<F: TwoAdicField + PrimeField64> SmallSubgroupConfig<F> {
    /// Builds the configuration for `F` using its full two-adicity.
    #[must_use]
    pub fn new(base: u64, adicity: u32) -> Self {
        Self::with_two_adicity(F::TWO_ADICITY as u32, base, adicity)
    }

    /// Builds a configuration restricted to `two_adicity <= F::TWO_ADICITY`.
    ///
    /// The large-subgroup root of unity is derived as
    /// `g^((p-1) / (2^two_adicity * base^adicity))` from the field's
    /// multiplicative generator, and is absent when the subgroup order does
    /// not divide `p - 1`.
    #[must_use]
    pub fn with_two_adicity(two_adicity: u32, base: u64, adicity: u32) -> Self {
        assert!(base >= 2, "small subgroup base must be at least 2");
        assert!(
            two_adicity as usize <= F::TWO_ADICITY,
            "two-adicity exceeds the field's"
        );

        let order = (1u128 << two_adicity) * (base as u128).pow(adicity);
        assert!(order <= u64::MAX as u128, "subgroup order overflows u64");

        let p_minus_one = (F::ORDER_U64 - 1) as u128;
        let large_subgroup_root_of_unity = (p_minus_one % order == 0)
            .then(|| F::GENERATOR.exp_u64((p_minus_one / order) as u64));

        Self {
            two_adicity,
            small_subgroup_base: base,
            small_subgroup_adicity: adicity,
            large_subgroup_root_of_unity,
            max_degree: order as u64 - 1,
        }
    }
}

impl<F: Field> SmallSubgroupConfig<F> {
    /// Order of the combined large subgroup,
    /// `2^two_adicity * base^small_subgroup_adicity`.
    #[must_use]
    pub fn large_subgroup_order(&self) -> u64 {
        (1u64 << self.two_adicity) * self.small_subgroup_base.pow(self.small_subgroup_adicity)
    }

    /// The smallest admissible domain size `>= min_size`.
    ///
    /// Minimizes `q^i * 2^j` over `i <= small_subgroup_adicity`, taking for
    /// each `i` the smallest `j` that reaches `min_size` and rejecting
    /// candidates with `j > two_adicity`.
    pub fn best_composite_size(&self, min_size: u64) -> Result<u64, DomainError> {
        if self.large_subgroup_root_of_unity.is_none() {
            return Err(DomainError::UnsupportedField);
        }

        let mut best: Option<u64> = None;
        'candidates: for i in 0..=self.small_subgroup_adicity {
            let Some(mut r) = self.small_subgroup_base.checked_pow(i) else {
                continue;
            };
            let mut two_adicity = 0;
            while r < min_size {
                let Some(doubled) = r.checked_mul(2) else {
                    continue 'candidates;
                };
                r = doubled;
                two_adicity += 1;
            }
            if two_adicity <= self.two_adicity {
                best = Some(best.map_or(r, |b| b.min(r)));
            }
        }
        best.ok_or(DomainError::SizeInfeasible { min_size })
    }

    /// Factors `size` as `2^j * base^i` within the configured adicities.
    pub fn decompose(&self, size: u64) -> Result<Factorization, DomainError> {
        let mismatch = DomainError::DecompositionMismatch {
            size,
            base: self.small_subgroup_base,
        };
        if size == 0 {
            return Err(mismatch);
        }

        let two_adicity = adicity_of(2, size);
        let q_adicity = adicity_of(self.small_subgroup_base, size);
        let two_part = 1u64 << two_adicity;
        let q_part = self.small_subgroup_base.pow(q_adicity);

        if two_part * q_part != size
            || two_adicity > self.two_adicity
            || q_adicity > self.small_subgroup_adicity
        {
            return Err(mismatch);
        }
        Ok(Factorization {
            two_adicity,
            q_adicity,
        })
    }
}

#[cfg(test)]
mod tests {
    use p3_baby_bear::BabyBear;
    use p3_field::PrimeCharacteristicRing;
    use p3_goldilocks::Goldilocks;
    use p3_koala_bear::KoalaBear;

    use super::*;

    type F = BabyBear;

    #[test]
    fn test_adicity_of() {
        assert_eq!(adicity_of(2, 1), 0);
        assert_eq!(adicity_of(2, 96), 5);
        assert_eq!(adicity_of(3, 96), 1);
        assert_eq!(adicity_of(3, 81), 4);
        assert_eq!(adicity_of(5, 7), 0);
    }

    #[test]
    fn test_large_subgroup_root_baby_bear() {
        // BabyBear: p - 1 = 2^27 * 3 * 5, so a subgroup of order 2^27 * 3
        // exists and its generator has exactly that order.
        let config = SmallSubgroupConfig::<F>::new(3, 1);
        let root = config.large_subgroup_root_of_unity.unwrap();
        let order = config.large_subgroup_order();
        assert_eq!(root.exp_u64(order), F::ONE);
        assert_ne!(root.exp_u64(order / 2), F::ONE);
        assert_ne!(root.exp_u64(order / 3), F::ONE);
    }

    #[test]
    fn test_large_subgroup_root_other_fields() {
        // KoalaBear: p - 1 = 2^24 * 127.
        let config = SmallSubgroupConfig::<KoalaBear>::new(127, 1);
        let root = config.large_subgroup_root_of_unity.unwrap();
        assert_eq!(root.exp_u64(config.large_subgroup_order()), KoalaBear::ONE);

        // Goldilocks: p - 1 = 2^32 * 3 * 5 * 17 * 257 * 65537.
        let config = SmallSubgroupConfig::<Goldilocks>::new(5, 1);
        let root = config.large_subgroup_root_of_unity.unwrap();
        assert_eq!(root.exp_u64(config.large_subgroup_order()), Goldilocks::ONE);
    }

    #[test]
    fn test_missing_large_subgroup_root() {
        // 7 does not divide p - 1 for BabyBear.
        let config = SmallSubgroupConfig::<F>::new(7, 1);
        assert!(config.large_subgroup_root_of_unity.is_none());
        assert_eq!(
            config.best_composite_size(4),
            Err(DomainError::UnsupportedField)
        );
    }

    #[test]
    fn test_best_composite_size_prefers_mixed() {
        let config = SmallSubgroupConfig::<F>::new(3, 1);
        // 6 = 2 * 3 beats the pure power of two 8.
        assert_eq!(config.best_composite_size(5), Ok(6));
        // 8 beats 12 = 4 * 3.
        assert_eq!(config.best_composite_size(7), Ok(8));
        assert_eq!(config.best_composite_size(97), Ok(128));
        assert_eq!(config.best_composite_size(1), Ok(1));
        assert_eq!(config.best_composite_size(3), Ok(3));
    }

    #[test]
    fn test_best_composite_size_monotone() {
        let config = SmallSubgroupConfig::<F>::new(3, 1);
        let mut previous = 0;
        for m in 1..=512 {
            let size = config.best_composite_size(m).unwrap();
            assert!(size >= m);
            assert!(size >= previous);
            previous = size;
        }
    }

    #[test]
    fn test_best_composite_size_infeasible() {
        let config = SmallSubgroupConfig::<F>::with_two_adicity(2, 3, 1);
        // Largest admissible size is 3 * 2^2 = 12.
        assert_eq!(config.best_composite_size(12), Ok(12));
        assert_eq!(
            config.best_composite_size(13),
            Err(DomainError::SizeInfeasible { min_size: 13 })
        );
    }

    #[test]
    fn test_max_degree() {
        let config = SmallSubgroupConfig::<F>::with_two_adicity(4, 3, 1);
        assert_eq!(config.max_degree, 3 * 16 - 1);
        let config = SmallSubgroupConfig::<F>::new(3, 1);
        assert_eq!(config.max_degree, 3 * (1 << 27) - 1);
    }

    #[test]
    fn test_decompose() {
        let config = SmallSubgroupConfig::<F>::new(3, 1);
        assert_eq!(
            config.decompose(6),
            Ok(Factorization {
                two_adicity: 1,
                q_adicity: 1,
            })
        );
        assert_eq!(
            config.decompose(32),
            Ok(Factorization {
                two_adicity: 5,
                q_adicity: 0,
            })
        );
        assert_eq!(
            config.decompose(3),
            Ok(Factorization {
                two_adicity: 0,
                q_adicity: 1,
            })
        );
    }

    #[test]
    fn test_decompose_mismatch() {
        let config = SmallSubgroupConfig::<F>::new(3, 1);
        // 40 = 2^3 * 5 has a factor foreign to {2, 3}.
        assert!(config.decompose(40).is_err());
        // 36 = 2^2 * 3^2 exceeds the configured 3-adicity of 1.
        assert!(config.decompose(36).is_err());
        assert!(config.decompose(0).is_err());

        let restricted = SmallSubgroupConfig::<F>::with_two_adicity(2, 3, 1);
        assert!(restricted.decompose(24).is_err());
    }
}
