use p3_field::{Field, PrimeField64, TwoAdicField};

use super::{mixed_radix::MixedRadixEvaluationDomain, radix2::Radix2EvaluationDomain};
use crate::{config::SmallSubgroupConfig, errors::DomainError};

/// Defines a domain over which finite field (I)FFTs can be performed.
///
/// Generally tries to build a radix-2 domain and falls back to a mixed-radix
/// domain if the radix-2 multiplicative subgroup is too small.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug)]
pub enum GeneralEvaluationDomain<F> {
    /// Radix-2 domain
    Radix2(Radix2EvaluationDomain<F>),
    /// Mixed-radix domain
    MixedRadix(MixedRadixEvaluationDomain<F>),
}

impl<F: Field + TwoAdicField + PrimeField64> GeneralEvaluationDomain<F> {
    /// Construct a domain that is large enough for evaluations of a polynomial
    /// having `num_coeffs` coefficients.
    ///
    /// The radix-2 domain is preferred when the power-of-two subgroup allowed
    /// by `config` can cover `num_coeffs`; otherwise this falls back to a
    /// mixed-radix domain over the field's small subgroup.
    pub fn new(num_coeffs: usize, config: &SmallSubgroupConfig<F>) -> Result<Self, DomainError> {
        let log_size = num_coeffs.next_power_of_two().trailing_zeros();
        if log_size <= config.two_adicity.min(F::TWO_ADICITY as u32)
            && (1u64 << log_size) <= config.max_degree.saturating_add(1)
        {
            if let Some(domain) = Radix2EvaluationDomain::new(num_coeffs) {
                return Ok(Self::Radix2(domain));
            }
        }
        MixedRadixEvaluationDomain::new(num_coeffs, config).map(Self::MixedRadix)
    }

    /// The same subgroup shifted by `offset`, or `None` when the offset is
    /// not invertible.
    #[must_use]
    pub fn get_coset(&self, offset: F) -> Option<Self> {
        match self {
            Self::Radix2(domain) => domain.get_coset(offset).map(Self::Radix2),
            Self::MixedRadix(domain) => domain.get_coset(offset).map(Self::MixedRadix),
        }
    }

    /// Evaluates the polynomial with coefficients `coeffs` over the domain,
    /// in place.
    pub fn fft_in_place(&self, coeffs: &mut Vec<F>) {
        match self {
            Self::Radix2(domain) => domain.fft_in_place(coeffs),
            Self::MixedRadix(domain) => domain.fft_in_place(coeffs),
        }
    }

    /// Interpolates the evaluations in `evals` back to coefficients, in
    /// place.
    pub fn ifft_in_place(&self, evals: &mut Vec<F>) {
        match self {
            Self::Radix2(domain) => domain.ifft_in_place(evals),
            Self::MixedRadix(domain) => domain.ifft_in_place(evals),
        }
    }

    /// By-value variant of [`Self::fft_in_place`].
    #[must_use]
    pub fn fft(&self, coeffs: &[F]) -> Vec<F> {
        let mut coeffs = coeffs.to_vec();
        self.fft_in_place(&mut coeffs);
        coeffs
    }

    /// By-value variant of [`Self::ifft_in_place`].
    #[must_use]
    pub fn ifft(&self, evals: &[F]) -> Vec<F> {
        let mut evals = evals.to_vec();
        self.ifft_in_place(&mut evals);
        evals
    }

    #[inline]
    pub const fn size(&self) -> usize {
        match self {
            Self::Radix2(domain) => domain.size(),
            Self::MixedRadix(domain) => domain.size(),
        }
    }

    #[inline]
    pub const fn group_gen(&self) -> F {
        match self {
            Self::Radix2(domain) => domain.group_gen(),
            Self::MixedRadix(domain) => domain.group_gen(),
        }
    }

    #[inline]
    pub const fn group_gen_inv(&self) -> F {
        match self {
            Self::Radix2(domain) => domain.group_gen_inv(),
            Self::MixedRadix(domain) => domain.group_gen_inv(),
        }
    }

    #[inline]
    pub fn size_as_field_element(&self) -> F {
        F::from_u64(self.size() as u64)
    }

    #[inline]
    pub const fn size_inv(&self) -> F {
        match self {
            Self::Radix2(domain) => domain.size_inv(),
            Self::MixedRadix(domain) => domain.size_inv(),
        }
    }

    #[inline]
    pub const fn coset_offset(&self) -> F {
        match self {
            Self::Radix2(domain) => domain.coset_offset(),
            Self::MixedRadix(domain) => domain.coset_offset(),
        }
    }

    #[inline]
    pub const fn coset_offset_inv(&self) -> F {
        match self {
            Self::Radix2(domain) => domain.coset_offset_inv(),
            Self::MixedRadix(domain) => domain.coset_offset_inv(),
        }
    }

    #[inline]
    pub const fn coset_offset_pow_size(&self) -> F {
        match self {
            Self::Radix2(domain) => domain.coset_offset_pow_size(),
            Self::MixedRadix(domain) => domain.coset_offset_pow_size(),
        }
    }

    #[inline]
    /// Returns the `i`-th element of the domain.
    pub fn element(&self, i: usize) -> F {
        let mut result = self.group_gen().exp_u64(i as u64);
        if !self.coset_offset().is_one() {
            result *= self.coset_offset();
        }
        result
    }
}
