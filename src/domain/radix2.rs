use p3_field::{Field, TwoAdicField, par_scale_slice_in_place};
use serde::{Deserialize, Serialize};

use crate::utils::{
    distribute_powers, distribute_powers_and_mul_by_const, radix2_merge_passes,
    strip_high_degree_zeros, swap_bit_reversed_elements,
};

/// Defines a domain over which finite field (I)FFTs can be performed. Works
/// only for fields that have a large multiplicative subgroup of size that is
/// a power-of-2.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Radix2EvaluationDomain<F> {
    /// The size of the domain.
    pub size: u64,
    /// `log_2(self.size)`.
    pub log_size_of_group: u32,
    /// Size of the domain as a field element.
    pub size_as_field_element: F,
    /// Inverse of the size in the field.
    pub size_inv: F,
    /// A generator of the subgroup.
    pub group_gen: F,
    /// Inverse of the generator of the subgroup.
    pub group_gen_inv: F,
    /// Offset that specifies the coset.
    pub offset: F,
    /// Inverse of the offset that specifies the coset.
    pub offset_inv: F,
    /// Constant coefficient for the vanishing polynomial.
    /// Equals `self.offset^self.size`.
    pub offset_pow_size: F,
}

impl<F: Field + TwoAdicField> Radix2EvaluationDomain<F> {
    #[must_use]
    pub fn new(num_coeffs: usize) -> Option<Self> {
        let size = num_coeffs.next_power_of_two() as u64;
        let log_size_of_group = size.trailing_zeros();

        if log_size_of_group > F::TWO_ADICITY as u32 {
            return None;
        }

        // Compute the generator for the multiplicative subgroup.
        // It should be the 2^(log_size_of_group) root of unity.
        let group_gen = F::two_adic_generator(log_size_of_group as usize);

        // Check that it is indeed the 2^(log_size_of_group) root of unity.
        debug_assert_eq!(group_gen.exp_u64(size), F::ONE);
        let size_as_field_element = F::from_u64(size);
        let size_inv = size_as_field_element.inverse();

        Some(Self {
            size,
            log_size_of_group,
            size_as_field_element,
            size_inv,
            group_gen,
            group_gen_inv: group_gen.inverse(),
            offset: F::ONE,
            offset_inv: F::ONE,
            offset_pow_size: F::ONE,
        })
    }

    /// The same subgroup shifted by `offset`, or `None` when the offset is
    /// not invertible.
    #[must_use]
    pub fn get_coset(&self, offset: F) -> Option<Self> {
        let offset_inv = offset.try_inverse()?;
        Some(Self {
            offset,
            offset_inv,
            offset_pow_size: offset.exp_u64(self.size),
            ..*self
        })
    }

    /// Evaluates the polynomial with coefficients `coeffs` at every domain
    /// point, in place.
    ///
    /// `coeffs` is zero-padded to the domain size; afterwards index `i`
    /// holds the evaluation at `offset * group_gen^i`.
    pub fn fft_in_place(&self, coeffs: &mut Vec<F>) {
        if !self.offset.is_one() {
            distribute_powers(coeffs, self.offset);
        }
        assert!(
            coeffs.len() <= self.size(),
            "buffer longer than the domain"
        );
        coeffs.resize(self.size(), F::ZERO);
        swap_bit_reversed_elements(coeffs, self.log_size_of_group);
        radix2_merge_passes(coeffs, self.group_gen, self.log_size_of_group, 1);
    }

    /// Interpolates the evaluations in `evals` back to coefficients, in
    /// place, stripping trailing zero coefficients.
    pub fn ifft_in_place(&self, evals: &mut Vec<F>) {
        assert!(evals.len() <= self.size(), "buffer longer than the domain");
        evals.resize(self.size(), F::ZERO);
        swap_bit_reversed_elements(evals, self.log_size_of_group);
        radix2_merge_passes(evals, self.group_gen_inv, self.log_size_of_group, 1);
        if self.offset.is_one() {
            par_scale_slice_in_place(evals, self.size_inv);
        } else {
            distribute_powers_and_mul_by_const(evals, self.offset_inv, self.size_inv);
        }
        strip_high_degree_zeros(evals);
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

    /// Returns the `i`-th element of the domain.
    #[must_use]
    pub fn element(&self, i: usize) -> F {
        let mut result = self.group_gen.exp_u64(i as u64);
        if !self.offset.is_one() {
            result *= self.offset;
        }
        result
    }

    #[inline]
    pub const fn size(&self) -> usize {
        self.size as usize
    }

    #[inline]
    pub const fn group_gen(&self) -> F {
        self.group_gen
    }

    #[inline]
    pub const fn group_gen_inv(&self) -> F {
        self.group_gen_inv
    }

    #[inline]
    pub const fn log_size_of_group(&self) -> u32 {
        self.log_size_of_group
    }

    #[inline]
    pub const fn size_inv(&self) -> F {
        self.size_inv
    }

    #[inline]
    pub const fn coset_offset(&self) -> F {
        self.offset
    }

    #[inline]
    pub const fn coset_offset_inv(&self) -> F {
        self.offset_inv
    }

    #[inline]
    pub const fn coset_offset_pow_size(&self) -> F {
        self.offset_pow_size
    }
}
