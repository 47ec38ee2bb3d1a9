//! Mixed-radix evaluation domain.
//!
//! For fields that are FFT-friendly but whose power-of-two subgroup is too
//! small, the domain combines that subgroup with the field's small subgroup
//! of size `q^a`, giving domain sizes of the form `2^j * q^i`. The forward
//! and inverse transforms generalize the radix-2 Cooley-Tukey FFT: a
//! digit-reversal permutation (no longer an involution for `q > 2`),
//! `q_adicity` radix-`q` merge passes, then the usual radix-2 passes.

use p3_field::{Field, PrimeField64, TwoAdicField, par_scale_slice_in_place};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    config::{SmallSubgroupConfig, adicity_of},
    errors::DomainError,
    utils::{
        distribute_powers, distribute_powers_and_mul_by_const, radix2_merge_passes,
        strip_high_degree_zeros, swap_bit_reversed_elements,
    },
};

/// Defines a domain of size `2^j * q^i` over which finite field (I)FFTs can
/// be performed, where `q` is the small-subgroup base of the field.
///
/// Immutable once constructed; a domain may be shared across concurrent
/// transforms as long as each transform owns its buffer.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct MixedRadixEvaluationDomain<F> {
    /// The size of the domain.
    pub size: u64,
    /// Exponent of the power-of-two component of `size`. The `q`-adicity is
    /// re-derived from `size` when needed.
    pub two_adicity: u32,
    /// The small-subgroup base `q` of the configuration the domain was
    /// built from.
    pub small_subgroup_base: u64,
    /// Size of the domain as a field element.
    pub size_as_field_element: F,
    /// Inverse of the size in the field.
    pub size_inv: F,
    /// A generator of the subgroup, of order exactly `size`.
    pub group_gen: F,
    /// Inverse of the generator of the subgroup.
    pub group_gen_inv: F,
    /// Offset that specifies the coset.
    pub offset: F,
    /// Inverse of the offset that specifies the coset.
    pub offset_inv: F,
    /// Equals `self.offset^self.size`.
    pub offset_pow_size: F,
}

impl<F: TwoAdicField + PrimeField64> MixedRadixEvaluationDomain<F> {
    /// Constructs a domain large enough for evaluations of a polynomial
    /// having `num_coeffs` coefficients.
    pub fn new(num_coeffs: usize, config: &SmallSubgroupConfig<F>) -> Result<Self, DomainError> {
        let size = Self::compute_size_of_domain(num_coeffs, config)?;
        let factors = config.decompose(size)?;
        let large_root = config
            .large_subgroup_root_of_unity
            .ok_or(DomainError::UnsupportedField)?;

        // Shrink the large subgroup's generator to order exactly `size`.
        let group_gen = large_root.exp_u64(config.large_subgroup_order() / size);
        debug_assert_eq!(group_gen.exp_u64(size), F::ONE);

        let size_as_field_element = F::from_u64(size);
        let size_inv = size_as_field_element.inverse();

        Ok(Self {
            size,
            two_adicity: factors.two_adicity,
            small_subgroup_base: config.small_subgroup_base,
            size_as_field_element,
            size_inv,
            group_gen,
            group_gen_inv: group_gen.inverse(),
            offset: F::ONE,
            offset_inv: F::ONE,
            offset_pow_size: F::ONE,
        })
    }

    /// The size of the domain [`Self::new`] would build for `num_coeffs`
    /// coefficients, without building it.
    pub fn compute_size_of_domain(
        num_coeffs: usize,
        config: &SmallSubgroupConfig<F>,
    ) -> Result<u64, DomainError> {
        let size = config.best_composite_size(num_coeffs as u64)?;
        if size > config.max_degree.saturating_add(1) {
            return Err(DomainError::SizeTooLarge {
                size,
                max_degree: config.max_degree,
            });
        }
        Ok(size)
    }

    /// Whether a domain can be built for `num_coeffs` coefficients. Thin
    /// wrapper over [`Self::compute_size_of_domain`] discarding the error
    /// detail.
    #[must_use]
    pub fn is_valid_num_coeffs(num_coeffs: usize, config: &SmallSubgroupConfig<F>) -> bool {
        Self::compute_size_of_domain(num_coeffs, config).is_ok()
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
    #[instrument(skip_all, fields(size = self.size), level = "debug")]
    pub fn fft_in_place(&self, coeffs: &mut Vec<F>) {
        if !self.offset.is_one() {
            distribute_powers(coeffs, self.offset);
        }
        assert!(
            coeffs.len() <= self.size(),
            "buffer longer than the domain"
        );
        coeffs.resize(self.size(), F::ZERO);
        self.best_fft(coeffs, self.group_gen);
    }

    /// Interpolates the evaluations in `evals` back to coefficients, in
    /// place.
    ///
    /// Trailing zero coefficients are stripped, so the result is the unique
    /// interpolating polynomial of degree below the domain size in its
    /// shortest representation.
    #[instrument(skip_all, fields(size = self.size), level = "debug")]
    pub fn ifft_in_place(&self, evals: &mut Vec<F>) {
        assert!(evals.len() <= self.size(), "buffer longer than the domain");
        evals.resize(self.size(), F::ZERO);
        self.best_fft(evals, self.group_gen_inv);
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

    /// Picks the serial or the coset-decomposed parallel transform based on
    /// the domain's power-of-two depth versus the worker pool size.
    fn best_fft(&self, a: &mut [F], omega: F) {
        #[cfg(feature = "parallel")]
        {
            let log_threads = rayon::current_num_threads().ilog2();
            if self.two_adicity > log_threads {
                return parallel_fft(
                    a,
                    omega,
                    self.small_subgroup_base,
                    self.two_adicity,
                    log_threads,
                );
            }
        }
        serial_fft(a, omega, self.two_adicity, self.small_subgroup_base);
    }

    #[inline]
    pub const fn size(&self) -> usize {
        self.size as usize
    }

    #[inline]
    pub const fn two_adicity(&self) -> u32 {
        self.two_adicity
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

/// The generalized digit-reversal index map.
///
/// Index `i` is read as a mixed-radix number whose least-significant
/// `two_adicity` digits are base 2 and whose next `q_adicity` digits are
/// base `q`:
///
/// ```text
/// i = 2⁰·b₀ + 2¹·b₁ + … + 2ˢ⁻¹·bₛ₋₁ + 2ˢ·(q⁰·x₀ + q¹·x₁ + … + qᵗ⁻¹·xₜ₋₁)
/// ```
///
/// and mapped to
///
/// ```text
/// j = b₀·(n/2¹) + … + bₛ₋₁·(n/2ˢ) + x₀·(n/(2ˢ·q¹)) + … + xₜ₋₁·(n/(2ˢ·qᵗ))
/// ```
///
/// For `q_adicity == 0` this reduces to ordinary bit-reversal.
pub(crate) const fn mixed_radix_permute(
    two_adicity: u32,
    q_adicity: u32,
    q: usize,
    n: usize,
    mut i: usize,
) -> usize {
    let mut res = 0;
    let mut shift = n;
    let mut j = 0;
    while j < two_adicity {
        shift /= 2;
        res += (i % 2) * shift;
        i /= 2;
        j += 1;
    }
    let mut j = 0;
    while j < q_adicity {
        shift /= q;
        res += (i % q) * shift;
        i /= q;
        j += 1;
    }
    res
}

/// Reorders `a` by [`mixed_radix_permute`] in place.
///
/// The map is not an involution for `q > 2`, so instead of pairwise swaps
/// each unvisited index is followed through its permutation orbit, with a
/// visited marker per slot scoped to this call.
fn apply_mixed_radix_permutation<F: Copy>(a: &mut [F], two_adicity: u32, q_adicity: u32, q: usize) {
    let n = a.len();
    let mut seen = vec![false; n];
    for k in 0..n {
        let mut i = k;
        let mut a_i = a[i];
        while !seen[i] {
            let dest = mixed_radix_permute(two_adicity, q_adicity, q, n, i);
            let a_dest = a[dest];
            a[dest] = a_i;
            a_i = a_dest;
            seen[i] = true;
            i = dest;
        }
    }
}

/// The single-thread mixed-radix transform.
///
/// `a` must hold exactly `q^q_adicity * 2^two_adicity` elements for some
/// `q_adicity` within the field's bounds, and `omega` must be a root of
/// unity of that order. The result is in the canonical order: index `i`
/// holds the sum over `j` of `a[j] * omega^(i*j)`.
pub(crate) fn serial_fft<F: Field>(a: &mut [F], omega: F, two_adicity: u32, q: u64) {
    if a.is_empty() {
        return;
    }
    let n = a.len();
    let q_adicity = adicity_of(q, n as u64);
    let q_part = q.pow(q_adicity);
    let two_part = 1u64 << two_adicity;
    assert_eq!(
        n as u64,
        q_part * two_part,
        "buffer length inconsistent with the domain factorization"
    );

    let q = q as usize;
    let mut m = 1;
    if q_adicity > 0 {
        // The permutation phase needs cycle-following here (see
        // `apply_mixed_radix_permutation`), and each of the `q_adicity`
        // merge passes below combines `q` strided values at a time instead
        // of the add/subtract pair of the radix-2 butterfly.
        apply_mixed_radix_permutation(a, two_adicity, q_adicity, q);

        // The q distinct q-th roots of unity, as powers of ω^(n/q).
        let omega_q = omega.exp_u64((n / q) as u64);
        let mut qth_roots = vec![F::ONE; q];
        for i in 1..q {
            qth_roots[i] = qth_roots[i - 1] * omega_q;
        }

        let mut terms = vec![F::ZERO; q - 1];

        for _ in 0..q_adicity {
            let w_m = omega.exp_u64((n / (q * m)) as u64);
            for k in (0..n).step_by(q * m) {
                // w_j is w_m^j, the per-position twiddle inside the block.
                let mut w_j = F::ONE;
                for j in 0..m {
                    let base_term = a[k + j];
                    let mut w_j_i = w_j;
                    for i in 1..q {
                        terms[i - 1] = a[k + j + i * m] * w_j_i;
                        w_j_i *= w_j;
                    }

                    // Each output is a linear combination of all q inputs
                    // weighted by q-th roots of unity.
                    for i in 0..q {
                        let mut acc = base_term;
                        for l in 1..q {
                            acc += terms[l - 1] * qth_roots[(i * l) % q];
                        }
                        a[k + j + i * m] = acc;
                    }

                    w_j *= w_m;
                }
            }
            m *= q;
        }
    } else {
        swap_bit_reversed_elements(a, two_adicity);
    }

    // Radix-2 merge passes, continuing from stride m = q^q_adicity.
    radix2_merge_passes(a, omega, two_adicity, m);
}

/// Coset-decomposed parallel transform.
///
/// Splits the problem into `2^log_threads` cosets of the subgroup generated
/// by `omega^(2^log_threads)`. Each coset folds the strided global
/// contributions into a local array (index `i` accumulates `a[i + c*coset]`
/// weighted by `omega^(k*(i + c*coset))` over all `c`), runs the serial
/// transform on it independently, and the results interleave back as
/// `a[i] = local[i % num_cosets][i / num_cosets]`.
///
/// The fold costs `O(n)` field multiplications per coset rather than the
/// asymptotically optimal `O((n/threads)·log(n/threads))`.
#[cfg(feature = "parallel")]
pub(crate) fn parallel_fft<F: Field>(
    a: &mut [F],
    omega: F,
    q: u64,
    two_adicity: u32,
    log_threads: u32,
) {
    assert!(
        two_adicity >= log_threads,
        "not enough power-of-two structure to split into 2^{log_threads} cosets"
    );
    let n = a.len();
    let num_cosets = 1usize << log_threads;
    assert_eq!(n % num_cosets, 0);
    let coset_size = n / num_cosets;

    let new_omega = omega.exp_u64(num_cosets as u64);
    let new_two_adicity = adicity_of(2, coset_size as u64);

    let src: &[F] = a;
    let tmp: Vec<Vec<F>> = (0..num_cosets)
        .into_par_iter()
        .map(|k| {
            let mut local = vec![F::ZERO; coset_size];
            let omega_k = omega.exp_u64(k as u64);
            let omega_step = omega.exp_u64((k * coset_size) as u64);

            // elt tracks omega^(k * idx) across the fold.
            let mut elt = F::ONE;
            for (i, value) in local.iter_mut().enumerate() {
                for c in 0..num_cosets {
                    let idx = i + c * coset_size;
                    *value += src[idx] * elt;
                    elt *= omega_step;
                }
                elt *= omega_k;
            }

            serial_fft(&mut local, new_omega, new_two_adicity, q);
            local
        })
        .collect();

    for (i, value) in a.iter_mut().enumerate() {
        *value = tmp[i % num_cosets][i / num_cosets];
    }
}
