//! Shared primitives of the evaluation domains: coset shifts, the radix-2
//! butterfly passes, and the involutive bit-reversal permutation.

use p3_field::Field;
use p3_util::reverse_bits_len;

/// Multiplies `coeffs[k]` by `g^k` for every `k`.
///
/// This is the coset shift: evaluating the shifted coefficients over the
/// subgroup equals evaluating the originals over the coset `g * <ω>`.
pub fn distribute_powers<F: Field>(coeffs: &mut [F], g: F) {
    let mut pow = F::ONE;
    for c in coeffs.iter_mut() {
        *c *= pow;
        pow *= g;
    }
}

/// Multiplies `coeffs[k]` by `c * g^k` for every `k`.
///
/// Combined coset unshift and `1/n` scaling used on the inverse-transform
/// path, fused into a single pass over the buffer.
pub fn distribute_powers_and_mul_by_const<F: Field>(coeffs: &mut [F], g: F, c: F) {
    let mut pow = c;
    for coeff in coeffs.iter_mut() {
        *coeff *= pow;
        pow *= g;
    }
}

/// Reorders `a` by the bit-reversal permutation on `log_n`-bit indices.
///
/// Bit-reversal is an involution, so pairwise swaps suffice; this covers the
/// permutation phase of the transform whenever the domain size is a pure
/// power of two.
pub fn swap_bit_reversed_elements<F>(a: &mut [F], log_n: u32) {
    let n = a.len();
    debug_assert_eq!(n, 1 << log_n);
    for k in 0..n {
        let rk = reverse_bits_len(k, log_n as usize);
        if k < rk {
            a.swap(k, rk);
        }
    }
}

/// Runs `two_adicity` radix-2 Cooley-Tukey merge passes over `a`, starting
/// from stride `m`.
///
/// For a pure radix-2 transform `m` starts at 1; the mixed-radix transform
/// enters with `m = q^q_adicity` after its radix-`q` passes. Each pass merges
/// blocks of `2m` with the butterfly `(lo, hi) <- (lo + w * hi, lo - w * hi)`
/// where `w` runs through powers of `omega^(n / 2m)`.
pub(crate) fn radix2_merge_passes<F: Field>(a: &mut [F], omega: F, two_adicity: u32, mut m: usize) {
    let n = a.len();
    for _ in 0..two_adicity {
        let w_m = omega.exp_u64((n / (2 * m)) as u64);
        for k in (0..n).step_by(2 * m) {
            let mut w = F::ONE;
            for j in 0..m {
                let t = a[k + j + m] * w;
                a[k + j + m] = a[k + j] - t;
                a[k + j] += t;
                w *= w_m;
            }
        }
        m *= 2;
    }
}

/// Drops zero coefficients from the high-degree end of `coeffs`.
///
/// Interpolation always fills the full domain size; the unique interpolating
/// polynomial can have lower degree, and the zero polynomial normalizes to an
/// empty coefficient vector.
pub fn strip_high_degree_zeros<F: Field>(coeffs: &mut Vec<F>) {
    while coeffs.last().is_some_and(F::is_zero) {
        coeffs.pop();
    }
}

#[cfg(test)]
mod tests {
    use p3_baby_bear::BabyBear;
    use p3_field::PrimeCharacteristicRing;

    use super::*;

    type F = BabyBear;

    #[test]
    fn test_distribute_powers() {
        let g = F::from_u64(7);
        let mut values: Vec<F> = (1..=4).map(F::from_u64).collect();
        distribute_powers(&mut values, g);

        assert_eq!(values[0], F::from_u64(1));
        assert_eq!(values[1], F::from_u64(2) * g);
        assert_eq!(values[2], F::from_u64(3) * g * g);
        assert_eq!(values[3], F::from_u64(4) * g * g * g);
    }

    #[test]
    fn test_distribute_powers_and_mul_by_const() {
        let g = F::from_u64(5);
        let c = F::from_u64(9);
        let mut values: Vec<F> = (1..=3).map(F::from_u64).collect();
        distribute_powers_and_mul_by_const(&mut values, g, c);

        assert_eq!(values[0], F::from_u64(1) * c);
        assert_eq!(values[1], F::from_u64(2) * c * g);
        assert_eq!(values[2], F::from_u64(3) * c * g * g);
    }

    #[test]
    fn test_swap_bit_reversed_elements() {
        let mut values: Vec<F> = (0..8).map(F::from_u64).collect();
        swap_bit_reversed_elements(&mut values, 3);
        let expected: Vec<F> = [0, 4, 2, 6, 1, 5, 3, 7]
            .into_iter()
            .map(F::from_u64)
            .collect();
        assert_eq!(values, expected);

        // Applying the involution twice restores the input.
        swap_bit_reversed_elements(&mut values, 3);
        let original: Vec<F> = (0..8).map(F::from_u64).collect();
        assert_eq!(values, original);
    }

    #[test]
    fn test_strip_high_degree_zeros() {
        let mut coeffs = vec![F::from_u64(3), F::ZERO, F::from_u64(2), F::ZERO, F::ZERO];
        strip_high_degree_zeros(&mut coeffs);
        assert_eq!(coeffs, vec![F::from_u64(3), F::ZERO, F::from_u64(2)]);

        let mut zeros = vec![F::ZERO; 4];
        strip_high_degree_zeros(&mut zeros);
        assert!(zeros.is_empty());
    }
}
