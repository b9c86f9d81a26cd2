use glam::Vec2;
use std::f32::consts::PI;

const MUL_A: u32 = 3_284_157_443;
const MUL_B: u32 = 1_911_520_717;
const MUL_C: u32 = 2_048_419_325;

/// Rotation by half the word width, so high and low halves trade places.
const HALF_WORD: u32 = u32::BITS / 2;

/// Maps the signed hash range `[-2^31, 2^31)` onto `[-PI, PI)`.
const ANGLE_STEP: f32 = PI / 2_147_483_648.0;

/// Scramble a lattice coordinate into a 32-bit word.
///
/// Alternating multiply / rotate / xor passes diffuse every input bit across
/// the whole word, so neighbouring vertices get unrelated hashes.
#[inline]
pub fn lattice_hash(ix: i32, iy: i32) -> u32 {
    let mut a = ix as u32;
    let mut b = iy as u32;

    a = a.wrapping_mul(MUL_A);
    b ^= a.rotate_left(HALF_WORD);
    b = b.wrapping_mul(MUL_B);
    a ^= b.rotate_left(HALF_WORD);
    a.wrapping_mul(MUL_C)
}

/// Gradient angle in radians for a lattice vertex, in `[-PI, PI)`.
#[inline]
pub fn lattice_angle(ix: i32, iy: i32) -> f32 {
    lattice_hash(ix, iy) as i32 as f32 * ANGLE_STEP
}

/// Unit gradient vector attached to the lattice vertex `(ix, iy)`.
///
/// Pure function of the coordinate: no RNG state, so the field is identical
/// regardless of evaluation order or thread.
#[inline]
pub fn gradient(ix: i32, iy: i32) -> Vec2 {
    let (sin, cos) = lattice_angle(ix, iy).sin_cos();
    Vec2::new(cos, sin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_regression() {
        assert_eq!(lattice_hash(0, 0), 0);
        assert_eq!(gradient(0, 0), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_hash_regression() {
        assert_eq!(lattice_hash(1, 0), 3_094_586_479);
        assert_eq!(lattice_hash(0, 1), 4_133_807_155);
        assert_eq!(lattice_hash(-1, -1), 471_089_182);
        assert_eq!(lattice_hash(7, -3), 1_841_355_578);
    }

    #[test]
    fn test_deterministic() {
        for iy in -20..20 {
            for ix in -20..20 {
                let a = gradient(ix, iy);
                let b = gradient(ix, iy);
                assert_eq!(a.x.to_bits(), b.x.to_bits());
                assert_eq!(a.y.to_bits(), b.y.to_bits());
            }
        }
    }

    #[test]
    fn test_unit_length() {
        let coords = [(0, 0), (1, 0), (-1, 5), (i32::MAX, i32::MIN), (123_456, -654_321)];
        for (ix, iy) in coords {
            let len = gradient(ix, iy).length();
            assert!((len - 1.0).abs() < 1e-5, "|g({ix},{iy})| = {len}");
        }
    }

    #[test]
    fn test_angle_range() {
        for iy in -50..50 {
            for ix in -50..50 {
                let angle = lattice_angle(ix, iy);
                assert!((-PI..=PI).contains(&angle));
            }
        }
    }

    #[test]
    fn test_single_bit_flip_changes_gradient() {
        // Flip each low bit of either coordinate and expect a different vertex hash
        let base = lattice_hash(10, 20);
        for bit in 0..8 {
            assert_ne!(lattice_hash(10 ^ (1 << bit), 20), base);
            assert_ne!(lattice_hash(10, 20 ^ (1 << bit)), base);
        }
    }

    #[test]
    fn test_bit_flip_avalanche() {
        // A one-bit input change should flip about half of the 32 output bits
        let mut flipped = 0u64;
        let mut trials = 0u64;
        for iy in -32..32 {
            for ix in -32..32 {
                let base = lattice_hash(ix, iy);
                for bit in 0..32 {
                    let mask = 1i32 << bit;
                    flipped += u64::from((lattice_hash(ix ^ mask, iy) ^ base).count_ones());
                    flipped += u64::from((lattice_hash(ix, iy ^ mask) ^ base).count_ones());
                    trials += 2;
                }
            }
        }

        let mean = flipped as f64 / trials as f64;
        assert!((12.0..=20.0).contains(&mean), "mean flipped bits {mean}");
    }

    #[test]
    fn test_axes_not_symmetric() {
        assert_ne!(lattice_hash(3, 5), lattice_hash(5, 3));
    }
}
