use crate::gradient::gradient;
use glam::Vec2;
use noise::NoiseFn;
use serde::{Deserialize, Serialize};

/// Weight curve applied to the in-cell fraction before interpolating.
///
/// `Linear` is the reference look: value-continuous across cell edges but
/// with visible creases where the slope jumps. The eased curves remove the
/// creases and therefore change the rendered image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Easing {
    #[default]
    Linear,
    /// Cubic `3t^2 - 2t^3`
    Smoothstep,
    /// Quintic `6t^5 - 15t^4 + 10t^3`
    Quintic,
}

impl Easing {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::Smoothstep => t * t * (3.0 - 2.0 * t),
            Easing::Quintic => t * t * t * (t * (t * 6.0 - 15.0) + 10.0),
        }
    }
}

/// Clamped linear interpolation: `a` below 0, `b` above 1.
#[inline]
pub fn lerp(a: f32, b: f32, w: f32) -> f32 {
    if w < 0.0 {
        a
    } else if w > 1.0 {
        b
    } else {
        a + (b - a) * w
    }
}

/// Dot product of the vertex gradient with the offset from that vertex to the sample.
#[inline]
fn corner(ix: i32, iy: i32, offset: Vec2) -> f32 {
    gradient(ix, iy).dot(offset)
}

/// 2D gradient noise over the integer lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LatticeNoise {
    pub easing: Easing,
}

impl LatticeNoise {
    pub fn new(easing: Easing) -> Self {
        Self { easing }
    }

    /// Noise value at `(x, y)`, roughly in `[-1, 1]`.
    ///
    /// Exactly zero on lattice vertices. Defined for every finite input;
    /// precision drops with distance from the origin.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let fx = x.floor();
        let fy = y.floor();
        let sx = x - fx;
        let sy = y - fy;

        let x0 = fx as i32;
        let y0 = fy as i32;
        let x1 = x0.wrapping_add(1);
        let y1 = y0.wrapping_add(1);

        let n00 = corner(x0, y0, Vec2::new(sx, sy));
        let n10 = corner(x1, y0, Vec2::new(sx - 1.0, sy));
        let n01 = corner(x0, y1, Vec2::new(sx, sy - 1.0));
        let n11 = corner(x1, y1, Vec2::new(sx - 1.0, sy - 1.0));

        let wx = self.easing.apply(sx);
        let wy = self.easing.apply(sy);

        let top = lerp(n00, n10, wx);
        let bottom = lerp(n01, n11, wx);
        lerp(top, bottom, wy)
    }
}

impl NoiseFn<f64, 2> for LatticeNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        f64::from(self.sample(point[0] as f32, point[1] as f32))
    }
}

/// Reference lattice noise (linear weights).
#[inline]
pub fn noise(x: f32, y: f32) -> f32 {
    LatticeNoise::default().sample(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_EASINGS: [Easing; 3] = [Easing::Linear, Easing::Smoothstep, Easing::Quintic];

    #[test]
    fn test_lerp_clamps() {
        assert_eq!(lerp(2.0, 4.0, -0.5), 2.0);
        assert_eq!(lerp(2.0, 4.0, 1.5), 4.0);
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in ALL_EASINGS {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
            assert!((easing.apply(0.5) - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zero_on_lattice_points() {
        for iy in -8..8 {
            for ix in -8..8 {
                assert_eq!(noise(ix as f32, iy as f32), 0.0, "noise({ix},{iy})");
            }
        }
    }

    #[test]
    fn test_continuous_across_cell_edges() {
        let eps = 1e-4;
        for easing in ALL_EASINGS {
            let lattice = LatticeNoise::new(easing);
            for i in -5..5 {
                let edge = i as f32;
                for j in 0..10 {
                    let other = j as f32 * 0.37 - 1.3;
                    let dx = (lattice.sample(edge - eps, other) - lattice.sample(edge + eps, other)).abs();
                    let dy = (lattice.sample(other, edge - eps) - lattice.sample(other, edge + eps)).abs();
                    assert!(dx < 5e-3, "x edge {edge}: jump {dx}");
                    assert!(dy < 5e-3, "y edge {edge}: jump {dy}");
                }
            }
        }
    }

    #[test]
    fn test_shrinking_step_converges() {
        let (x, y) = (2.3, -4.6);
        let base = noise(x, y);
        assert!((noise(x + 1e-3, y) - base).abs() < 1e-2);
        assert!((noise(x + 1e-4, y) - base).abs() < 1e-3);
        assert!((noise(x, y + 1e-4) - base).abs() < 1e-3);
    }

    #[test]
    fn test_bounded() {
        for easing in ALL_EASINGS {
            let lattice = LatticeNoise::new(easing);
            for j in 0..64 {
                for i in 0..64 {
                    let v = lattice.sample(i as f32 * 0.173 - 5.0, j as f32 * 0.219 - 7.0);
                    assert!(v.abs() <= 0.7072, "{easing:?}: {v}");
                }
            }
        }
    }

    #[test]
    fn test_not_constant() {
        let a = noise(0.5, 0.5);
        let b = noise(3.5, 1.5);
        let c = noise(-2.5, 7.5);
        assert!(a != b || b != c);
    }

    #[test]
    fn test_large_coordinates_are_finite() {
        assert!(noise(1.0e6, -3.0e6).is_finite());
        assert!(noise(f32::MAX, f32::MIN).is_finite());
    }

    #[test]
    fn test_noise_fn_matches_sample() {
        let lattice = LatticeNoise::new(Easing::Quintic);
        let direct = f64::from(lattice.sample(1.25, -0.75));
        assert_eq!(lattice.get([1.25, -0.75]), direct);
    }
}
