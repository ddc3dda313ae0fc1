//! Gradient noise for the landscape ridges.
//!
//! Classic 2D Perlin noise over an explicit lattice of random unit vectors.
//! The lattice is finite: a field built with `columns x rows` cells can be
//! sampled anywhere in `[0, columns] x [0, rows]` minus the far edge.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Lattice of random unit gradients, immutable once built
#[derive(Debug, Clone)]
pub struct NoiseField {
    columns: usize,
    rows: usize,
    /// Row-major, `(rows + 1) * (columns + 1)` entries
    gradients: Vec<DVec2>,
}

impl NoiseField {
    /// Build a fresh field from the thread-local RNG
    pub fn new(columns: usize, rows: usize) -> Self {
        Self::with_rng(columns, rows, &mut rand::thread_rng())
    }

    /// Build a field drawing gradient angles from `rng`
    pub fn with_rng<R: Rng + ?Sized>(columns: usize, rows: usize, rng: &mut R) -> Self {
        let gradients = (0..(rows + 1) * (columns + 1))
            .map(|_| {
                let angle = rng.gen_range(0.0..TAU);
                DVec2::new(angle.cos(), angle.sin())
            })
            .collect();

        Self {
            columns,
            rows,
            gradients,
        }
    }

    /// Gradient at lattice point `(column, row)`
    ///
    /// # Panics
    /// If the point lies outside the lattice.
    pub fn gradient(&self, column: i64, row: i64) -> DVec2 {
        assert!(
            (0..=self.columns as i64).contains(&column) && (0..=self.rows as i64).contains(&row),
            "lattice point ({column}, {row}) outside {}x{} noise grid",
            self.columns,
            self.rows
        );
        self.gradients[row as usize * (self.columns + 1) + column as usize]
    }

    /// Sample the field at `(x, y)` in lattice units
    ///
    /// Returns roughly [-1, 1]; callers remap with `value * 0.5 + 0.5`.
    ///
    /// # Panics
    /// If the surrounding cell is not fully inside the lattice. Keeping
    /// coordinates in range is the caller's job.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let x0 = x.floor();
        let y0 = y.floor();
        let (x1, y1) = (x0 + 1.0, y0 + 1.0);

        let sx = fade(x - x0);
        let sy = fade(y - y0);

        let corner = |cx: f64, cy: f64| {
            self.gradient(cx as i64, cy as i64)
                .dot(DVec2::new(x - cx, y - cy))
        };

        let n00 = corner(x0, y0);
        let n10 = corner(x1, y0);
        let ix0 = lerp(n00, n10, sx);

        let n01 = corner(x0, y1);
        let n11 = corner(x1, y1);
        let ix1 = lerp(n01, n11, sx);

        lerp(ix0, ix1, sy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fade_fixed_points() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert_eq!(fade(0.5), 0.5);
    }

    #[test]
    fn test_grid_dimensions_and_unit_gradients() {
        let field = NoiseField::new(8, 5);
        assert_eq!(field.gradients.len(), 9 * 6);
        for row in 0..=5 {
            for column in 0..=8 {
                let g = field.gradient(column, row);
                assert!((g.length() - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_sample_is_zero_on_lattice_points() {
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let field = NoiseField::with_rng(10, 10, &mut rng);
            for j in 0..10 {
                for i in 0..10 {
                    assert_eq!(field.sample(i as f64, j as f64), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_sample_stays_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = NoiseField::with_rng(12, 12, &mut rng);
        for step in 0..1000 {
            let x = step as f64 * 0.0109;
            let y = 2.0 + (step % 37) as f64 * 0.025;
            let v = field.sample(x, y);
            assert!(v.is_finite());
            assert!((-1.0..=1.0).contains(&v), "sample {} out of range", v);
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = NoiseField::with_rng(8, 8, &mut StdRng::seed_from_u64(42));
        let b = NoiseField::with_rng(8, 8, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.sample(3.3, 2.7), b.sample(3.3, 2.7));
    }

    #[test]
    fn test_sample_is_continuous() {
        let field = NoiseField::with_rng(8, 8, &mut StdRng::seed_from_u64(3));
        let a = field.sample(2.999_999, 2.5);
        let b = field.sample(3.000_001, 2.5);
        assert!((a - b).abs() < 1e-5);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_sample_outside_grid_panics() {
        let field = NoiseField::new(4, 4);
        field.sample(4.5, 1.0);
    }
}
