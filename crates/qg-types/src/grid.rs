// ─────────────────────────────────────────────────────────────────────
// QG Channel Model — Grid
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{CHANNEL_HALF_WIDTH, CHANNEL_LENGTH, NX, NY};

/// Channel grid geometry with precomputed spacings.
///
/// Arrays over this grid are `(nx+1, ny+1)` with `[i, j]` = (longitude,
/// latitude). Longitude is periodic: interior columns are `1..=nx` and
/// column 0 is a wrap duplicate that no stencil reads directly. Latitude
/// is bounded: rows `0` and `ny` are walls with one-sided treatment.
#[derive(Debug, Clone)]
pub struct Grid {
    pub nx: usize,
    pub ny: usize,
    /// Periodic channel length (m).
    pub length: f64,
    /// Half-width of the channel (m).
    pub half_width: f64,
    /// x spacing (m).
    pub dx: f64,
    /// y spacing (m).
    pub dy: f64,
    /// Grid aspect ratio dx/dy.
    pub eps: f64,
    /// Aspect ratio squared, the y-weight of the five-point stencils.
    pub epsq: f64,
}

impl Grid {
    pub fn new(nx: usize, ny: usize, length: f64, half_width: f64) -> Self {
        let dx = length / nx as f64;
        let dy = 2.0 * half_width / ny as f64;
        let eps = dx / dy;
        Grid {
            nx,
            ny,
            length,
            half_width,
            dx,
            dy,
            eps,
            epsq: eps * eps,
        }
    }

    /// Number of points per field array, boundary and wrap column included.
    pub fn shape(&self) -> (usize, usize) {
        (self.nx + 1, self.ny + 1)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(NX, NY, CHANNEL_LENGTH, CHANNEL_HALF_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spacings() {
        let grid = Grid::default();
        assert_eq!(grid.nx, 16);
        assert_eq!(grid.ny, 16);
        assert!((grid.dx - 3.75e5).abs() < 1e-6);
        assert!((grid.dy - 6.25e5).abs() < 1e-6);
        assert!((grid.eps - 0.6).abs() < 1e-12);
        assert!((grid.epsq - 0.36).abs() < 1e-12);
    }

    #[test]
    fn test_shape_includes_wrap_and_walls() {
        let grid = Grid::new(8, 4, 6.0e6, 5.0e6);
        assert_eq!(grid.shape(), (9, 5));
    }
}
