//! Lambert Conformal Conic projection with two standard parallels, on an ellipsoid.
//!
//! Follows the formulation of Snyder, "Map Projections: A Working Manual" (USGS PP 1395), p.107.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::f64::consts::FRAC_PI_4;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Maximum number of iterations when solving for the latitude in the inverse projection.
const MAX_INV_ITERATIONS: usize = 20;

/// Convergence threshold on the latitude in the inverse projection.
///
/// Units: radians
const INV_TOLERANCE_RAD: f64 = 1e-14;

/// GRS80, the ellipsoid of RGF93.
pub const GRS80: Ellipsoid = Ellipsoid {
    semi_major_m: 6_378_137.0,
    inv_flattening: 298.257_222_101,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Reference ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis.
    ///
    /// Units: meters
    pub semi_major_m: f64,

    /// Inverse flattening
    pub inv_flattening: f64,
}

/// Defining parameters of a conic projection.
///
/// Units: degrees for angles, meters for offsets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConicParams {
    pub ellipsoid: Ellipsoid,
    pub lat_origin_deg: f64,
    pub lon_origin_deg: f64,
    pub std_parallel_1_deg: f64,
    pub std_parallel_2_deg: f64,
    pub false_easting_m: f64,
    pub false_northing_m: f64,
}

/// A ready to use projection, constants derived from the parameters are precomputed.
#[derive(Debug, Clone, Copy)]
pub struct LambertConic {
    /// First eccentricity
    e: f64,

    /// Cone constant
    n: f64,

    /// Semi-major axis times the F constant
    a_f: f64,

    /// Radius at the latitude of origin
    rho_0: f64,

    lon_0_rad: f64,
    x_0: f64,
    y_0: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Ellipsoid {
    /// First eccentricity of the ellipsoid.
    pub fn eccentricity(&self) -> f64 {
        let f = 1.0 / self.inv_flattening;
        (2.0 * f - f * f).sqrt()
    }
}

impl LambertConic {
    pub fn new(params: &ConicParams) -> Self {
        let e = params.ellipsoid.eccentricity();

        let phi_0 = params.lat_origin_deg.to_radians();
        let phi_1 = params.std_parallel_1_deg.to_radians();
        let phi_2 = params.std_parallel_2_deg.to_radians();

        let m_1 = m(e, phi_1);
        let m_2 = m(e, phi_2);
        let t_1 = t(e, phi_1);
        let t_2 = t(e, phi_2);

        let n = (m_1.ln() - m_2.ln()) / (t_1.ln() - t_2.ln());
        let a_f = params.ellipsoid.semi_major_m * m_1 / (n * t_1.powf(n));

        Self {
            e,
            n,
            a_f,
            rho_0: a_f * t(e, phi_0).powf(n),
            lon_0_rad: params.lon_origin_deg.to_radians(),
            x_0: params.false_easting_m,
            y_0: params.false_northing_m,
        }
    }

    /// Cone constant of the projection.
    pub fn cone_constant(&self) -> f64 {
        self.n
    }

    /// Project a geographic point (radians) to (easting, northing) in meters.
    pub fn forward(&self, lat_rad: f64, lon_rad: f64) -> (f64, f64) {
        let rho = self.a_f * t(self.e, lat_rad).powf(self.n);
        let theta = self.n * (lon_rad - self.lon_0_rad);

        (
            self.x_0 + rho * theta.sin(),
            self.y_0 + self.rho_0 - rho * theta.cos(),
        )
    }

    /// Unproject (easting, northing) in meters to a geographic point (lat, lon) in radians.
    ///
    /// Returns `None` if the latitude iteration doesn't converge.
    pub fn inverse(&self, easting_m: f64, northing_m: f64) -> Option<(f64, f64)> {
        let dx = easting_m - self.x_0;
        let dy = self.rho_0 - (northing_m - self.y_0);

        let rho = self.n.signum() * dx.hypot(dy);
        let theta = (self.n.signum() * dx).atan2(self.n.signum() * dy);

        let t_p = (rho / self.a_f).powf(1.0 / self.n);
        let lon_rad = theta / self.n + self.lon_0_rad;

        // Fixed point iteration on the latitude, starting from the spherical solution
        let mut lat_rad = std::f64::consts::FRAC_PI_2 - 2.0 * t_p.atan();
        for _ in 0..MAX_INV_ITERATIONS {
            let e_sin = self.e * lat_rad.sin();
            let next = std::f64::consts::FRAC_PI_2
                - 2.0 * (t_p * ((1.0 - e_sin) / (1.0 + e_sin)).powf(self.e / 2.0)).atan();

            if (next - lat_rad).abs() < INV_TOLERANCE_RAD {
                return Some((next, lon_rad));
            }
            lat_rad = next;
        }

        None
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Snyder (14-15)
fn m(e: f64, phi: f64) -> f64 {
    phi.cos() / (1.0 - (e * phi.sin()).powi(2)).sqrt()
}

/// Snyder (15-9)
fn t(e: f64, phi: f64) -> f64 {
    let e_sin = e * phi.sin();
    (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - e_sin) / (1.0 + e_sin)).powf(e / 2.0)
}

#[cfg(test)]
mod test {
    use super::*;

    fn lambert_93() -> LambertConic {
        LambertConic::new(&ConicParams {
            ellipsoid: GRS80,
            lat_origin_deg: 46.5,
            lon_origin_deg: 3.0,
            std_parallel_1_deg: 49.0,
            std_parallel_2_deg: 44.0,
            false_easting_m: 700_000.0,
            false_northing_m: 6_600_000.0,
        })
    }

    #[test]
    fn test_cone_constant() {
        // Published value for Lambert-93
        assert!((lambert_93().cone_constant() - 0.725_607_765_053_267).abs() < 1e-12);
    }

    #[test]
    fn test_forward() {
        let proj = lambert_93();

        let (x, y) = proj.forward(46.5f64.to_radians(), 3f64.to_radians());
        assert!((x - 700_000.0).abs() < 1e-6);
        assert!((y - 6_600_000.0).abs() < 1e-6);

        // Paris
        let (x, y) = proj.forward(48.8566f64.to_radians(), 2.3522f64.to_radians());
        assert!((x - 652_469.02).abs() < 0.01, "x = {}", x);
        assert!((y - 6_862_035.26).abs() < 0.01, "y = {}", y);
    }

    #[test]
    fn test_inverse() {
        let proj = lambert_93();
        let lat = 48.39f64.to_radians();
        let lon = -4.486f64.to_radians();

        let (x, y) = proj.forward(lat, lon);
        let (lat_inv, lon_inv) = proj.inverse(x, y).unwrap();

        assert!((lat_inv - lat).abs() < 1e-11);
        assert!((lon_inv - lon).abs() < 1e-11);
    }
}
