//! Lambert Conformal Conic projection.
//!
//! This is the projection WRF uses for `map_proj = 'lambert'` grids.
//! It maps a cone secant to the ellipsoid along two standard parallels
//! onto a flat plane.
//!
//! The projection parameters are:
//! - Standard parallels: truelat1 and truelat2 (must differ)
//! - Reference latitude: latitude of the projection origin
//! - Reference longitude: the central meridian
//!
//! Projected coordinates are meters relative to the origin
//! (ref_lat, ref_lon) with no false easting or northing.
//!
//! Formulas follow Snyder, "Map Projections: A Working Manual" (1987),
//! equations 15-1 through 15-11 for the ellipsoid.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use wrf_common::{WrfError, WrfResult};

use crate::ellipsoid::Ellipsoid;

/// Convergence threshold for the inverse latitude iteration (radians).
const INVERSE_TOLERANCE: f64 = 1e-12;

/// Upper bound on inverse latitude iterations.
const INVERSE_MAX_ITERATIONS: usize = 32;

/// Lambert Conformal Conic projection on an ellipsoid.
#[derive(Debug, Clone)]
pub struct LambertConformal {
    /// First standard parallel in degrees
    pub truelat1: f64,
    /// Second standard parallel in degrees
    pub truelat2: f64,
    /// Latitude of origin in degrees
    pub ref_lat: f64,
    /// Central meridian in degrees
    pub ref_lon: f64,
    /// Datum ellipsoid
    pub ellipsoid: Ellipsoid,
    /// Central meridian in radians
    lon0: f64,
    /// First eccentricity
    e: f64,
    /// Cone constant (n)
    n: f64,
    /// a * F
    af: f64,
    /// Rho at the origin
    rho0: f64,
}

impl LambertConformal {
    /// Create a projection on the WGS84 ellipsoid.
    ///
    /// # Errors
    /// * `Configuration` if any angle is non-finite or out of range.
    /// * `Geometry` if the parallels describe a degenerate cone.
    pub fn new(truelat1: f64, truelat2: f64, ref_lat: f64, ref_lon: f64) -> WrfResult<Self> {
        Self::with_ellipsoid(truelat1, truelat2, ref_lat, ref_lon, Ellipsoid::WGS84)
    }

    /// Create a projection on a specific ellipsoid.
    pub fn with_ellipsoid(
        truelat1: f64,
        truelat2: f64,
        ref_lat: f64,
        ref_lon: f64,
        ellipsoid: Ellipsoid,
    ) -> WrfResult<Self> {
        for (name, lat) in [("truelat1", truelat1), ("truelat2", truelat2), ("ref_lat", ref_lat)] {
            if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
                return Err(WrfError::configuration(format!(
                    "{} must be within [-90, 90] degrees, got {}",
                    name, lat
                )));
            }
        }
        if !ref_lon.is_finite() || !(-360.0..=360.0).contains(&ref_lon) {
            return Err(WrfError::configuration(format!(
                "ref_lon must be within [-360, 360] degrees, got {}",
                ref_lon
            )));
        }

        if (truelat1 - truelat2).abs() < 1e-10 {
            return Err(WrfError::geometry(format!(
                "standard parallels must differ, both are {}",
                truelat1
            )));
        }
        if truelat1.abs() >= 90.0 || truelat2.abs() >= 90.0 {
            return Err(WrfError::geometry("standard parallels cannot lie on a pole"));
        }

        let e = ellipsoid.eccentricity();
        let phi1 = truelat1.to_radians();
        let phi2 = truelat2.to_radians();

        let m1 = m(phi1, e);
        let m2 = m(phi2, e);
        let t1 = t(phi1, e);
        let t2 = t(phi2, e);

        let n = (m1.ln() - m2.ln()) / (t1.ln() - t2.ln());
        if !n.is_finite() || n.abs() < 1e-10 {
            return Err(WrfError::geometry(format!(
                "standard parallels {} and {} do not define a cone",
                truelat1, truelat2
            )));
        }

        if ref_lat * n.signum() <= -90.0 {
            return Err(WrfError::geometry(format!(
                "reference latitude {} is the pole opposite the cone apex",
                ref_lat
            )));
        }

        let f = m1 / (n * t1.powf(n));
        let af = ellipsoid.a * f;
        let rho0 = af * t(ref_lat.to_radians(), e).powf(n);

        Ok(Self {
            truelat1,
            truelat2,
            ref_lat,
            ref_lon,
            ellipsoid,
            lon0: ref_lon.to_radians(),
            e,
            n,
            af,
            rho0,
        })
    }

    /// Cone constant.
    pub fn cone_constant(&self) -> f64 {
        self.n
    }

    /// Project geographic coordinates (degrees) to (x, y) meters.
    pub fn forward(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let phi = lat_deg.to_radians();
        let dlon = normalize_radians(lon_deg.to_radians() - self.lon0);

        let rho = self.af * t(phi, self.e).powf(self.n);
        let theta = self.n * dlon;

        let x = rho * theta.sin();
        let y = self.rho0 - rho * theta.cos();

        (x, y)
    }

    /// Invert projected (x, y) meters back to (lon, lat) degrees.
    ///
    /// Longitude is returned in [-180, 180].
    pub fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let sign = self.n.signum();
        let dy = self.rho0 - y;

        let rho = sign * (x * x + dy * dy).sqrt();
        if rho == 0.0 {
            return (normalize_degrees(self.ref_lon), sign * 90.0);
        }

        let theta = (sign * x).atan2(sign * dy);
        let t = (rho / self.af).powf(1.0 / self.n);

        // Latitude by fixed-point iteration, seeded with the spherical value.
        let half_e = self.e / 2.0;
        let mut phi = FRAC_PI_2 - 2.0 * t.atan();
        for _ in 0..INVERSE_MAX_ITERATIONS {
            let es = self.e * phi.sin();
            let next = FRAC_PI_2 - 2.0 * (t * ((1.0 - es) / (1.0 + es)).powf(half_e)).atan();
            let delta = (next - phi).abs();
            phi = next;
            if delta < INVERSE_TOLERANCE {
                break;
            }
        }

        let lon = normalize_radians(theta / self.n + self.lon0);

        (lon.to_degrees(), phi.to_degrees())
    }
}

/// Snyder (14-15): m = cos φ / sqrt(1 - e² sin² φ)
fn m(phi: f64, e: f64) -> f64 {
    let es = e * phi.sin();
    phi.cos() / (1.0 - es * es).sqrt()
}

/// Snyder (15-9): t = tan(π/4 - φ/2) / ((1 - e sin φ) / (1 + e sin φ))^(e/2)
fn t(phi: f64, e: f64) -> f64 {
    let es = e * phi.sin();
    (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - es) / (1.0 + es)).powf(e / 2.0)
}

/// Normalize an angle to [-π, π]. Non-finite input yields NaN.
fn normalize_radians(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(2.0 * PI);
    if wrapped > PI {
        wrapped - 2.0 * PI
    } else {
        wrapped
    }
}

fn normalize_degrees(angle: f64) -> f64 {
    normalize_radians(angle.to_radians()).to_degrees()
}
