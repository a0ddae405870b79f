//! Spherical geometry kernel
//!
//! Treats coordinates as longitude/latitude degrees on a sphere. Distances
//! are in meters.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use glam::DVec2;

use super::GeometryOps;

/// Mean earth radius in meters
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Great-circle and rhumb-line math on a spherical earth
#[derive(Debug, Clone, Copy, Default)]
pub struct SphericalOps;

/// Wrap an angle in degrees to `-180.0..=180.0`
fn wrap_bearing(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

/// Stretched latitude difference used by rhumb lines
fn projected_latitude_delta(phi1: f64, phi2: f64) -> f64 {
    ((phi2 / 2.0 + FRAC_PI_4).tan() / (phi1 / 2.0 + FRAC_PI_4).tan()).ln()
}

impl GeometryOps for SphericalOps {
    fn name(&self) -> &str {
        "spherical"
    }

    fn bearing(&self, from: DVec2, to: DVec2) -> f64 {
        let (lon1, lat1) = (from.x.to_radians(), from.y.to_radians());
        let (lon2, lat2) = (to.x.to_radians(), to.y.to_radians());
        let a = (lon2 - lon1).sin() * lat2.cos();
        let b = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * (lon2 - lon1).cos();
        a.atan2(b).to_degrees()
    }

    fn distance(&self, a: DVec2, b: DVec2) -> f64 {
        let d_lat = (b.y - a.y).to_radians();
        let d_lon = (b.x - a.x).to_radians();
        let h = (d_lat / 2.0).sin().powi(2)
            + (d_lon / 2.0).sin().powi(2) * a.y.to_radians().cos() * b.y.to_radians().cos();
        2.0 * EARTH_RADIUS_METERS * h.sqrt().atan2((1.0 - h).sqrt())
    }

    fn destination(&self, origin: DVec2, distance: f64, bearing: f64) -> DVec2 {
        let (lon1, lat1) = (origin.x.to_radians(), origin.y.to_radians());
        let theta = bearing.to_radians();
        let delta = distance / EARTH_RADIUS_METERS;

        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
        let lon2 = lon1
            + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());
        DVec2::new(lon2.to_degrees(), lat2.to_degrees())
    }

    fn rhumb_bearing(&self, from: DVec2, to: DVec2) -> f64 {
        let (phi1, phi2) = (from.y.to_radians(), to.y.to_radians());
        let mut d_lambda = (to.x - from.x).to_radians();
        if d_lambda > PI {
            d_lambda -= TAU;
        }
        if d_lambda < -PI {
            d_lambda += TAU;
        }
        let d_psi = projected_latitude_delta(phi1, phi2);
        wrap_bearing(d_lambda.atan2(d_psi).to_degrees())
    }

    fn rhumb_distance(&self, a: DVec2, b: DVec2) -> f64 {
        let (phi1, phi2) = (a.y.to_radians(), b.y.to_radians());
        let d_phi = phi2 - phi1;
        let mut d_lambda = (b.x - a.x).to_radians().abs();
        if d_lambda > PI {
            d_lambda -= TAU;
        }
        let d_psi = projected_latitude_delta(phi1, phi2);
        let q = if d_psi.abs() > 1e-11 { d_phi / d_psi } else { phi1.cos() };
        (d_phi * d_phi + q * q * d_lambda * d_lambda).sqrt() * EARTH_RADIUS_METERS
    }

    fn rhumb_destination(&self, origin: DVec2, distance: f64, bearing: f64) -> DVec2 {
        let delta = distance / EARTH_RADIUS_METERS;
        let lambda1 = origin.x.to_radians();
        let phi1 = origin.y.to_radians();
        let theta = bearing.to_radians();

        let d_phi = delta * theta.cos();
        let mut phi2 = phi1 + d_phi;
        // past a pole
        if phi2.abs() > FRAC_PI_2 {
            phi2 = if phi2 > 0.0 { PI - phi2 } else { -PI - phi2 };
        }

        let d_psi = projected_latitude_delta(phi1, phi2);
        let q = if d_psi.abs() > 1e-11 { d_phi / d_psi } else { phi1.cos() };
        let d_lambda = delta * theta.sin() / q;
        let lambda2 = lambda1 + d_lambda;

        let mut lon = (lambda2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
        // keep the result on the origin's side of the antimeridian
        if lon - origin.x > 180.0 {
            lon -= 360.0;
        } else if origin.x - lon > 180.0 {
            lon += 360.0;
        }
        DVec2::new(lon, phi2.to_degrees())
    }
}
