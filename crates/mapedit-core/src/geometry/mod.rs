//! Geometry primitives
//!
//! Provides the `GeometryOps` capability trait, the spherical and planar
//! kernels implementing it, and kernel independent measurements.

mod measure;
mod planar;
mod spherical;
mod traits;

pub use measure::*;
pub use planar::PlanarOps;
pub use spherical::{EARTH_RADIUS_METERS, SphericalOps};
pub use traits::*;
