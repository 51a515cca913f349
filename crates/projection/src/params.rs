//! Projection parameters as they appear in a WRF `geogrid` section.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use wrf_common::{WrfError, WrfResult};

use crate::lambert::LambertConformal;

/// Map projection families known to WRF's `map_proj` setting.
///
/// Only `lambert` can be built; the other names are recognised so they can
/// be rejected with a precise error instead of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapProjection {
    Lambert,
    Polar,
    Mercator,
    #[serde(rename = "lat-lon")]
    LatLon,
}

impl MapProjection {
    /// Namelist spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            MapProjection::Lambert => "lambert",
            MapProjection::Polar => "polar",
            MapProjection::Mercator => "mercator",
            MapProjection::LatLon => "lat-lon",
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, MapProjection::Lambert)
    }
}

impl FromStr for MapProjection {
    type Err = WrfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lambert" => Ok(MapProjection::Lambert),
            "polar" => Ok(MapProjection::Polar),
            "mercator" => Ok(MapProjection::Mercator),
            "lat-lon" => Ok(MapProjection::LatLon),
            other => Err(WrfError::UnsupportedProjection(other.to_string())),
        }
    }
}

impl std::fmt::Display for MapProjection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Projection settings of the outermost domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    pub map_proj: MapProjection,
    pub truelat1: f64,
    pub truelat2: f64,
    pub ref_lat: f64,
    pub ref_lon: f64,
}

impl ProjectionParams {
    /// Lambert parameters.
    pub fn lambert(truelat1: f64, truelat2: f64, ref_lat: f64, ref_lon: f64) -> Self {
        Self {
            map_proj: MapProjection::Lambert,
            truelat1,
            truelat2,
            ref_lat,
            ref_lon,
        }
    }

    /// Build the projection these parameters describe.
    ///
    /// Fails with `UnsupportedProjection` for anything but `lambert`.
    pub fn build(&self) -> WrfResult<LambertConformal> {
        if !self.map_proj.is_supported() {
            return Err(WrfError::UnsupportedProjection(self.map_proj.to_string()));
        }
        LambertConformal::new(self.truelat1, self.truelat2, self.ref_lat, self.ref_lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_map_proj() {
        assert_eq!("lambert".parse::<MapProjection>().unwrap(), MapProjection::Lambert);
        assert_eq!(" Lambert ".parse::<MapProjection>().unwrap(), MapProjection::Lambert);
        assert_eq!("lat-lon".parse::<MapProjection>().unwrap(), MapProjection::LatLon);
    }

    #[test]
    fn test_unknown_map_proj() {
        let err = "rotated_ll".parse::<MapProjection>().unwrap_err();
        assert!(matches!(err, WrfError::UnsupportedProjection(ref p) if p == "rotated_ll"));
    }

    #[test]
    fn test_build_rejects_mercator() {
        let mut params = ProjectionParams::lambert(30.0, 60.0, 52.0, 5.0);
        params.map_proj = MapProjection::Mercator;
        let err = params.build().unwrap_err();
        assert!(matches!(err, WrfError::UnsupportedProjection(ref p) if p == "mercator"));
    }

    #[test]
    fn test_build_lambert() {
        let proj = ProjectionParams::lambert(30.0, 60.0, 52.0, 5.0).build().unwrap();
        assert!(proj.cone_constant() > 0.0);
    }
}
