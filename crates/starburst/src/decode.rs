//! Feature-collection decoding.
//!
//! The clustering index hands out GeoJSON-style features in geographic
//! coordinates (EPSG:4326). The map works in spherical-mercator meters
//! (EPSG:3857), so every flattened leaf goes through this decode step before
//! layout.

use crate::error::{Error, Result};
use crate::feature::{Feature, Geometry};
use crate::geom::{Point, point};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Latitude at which the mercator plane becomes square; input latitudes are
/// clamped here so poles stay finite.
pub const MAX_LATITUDE_DEG: f64 = 85.051_128_779_806_59;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<RawFeature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFeature {
    #[serde(rename = "type", default = "feature_kind")]
    pub kind: String,
    pub geometry: RawGeometry,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

fn feature_kind() -> String {
    "Feature".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<f64>,
}

impl RawFeature {
    pub fn lon_lat(&self) -> Result<(f64, f64)> {
        if self.geometry.kind != "Point" {
            return Err(Error::InvalidFeatureCollection {
                message: format!("unsupported geometry type: {}", self.geometry.kind),
            });
        }
        match self.geometry.coordinates.as_slice() {
            [lon, lat, ..] => Ok((*lon, *lat)),
            _ => Err(Error::InvalidFeatureCollection {
                message: "point geometry needs at least two coordinates".to_string(),
            }),
        }
    }
}

/// Forward spherical-mercator projection of a lon/lat pair (degrees).
pub fn forward(lon: f64, lat: f64) -> Result<Point> {
    if !lon.is_finite() || !lat.is_finite() {
        return Err(Error::InvalidCoordinate { lon, lat });
    }
    let lat = lat.clamp(-MAX_LATITUDE_DEG, MAX_LATITUDE_DEG);
    let x = EARTH_RADIUS_M * lon.to_radians();
    let y = EARTH_RADIUS_M
        * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0)
            .tan()
            .ln();
    Ok(point(x, y))
}

pub fn project_collection(collection: &RawFeatureCollection) -> Result<Vec<Feature>> {
    if collection.kind != "FeatureCollection" {
        return Err(Error::InvalidFeatureCollection {
            message: format!("expected a FeatureCollection, got {}", collection.kind),
        });
    }
    project_features(&collection.features)
}

/// Decodes raw features into map-projected [`Feature`]s, carrying properties
/// through and picking up an optional `style` property.
pub fn project_features(raw: &[RawFeature]) -> Result<Vec<Feature>> {
    let features = raw
        .iter()
        .map(project_feature)
        .collect::<Result<Vec<_>>>()?;
    debug!(count = features.len(), "decoded feature collection");
    Ok(features)
}

fn project_feature(raw: &RawFeature) -> Result<Feature> {
    let (lon, lat) = raw.lon_lat()?;
    let style = match raw.properties.get("style") {
        Some(value) => Some(serde_json::from_value(value.clone())?),
        None => None,
    };
    Ok(Feature {
        id: Uuid::new_v4(),
        geometry: Geometry::Point(forward(lon, lat)?),
        properties: raw.properties.clone(),
        style,
    })
}
