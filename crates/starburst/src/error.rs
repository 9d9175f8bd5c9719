pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown cluster id: {cluster_id}")]
    UnknownCluster { cluster_id: u64 },

    #[error("invalid feature collection: {message}")]
    InvalidFeatureCollection { message: String },

    #[error("invalid coordinate: lon={lon}, lat={lat}")]
    InvalidCoordinate { lon: f64, lat: f64 },

    #[error("feature model JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
