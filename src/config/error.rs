use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Cluster radius must be positive and finite, got {0}")]
    NonPositiveRadius(f64),

    #[error("Radius steps must have strictly increasing zoom, got {0}")]
    UnorderedRadiusSteps(f64),

    #[error("Radius grows with zoom at zoom {zoom} ({radius} px)")]
    IncreasingRadius { zoom: f64, radius: f64 },

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
