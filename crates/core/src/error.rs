#[derive(Debug, thiserror::Error)]
pub enum TripError {
    #[error("Please send {0} parameter in the URL endpoint")]
    MissingParameter(&'static str),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read trip catalogue: {0}")]
    FileRead(std::io::Error),
    #[error("failed to deserialize trip catalogue: {0}")]
    YamlDeserialization(serde_yaml::Error),
    #[error("duplicate trip id in catalogue: {0}")]
    DuplicateTripId(String),
}

pub type TripResult<T> = std::result::Result<T, TripError>;
