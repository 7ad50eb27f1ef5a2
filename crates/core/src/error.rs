#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("patient not found")]
    NotFound,
    #[error("patient already exists: {0}")]
    AlreadyExists(String),
    #[error("invalid sort field '{0}' (select from height, weight, bmi)")]
    InvalidSortField(String),
    #[error("invalid order '{0}' (select from asc, desc)")]
    InvalidSortOrder(String),
    #[error("failed to read patient file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write patient file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialize patient data: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize patient data: {0}")]
    Deserialization(serde_json::Error),
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
