#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("container engine unavailable: {detail}; make sure the Docker daemon is installed and running")]
    Unavailable { detail: String },

    #[error("container engine rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
}

impl From<bollard::errors::Error> for EngineError {
    fn from(e: bollard::errors::Error) -> Self {
        match e {
            bollard::errors::Error::DockerResponseServerError {
                status_code,
                message,
            } => EngineError::Rejected {
                status: status_code,
                message,
            },
            other => EngineError::Unavailable {
                detail: other.to_string(),
            },
        }
    }
}
