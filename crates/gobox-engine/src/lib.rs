pub mod client;
pub mod engine;
pub mod error;

pub use client::{BuildOutcome, Builder};
pub use engine::{BuildRecord, BuildRequest, BuildStream, DockerEngine, Engine};
pub use error::EngineError;
