//! Step-driven stimulus environments.

pub mod probe;
pub mod sentence;

pub use probe::ProbeEnv;
pub use sentence::SentenceEnv;
