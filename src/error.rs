//! Synthesizer error types.

/// Errors reported by a [`SynthDriver`](crate::SynthDriver).
///
/// The worker loop does not branch on the variant — any error leaves the
/// offending command at the head of the queue for another attempt — but the
/// variants keep log output and driver implementations honest.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// The engine failed to start.
    #[error("engine initialization failed: {0}")]
    Init(String),

    /// The audio output path could not be configured.
    #[error("audio setup failed: {0}")]
    Audio(String),

    /// A voice parameter change was rejected.
    #[error("parameter change rejected: {0}")]
    Parameter(String),

    /// The requested voice does not exist or could not be loaded.
    #[error("voice selection failed: {0}")]
    Voice(String),

    /// Speech synthesis or audio submission failed.
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
}
