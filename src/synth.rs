//! Synthesizer facade — the capability boundary to the speech engine.
//!
//! The worker thread owns exactly one [`SynthDriver`] for its whole
//! lifetime, so implementations never see concurrent calls. What they must
//! tolerate is *temporal* overlap in the audio path: `speak` may return as
//! soon as the engine has accepted the text, while the audio is still
//! playing, and `halt_output` must be able to cut that audio short.

use crate::command::AdjustMode;
use crate::error::SynthError;

/// Engine-agnostic speech synthesizer interface.
///
/// Implementations wrap a concrete engine (espeak-ng bindings, a network
/// synthesizer, a test double). Every method may block; the worker releases
/// the queue lock around each call so producers are never held up by
/// synthesis latency.
pub trait SynthDriver: Send {
    /// Start the engine. Returns the output sample rate in Hz.
    fn initialize(&mut self) -> Result<u32, SynthError>;

    /// Configure the audio output path for the engine's sample rate.
    fn configure_audio(&mut self, sample_rate: u32) -> Result<(), SynthError>;

    /// Adjust the voice frequency setting.
    fn set_frequency(&mut self, value: i32, adjust: AdjustMode) -> Result<(), SynthError>;

    /// Adjust the voice pitch setting.
    fn set_pitch(&mut self, value: i32, adjust: AdjustMode) -> Result<(), SynthError>;

    /// Adjust the punctuation verbosity level.
    fn set_punctuation(&mut self, value: i32, adjust: AdjustMode) -> Result<(), SynthError>;

    /// Adjust the speaking rate.
    fn set_rate(&mut self, value: i32, adjust: AdjustMode) -> Result<(), SynthError>;

    /// Adjust the output volume.
    fn set_volume(&mut self, value: i32, adjust: AdjustMode) -> Result<(), SynthError>;

    /// Select a voice by name.
    fn set_voice(&mut self, name: &str) -> Result<(), SynthError>;

    /// Speak a buffer of text. May block until the engine has accepted it;
    /// audio can still be playing when this returns.
    fn speak(&mut self, text: &[u8]) -> Result<(), SynthError>;

    /// Stop any audio the engine is currently producing or playing.
    fn halt_output(&mut self);

    /// Shut the engine down. Called once, when the worker exits.
    fn terminate(&mut self);
}
