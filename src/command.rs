//! Speech command model.
//!
//! One [`Command`] is one unit of work for the synthesizer worker: either a
//! voice-parameter change or a request to speak a buffer of text. The queue
//! is the single owner of a command from enqueue until it is dispatched and
//! consumed (or flushed by a stop), so every payload is owned — no borrowed
//! buffers ever cross the producer/worker boundary.

use serde::{Deserialize, Serialize};

/// How a parameter value is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdjustMode {
    /// Set the parameter to the given value.
    Absolute,

    /// Add the (signed) value to the parameter's current setting.
    Relative,
}

/// A queued speech command.
///
/// Parameter variants carry a value on the driver's fixed scale plus an
/// [`AdjustMode`]. `SpeakText` carries the raw text bytes exactly as
/// received from the screen-reader driver layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Command {
    /// Adjust the voice frequency setting.
    SetFrequency { value: i32, adjust: AdjustMode },

    /// Adjust the voice pitch setting.
    SetPitch { value: i32, adjust: AdjustMode },

    /// Adjust the punctuation verbosity level.
    SetPunctuation { value: i32, adjust: AdjustMode },

    /// Adjust the speaking rate.
    SetRate { value: i32, adjust: AdjustMode },

    /// Adjust the output volume.
    SetVolume { value: i32, adjust: AdjustMode },

    /// Select a voice by name.
    ///
    /// Accepted into the queue for protocol compatibility, but voice changes
    /// only take effect through the startup default — see the worker module.
    SetVoice { name: String },

    /// Speak a buffer of text.
    SpeakText { text: Vec<u8> },
}

impl Command {
    /// Convenience constructor for a speak request.
    #[must_use]
    pub fn speak(text: impl Into<Vec<u8>>) -> Self {
        Self::SpeakText { text: text.into() }
    }

    /// Short name of the command variant, for log output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SetFrequency { .. } => "set_frequency",
            Self::SetPitch { .. } => "set_pitch",
            Self::SetPunctuation { .. } => "set_punctuation",
            Self::SetRate { .. } => "set_rate",
            Self::SetVolume { .. } => "set_volume",
            Self::SetVoice { .. } => "set_voice",
            Self::SpeakText { .. } => "speak_text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speak_constructor_owns_the_bytes() {
        let cmd = Command::speak("hello");
        assert_eq!(
            cmd,
            Command::SpeakText {
                text: b"hello".to_vec()
            }
        );
    }

    #[test]
    fn kind_names_match_variants() {
        let cmd = Command::SetPitch {
            value: 3,
            adjust: AdjustMode::Relative,
        };
        assert_eq!(cmd.kind(), "set_pitch");
        assert_eq!(Command::speak("x").kind(), "speak_text");
    }
}
