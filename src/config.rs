//! Worker startup configuration.
//!
//! [`SynthConfig`] is built once by the driver layer (command line, config
//! file) and moved into [`SpeechQueue::spawn`](crate::SpeechQueue::spawn).
//! There is no way to change the default voice after the worker has started;
//! runtime parameter changes go through the queue as
//! [`Command`](crate::Command)s.

use serde::{Deserialize, Serialize};

/// Default setting for frequency, pitch, rate, and volume.
pub const DEFAULT_SETTING: i32 = 5;

/// Voice parameters applied exactly once, before the worker starts
/// draining the queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SynthConfig {
    /// Initial voice frequency setting.
    pub frequency: i32,

    /// Initial voice pitch setting.
    pub pitch: i32,

    /// Initial speaking rate.
    pub rate: i32,

    /// Initial output volume.
    pub volume: i32,

    /// Voice selected at startup, e.g. `"en-us"`. `None` keeps the
    /// engine's own default.
    pub voice: Option<String>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_SETTING,
            pitch: DEFAULT_SETTING,
            rate: DEFAULT_SETTING,
            volume: DEFAULT_SETTING,
            voice: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_midscale_with_no_voice() {
        let config = SynthConfig::default();
        assert_eq!(config.frequency, 5);
        assert_eq!(config.pitch, 5);
        assert_eq!(config.rate, 5);
        assert_eq!(config.volume, 5);
        assert!(config.voice.is_none());
    }
}
