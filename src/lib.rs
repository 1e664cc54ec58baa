//! speakq — serialized speech command queue for screen-reader bridges.
//!
//! A fast producer (the screen-reader driver layer) enqueues parameter and
//! speak commands; one dedicated worker thread drains them, in strict FIFO
//! order, into a speech synthesizer behind the [`SynthDriver`] trait. The
//! queue lock is released for the duration of every engine call, so
//! producers are never blocked by synthesis latency, and the synchronous
//! stop handshake ([`SpeechQueue::request_stop`]) flushes pending commands
//! and halts in-flight audio before returning.
//!
//! ```no_run
//! use speakq::{AdjustMode, Command, SpeechQueue, SynthConfig};
//! # use speakq::{SynthDriver, SynthError};
//! # struct Engine;
//! # impl SynthDriver for Engine {
//! #     fn initialize(&mut self) -> Result<u32, SynthError> { Ok(22_050) }
//! #     fn configure_audio(&mut self, _: u32) -> Result<(), SynthError> { Ok(()) }
//! #     fn set_frequency(&mut self, _: i32, _: AdjustMode) -> Result<(), SynthError> { Ok(()) }
//! #     fn set_pitch(&mut self, _: i32, _: AdjustMode) -> Result<(), SynthError> { Ok(()) }
//! #     fn set_punctuation(&mut self, _: i32, _: AdjustMode) -> Result<(), SynthError> { Ok(()) }
//! #     fn set_rate(&mut self, _: i32, _: AdjustMode) -> Result<(), SynthError> { Ok(()) }
//! #     fn set_volume(&mut self, _: i32, _: AdjustMode) -> Result<(), SynthError> { Ok(()) }
//! #     fn set_voice(&mut self, _: &str) -> Result<(), SynthError> { Ok(()) }
//! #     fn speak(&mut self, _: &[u8]) -> Result<(), SynthError> { Ok(()) }
//! #     fn halt_output(&mut self) {}
//! #     fn terminate(&mut self) {}
//! # }
//! let queue = SpeechQueue::spawn(Engine, SynthConfig::default())?;
//! queue.enqueue(Command::SetVolume { value: 7, adjust: AdjustMode::Absolute });
//! queue.enqueue(Command::speak("hello"));
//! queue.request_stop(); // flush + halt, synchronous
//! # Ok::<(), speakq::SynthError>(())
//! ```

#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tracing_subscriber as _;

pub mod command;
pub mod config;
pub mod error;
mod queue;
pub mod synth;
pub mod worker;

// Re-export key types for convenience
pub use command::{AdjustMode, Command};
pub use config::{DEFAULT_SETTING, SynthConfig};
pub use error::SynthError;
pub use synth::SynthDriver;
pub use worker::SpeechQueue;
