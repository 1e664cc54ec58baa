//! The synthesizer worker — single consumer of the command queue.
//!
//! [`SpeechQueue`] spawns one dedicated OS thread that owns the
//! [`SynthDriver`] for its entire lifetime. The thread cycles through four
//! states:
//!
//! - **Idle** — asleep on the work-available condvar.
//! - **Draining** — popping one command per pass, dispatching it to the
//!   driver with the queue lock released (the call may block on synthesis or
//!   audio submission), then deciding under the lock whether the command was
//!   consumed or stays at the head for another attempt.
//! - **Stopping** — a stop request was observed at an entry boundary: flush
//!   every pending command without dispatching it, halt in-flight audio,
//!   acknowledge the requester.
//! - **Shutdown** — terminal: terminate the engine and exit.
//!
//! Stop requests are checked only *between* commands. A driver call already
//! in flight is never preempted; cutting its audio short is `halt_output`'s
//! job.
//!
//! A command whose dispatch keeps failing is retried on every pass and
//! blocks everything enqueued behind it. That retention is deliberate (a
//! failed command is never silently dropped) and pinned by tests.

use std::sync::Arc;
use std::thread;

use crate::command::{AdjustMode, Command};
use crate::config::SynthConfig;
use crate::error::SynthError;
use crate::queue::Shared;
use crate::synth::SynthDriver;

/// Handle to the synthesizer worker thread.
///
/// Cloning is not supported; share the handle behind an `Arc` if multiple
/// producer threads need it. All methods take `&self`. Dropping the handle
/// shuts the worker down and joins it.
pub struct SpeechQueue {
    shared: Arc<Shared>,
    worker: Option<thread::JoinHandle<()>>,
}

impl SpeechQueue {
    /// Spawn the worker thread, handing it the driver and the startup
    /// defaults.
    ///
    /// Engine initialization happens on the worker thread; a failure there
    /// does not surface here but leaves the handle with
    /// [`is_running`](Self::is_running) `== false` once startup completes.
    pub fn spawn<D>(driver: D, config: SynthConfig) -> Result<Self, SynthError>
    where
        D: SynthDriver + 'static,
    {
        let shared = Arc::new(Shared::default());
        let worker_shared = Arc::clone(&shared);

        let worker = thread::Builder::new()
            .name("speakq-worker".into())
            .spawn(move || run(driver, &config, &worker_shared))
            .map_err(|e| SynthError::Init(format!("failed to spawn worker thread: {e}")))?;

        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Append a command to the queue. Fire-and-forget: never blocks on
    /// synthesis, and no per-command result is reported back.
    pub fn enqueue(&self, command: Command) {
        self.shared.enqueue(command);
    }

    /// Flush the queue and halt any in-flight audio.
    ///
    /// Blocks until the worker has acknowledged. On return the queue is
    /// empty and the driver's `halt_output` has been invoked. A driver call
    /// already in progress when this is called runs to completion first.
    /// Concurrent callers are served one at a time.
    pub fn request_stop(&self) {
        self.shared.request_stop();
    }

    /// Number of commands waiting to execute.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.shared.pending()
    }

    /// Whether the worker is still alive. `false` after shutdown, or when
    /// engine startup failed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.shared.is_shutdown()
    }

    /// Shut the worker down and join it. Pending commands are discarded
    /// without being dispatched; the engine is terminated.
    pub fn shutdown(mut self) {
        self.shutdown_and_join();
    }

    fn shutdown_and_join(&mut self) {
        self.shared.begin_shutdown();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for SpeechQueue {
    fn drop(&mut self) {
        self.shutdown_and_join();
    }
}

/// Worker thread body.
fn run<D: SynthDriver>(mut driver: D, config: &SynthConfig, shared: &Shared) {
    let healthy = start_engine(&mut driver);

    // Startup defaults are attempted even when the engine failed to come
    // up; the failures are logged and otherwise ignored (lenient startup).
    apply_defaults(&mut driver, config);

    if !healthy {
        tracing::warn!("engine startup failed; synthesizer worker will not run");
        shared.begin_shutdown();
    }

    let mut state = shared.state.lock().unwrap();
    loop {
        if state.shutdown {
            break;
        }

        state = shared
            .work_available
            .wait_while(state, |s| {
                s.entries.is_empty() && !s.stop_requested && !s.shutdown
            })
            .unwrap();

        // Draining. Stop and shutdown are observed only at these entry
        // boundaries, never mid-call.
        while !state.shutdown && !state.stop_requested {
            let Some(command) = state.entries.pop_front() else {
                break;
            };

            drop(state);
            let result = dispatch(&mut driver, &command);
            state = shared.state.lock().unwrap();

            if let Err(e) = result {
                tracing::warn!(kind = command.kind(), error = %e, "command failed, retrying");
                // Back to the head: a failing command is retried on the
                // next pass and is never silently dropped, so it blocks
                // everything behind it until it succeeds or a stop flushes
                // the queue.
                state.entries.push_front(command);
            }
        }

        if state.stop_requested {
            let flushed = state.entries.len();
            state.entries.clear();
            state.stop_requested = false;
            drop(state);

            driver.halt_output();
            tracing::debug!(flushed, "stop: queue flushed, output halted");
            shared.acknowledge_stop();

            state = shared.state.lock().unwrap();
        }
    }

    // A stop request can land in the same instant the shutdown flag is set;
    // it still gets its flush, halt, and acknowledgment.
    let stop_pending = state.stop_requested;
    state.stop_requested = false;
    state.entries.clear();
    drop(state);

    if stop_pending {
        driver.halt_output();
        shared.acknowledge_stop();
    }

    driver.terminate();
    tracing::info!("synthesizer worker stopped");
}

/// Bring the engine and its audio path up. Returns `false` on failure.
fn start_engine<D: SynthDriver>(driver: &mut D) -> bool {
    match driver.initialize() {
        Ok(sample_rate) => {
            tracing::info!(sample_rate, "speech engine initialized");
            match driver.configure_audio(sample_rate) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "audio setup failed");
                    false
                }
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "engine failed to initialize");
            false
        }
    }
}

/// Apply the configured voice and parameter defaults, once.
fn apply_defaults<D: SynthDriver>(driver: &mut D, config: &SynthConfig) {
    if let Some(voice) = config.voice.as_deref() {
        if let Err(e) = driver.set_voice(voice) {
            tracing::warn!(voice, error = %e, "default voice rejected");
        }
    }
    if let Err(e) = driver.set_frequency(config.frequency, AdjustMode::Absolute) {
        tracing::warn!(error = %e, "default frequency rejected");
    }
    if let Err(e) = driver.set_pitch(config.pitch, AdjustMode::Absolute) {
        tracing::warn!(error = %e, "default pitch rejected");
    }
    if let Err(e) = driver.set_rate(config.rate, AdjustMode::Absolute) {
        tracing::warn!(error = %e, "default rate rejected");
    }
    if let Err(e) = driver.set_volume(config.volume, AdjustMode::Absolute) {
        tracing::warn!(error = %e, "default volume rejected");
    }
}

/// Map one command to the corresponding driver operation.
fn dispatch<D: SynthDriver>(driver: &mut D, command: &Command) -> Result<(), SynthError> {
    match command {
        Command::SetFrequency { value, adjust } => driver.set_frequency(*value, *adjust),
        Command::SetPitch { value, adjust } => driver.set_pitch(*value, *adjust),
        Command::SetPunctuation { value, adjust } => driver.set_punctuation(*value, *adjust),
        Command::SetRate { value, adjust } => driver.set_rate(*value, *adjust),
        Command::SetVolume { value, adjust } => driver.set_volume(*value, *adjust),
        // Voice changes only take effect through the startup default; a
        // queued SetVoice is consumed without touching the engine.
        Command::SetVoice { .. } => Ok(()),
        Command::SpeakText { text } => driver.speak(text),
    }
}
