//! Shared queue state and the stop rendezvous.
//!
//! Two decoupled lock/condvar pairs, so a stop request is never missed
//! because the worker was asleep on the wrong wait:
//!
//! - `state` + `work_available`: the FIFO command queue plus the
//!   stop-requested and shutdown flags. Producers append under the lock and
//!   notify; the worker sleeps here while idle.
//! - the stop coordinator: a serialization mutex that admits one outstanding
//!   stop request at a time, and a generation counter the worker bumps (with
//!   a broadcast) once it has flushed the queue and halted output.
//!
//! Commands move: an entry leaves the queue by value when the worker takes
//! it for dispatch and is pushed back at the head only if dispatch fails.
//! Nothing ever holds an aliased reference into the queue.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

use crate::command::Command;

/// Queue contents and worker control flags, guarded by [`Shared::state`].
#[derive(Debug, Default)]
pub(crate) struct QueueState {
    /// Pending commands, head first. Strict FIFO: insertion order is
    /// execution order.
    pub entries: VecDeque<Command>,

    /// Set by `request_stop`, cleared by the worker after flush + halt.
    pub stop_requested: bool,

    /// Set when the worker must exit (handle dropped, or startup failed).
    /// Never cleared once set.
    pub shutdown: bool,
}

/// Stop-handshake progress, guarded by [`Shared::stop_sync`].
#[derive(Debug, Default)]
pub(crate) struct StopState {
    /// Number of completed flush-and-halt cycles.
    pub completed: u64,
}

/// Synchronization hub shared by the producer handle and the worker thread.
#[derive(Debug, Default)]
pub(crate) struct Shared {
    pub state: Mutex<QueueState>,
    pub work_available: Condvar,

    /// Serializes stop requesters: held for the entire handshake, so at
    /// most one stop request is outstanding at a time.
    stop_serial: Mutex<()>,
    stop_sync: Mutex<StopState>,
    stop_acked: Condvar,
}

impl Shared {
    /// Append a command at the tail and wake the worker.
    ///
    /// Never blocks beyond the lock. Returns `false` if the worker has shut
    /// down, in which case the command is dropped.
    pub fn enqueue(&self, command: Command) -> bool {
        {
            let mut state = self.state.lock().unwrap();
            if state.shutdown {
                tracing::debug!(kind = command.kind(), "worker gone, dropping command");
                return false;
            }
            state.entries.push_back(command);
        }
        self.work_available.notify_one();
        true
    }

    /// Flush the queue and halt output, returning once the worker has
    /// acknowledged. The worker half of the handshake lives in the worker
    /// module.
    ///
    /// If the worker has already shut down there is nothing left to halt;
    /// the queue is flushed here and the call returns immediately.
    pub fn request_stop(&self) {
        let _turn = self.stop_serial.lock().unwrap();

        let start = self.stop_sync.lock().unwrap().completed;
        {
            let mut state = self.state.lock().unwrap();
            if state.shutdown {
                state.entries.clear();
                return;
            }
            state.stop_requested = true;
        }
        // Wake the worker even if it is idle.
        self.work_available.notify_one();

        let mut sync = self.stop_sync.lock().unwrap();
        while sync.completed == start {
            sync = self.stop_acked.wait(sync).unwrap();
        }
    }

    /// Worker half of the stop handshake: record one completed
    /// flush-and-halt cycle and wake the requester.
    pub fn acknowledge_stop(&self) {
        {
            let mut sync = self.stop_sync.lock().unwrap();
            sync.completed += 1;
        }
        self.stop_acked.notify_all();
    }

    /// Mark the worker as gone and wake anything sleeping on the queue.
    pub fn begin_shutdown(&self) {
        {
            let mut state = self.state.lock().unwrap();
            state.shutdown = true;
        }
        self.work_available.notify_one();
    }

    /// Number of commands waiting to execute.
    pub fn pending(&self) -> usize {
        self.state.lock().unwrap().entries.len()
    }

    /// Whether the worker has shut down (or never got past startup).
    pub fn is_shutdown(&self) -> bool {
        self.state.lock().unwrap().shutdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::AdjustMode;
    use std::sync::Arc;
    use std::thread;

    fn volume(value: i32) -> Command {
        Command::SetVolume {
            value,
            adjust: AdjustMode::Absolute,
        }
    }

    #[test]
    fn enqueue_preserves_arrival_order() {
        let shared = Shared::default();
        for v in 0..5 {
            assert!(shared.enqueue(volume(v)));
        }

        let state = shared.state.lock().unwrap();
        let values: Vec<i32> = state
            .entries
            .iter()
            .map(|cmd| match cmd {
                Command::SetVolume { value, .. } => *value,
                other => panic!("unexpected entry: {other:?}"),
            })
            .collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn enqueue_after_shutdown_drops_the_command() {
        let shared = Shared::default();
        shared.begin_shutdown();
        assert!(!shared.enqueue(volume(1)));
        assert_eq!(shared.pending(), 0);
    }

    #[test]
    fn request_stop_returns_once_acknowledged() {
        let shared = Arc::new(Shared::default());
        shared.enqueue(volume(1));
        shared.enqueue(volume(2));

        // Stand-in for the worker: wait for the flag, flush, acknowledge.
        let worker_shared = Arc::clone(&shared);
        let worker = thread::spawn(move || {
            let mut state = worker_shared.state.lock().unwrap();
            while !state.stop_requested {
                state = worker_shared.work_available.wait(state).unwrap();
            }
            state.entries.clear();
            state.stop_requested = false;
            drop(state);
            worker_shared.acknowledge_stop();
        });

        shared.request_stop();
        assert_eq!(shared.pending(), 0);
        worker.join().unwrap();
    }

    #[test]
    fn request_stop_on_shutdown_queue_flushes_and_returns() {
        let shared = Shared::default();
        shared.enqueue(volume(1));
        shared.begin_shutdown();
        // No worker to acknowledge; must not hang.
        shared.request_stop();
        assert_eq!(shared.pending(), 0);
    }
}
