//! Frame scheduler: a dedicated thread that ticks a frame on a cadence.
//!
//! The scheduler owns the [`Frame`] outright and pushes rendered output to
//! a sink callback. Control flows in over a channel, so pause, resume, and
//! forced ticks can be requested from any thread without sharing the frame
//! itself.

use super::{Frame, Scene};
use crate::buffer::Pixmap;
use crate::geometry::Rect;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Control messages accepted by a running scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerCommand {
    /// Request a pause (takes effect one tick late, per frame semantics).
    Pause,
    /// Resume from a pause.
    Resume,
    /// Run one forced tick immediately, off the regular cadence.
    ForceTick,
}

/// Drives a [`Frame`] from its own thread at a fixed tick interval.
///
/// After every tick that produced damage, the sink is called with the
/// viewport pixmap and the pulled damage list; the sink runs on the
/// scheduler thread, so it should hand work off rather than block.
pub struct FrameScheduler {
    handle: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
    control_tx: Sender<SchedulerCommand>,
}

impl FrameScheduler {
    /// Spawn a scheduler thread ticking `frame` every `interval`.
    ///
    /// # Panics
    /// Panics if the OS fails to spawn the scheduler thread.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn<S, F>(mut frame: Frame<S>, interval: Duration, mut sink: F) -> Self
    where
        S: Scene + 'static,
        F: FnMut(&Pixmap, &[Rect]) + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        let (control_tx, control_rx) = unbounded();

        let handle = thread::Builder::new()
            .name("pixelframe-scheduler".to_string())
            .spawn(move || {
                Self::run_loop(&mut frame, &control_rx, &shutdown_clone, interval, &mut sink);
            })
            .expect("failed to spawn scheduler thread");

        Self {
            handle: Some(handle),
            shutdown,
            control_tx,
        }
    }

    /// Request a pause.
    pub fn pause(&self) {
        let _ = self.control_tx.send(SchedulerCommand::Pause);
    }

    /// Request a resume.
    pub fn resume(&self) {
        let _ = self.control_tx.send(SchedulerCommand::Resume);
    }

    /// Request one forced tick, bypassing pause and cadence.
    pub fn force_tick(&self) {
        let _ = self.control_tx.send(SchedulerCommand::ForceTick);
    }

    /// Signal the scheduler to shut down.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Shut down and wait for the scheduler thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop<S, F>(
        frame: &mut Frame<S>,
        control_rx: &Receiver<SchedulerCommand>,
        shutdown: &Arc<AtomicBool>,
        interval: Duration,
        sink: &mut F,
    ) where
        S: Scene,
        F: FnMut(&Pixmap, &[Rect]),
    {
        let mut next_tick = Instant::now() + interval;

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            while let Ok(command) = control_rx.try_recv() {
                match command {
                    SchedulerCommand::Pause => frame.pause(),
                    SchedulerCommand::Resume => frame.resume(),
                    SchedulerCommand::ForceTick => {
                        frame.tick(true);
                        Self::flush(frame, sink);
                    }
                }
            }

            let now = Instant::now();
            if now >= next_tick {
                frame.tick(false);
                Self::flush(frame, sink);

                next_tick += interval;
                // Behind schedule: skip the backlog instead of queueing
                // catch-up ticks.
                if next_tick < now {
                    next_tick = now + interval;
                }
            } else {
                let sleep_duration = next_tick - now;
                thread::sleep(sleep_duration.min(Duration::from_millis(1)));
            }
        }
    }

    fn flush<S: Scene, F: FnMut(&Pixmap, &[Rect])>(frame: &mut Frame<S>, sink: &mut F) {
        if !frame.has_damage() {
            return;
        }
        let damage = frame.pull_damage();
        log::trace!("flushing {} damaged sections to sink", damage.len());
        sink(frame.viewport(), &damage);
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
