use std::ffi::c_int;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

use crate::errors::Result;

// Set from the signal handler, so it has to be a static
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_signal(_sig: c_int) {
    SHUTDOWN.store(true, Ordering::SeqCst);
}

/// Routes SIGTERM and SIGINT to the shutdown flag polled by [`SleepPacer`].
pub fn install_signal_handlers() -> Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(handle_signal),
        SaFlags::empty(),
        SigSet::empty(),
    );

    // The handler only touches an atomic, which is async-signal-safe
    unsafe {
        sigaction(Signal::SIGTERM, &action)?;
        sigaction(Signal::SIGINT, &action)?;
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Blocking waits between renders. Waits are issued in short steps so a
/// termination request is noticed within one step.
pub trait Pacer {
    fn wait(&mut self, step: Duration) -> Flow;

    fn hold(&mut self, steps: u32, step: Duration) -> Flow {
        for _ in 0..steps {
            if self.wait(step) == Flow::Stop {
                return Flow::Stop;
            }
        }
        Flow::Continue
    }
}

pub struct SleepPacer {
    stop: &'static AtomicBool,
}

impl SleepPacer {
    pub fn new(stop: &'static AtomicBool) -> Self {
        Self { stop }
    }

    /// Pacer driven by the process signal handlers.
    pub fn from_signals() -> Self {
        Self::new(&SHUTDOWN)
    }

    fn flow(&self) -> Flow {
        if self.stop.load(Ordering::SeqCst) {
            Flow::Stop
        } else {
            Flow::Continue
        }
    }
}

impl Pacer for SleepPacer {
    fn wait(&mut self, step: Duration) -> Flow {
        if self.flow() == Flow::Stop {
            return Flow::Stop;
        }
        thread::sleep(step);
        self.flow()
    }
}
