use std::time::Duration;

use tracing::{debug, info, warn};

use crate::lifecycle::{Flow, Pacer};
use crate::panel::Panel;
use crate::rotation::{RotationCursor, RotationTable, ScreenId};

pub const DWELL_STEP: Duration = Duration::from_secs(1);
/// Each screen stays up for `DWELL_STEPS * DWELL_STEP`.
pub const DWELL_STEPS: u32 = 3;
/// Hold time of the identity screen shown once at boot.
pub const IDENTITY_STEPS: u32 = 3;

/// Round-robin rotation over the enabled screens.
pub struct Scheduler<P: Panel, W: Pacer> {
    panel: P,
    pacer: W,
    table: RotationTable,
    cursor: RotationCursor,
}

impl<P: Panel, W: Pacer> Scheduler<P, W> {
    pub fn new(panel: P, pacer: W, table: RotationTable) -> Self {
        Self {
            panel,
            pacer,
            table,
            cursor: RotationCursor::default(),
        }
    }

    pub fn cursor(&self) -> RotationCursor {
        self.cursor
    }

    /// Runs until the pacer reports a termination request.
    pub fn run(&mut self) {
        if self.prologue() == Flow::Stop {
            info!("Shutdown requested during startup");
            return;
        }

        if self.table.is_empty() {
            warn!("No screens enabled; panel stays idle until the service is stopped");
            self.idle();
            return;
        }

        while self.step() == Flow::Continue {}
        info!("Shutdown requested, leaving rotation");
    }

    /// Discovers the network address and, when the hostname screen is
    /// enabled, shows it once regardless of its place in the rotation.
    fn prologue(&mut self) -> Flow {
        self.panel.discover_address();

        if self.table.contains(ScreenId::Hostname) {
            self.show(ScreenId::Hostname);
            return self.pacer.hold(IDENTITY_STEPS, DWELL_STEP);
        }

        Flow::Continue
    }

    /// Renders the screen under the cursor, holds it, then advances.
    pub fn step(&mut self) -> Flow {
        let Some(screen) = self.table.get(&self.cursor) else {
            return self.pacer.wait(DWELL_STEP);
        };

        self.show(screen);
        let flow = self.pacer.hold(DWELL_STEPS, DWELL_STEP);
        self.cursor.advance(self.table.len());
        flow
    }

    fn idle(&mut self) {
        while self.pacer.wait(DWELL_STEP) == Flow::Continue {}
    }

    // A failed frame is not retried; the next screen gets its turn on schedule
    fn show(&mut self, screen: ScreenId) {
        debug!("Showing {} screen", screen);
        if let Err(e) = self.panel.render(screen) {
            warn!("Failed to render {} screen: {}", screen, e);
        }
    }
}
