use std::path::PathBuf;

use embedded_hal::delay::DelayNs;
use linux_embedded_hal::Delay;
use tracing::{debug, info, warn};

use crate::cli::CliOptions;
use crate::config::{self, ConfigError, ScreenFlags};
use crate::display::{DeviceSettings, DisplayManager, SETTLE_DELAY_MS};
use crate::errors::Result;
use crate::lifecycle::{Pacer, SleepPacer};
use crate::panel::{Panel, StatusPanel};
use crate::rotation::RotationTable;
use crate::scheduler::Scheduler;
use crate::screen_factory::ScreenFactory;

pub struct Application {
    options: CliOptions,
    config_path: PathBuf,
    device: DeviceSettings,
}

impl Application {
    pub fn new(options: CliOptions) -> Self {
        Self {
            options,
            config_path: config::config_path(),
            device: DeviceSettings::default(),
        }
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    /// Loads the screen flags and turns them into the rotation order.
    /// Configuration problems are reported and never stop startup.
    pub fn load_rotation(&self) -> RotationTable {
        let debug = self.options.debug;
        let (flags, warning) = ScreenFlags::load_or_default(&self.config_path, debug);
        if let Some(err) = warning {
            warn!("{}; using defaults (all screens enabled)", err);
        }

        let table = RotationTable::from_flags(&flags);
        if table.is_empty() {
            warn!("{}", ConfigError::EmptyRotation);
        } else if debug {
            let descriptions = ScreenFactory::get_screen_descriptions();
            for (position, screen) in table.screens().iter().enumerate() {
                debug!(
                    "rotation slot {}: {} ({})",
                    position,
                    screen,
                    descriptions.get(screen).copied().unwrap_or_default()
                );
            }
        }

        table
    }

    /// Opens the panel and rotates screens until a termination signal.
    pub fn run(&self) -> Result<()> {
        let device = &self.device;
        self.run_with(
            || DisplayManager::open(device).map(StatusPanel::new),
            Delay,
            SleepPacer::from_signals(),
        )
    }

    fn run_with<P, D, W, F>(&self, open_panel: F, mut settle: D, pacer: W) -> Result<()>
    where
        P: Panel,
        D: DelayNs,
        W: Pacer,
        F: FnOnce() -> Result<P>,
    {
        let table = self.load_rotation();

        let panel = open_panel()?;
        info!(
            "Display ready on {} at 0x{:02X}, rotating {} screen(s)",
            self.device.bus,
            self.device.address,
            table.len()
        );

        // The panel ignores commands until its supply has settled
        settle.delay_ms(SETTLE_DELAY_MS);

        Scheduler::new(panel, pacer, table).run();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::rotation::ScreenId;
    use crate::scheduler::tests::{Event, FakePacer, FakePanel, Log};
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    struct FakeDelay {
        log: Log,
    }

    impl DelayNs for FakeDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.log.borrow_mut().push(Event::Settle(Duration::from_nanos(ns.into())));
        }

        fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Event::Settle(Duration::from_millis(ms.into())));
        }
    }

    fn app_with_config(contents: &str) -> (Application, NamedTempFile) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let app = Application::new(CliOptions::default()).with_config_path(file.path());
        (app, file)
    }

    #[test]
    fn test_missing_config_uses_full_rotation() {
        let dir = tempfile::tempdir().unwrap();
        let app = Application::new(CliOptions { debug: true })
            .with_config_path(dir.path().join("display.cfg"));
        assert_eq!(app.load_rotation().screens(), &ScreenId::ALL);
    }

    #[test]
    fn test_device_failure_is_fatal_and_renders_nothing() {
        let (app, _file) = app_with_config("show_hostname = 1\n");
        let log = Log::default();
        let pacer = FakePacer::new(log.clone(), 1);

        let result = app.run_with(
            || -> Result<FakePanel> { Err(AppError::display_init("no ACK from 0x3C")) },
            FakeDelay { log: log.clone() },
            pacer,
        );

        assert!(matches!(result, Err(AppError::Display(_))));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_end_to_end_rotation() {
        let (app, _file) = app_with_config(
            "temperature: 1\ncpuMemory: 0\nsdMemory: 1\nhostname: 1\n",
        );
        let log = Log::default();
        let panel_log = log.clone();
        let pacer = FakePacer::new(log.clone(), 12);

        app.run_with(
            move || {
                Ok(FakePanel {
                    log: panel_log,
                    failing: Vec::new(),
                })
            },
            FakeDelay { log: log.clone() },
            pacer,
        )
        .unwrap();

        let rendered: Vec<ScreenId> = log
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Render(screen) => Some(*screen),
                _ => None,
            })
            .collect();
        assert_eq!(
            rendered,
            vec![
                ScreenId::Hostname,
                ScreenId::Temperature,
                ScreenId::SdMemory,
                ScreenId::Hostname,
            ]
        );
    }

    #[test]
    fn test_settle_delay_between_open_and_first_render() {
        let (app, _file) = app_with_config("show_cpu_memory = 0\n");
        let log = Log::default();
        let panel_log = log.clone();
        let pacer = FakePacer::new(log.clone(), 1);

        app.run_with(
            move || {
                Ok(FakePanel {
                    log: panel_log,
                    failing: Vec::new(),
                })
            },
            FakeDelay { log: log.clone() },
            pacer,
        )
        .unwrap();

        assert_eq!(
            log.borrow()[..3],
            [
                Event::Settle(Duration::from_millis(150)),
                Event::Discover,
                Event::Render(ScreenId::Hostname),
            ]
        );
        let settles = log
            .borrow()
            .iter()
            .filter(|event| matches!(event, Event::Settle(_)))
            .count();
        assert_eq!(settles, 1);
    }
}
