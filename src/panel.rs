use std::collections::HashMap;

use tracing::debug;

use crate::display::DisplayManager;
use crate::errors::{AppError, Result};
use crate::rotation::ScreenId;
use crate::screen_factory::ScreenFactory;
use crate::screens::{Screen, ScreenContext};

/// What the scheduler needs from the hardware side.
pub trait Panel {
    /// One-shot network discovery, run before the first screen.
    fn discover_address(&mut self);

    fn render(&mut self, screen: ScreenId) -> Result<()>;
}

/// The SSD1306 panel backed by the live system metrics.
pub struct StatusPanel {
    display: DisplayManager,
    screens: HashMap<ScreenId, Box<dyn Screen>>,
    context: ScreenContext,
}

impl StatusPanel {
    pub fn new(display: DisplayManager) -> Self {
        Self {
            display,
            screens: ScreenFactory::create_registry(),
            context: ScreenContext::default(),
        }
    }
}

impl Panel for StatusPanel {
    fn discover_address(&mut self) {
        self.context.discover_address();
        debug!("Discovered IP address {}", self.context.ip_address());
    }

    fn render(&mut self, screen: ScreenId) -> Result<()> {
        let renderer = self
            .screens
            .get(&screen)
            .ok_or_else(|| AppError::render(&format!("No renderer for {} screen", screen)))?;

        self.context.refresh_for(screen);
        let title = renderer.title();
        let content = renderer
            .render(&self.context)
            .map_err(|e| AppError::render(&format!("Failed to render {} screen: {}", screen, e)))?;

        self.display.render_content(&title, &content)
    }
}
