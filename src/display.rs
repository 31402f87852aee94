use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::Text,
};
use linux_embedded_hal::I2cdev;
use ssd1306::{prelude::*, I2CDisplayInterface, Ssd1306};
use tracing::debug;

use crate::errors::{DisplayErrorExt, Result};

pub const I2C_BUS: &str = "/dev/i2c-1";
pub const SSD1306_ADDRESS: u8 = 0x3C;
/// Power-up stabilisation time the panel needs before the first frame.
pub const SETTLE_DELAY_MS: u32 = 150;

const DISPLAY_HEIGHT: i32 = 32;
const FIRST_BASELINE: i32 = 8;
const LINE_HEIGHT: i32 = 11;

/// Bus location of the panel.
#[derive(Debug, Clone)]
pub struct DeviceSettings {
    pub bus: String,
    pub address: u8,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            bus: I2C_BUS.to_string(),
            address: SSD1306_ADDRESS,
        }
    }
}

pub struct DisplayManager {
    display: Ssd1306<I2CInterface<I2cdev>, DisplaySize128x32, ssd1306::mode::BufferedGraphicsMode<DisplaySize128x32>>,
}

impl DisplayManager {
    /// Opens the bus and runs the controller init sequence. Either step
    /// failing means there is no usable panel.
    pub fn open(settings: &DeviceSettings) -> Result<Self> {
        let i2c = I2cdev::new(&settings.bus)
            .display_err(&format!("Failed to open I2C bus {}", settings.bus))?;
        let interface = I2CDisplayInterface::new_custom_address(i2c, settings.address);

        let mut display = Ssd1306::new(
            interface,
            DisplaySize128x32,
            DisplayRotation::Rotate0,
        )
        .into_buffered_graphics_mode();

        display.init().display_err(&format!(
            "Failed to initialize display at 0x{:02X} on {}. Check the panel is connected",
            settings.address, settings.bus
        ))?;
        debug!("SSD1306 opened at 0x{:02X} on {}", settings.address, settings.bus);

        Ok(DisplayManager { display })
    }

    pub fn render_content(&mut self, title: &str, content: &str) -> Result<()> {
        self.display.clear(BinaryColor::Off).render_err("Failed to clear frame")?;

        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let lines = std::iter::once(title).chain(content.lines());
        for (line, y_pos) in lines.zip(line_baselines()) {
            Text::new(line, Point::new(0, y_pos), style)
                .draw(&mut self.display)
                .render_err("Failed to draw text")?;
        }

        self.display.flush().render_err("Failed to flush frame")?;
        Ok(())
    }
}

// Baselines of the text rows that fit on the panel, title first
fn line_baselines() -> impl Iterator<Item = i32> {
    (0..)
        .map(|i| FIRST_BASELINE + i * LINE_HEIGHT)
        .take_while(|y| *y < DISPLAY_HEIGHT)
}
