use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Display error: {0}")]
    Display(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Signal setup error: {0}")]
    Signal(#[from] nix::Error),

    #[error("Logging error: {0}")]
    Logging(String),
}

// Convenience type alias
pub type Result<T> = std::result::Result<T, AppError>;

// Helper functions for creating errors
impl AppError {
    pub fn display_init(msg: &str) -> Self {
        AppError::Display(msg.to_string())
    }

    pub fn render(msg: &str) -> Self {
        AppError::Render(msg.to_string())
    }

    pub fn logging(msg: &str) -> Self {
        AppError::Logging(msg.to_string())
    }
}

// The ssd1306 driver reports errors that only implement Debug
pub trait DisplayErrorExt<T> {
    fn display_err(self, context: &str) -> Result<T>;
    fn render_err(self, context: &str) -> Result<T>;
}

impl<T, E: fmt::Debug> DisplayErrorExt<T> for std::result::Result<T, E> {
    fn display_err(self, context: &str) -> Result<T> {
        self.map_err(|e| AppError::display_init(&format!("{}: {:?}", context, e)))
    }

    fn render_err(self, context: &str) -> Result<T> {
        self.map_err(|e| AppError::render(&format!("{}: {:?}", context, e)))
    }
}
