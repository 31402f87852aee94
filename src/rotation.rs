use std::fmt;

use crate::config::ScreenFlags;

/// The status views the panel can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Temperature,
    CpuMemory,
    SdMemory,
    Hostname,
}

impl ScreenId {
    /// Rotation priority. Operators read "first screen after boot" off this order.
    pub const ALL: [ScreenId; 4] = [
        ScreenId::Temperature,
        ScreenId::CpuMemory,
        ScreenId::SdMemory,
        ScreenId::Hostname,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScreenId::Temperature => "temperature",
            ScreenId::CpuMemory => "cpu_memory",
            ScreenId::SdMemory => "sd_memory",
            ScreenId::Hostname => "hostname",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered, dense list of the enabled screens. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationTable {
    screens: Vec<ScreenId>,
}

impl RotationTable {
    pub fn from_flags(flags: &ScreenFlags) -> Self {
        let screens = ScreenId::ALL
            .into_iter()
            .filter(|&screen| flags.is_enabled(screen))
            .collect();
        Self { screens }
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn contains(&self, screen: ScreenId) -> bool {
        self.screens.contains(&screen)
    }

    pub fn get(&self, cursor: &RotationCursor) -> Option<ScreenId> {
        self.screens.get(cursor.index()).copied()
    }

    pub fn screens(&self) -> &[ScreenId] {
        &self.screens
    }
}

/// Position of the scheduler inside a [`RotationTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationCursor {
    index: usize,
}

impl RotationCursor {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves to the next slot, wrapping at `len`. A zero length leaves the cursor at 0.
    pub fn advance(&mut self, len: usize) {
        self.index = match len {
            0 => 0,
            len => (self.index + 1) % len,
        };
    }
}
