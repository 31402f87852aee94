use anyhow::Result;
use sysinfo::System;
use tracing::warn;

use crate::rotation::ScreenId;
use crate::system_info::*;

/// Live data shared by all screens. The IP address is discovered once at
/// startup; everything else is read when a screen is rendered.
pub struct ScreenContext {
    sys: System,
    ip_address: String,
}

impl ScreenContext {
    pub fn new() -> Self {
        Self {
            sys: System::new(),
            ip_address: "N/A".to_string(),
        }
    }

    pub fn discover_address(&mut self) {
        self.ip_address = get_ip_address().unwrap_or_else(|e| {
            warn!("IP address discovery failed: {}", e);
            "N/A".to_string()
        });
    }

    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    pub fn system(&self) -> &System {
        &self.sys
    }

    pub fn refresh_for(&mut self, screen: ScreenId) {
        if screen == ScreenId::CpuMemory {
            self.sys.refresh_cpu();
            self.sys.refresh_memory();
        }
    }
}

impl Default for ScreenContext {
    fn default() -> Self {
        Self::new()
    }
}

// Screen trait for the status views
pub trait Screen {
    fn id(&self) -> ScreenId;
    fn title(&self) -> String;
    fn render(&self, ctx: &ScreenContext) -> Result<String>;
}

pub struct TemperatureScreen;

impl Screen for TemperatureScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Temperature
    }

    fn title(&self) -> String {
        "Temperature".to_string()
    }

    fn render(&self, _ctx: &ScreenContext) -> Result<String> {
        let cpu_temp = get_cpu_temp().unwrap_or_else(|_| "N/A".to_string());
        Ok(format!("CPU: {}", cpu_temp))
    }
}

pub struct CpuMemoryScreen;

impl Screen for CpuMemoryScreen {
    fn id(&self) -> ScreenId {
        ScreenId::CpuMemory
    }

    fn title(&self) -> String {
        "CPU / RAM".to_string()
    }

    fn render(&self, ctx: &ScreenContext) -> Result<String> {
        let sys = ctx.system();
        Ok(format!("{}\n{}", get_cpu_usage(sys), get_memory_info(sys)))
    }
}

pub struct SdMemoryScreen;

impl Screen for SdMemoryScreen {
    fn id(&self) -> ScreenId {
        ScreenId::SdMemory
    }

    fn title(&self) -> String {
        "SD Card".to_string()
    }

    fn render(&self, _ctx: &ScreenContext) -> Result<String> {
        Ok(get_disk_usage())
    }
}

// Device identity: hostname as title, boot-time IP as body
pub struct HostnameScreen;

impl Screen for HostnameScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Hostname
    }

    fn title(&self) -> String {
        get_hostname()
    }

    fn render(&self, ctx: &ScreenContext) -> Result<String> {
        Ok(ctx.ip_address().to_string())
    }
}
