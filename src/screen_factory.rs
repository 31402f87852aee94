use std::collections::HashMap;

use crate::rotation::ScreenId;
use crate::screens::*;

pub struct ScreenFactory;

impl ScreenFactory {
    pub fn create_screen(screen: ScreenId) -> Box<dyn Screen> {
        match screen {
            ScreenId::Temperature => Box::new(TemperatureScreen),
            ScreenId::CpuMemory => Box::new(CpuMemoryScreen),
            ScreenId::SdMemory => Box::new(SdMemoryScreen),
            ScreenId::Hostname => Box::new(HostnameScreen),
        }
    }

    /// Lookup table from screen id to its renderer, covering every screen.
    pub fn create_registry() -> HashMap<ScreenId, Box<dyn Screen>> {
        ScreenId::ALL
            .into_iter()
            .map(Self::create_screen)
            .map(|screen| (screen.id(), screen))
            .collect()
    }

    pub fn get_screen_descriptions() -> HashMap<ScreenId, &'static str> {
        let mut descriptions = HashMap::new();
        descriptions.insert(ScreenId::Temperature, "CPU temperature from the thermal zone");
        descriptions.insert(ScreenId::CpuMemory, "CPU load and RAM usage");
        descriptions.insert(ScreenId::SdMemory, "SD card (root filesystem) usage");
        descriptions.insert(ScreenId::Hostname, "Hostname and IP address");
        descriptions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_screen_matches_id() {
        for id in ScreenId::ALL {
            assert_eq!(ScreenFactory::create_screen(id).id(), id);
        }
    }

    #[test]
    fn test_registry_covers_all_screens() {
        let registry = ScreenFactory::create_registry();
        assert_eq!(registry.len(), 4);
        for (id, screen) in &registry {
            assert_eq!(screen.id(), *id);
        }
        assert_eq!(registry[&ScreenId::SdMemory].title(), "SD Card");
    }

    #[test]
    fn test_every_screen_described() {
        let descriptions = ScreenFactory::get_screen_descriptions();
        assert!(ScreenId::ALL.iter().all(|id| descriptions.contains_key(id)));
    }
}
