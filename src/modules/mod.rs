pub mod docs;
pub mod events;
pub mod genres;
pub mod support;

use catalog_kernel::{settings::Settings, ModuleRegistry};

/// Register all resource modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) {
    registry.register(events::create_module());
    registry.register(genres::create_module(&settings.auth));
}
