//! The lightbox: configuration, role lookup, fit geometry and the per-container
//! open/close state machine.

pub mod config;
pub mod controller;
pub mod fit;
pub mod roles;
pub mod state;

use slotmap::new_key_type;

pub use config::{CompiledConfig, ConfigError, ContentType, LightboxConfig, LightboxError};
pub use controller::{LightboxController, ACTIVE_CLASS};
pub use fit::{fit_image, Placement};
pub use roles::Roles;
pub use state::{ContainerState, LightboxEvent, Phase};

new_key_type! {
    /// Handle to one registered lightbox (one `lighthouse` call).
    pub struct LightboxId;
}
