pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::config::{ConfigError, InviteConfig};
pub use frameworks::session::{PageSession, SessionPorts, run};
