// Interface adapters: page model rendering, event DTOs and port implementations.

pub mod page;
pub mod protocol;
pub mod state;
