pub mod event_bus;
pub mod frame;
pub mod listeners;
pub mod observable;

pub use event_bus::*;
pub use frame::*;
pub use listeners::*;
pub use observable::*;
