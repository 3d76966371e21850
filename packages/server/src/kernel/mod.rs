// Pipeline wiring and server-side sinks
pub mod deps;
pub mod input;
pub mod sheets_sink;

pub use deps::*;
pub use input::*;
pub use sheets_sink::*;
