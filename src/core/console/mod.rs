// Console module - Interactive serial console bridge
pub mod filter;
pub mod input;
pub mod output;
pub mod session;
pub mod signal;
pub mod timestamp;

pub use filter::sanitize;
pub use input::InputPump;
pub use output::OutputPump;
pub use session::SessionController;
pub use signal::SessionSignal;
pub use timestamp::TimestampFormatter;
