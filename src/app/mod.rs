pub mod console;
pub mod display;
pub mod session;

pub use console::Console;
pub use session::Session;
