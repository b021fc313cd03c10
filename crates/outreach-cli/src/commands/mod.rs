//! Command implementations.

pub mod config;
pub mod feedback;
pub mod generate;
pub mod history;

pub use self::config::execute_config;
pub use self::feedback::execute_feedback;
pub use self::generate::execute_generate;
pub use self::history::execute_history;
