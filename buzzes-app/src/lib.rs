pub mod console;
pub mod error;
pub mod screens;
pub mod state;
pub mod worker;

pub use console::{Command, Console, Reply};
pub use error::AppError;
pub use state::AppState;
