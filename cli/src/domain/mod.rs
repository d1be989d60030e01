mod config;
mod constant;
mod context;
mod error;
mod state;

pub use config::*;
pub use constant::*;
pub use context::*;
pub use error::*;
pub use state::*;
