mod config;
mod constant;
mod response;

pub use config::*;
pub use constant::*;
pub use response::*;
