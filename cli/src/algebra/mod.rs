mod gateway;
mod handler;

pub use gateway::*;
pub use handler::*;
