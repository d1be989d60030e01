pub mod gateway;
pub mod todo;

pub use gateway::*;
