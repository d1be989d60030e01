mod client;
mod command;
mod controller;
mod helper;
mod printer;
mod shell;

pub use client::*;
pub use command::*;
pub use controller::*;
pub use helper::*;
pub use printer::*;
pub use shell::*;
