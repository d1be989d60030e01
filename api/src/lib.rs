pub mod domain;
pub mod helper;
pub mod logic;
pub mod router;
pub mod server;
