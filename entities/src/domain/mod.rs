pub mod configuration;
pub mod constant;
pub mod error;
pub mod id;
pub mod todo;

pub use configuration::*;
pub use constant::*;
pub use error::*;
pub use id::*;
pub use todo::*;
