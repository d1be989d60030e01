mod in_memory;
mod mongo;
mod storage;

pub use in_memory::*;
pub use mongo::*;
pub use storage::*;
