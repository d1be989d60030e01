mod content_dir;
mod multipart;

pub use content_dir::*;
pub use multipart::*;
