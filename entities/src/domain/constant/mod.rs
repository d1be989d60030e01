// Wire constants
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";
pub const TEXT_FIELD: &str = "text";
pub const DUE_DATE_FIELD: &str = "dueDate";
pub const FILE_FIELD: &str = "file";

// HTTP constants
pub const TODOS_PATH: &str = "/api/todos";
pub const UPLOADS_PREFIX: &str = "/uploads";

// Database constants
pub const ID_KEY: &str = "_id";
