// Public failure messages, one per operation
pub const FETCH_TODOS_FAILED: &str = "Failed to fetch todos";
pub const ADD_TODO_FAILED: &str = "Failed to add todo";
pub const UPDATE_TODO_FAILED: &str = "Failed to update todo";
pub const DELETE_TODO_FAILED: &str = "Failed to delete todo";
pub const TODO_NOT_FOUND: &str = "Todo not found";

// Confirmations
pub const TODO_DELETED: &str = "Todo deleted";

// Attachments
pub const MAX_NAME_ATTEMPTS: i64 = 16;
