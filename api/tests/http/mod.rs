mod attachments;
mod todos;
