// Configuration
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const CONFIG_FILE_PATH: &str = ".todo";
pub const ENV_PREFIX: &str = "TODO";
pub const DEFAULT_API: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_MILLIS: u64 = 30000;

// Error messages
pub const URL_PROVIDED_IS_INVALID: &str = "URL provided is invalid";
pub const DUE_DATE_IS_INVALID: &str = "Due date must look like YYYY-MM-DD";
pub const FILE_NOT_FOUND: &str = "File does not exist: ";
pub const TEXT_IS_REQUIRED: &str = "Todo text must not be empty";
pub const TODO_NOT_IN_LIST: &str = "No todo matches ";

// Suggestions
pub const CHECK_URL_SUG: &str = "Use a full URL such as http://localhost:3000";
pub const CHECK_DATE_SUG: &str = "Pass a date such as 2024-01-31, or omit the flag";
pub const CHECK_PATH_SUG: &str = "Check the path and try again";
pub const RUN_LIST_SUG: &str = "Run `todo list` to see the available ids";
pub const RUN_LIST_AFTER_CONFIGURE_SUG: &str =
    "The configuration file was written. Try `todo list` next";

// Shell
pub const SHELL_PROMPT: &str = "todo> ";
pub const SHELL_HELP: &str = "\
Commands:
  list | ls              show the todos and the form
  refresh                reload todos from the server
  text <words...>        set the form text
  due <YYYY-MM-DD | ->   set or clear the form due date
  file <path | ->        pick or clear the attachment
  submit | save          create, or update the todo being edited
  edit <#|id>            load a todo into the form
  cancel                 leave edit mode and clear the form
  delete | rm <#|id>     delete a todo
  help                   show this message
  quit | exit            leave the shell";

// Metadata
pub const ABOUT: &str = "Manage your todo list from the terminal: list, add, edit and delete todos, with optional due dates and one attachment each.";
