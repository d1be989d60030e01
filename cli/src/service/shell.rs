use super::{render_form, render_todos, Controller, Printer};
use crate::{
    algebra::Gateway,
    domain::{
        ClientError, DUE_DATE_IS_INVALID, FILE_NOT_FOUND, SHELL_HELP, SHELL_PROMPT,
        TEXT_IS_REQUIRED, TODO_NOT_IN_LIST,
    },
};
use entities::parse_due_date;
use std::path::PathBuf;

/// One line typed at the `todo>` prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Refresh,
    Text(String),
    Due(Option<String>),
    File(Option<PathBuf>),
    Submit,
    Edit(String),
    Cancel,
    Delete(String),
    Help,
    Quit,
}

impl ShellCommand {
    /// Parses a line with shell quoting rules. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<ShellCommand>, ClientError> {
        let words = shlex::split(line)
            .ok_or_else(|| ClientError::InvalidArgument("Unbalanced quotes".to_string()))?;
        let Some((head, rest)) = words.split_first() else {
            return Ok(None);
        };

        let single = |what: &str| match rest {
            [value] => Ok(value.clone()),
            _ => Err(ClientError::InvalidArgument(format!(
                "`{head}` expects exactly one {what}"
            ))),
        };
        let clearable = |value: String| (value != "-").then_some(value);

        let command = match head.as_str() {
            "list" | "ls" => ShellCommand::List,
            "refresh" => ShellCommand::Refresh,
            "text" => ShellCommand::Text(rest.join(" ")),
            "due" => ShellCommand::Due(clearable(single("date")?)),
            "file" => ShellCommand::File(clearable(single("path")?).map(PathBuf::from)),
            "submit" | "save" => ShellCommand::Submit,
            "edit" => ShellCommand::Edit(single("position or id")?),
            "cancel" => ShellCommand::Cancel,
            "delete" | "rm" => ShellCommand::Delete(single("position or id")?),
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => {
                return Err(ClientError::InvalidArgument(format!(
                    "Unknown command `{other}`, type `help`"
                )))
            }
        };

        Ok(Some(command))
    }
}

/// What the loop should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Applies one command to the controller and returns the text to show.
pub async fn apply<G: Gateway>(
    controller: &mut Controller<G>,
    command: ShellCommand,
    base_url: &str,
) -> (Flow, String) {
    let output = match command {
        ShellCommand::List => format!(
            "{}\n{}",
            render_todos(controller.state(), base_url),
            render_form(controller.state())
        ),
        ShellCommand::Refresh => {
            controller.mount().await;
            render_todos(controller.state(), base_url)
        }
        ShellCommand::Text(text) => {
            controller.form_mut().text = text;
            render_form(controller.state())
        }
        ShellCommand::Due(due) => {
            let due = due.unwrap_or_default();
            if parse_due_date(Some(due.as_str())).is_err() {
                return (Flow::Continue, DUE_DATE_IS_INVALID.to_string());
            }
            controller.form_mut().due_date = due;
            render_form(controller.state())
        }
        ShellCommand::File(file) => {
            if let Some(path) = file.as_ref().filter(|p| !p.is_file()) {
                return (
                    Flow::Continue,
                    format!("{FILE_NOT_FOUND}{}", path.display()),
                );
            }
            controller.form_mut().file = file;
            render_form(controller.state())
        }
        ShellCommand::Submit => {
            if controller.state().form().text.trim().is_empty() {
                return (Flow::Continue, TEXT_IS_REQUIRED.to_string());
            }
            if controller.submit().await {
                render_todos(controller.state(), base_url)
            } else {
                render_form(controller.state())
            }
        }
        ShellCommand::Edit(selector) => {
            if controller.edit(&selector).is_some() {
                render_form(controller.state())
            } else {
                format!("{TODO_NOT_IN_LIST}{selector}")
            }
        }
        ShellCommand::Cancel => {
            controller.cancel_edit();
            render_form(controller.state())
        }
        ShellCommand::Delete(selector) => {
            let Some(id) = controller.state().find(&selector).map(|t| t.id.clone()) else {
                return (Flow::Continue, format!("{TODO_NOT_IN_LIST}{selector}"));
            };
            controller.delete(&id).await;
            render_todos(controller.state(), base_url)
        }
        ShellCommand::Help => SHELL_HELP.to_string(),
        ShellCommand::Quit => return (Flow::Stop, String::new()),
    };

    (Flow::Continue, output)
}

/// Reads commands from stdin until `quit` or end of input.
pub async fn run_shell<G: Gateway>(
    controller: &mut Controller<G>,
    printer: &Printer,
    base_url: &str,
) -> Result<(), ClientError> {
    controller.mount().await;
    printer.stdout(&render_todos(controller.state(), base_url));
    printer.stdout(SHELL_HELP);

    loop {
        printer.write(SHELL_PROMPT);

        let Some(line) = super::readline()? else {
            printer.stdout("");
            return Ok(());
        };

        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                printer.stdout(&e.to_string());
                continue;
            }
        };

        match apply(controller, command, base_url).await {
            (Flow::Stop, _) => return Ok(()),
            (Flow::Continue, output) => printer.stdout(&output),
        }
    }
}
