use crate::domain::{ClientState, Mode};
use clap::{
    builder::StyledStr,
    error::{ContextKind, ContextValue, ErrorKind},
    CommandFactory,
};
use entities::{Todo, Unit, DUE_DATE_FORMAT};
use std::fmt::Write;
use std::io::Write as IoWrite;
use tabled::{settings::Style, Table, Tabled};
use tracing::warn;

#[derive(Debug, Clone, Copy)]
pub struct Printer;

#[derive(Tabled)]
struct TodoRow {
    #[tabled(rename = "#")]
    position: String,
    #[tabled(rename = "Text")]
    text: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Attachment")]
    attachment: String,
    #[tabled(rename = "Id")]
    id: String,
}

impl TodoRow {
    fn new(position: usize, todo: &Todo, editing: bool, base_url: &str) -> Self {
        Self {
            position: if editing {
                format!("{position}*")
            } else {
                position.to_string()
            },
            text: todo.text.clone(),
            due: todo
                .due_date
                .map(|d| d.format(DUE_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            attachment: todo
                .attachment_path
                .as_deref()
                .map(|p| format!("{base_url}{p}"))
                .unwrap_or_default(),
            id: todo.id.to_string(),
        }
    }
}

impl Printer {
    pub fn stderr<T>(
        &self,
        error: &str,
        kind: ErrorKind,
        sugg: impl Into<Option<&'static str>>,
        is_fatal: bool,
    ) -> Unit
    where
        T: CommandFactory,
    {
        let mut cmd = T::command();
        let mut err = cmd.error(kind, error);

        if let Some(sugg) = sugg.into() {
            let mut suggestion = StyledStr::new();
            suggestion.write_str(sugg).expect(sugg);

            err.insert(
                ContextKind::Suggested,
                ContextValue::StyledStrs(vec![suggestion]),
            );
        }

        if is_fatal {
            err.exit()
        } else if let Err(e) = err.print() {
            warn!("Could not print error {error}: {e}");
        }
    }

    pub fn stdout(&self, message: &str) -> Unit {
        println!("{}", message);
    }

    pub fn write(&self, message: &str) -> Unit {
        let mut stdout = std::io::stdout();
        if let Err(e) = write!(stdout, "{}", message).and_then(|_| stdout.flush()) {
            warn!("Could not write to stdout: {e}");
        }
    }

    pub fn todos(&self, state: &ClientState, base_url: &str) -> Unit {
        self.stdout(&render_todos(state, base_url));
    }
}

/// Renders the record list as a table. The row being edited is marked
/// with `*` after its position; attachments are shown as absolute URLs.
pub fn render_todos(state: &ClientState, base_url: &str) -> String {
    if state.todos().is_empty() {
        return "No todos yet.".to_string();
    }

    let editing = state.editing().map(|t| &t.id);
    let rows = state
        .todos()
        .iter()
        .enumerate()
        .map(|(i, todo)| TodoRow::new(i + 1, todo, editing == Some(&todo.id), base_url));

    Table::new(rows).with(Style::modern_rounded()).to_string()
}

pub fn render_form(state: &ClientState) -> String {
    let form = state.form();
    let mode = match state.mode() {
        Mode::Create => "adding a new todo".to_string(),
        Mode::Edit(id) => format!("editing {id}"),
    };
    let due = if form.due_date.is_empty() {
        "-"
    } else {
        form.due_date.as_str()
    };
    let file = form
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "Form ({mode})\n  text: {}\n  due:  {due}\n  file: {file}",
        form.text
    )
}
