use entities::{Id, Todo, DUE_DATE_FORMAT};
use std::path::PathBuf;

/// Pending values of the create/edit form, sent as-is on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub text: String,
    /// Empty means "no due date".
    pub due_date: String,
    pub file: Option<PathBuf>,
}

impl FormState {
    pub fn clear(&mut self) {
        *self = FormState::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode<'a> {
    Create,
    Edit(&'a Id),
}

/// Everything the client holds between requests: the last known records,
/// the form, and the record the form is editing, if any.
#[derive(Debug, Clone, Default)]
pub struct ClientState {
    todos: Vec<Todo>,
    form: FormState,
    editing: Option<Todo>,
}

impl ClientState {
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn editing(&self) -> Option<&Todo> {
        self.editing.as_ref()
    }

    pub fn mode(&self) -> Mode<'_> {
        match &self.editing {
            Some(todo) => Mode::Edit(&todo.id),
            None => Mode::Create,
        }
    }

    pub fn loaded(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
    }

    pub fn created(&mut self, todo: Todo) {
        self.todos.push(todo);
        self.form.clear();
    }

    pub fn updated(&mut self, todo: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|t| t.id == todo.id) {
            *slot = todo;
        }
        self.form.clear();
        self.editing = None;
    }

    pub fn deleted(&mut self, id: &Id) {
        self.todos.retain(|t| &t.id != id);

        if self.editing.as_ref().is_some_and(|t| &t.id == id) {
            self.cancel_edit();
        }
    }

    /// Copies text and due date into the form. The file selector starts
    /// empty; picking a file is the only way to replace an attachment.
    pub fn begin_edit(&mut self, todo: Todo) {
        self.form = FormState {
            text: todo.text.clone(),
            due_date: todo
                .due_date
                .map(|d| d.format(DUE_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            file: None,
        };
        self.editing = Some(todo);
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form.clear();
    }

    /// Looks a record up by 1-based list position or by id.
    pub fn find(&self, selector: &str) -> Option<&Todo> {
        match selector.parse::<usize>() {
            Ok(position) if position >= 1 => self.todos.get(position - 1),
            _ => self.todos.iter().find(|t| t.id.as_str() == selector),
        }
    }
}
