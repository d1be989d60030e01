use crate::{
    algebra::Gateway,
    domain::{ClientState, FormState, Mode},
};
use entities::Id;
use tracing::{debug, error};

/// Drives [`ClientState`] through the gateway. Every action awaits its
/// single request; failures are logged and leave the state untouched.
pub struct Controller<G: Gateway> {
    gateway: G,
    state: ClientState,
}

impl<G: Gateway> Controller<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: ClientState::default(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        self.state.form_mut()
    }

    /// Fetches every record. On failure the list is left empty.
    pub async fn mount(&mut self) -> bool {
        match self.gateway.list().await {
            Ok(todos) => {
                debug!("Loaded {} todos", todos.len());
                self.state.loaded(todos);
                true
            }
            Err(e) => {
                error!("Error fetching todos: {e}");
                self.state.loaded(Vec::new());
                false
            }
        }
    }

    /// Creates a record from the form, or updates the one being edited.
    pub async fn submit(&mut self) -> bool {
        let form = self.state.form().clone();
        let editing = match self.state.mode() {
            Mode::Create => None,
            Mode::Edit(id) => Some(id.clone()),
        };

        match editing {
            None => match self.gateway.create(&form).await {
                Ok(todo) => {
                    debug!("Created {}", todo.id);
                    self.state.created(todo);
                    true
                }
                Err(e) => {
                    error!("Error adding todo: {e}");
                    false
                }
            },
            Some(id) => match self.gateway.update(&id, &form).await {
                Ok(todo) => {
                    debug!("Updated {}", todo.id);
                    self.state.updated(todo);
                    true
                }
                Err(e) => {
                    error!("Error updating todo: {e}");
                    false
                }
            },
        }
    }

    pub async fn delete(&mut self, id: &Id) -> bool {
        match self.gateway.delete(id).await {
            Ok(()) => {
                debug!("Deleted {id}");
                self.state.deleted(id);
                true
            }
            Err(e) => {
                error!("Error deleting todo: {e}");
                false
            }
        }
    }

    /// Loads the record matching `selector` (position or id) into the form.
    pub fn edit(&mut self, selector: &str) -> Option<&Id> {
        let todo = self.state.find(selector)?.clone();
        self.state.begin_edit(todo);

        self.state.editing().map(|t| &t.id)
    }

    pub fn cancel_edit(&mut self) {
        self.state.cancel_edit();
    }
}
