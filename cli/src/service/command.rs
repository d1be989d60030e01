use super::{run_shell, Controller};
use crate::{
    algebra::Handler,
    domain::{
        AppContext, CliConfig, ClientError, ABOUT, CHECK_DATE_SUG, CHECK_PATH_SUG, CHECK_URL_SUG,
        DUE_DATE_IS_INVALID, FILE_NOT_FOUND, RUN_LIST_AFTER_CONFIGURE_SUG, RUN_LIST_SUG,
        TEXT_IS_REQUIRED, TODO_NOT_IN_LIST, URL_PROVIDED_IS_INVALID,
    },
};
use clap::{error::ErrorKind, Parser, Subcommand};
use entities::{parse_due_date, Unit};
use std::path::PathBuf;
use tracing::info;
use url::Url;

/// Keep track of what needs doing, from the terminal.
#[derive(Debug, Parser)]
#[command(name = "todo")]
#[command(long_about = ABOUT)]
pub struct TodoCli {
    #[command(subcommand)]
    command: Command,
}

impl TodoCli {
    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every todo
    #[command(alias = "ls")]
    List,
    /// Add a todo
    Add {
        /// What needs doing
        text: String,
        /// Due date, as YYYY-MM-DD
        #[arg(short, long)]
        due: Option<String>,
        /// File to attach
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Edit a todo. Unset flags keep the current text and due date
    Update {
        /// Position in `todo list` or id of the todo
        todo: String,
        /// New text
        #[arg(short, long)]
        text: Option<String>,
        /// New due date, as YYYY-MM-DD
        #[arg(short, long, conflicts_with = "no_due")]
        due: Option<String>,
        /// Remove the due date
        #[arg(long, default_value_t = false)]
        no_due: bool,
        /// File to attach, replacing the current attachment
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Delete a todo and its attachment
    #[command(alias = "rm")]
    Delete {
        /// Position in `todo list` or id of the todo
        todo: String,
    },
    /// Start an interactive session with a form for adding and editing todos
    Shell,
    /// Write the configuration file. It truncates the existing one.
    Configure {
        /// Base url of the todo API
        #[arg(short, long)]
        api: Option<String>,
        /// Request timeout in milliseconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },
}

impl TodoCli {
    fn check_due(&self, ctx: &AppContext, due: Option<&String>) -> Result<Unit, ClientError> {
        if let Some(due) = due {
            parse_due_date(Some(due.as_str())).map_err(|e| {
                ctx.printer().stderr::<TodoCli>(
                    DUE_DATE_IS_INVALID,
                    ErrorKind::InvalidValue,
                    CHECK_DATE_SUG,
                    true,
                );
                ClientError::InvalidArgument(e.to_string())
            })?;
        }

        Ok(())
    }

    fn check_file(&self, ctx: &AppContext, file: Option<&PathBuf>) -> Result<Unit, ClientError> {
        match file {
            Some(path) if !path.is_file() => {
                ctx.printer().stderr::<TodoCli>(
                    &format!("{FILE_NOT_FOUND}{}", path.display()),
                    ErrorKind::InvalidValue,
                    CHECK_PATH_SUG,
                    true,
                );
                Err(ClientError::InvalidArgument(path.display().to_string()))
            }
            _ => Ok(()),
        }
    }

    fn check_text(&self, ctx: &AppContext, text: Option<&String>) -> Result<Unit, ClientError> {
        match text {
            Some(text) if text.trim().is_empty() => {
                ctx.printer().stderr::<TodoCli>(
                    TEXT_IS_REQUIRED,
                    ErrorKind::InvalidValue,
                    None,
                    true,
                );
                Err(ClientError::InvalidArgument(TEXT_IS_REQUIRED.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn failed(&self, ctx: &AppContext, action: &str) -> Unit {
        ctx.printer().stderr::<TodoCli>(
            &format!("Could not {action}, see the log above"),
            ErrorKind::Io,
            None,
            true,
        )
    }
}

impl Handler<AppContext> for TodoCli {
    async fn load(&self) -> Result<AppContext, ClientError> {
        AppContext::new(CliConfig::load()?)
    }

    async fn validate(&self, ctx: &AppContext) -> Result<Unit, ClientError> {
        match &self.command {
            Command::Configure { api, .. } => {
                if let Some(api) = api {
                    Url::parse(api).map_err(|e| {
                        ctx.printer().stderr::<TodoCli>(
                            URL_PROVIDED_IS_INVALID,
                            ErrorKind::InvalidValue,
                            CHECK_URL_SUG,
                            true,
                        );
                        ClientError::InvalidArgument(e.to_string())
                    })?;
                }

                Ok(())
            }
            Command::Add { text, due, file } => {
                self.check_text(ctx, Some(text))?;
                self.check_due(ctx, due.as_ref())?;
                self.check_file(ctx, file.as_ref())
            }
            Command::Update {
                text, due, file, ..
            } => {
                self.check_text(ctx, text.as_ref())?;
                self.check_due(ctx, due.as_ref())?;
                self.check_file(ctx, file.as_ref())
            }
            Command::List | Command::Delete { .. } | Command::Shell => Ok(()),
        }
    }

    async fn run(&self, ctx: &AppContext) -> Result<Unit, ClientError> {
        let base_url = ctx.gateway().base_url().to_string();
        let mut controller = Controller::new(ctx.gateway().clone());

        match &self.command {
            Command::List => {
                if !controller.mount().await {
                    self.failed(ctx, "fetch todos");
                }
                ctx.printer().todos(controller.state(), &base_url);

                Ok(())
            }
            Command::Add { text, due, file } => {
                let form = controller.form_mut();
                form.text = text.clone();
                form.due_date = due.clone().unwrap_or_default();
                form.file = file.clone();

                if !controller.submit().await {
                    self.failed(ctx, "add the todo");
                }

                ctx.printer().stdout("The following todo was added:");
                ctx.printer().todos(controller.state(), &base_url);

                Ok(())
            }
            Command::Update {
                todo,
                text,
                due,
                no_due,
                file,
            } => {
                if !controller.mount().await {
                    self.failed(ctx, "fetch todos");
                }

                if controller.edit(todo).is_none() {
                    ctx.printer().stderr::<TodoCli>(
                        &format!("{TODO_NOT_IN_LIST}{todo}"),
                        ErrorKind::InvalidValue,
                        RUN_LIST_SUG,
                        true,
                    );
                }

                let form = controller.form_mut();
                if let Some(text) = text {
                    form.text = text.clone();
                }
                if let Some(due) = due {
                    form.due_date = due.clone();
                }
                if *no_due {
                    form.due_date.clear();
                }
                form.file = file.clone();

                if !controller.submit().await {
                    self.failed(ctx, "update the todo");
                }

                ctx.printer().todos(controller.state(), &base_url);

                Ok(())
            }
            Command::Delete { todo } => {
                if !controller.mount().await {
                    self.failed(ctx, "fetch todos");
                }

                let Some(id) = controller.state().find(todo).map(|t| t.id.clone()) else {
                    ctx.printer().stderr::<TodoCli>(
                        &format!("{TODO_NOT_IN_LIST}{todo}"),
                        ErrorKind::InvalidValue,
                        RUN_LIST_SUG,
                        true,
                    );
                    return Ok(());
                };

                if !controller.delete(&id).await {
                    self.failed(ctx, "delete the todo");
                }

                ctx.printer().stdout(&format!("Deleted {id}"));

                Ok(())
            }
            Command::Shell => run_shell(&mut controller, ctx.printer(), &base_url).await,
            Command::Configure { api, timeout } => {
                let Some(path) = CliConfig::path() else {
                    return Err(ClientError::Config(
                        "Could not find a home directory".to_string(),
                    ));
                };

                let config = CliConfig::new(
                    api.clone()
                        .unwrap_or_else(|| ctx.config().api_base_url().to_string()),
                    timeout.or(ctx.config().http_timeout()),
                );
                config.save(&path)?;

                info!("Configuration written to {}", path.display());
                ctx.printer().stdout(RUN_LIST_AFTER_CONFIGURE_SUG);

                Ok(())
            }
        }
    }
}
