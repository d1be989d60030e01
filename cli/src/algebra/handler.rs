use crate::domain::ClientError;
use entities::Unit;
use std::future::Future;

// Each command is one-shot; the interactive shell keeps its own state
pub trait Handler<Context> {
    fn load(&self) -> impl Future<Output = Result<Context, ClientError>>;

    fn validate(&self, ctx: &Context) -> impl Future<Output = Result<Unit, ClientError>>;

    fn run(&self, ctx: &Context) -> impl Future<Output = Result<Unit, ClientError>>;
}
