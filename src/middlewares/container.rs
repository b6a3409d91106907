use froodi::{async_impl::Container, Context, DefaultScope};
use telers::{
    errors::EventErrorKind,
    event::telegram::HandlerResponse,
    middlewares::{inner::Middleware, Next},
    Request,
};
use tracing::{event, Level};

/// Opens a request scope of the container for each update.
/// The scope is closed after the handler finishes, whatever it returned.
#[derive(Clone)]
pub struct ContainerMiddleware {
    pub container: Container,
}

impl ContainerMiddleware {
    pub const fn new(container: Container) -> Self {
        Self { container }
    }
}

impl Middleware for ContainerMiddleware {
    async fn call(&mut self, mut request: Request, next: Next) -> Result<HandlerResponse, EventErrorKind> {
        let mut context = Context::new();
        context.insert(request.update.clone());

        match self
            .container
            .clone()
            .enter()
            .with_scope(DefaultScope::Request)
            .with_context(context)
            .build()
        {
            Ok(container) => {
                request.extensions.insert(container.clone());

                let resp = next(request).await;
                container.close().await;
                resp
            }
            Err(err) => {
                // Without the scope the handler's dependencies are resolved from the app scope
                event!(Level::ERROR, %err, "Enter request scope err");
                request.extensions.insert(self.container.clone());
                next(request).await
            }
        }
    }
}
