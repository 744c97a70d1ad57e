use std::error::Error;
use std::marker::PhantomData;
use std::sync::Arc;

use vario::prelude::*;

fn main() {
    let container = Container::init(AppModule::new("event-handlers")).unwrap();

    dispatch::<UserSignedUp>(&container);
    dispatch::<PasswordReset>(&container);
    dispatch::<OrderPlaced>(&container);
    dispatch::<Heartbeat>(&container);
    dispatch::<OrderShipped>(&container);
}

fn dispatch<E: Described>(container: &Container) {
    match container.get_of::<Handles<E>, Arc<dyn EventHandler>>() {
        Ok(handler) => handler.handle(&descriptor::of::<E>()),
        Err(InjectorError::NotFound { .. }) => {
            eprintln!("no handler for {}", descriptor::of::<E>());
        }
        Err(err) => eprintln!("error: {err}"),
    }
}

struct AppModule {
    app_name: &'static str,
}

impl AppModule {
    fn new(app_name: &'static str) -> Self {
        Self { app_name }
    }
}

impl Module for AppModule {
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        enable_variant_resolution(configurer);

        bind_of::<&'static str>()
            .to_instance(self.app_name)
            .set_on(configurer);

        // Serves every user event without a more specific handler.
        bind_of::<Handles<UserEvent>>()
            .to_closure(|injector| {
                let app_name = injector.get_of::<&'static str, &'static str>()?;
                Ok(Ok::<_, Box<dyn Error + Send + Sync>>(
                    Arc::new(AuditHandler { app_name }) as Arc<dyn EventHandler>
                ))
            })
            .as_singleton()
            .set_on(configurer);

        bind_of::<Handles<PasswordReset>>()
            .to_instance(Arc::new(MailHandler) as Arc<dyn EventHandler>)
            .as_singleton()
            .set_on(configurer);

        // Both of these can handle an `OrderShipped`, so dispatching it fails.
        bind_of::<Handles<OrderEvent>>()
            .to_instance(Arc::new(LedgerHandler) as Arc<dyn EventHandler>)
            .set_on(configurer);
        bind_of::<Handles<Notifiable>>()
            .to_instance(Arc::new(MailHandler) as Arc<dyn EventHandler>)
            .set_on(configurer);

        Ok(())
    }
}

#[derive(Described)]
struct DomainEvent;

#[derive(Described)]
#[described(extends(DomainEvent))]
struct UserEvent;

#[derive(Described)]
#[described(extends(UserEvent))]
struct UserSignedUp;

#[derive(Described)]
#[described(extends(UserEvent))]
struct PasswordReset;

#[derive(Described)]
#[described(extends(DomainEvent))]
struct OrderEvent;

#[derive(Described)]
#[described(extends(OrderEvent))]
struct OrderPlaced;

#[derive(Described)]
#[described(extends(OrderEvent, Notifiable))]
struct OrderShipped;

#[derive(Described)]
struct Notifiable;

#[derive(Described)]
struct Heartbeat;

/// The contract of handlers of `E`. A handler of a base event can handle any
/// event derived from it.
#[derive(Described)]
#[described(contravariant(E))]
struct Handles<E>(PhantomData<E>);

trait EventHandler: Send + Sync + 'static {
    fn handle(&self, event: &TypeDescriptor);
}

struct AuditHandler {
    app_name: &'static str,
}

impl EventHandler for AuditHandler {
    fn handle(&self, event: &TypeDescriptor) {
        eprintln!("[{}] audited {event}", self.app_name);
    }
}

struct MailHandler;

impl EventHandler for MailHandler {
    fn handle(&self, event: &TypeDescriptor) {
        eprintln!("mailed a notification about {event}");
    }
}

struct LedgerHandler;

impl EventHandler for LedgerHandler {
    fn handle(&self, event: &TypeDescriptor) {
        eprintln!("recorded {event} in the ledger");
    }
}
