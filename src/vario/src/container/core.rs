use std::collections::HashMap;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use oneshot::{Receiver, Sender};
use parking_lot::{RwLock, RwLockWriteGuard};

use crate::container::injector::{
    AmbiguousVariantRegistrationSnafu, CallContext, ContextForwardingInjectorProxy, Injector,
    InjectorError, NotFoundSnafu,
};
use crate::container::registry::{RegisteredProvider, Registration, RegistrationMap};
use crate::container::{Managed, SharedManaged};
use crate::descriptor::TypeDescriptor;
use crate::provider::{Provider, SharedProvider};
use crate::resolver::{Resolution, ResolverChain};

pub struct ContainerCore {
    registrations: Arc<RegistrationMap>,
    resolvers: Arc<ResolverChain>,
    managed: RwLock<SharedManagedObjectData>,
}

impl ContainerCore {
    pub fn new(registrations: RegistrationMap, resolvers: ResolverChain) -> Self {
        Self {
            registrations: Arc::new(registrations),
            resolvers: Arc::new(resolvers),
            managed: RwLock::new(SharedManagedObjectData::new()),
        }
    }

    pub fn registrations(&self) -> &RegistrationMap {
        &self.registrations
    }

    fn get_object(
        &self,
        requested: &TypeDescriptor,
        parent: Option<&CallContext<'_>>,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        tracing::trace!(service = %requested, "resolving service");
        let registration = self.find_registration(requested)?;
        let service = registration.service();
        let context = match parent {
            Some(parent) => parent.append(service),
            None => CallContext::new(service),
        };

        match registration.provider() {
            RegisteredProvider::Singleton(provider) => {
                if let Some(object) = self.try_get_constructed_object(service) {
                    return Ok(object);
                }
                self.get_shared_object(provider.as_ref(), &context)
            }
            RegisteredProvider::Transient(provider) => {
                self.get_unbounded_object(provider.as_ref(), &context)
            }
        }
    }

    /// Returns the registration serving `requested`: the exact one if it
    /// exists, or the one chosen by the resolver chain.
    pub fn find_registration(
        &self,
        requested: &TypeDescriptor,
    ) -> Result<&Registration, InjectorError> {
        if let Some(registration) = self.registrations.get(requested) {
            return Ok(registration);
        }

        match self
            .resolvers
            .resolve(requested, self.registrations.as_slice())
        {
            Resolution::Resolved(registration) => Ok(registration),
            Resolution::Ambiguous(candidates) => AmbiguousVariantRegistrationSnafu {
                requested: requested.clone(),
                candidates: candidates
                    .into_iter()
                    .map(|registration| registration.service().clone())
                    .collect::<Vec<_>>(),
            }
            .fail(),
            Resolution::Unresolved => NotFoundSnafu {
                service: requested.clone(),
            }
            .fail(),
        }
    }

    fn try_get_constructed_object(&self, service: &TypeDescriptor) -> Option<Box<dyn Managed>> {
        let managed = self.managed.read();
        managed
            .objects
            .get(service)
            .map(|object| (**object).dyn_clone().upcast_managed())
    }

    fn get_shared_object(
        &self,
        provider: &dyn SharedProvider,
        context: &CallContext<'_>,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        let service = context.service();
        let mut managed = self.managed.write();

        if let Some(object) = managed.objects.get(service) {
            // Constructed by another thread between the read and the write lock.
            return Ok((**object).dyn_clone().upcast_managed());
        }

        if let Some(object_context) = managed.constructing.get_mut(service) {
            if object_context.is_constructed_by_current_thread() {
                Err(self.stop_construction_on_cyclic_dependency(managed, service))
            } else {
                self.wait_for_constructed_object(managed, service)
            }
        } else {
            self.construct_shared_object(managed, provider, context)
        }
    }

    fn stop_construction_on_cyclic_dependency(
        &self,
        managed: RwLockWriteGuard<SharedManagedObjectData>,
        service: &TypeDescriptor,
    ) -> InjectorError {
        tracing::debug!(service = %service, "detected a cyclic dependency");
        let err = InjectorError::CyclicDependency {
            service: service.clone(),
        };
        let response = WaitResponse::Error(err.clone());
        self.notify_waiters(managed, service, response);
        err
    }

    fn wait_for_constructed_object(
        &self,
        managed: RwLockWriteGuard<SharedManagedObjectData>,
        service: &TypeDescriptor,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        let receiver = self.register_waiter_on_object_context(managed, service);
        self.get_object_on_object_context_response(receiver, service)
    }

    fn register_waiter_on_object_context(
        &self,
        mut managed: RwLockWriteGuard<SharedManagedObjectData>,
        service: &TypeDescriptor,
    ) -> Receiver<WaitResponse> {
        let (sender, receiver) = oneshot::channel();
        let Some(object_context) = managed.constructing.get_mut(service) else {
            unreachable!("whether `object_context` exists should be checked before calling this method")
        };
        object_context.register_waiter(sender);
        receiver
    }

    fn get_object_on_object_context_response(
        &self,
        receiver: Receiver<WaitResponse>,
        service: &TypeDescriptor,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        match receiver.recv() {
            Ok(WaitResponse::Constructed) => {
                let managed = self.managed.read();
                let Some(object) = managed.objects.get(service) else {
                    unreachable!("`object` should already be put into `self.managed.objects`")
                };
                Ok((**object).dyn_clone().upcast_managed())
            }
            Ok(WaitResponse::Error(err)) => Err(err),
            Err(_) => unreachable!("the peer should send a message"),
        }
    }

    fn construct_shared_object(
        &self,
        mut managed: RwLockWriteGuard<SharedManagedObjectData>,
        provider: &dyn SharedProvider,
        context: &CallContext<'_>,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        let service = context.service();
        let on_thread = thread::current().id();
        managed
            .constructing
            .insert(service.clone(), ConstructingObjectContext::new(on_thread));
        drop(managed);

        tracing::trace!(service = %service, "constructing singleton object");
        let proxy = ContextForwardingInjectorProxy::new(self, context);
        match provider.dyn_provide_shared(&proxy, context) {
            Ok(object) => {
                let mut managed = self.managed.write();
                managed.objects.insert(service.clone(), object.dyn_clone());
                self.notify_waiters(managed, service, WaitResponse::Constructed);
                Ok(object.upcast_managed())
            }
            Err(err) => {
                let managed = self.managed.write();
                self.notify_waiters(managed, service, WaitResponse::Error(err.clone()));
                Err(err)
            }
        }
    }

    fn notify_waiters(
        &self,
        mut managed: RwLockWriteGuard<SharedManagedObjectData>,
        service: &TypeDescriptor,
        response: WaitResponse,
    ) {
        if let Some(object_context) = managed.constructing.remove(service) {
            drop(managed);
            object_context.notify(response);
        }
    }

    fn get_unbounded_object(
        &self,
        provider: &dyn Provider,
        context: &CallContext<'_>,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        let service = context.service();
        if context.trace().previous_exist(service) {
            tracing::debug!(service = %service, "detected a cyclic dependency");
            Err(InjectorError::CyclicDependency {
                service: service.clone(),
            })
        } else {
            let proxy = ContextForwardingInjectorProxy::new(self, context);
            provider.dyn_provide(&proxy, context)
        }
    }
}

impl Injector for ContainerCore {
    fn dyn_get(&self, service: &TypeDescriptor) -> Result<Box<dyn Managed>, InjectorError> {
        self.get_object(service, None)
    }

    fn dyn_get_dependency<'a>(
        &self,
        service: &TypeDescriptor,
        context: &'a CallContext<'a>,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        self.get_object(service, Some(context))
    }

    fn services(&self) -> Vec<TypeDescriptor> {
        self.registrations.services()
    }
}

struct SharedManagedObjectData {
    objects: HashMap<TypeDescriptor, Box<dyn SharedManaged>>,
    constructing: HashMap<TypeDescriptor, ConstructingObjectContext>,
}

impl SharedManagedObjectData {
    fn new() -> Self {
        Self {
            objects: HashMap::new(),
            constructing: HashMap::new(),
        }
    }
}

struct ConstructingObjectContext {
    on_thread: ThreadId,
    waiters: Vec<Sender<WaitResponse>>,
}

impl ConstructingObjectContext {
    fn new(on_thread: ThreadId) -> Self {
        Self {
            on_thread,
            waiters: Vec::new(),
        }
    }

    fn is_constructed_by_current_thread(&self) -> bool {
        thread::current().id() == self.on_thread
    }

    fn register_waiter(&mut self, sender: Sender<WaitResponse>) {
        self.waiters.push(sender);
    }

    fn notify(self, response: WaitResponse) {
        for sender in self.waiters {
            let _ = sender.send(response.clone());
        }
    }
}

#[derive(Debug, Clone)]
enum WaitResponse {
    Constructed,
    Error(InjectorError),
}
