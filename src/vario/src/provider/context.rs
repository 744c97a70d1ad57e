use crate::descriptor::TypeDescriptor;

/// Additional information about a single request, available to providers.
///
/// The context records the chain of registrations being constructed, from the
/// outermost request down to the current one.
#[derive(Clone)]
pub struct CallContext<'a> {
    trace: InjectionTrace<'a>,
}

impl<'a> CallContext<'a> {
    pub fn new(service: &'a TypeDescriptor) -> Self {
        Self {
            trace: InjectionTrace::new(service),
        }
    }

    pub fn append<'b>(&'b self, service: &'b TypeDescriptor) -> CallContext<'b> {
        CallContext {
            trace: self.trace.append(service),
        }
    }

    /// Returns the service type of the registration currently being
    /// constructed.
    pub fn service(&self) -> &TypeDescriptor {
        self.trace.service()
    }

    pub fn trace(&self) -> &InjectionTrace<'_> {
        &self.trace
    }
}

#[derive(Clone)]
pub struct InjectionTrace<'a> {
    service: &'a TypeDescriptor,
    previous: Option<&'a InjectionTrace<'a>>,
}

impl<'a> InjectionTrace<'a> {
    pub fn new(service: &'a TypeDescriptor) -> Self {
        Self {
            service,
            previous: None,
        }
    }

    pub fn append<'b>(&'b self, service: &'b TypeDescriptor) -> InjectionTrace<'b> {
        InjectionTrace {
            service,
            previous: Some(self),
        }
    }

    pub fn service(&self) -> &TypeDescriptor {
        self.service
    }

    pub fn previous(&self) -> Option<&InjectionTrace<'a>> {
        self.previous
    }

    /// Returns true if `service` is already being constructed by an outer
    /// request.
    pub fn previous_exist(&self, service: &TypeDescriptor) -> bool {
        let mut this = self;
        while let Some(previous) = this.previous() {
            if previous.service() == service {
                return true;
            }
            this = previous;
        }
        false
    }

    /// Returns the number of requests in the chain, the current one included.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut this = self;
        while let Some(previous) = this.previous() {
            depth += 1;
            this = previous;
        }
        depth
    }
}
