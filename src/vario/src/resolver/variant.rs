use crate::container::registry::{Configurer, Registration};
use crate::descriptor::TypeDescriptor;
use crate::resolver::{Resolution, TypeResolver};

/// A [`TypeResolver`] which serves a generic contract with a registration of
/// a variance-compatible parameterization of the same contract.
///
/// For a requested `Handler<DerivedEvent>` where `Handler` is contravariant
/// in its parameter, a registration of `Handler<BaseEvent>` is a candidate.
/// Exactly one candidate resolves the request to it, while two or more make
/// the request [`Resolution::Ambiguous`]. Plain types are never handled.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariantResolver;

impl VariantResolver {
    pub fn new() -> Self {
        Self
    }

    /// Returns all registrations of the same generic definition as
    /// `requested`, whose service types can be used as `requested`.
    pub fn candidates<'a>(
        requested: &TypeDescriptor,
        registrations: &'a [Registration],
    ) -> Vec<&'a Registration> {
        let Some(definition) = requested.generic_definition() else {
            return Vec::new();
        };

        registrations
            .iter()
            .filter(|registration| registration.service().generic_definition() == Some(definition))
            .filter(|registration| registration.service().is_assignable_to(requested))
            .collect()
    }
}

impl TypeResolver for VariantResolver {
    fn try_resolve<'a>(
        &self,
        requested: &TypeDescriptor,
        registrations: &'a [Registration],
    ) -> Resolution<'a> {
        if !requested.is_generic() {
            return Resolution::Unresolved;
        }

        tracing::trace!(service = %requested, "searching variant registrations");
        let candidates = Self::candidates(requested, registrations);

        match candidates.len() {
            0 => Resolution::Unresolved,
            1 => {
                let registration = candidates[0];
                tracing::debug!(
                    service = %requested,
                    registration = %registration.service(),
                    "resolved to a variant registration",
                );
                Resolution::Resolved(registration)
            }
            count => {
                tracing::warn!(
                    service = %requested,
                    count,
                    "found ambiguous variant registrations",
                );
                Resolution::Ambiguous(candidates)
            }
        }
    }
}

/// Enables [`VariantResolver`] on the container being configured.
pub trait VariantResolutionExt: Configurer {
    /// Installs a [`VariantResolver`]. Installing it more than once has no
    /// further effect.
    fn enable_variant_resolution(&mut self) {
        self.add_resolver(Box::new(VariantResolver::new()));
    }
}

impl<C: Configurer + ?Sized> VariantResolutionExt for C {}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::container::registry::RegistrationMap;
    use crate::descriptor::Described;
    use crate::provider::instance::InstanceProvider;
    use crate::testing::{self, BaseEvent, DerivedEvent, LeafEvent, OtherEvent, BOXED};

    use super::*;

    fn make_registrations(services: impl IntoIterator<Item = TypeDescriptor>) -> RegistrationMap {
        let mut map = RegistrationMap::new();
        for service in services {
            let name = service.to_string();
            map.insert(Registration::new_transient(
                service,
                Box::new(InstanceProvider::new(name)),
            ));
        }
        map
    }

    fn resolved_service(resolution: Resolution<'_>) -> Option<TypeDescriptor> {
        match resolution {
            Resolution::Resolved(registration) => Some(registration.service().clone()),
            _ => None,
        }
    }

    #[test]
    fn try_resolve_ignores_plain_types() {
        let registrations = make_registrations([i32::descriptor(), BaseEvent::descriptor()]);

        let resolution = VariantResolver.try_resolve(&DerivedEvent::descriptor(), registrations.as_slice());
        assert!(resolution.is_unresolved());
    }

    #[test]
    fn try_resolve_returns_unresolved_when_nothing_is_compatible() {
        let registrations = make_registrations([
            testing::handler::<OtherEvent>(),
            testing::producer::<BaseEvent>(),
            TypeDescriptor::constructed(BOXED, vec![DerivedEvent::descriptor()]),
        ]);

        for requested in [
            testing::handler::<DerivedEvent>(),
            testing::producer::<DerivedEvent>(),
            TypeDescriptor::constructed(BOXED, vec![BaseEvent::descriptor()]),
        ] {
            let resolution = VariantResolver.try_resolve(&requested, registrations.as_slice());
            assert!(resolution.is_unresolved(), "{requested} should stay unresolved");
        }
    }

    #[test]
    fn try_resolve_succeeds_with_single_contravariant_candidate() {
        let registrations = make_registrations([
            i32::descriptor(),
            testing::handler::<BaseEvent>(),
            testing::handler::<OtherEvent>(),
        ]);

        let resolution =
            VariantResolver.try_resolve(&testing::handler::<DerivedEvent>(), registrations.as_slice());
        assert_eq!(resolved_service(resolution), Some(testing::handler::<BaseEvent>()));
    }

    #[test]
    fn try_resolve_succeeds_with_single_covariant_candidate() {
        let registrations = make_registrations([testing::producer::<DerivedEvent>()]);

        let resolution =
            VariantResolver.try_resolve(&testing::producer::<BaseEvent>(), registrations.as_slice());
        assert_eq!(resolved_service(resolution), Some(testing::producer::<DerivedEvent>()));
    }

    #[test]
    fn try_resolve_fails_with_multiple_candidates() {
        let registrations = make_registrations([
            testing::handler::<BaseEvent>(),
            testing::handler::<OtherEvent>(),
            testing::handler::<DerivedEvent>(),
        ]);

        let resolution =
            VariantResolver.try_resolve(&testing::handler::<LeafEvent>(), registrations.as_slice());
        let Resolution::Ambiguous(candidates) = resolution else {
            panic!("resolution should be ambiguous");
        };

        let candidates: HashSet<_> = candidates.iter().map(|r| r.service().clone()).collect();
        let expected: HashSet<_> = [
            testing::handler::<BaseEvent>(),
            testing::handler::<DerivedEvent>(),
        ]
        .into_iter()
        .collect();
        assert_eq!(candidates, expected);
    }

    #[test]
    fn try_resolve_is_idempotent() {
        let registrations = make_registrations([
            testing::handler::<BaseEvent>(),
            testing::handler::<DerivedEvent>(),
            testing::producer::<LeafEvent>(),
        ]);
        let resolver = VariantResolver::new();

        for requested in [
            testing::handler::<LeafEvent>(),
            testing::producer::<BaseEvent>(),
            testing::producer::<OtherEvent>(),
        ] {
            let first = resolver.try_resolve(&requested, registrations.as_slice());
            let second = resolver.try_resolve(&requested, registrations.as_slice());
            assert_eq!(first.services(), second.services());
            assert_eq!(first.is_unresolved(), second.is_unresolved());
        }
        assert_eq!(registrations.len(), 3);
    }
}
