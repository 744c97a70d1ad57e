//! Explicit descriptors of service contracts.
//!
//! A [`TypeDescriptor`] identifies the service type a registration provides or
//! a caller requests. Plain types are described by their [`TypeId`] and the
//! supertypes they may stand in for, while parameterized contracts are
//! described by a [`GenericDefinition`] and the descriptors of their type
//! arguments. Each generic parameter carries a declared [`Variance`], which
//! drives [`is_assignable`].

mod implementation;
mod variance;

use std::any::{Any, TypeId};
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use snafu::prelude::*;

use crate::descriptor::implementation::DescriptorKind;

pub use crate::descriptor::variance::{is_assignable, Variance};
pub use vario_derive::Described;

/// A type whose [`TypeDescriptor`] is known statically.
///
/// Usually implemented with `#[derive(Described)]`.
///
/// Declared supertypes must not form a cycle. If `A` extends `B` and `B`
/// extends `A`, building either descriptor recurses until the stack
/// overflows, and this can't be detected across independent impls.
pub trait Described {
    fn descriptor() -> TypeDescriptor;
}

/// Returns the descriptor of `T`.
pub fn of<T>() -> TypeDescriptor
where
    T: Described + ?Sized,
{
    T::descriptor()
}

/// The unparameterized form of a generic contract, e.g. `Handler<_>`.
///
/// Two definitions are the same if they share the same `path`.
#[derive(Clone, Copy)]
pub struct GenericDefinition {
    path: &'static str,
    name: &'static str,
    parameters: &'static [Variance],
}

impl GenericDefinition {
    pub const fn new(path: &'static str, name: &'static str, parameters: &'static [Variance]) -> Self {
        Self {
            path,
            name,
            parameters,
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parameters(&self) -> &'static [Variance] {
        self.parameters
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl Debug for GenericDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GenericDefinition")
            .field("path", &self.path)
            .field("parameters", &self.parameters)
            .finish()
    }
}

impl Display for GenericDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}<", self.name)?;
        for i in 0..self.arity() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "_")?;
        }
        write!(f, ">")
    }
}

impl PartialEq for GenericDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for GenericDefinition {}

impl Hash for GenericDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

/// A structured identity of a service type.
///
/// Cloning is cheap. Equality and hashing only consider the identity of the
/// described type: declared supertypes of a plain type are not part of it.
#[derive(Clone)]
pub struct TypeDescriptor {
    kind: Arc<DescriptorKind>,
}

impl TypeDescriptor {
    /// Describes the plain type `T`, which may be used wherever any of its
    /// `supertypes` is expected.
    pub fn concrete<T>(name: &'static str, supertypes: impl IntoIterator<Item = TypeDescriptor>) -> Self
    where
        T: Any + ?Sized,
    {
        Self::from_kind(DescriptorKind::Concrete {
            type_id: TypeId::of::<T>(),
            name,
            supertypes: supertypes.into_iter().collect(),
        })
    }

    /// Describes `definition` parameterized by `arguments`.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of arguments differs from the arity of
    /// `definition`.
    pub fn try_constructed(
        definition: GenericDefinition,
        arguments: Vec<TypeDescriptor>,
    ) -> Result<Self, DescriptorError> {
        ensure!(
            arguments.len() == definition.arity(),
            ArityMismatchSnafu {
                definition: definition.name(),
                expected: definition.arity(),
                actual: arguments.len(),
            }
        );
        Ok(Self::from_kind(DescriptorKind::Constructed {
            definition,
            arguments,
        }))
    }

    /// Describes `definition` parameterized by `arguments`.
    ///
    /// # Panics
    ///
    /// Panics if the number of arguments differs from the arity of
    /// `definition`. Use [`TypeDescriptor::try_constructed`] for descriptors
    /// built from untrusted input.
    pub fn constructed(definition: GenericDefinition, arguments: Vec<TypeDescriptor>) -> Self {
        match Self::try_constructed(definition, arguments) {
            Ok(descriptor) => descriptor,
            Err(err) => panic!("{err}"),
        }
    }

    fn from_kind(kind: DescriptorKind) -> Self {
        Self {
            kind: Arc::new(kind),
        }
    }

    pub(crate) fn kind(&self) -> &DescriptorKind {
        &self.kind
    }

    /// Returns the display name, e.g. `Handler<DerivedEvent>`.
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Returns true if the described type is a parameterized generic contract.
    pub fn is_generic(&self) -> bool {
        matches!(self.kind(), DescriptorKind::Constructed { .. })
    }

    pub fn generic_definition(&self) -> Option<&GenericDefinition> {
        match self.kind() {
            DescriptorKind::Constructed { definition, .. } => Some(definition),
            DescriptorKind::Concrete { .. } => None,
        }
    }

    pub fn arguments(&self) -> &[TypeDescriptor] {
        match self.kind() {
            DescriptorKind::Constructed { arguments, .. } => arguments,
            DescriptorKind::Concrete { .. } => &[],
        }
    }

    pub fn supertypes(&self) -> &[TypeDescriptor] {
        match self.kind() {
            DescriptorKind::Concrete { supertypes, .. } => supertypes,
            DescriptorKind::Constructed { .. } => &[],
        }
    }

    /// Returns the [`TypeId`] of a plain type.
    pub fn type_id(&self) -> Option<TypeId> {
        match self.kind() {
            DescriptorKind::Concrete { type_id, .. } => Some(*type_id),
            DescriptorKind::Constructed { .. } => None,
        }
    }

    /// Returns true if a service of type `self` can be used where `target`
    /// is expected.
    pub fn is_assignable_to(&self, target: &TypeDescriptor) -> bool {
        is_assignable(self, target)
    }
}

impl Debug for TypeDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(self, f)
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(self.kind(), f)
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.kind, &other.kind) || self.kind() == other.kind()
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
    }
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum DescriptorError {
    #[snafu(display("generic definition {definition} expects {expected} type arguments, but {actual} were given"))]
    #[non_exhaustive]
    ArityMismatch {
        definition: &'static str,
        expected: usize,
        actual: usize,
    },
}

macro_rules! impl_described_for_primitives {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Described for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::concrete::<$ty>(stringify!($ty), [])
                }
            }
        )*
    };
}

impl_described_for_primitives!(
    (), bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, &'static str,
);

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::testing::{self, BaseEvent, DerivedEvent, HANDLER, PAIR};

    use super::*;

    #[test]
    fn type_descriptor_display_succeeds() {
        assert_eq!(i32::descriptor().to_string(), "i32");
        assert_eq!(testing::handler::<DerivedEvent>().to_string(), "Handler<DerivedEvent>");
        assert_eq!(
            TypeDescriptor::constructed(PAIR, vec![testing::handler::<BaseEvent>(), String::descriptor()])
                .to_string(),
            "Pair<Handler<BaseEvent>, String>"
        );
        assert_eq!(HANDLER.to_string(), "Handler<_>");
        assert_eq!(testing::handler::<BaseEvent>().name(), "Handler<BaseEvent>");
    }

    #[test]
    fn type_descriptor_eq_succeeds() {
        assert_eq!(testing::handler::<BaseEvent>(), testing::handler::<BaseEvent>());
        assert_ne!(testing::handler::<BaseEvent>(), testing::handler::<DerivedEvent>());
        assert_ne!(testing::handler::<BaseEvent>(), testing::producer::<BaseEvent>());
        assert_ne!(BaseEvent::descriptor(), DerivedEvent::descriptor());

        let set: HashSet<_> = [
            testing::handler::<BaseEvent>(),
            testing::handler::<BaseEvent>(),
            testing::handler::<DerivedEvent>(),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn type_descriptor_accessors_succeed() {
        let handler = testing::handler::<DerivedEvent>();
        assert!(handler.is_generic());
        assert_eq!(handler.generic_definition(), Some(&HANDLER));
        assert_eq!(handler.arguments(), &[DerivedEvent::descriptor()]);
        assert_eq!(handler.type_id(), None);

        let derived = DerivedEvent::descriptor();
        assert!(!derived.is_generic());
        assert_eq!(derived.generic_definition(), None);
        assert_eq!(derived.supertypes(), &[BaseEvent::descriptor()]);
        assert_eq!(derived.type_id(), Some(TypeId::of::<DerivedEvent>()));
    }

    #[test]
    fn type_descriptor_try_constructed_fails_when_arity_mismatches() {
        let res = TypeDescriptor::try_constructed(HANDLER, vec![]);
        assert!(matches!(
            res,
            Err(DescriptorError::ArityMismatch {
                expected: 1,
                actual: 0,
                ..
            })
        ));
    }
}
