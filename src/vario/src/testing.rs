//! Contracts and event types shared by unit tests.

use crate::descriptor::{Described, GenericDefinition, TypeDescriptor, Variance};

pub struct BaseEvent;

pub struct DerivedEvent;

pub struct LeafEvent;

pub struct OtherEvent;

impl Described for BaseEvent {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::concrete::<Self>("BaseEvent", [])
    }
}

impl Described for DerivedEvent {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::concrete::<Self>("DerivedEvent", [BaseEvent::descriptor()])
    }
}

impl Described for LeafEvent {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::concrete::<Self>("LeafEvent", [DerivedEvent::descriptor()])
    }
}

impl Described for OtherEvent {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::concrete::<Self>("OtherEvent", [])
    }
}

/// `Handler<in T>`
pub const HANDLER: GenericDefinition =
    GenericDefinition::new("testing::Handler", "Handler", &[Variance::Contravariant]);

/// `Producer<out T>`
pub const PRODUCER: GenericDefinition =
    GenericDefinition::new("testing::Producer", "Producer", &[Variance::Covariant]);

/// `Boxed<T>`
pub const BOXED: GenericDefinition =
    GenericDefinition::new("testing::Boxed", "Boxed", &[Variance::Invariant]);

/// `Pair<out A, in B>`
pub const PAIR: GenericDefinition = GenericDefinition::new(
    "testing::Pair",
    "Pair",
    &[Variance::Covariant, Variance::Contravariant],
);

pub fn handler<T: Described>() -> TypeDescriptor {
    TypeDescriptor::constructed(HANDLER, vec![T::descriptor()])
}

pub fn producer<T: Described>() -> TypeDescriptor {
    TypeDescriptor::constructed(PRODUCER, vec![T::descriptor()])
}
