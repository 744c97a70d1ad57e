use std::marker::PhantomData;

use vario::descriptor::{self, Described, Variance};

#[derive(Described)]
pub struct BaseEvent;

#[derive(Described)]
#[described(extends(BaseEvent))]
pub struct DerivedEvent;

#[derive(Described)]
#[described(name = "Handles", contravariant(T))]
pub struct Handler<T>(PhantomData<T>);

#[derive(Described)]
#[described(covariant(A), contravariant(B))]
pub struct Converter<A, B>
where
    A: Send,
{
    _marker: PhantomData<(A, B)>,
}

#[derive(Described)]
pub enum Invariant<T> {
    Value(PhantomData<T>),
}

fn main() {
    let handler = descriptor::of::<Handler<DerivedEvent>>();
    assert_eq!(handler.to_string(), "Handles<DerivedEvent>");
    assert_eq!(
        handler.generic_definition().map(|d| d.parameters()),
        Some(&[Variance::Contravariant][..])
    );
    assert!(Handler::<BaseEvent>::descriptor().is_assignable_to(&handler));

    let converter = Converter::<DerivedEvent, BaseEvent>::descriptor();
    assert!(converter.is_assignable_to(&Converter::<BaseEvent, DerivedEvent>::descriptor()));

    assert!(!Invariant::<DerivedEvent>::descriptor()
        .is_assignable_to(&Invariant::<BaseEvent>::descriptor()));
}
