#![allow(dead_code)]

use std::marker::PhantomData;

use vario::descriptor::Described;

#[derive(Described)]
struct BaseEvent;

#[derive(Described)]
#[described(extends(BaseEvent), contravariant(T))]
struct Handler<T>(PhantomData<T>);

fn main() {}
