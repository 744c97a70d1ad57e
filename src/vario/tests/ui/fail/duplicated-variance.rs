#![allow(dead_code)]

use std::marker::PhantomData;

use vario::descriptor::Described;

#[derive(Described)]
#[described(covariant(T), contravariant(T))]
struct Wrapper<T>(PhantomData<T>);

fn main() {}
