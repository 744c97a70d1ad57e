#![allow(dead_code)]

use std::marker::PhantomData;

use vario::descriptor::Described;

#[derive(Described)]
#[described(covariant(U))]
struct Wrapper<T>(PhantomData<T>);

fn main() {}
