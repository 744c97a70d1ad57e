#![allow(dead_code)]

use vario::descriptor::Described;

#[derive(Described)]
struct Borrowed<'event>(&'event str);

fn main() {}
