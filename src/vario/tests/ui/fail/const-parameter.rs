#![allow(dead_code)]

use vario::descriptor::Described;

#[derive(Described)]
struct Batch<const N: usize>([u8; N]);

fn main() {}
