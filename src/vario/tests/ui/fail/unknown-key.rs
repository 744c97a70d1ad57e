#![allow(dead_code)]

use vario::descriptor::Described;

#[derive(Described)]
#[described(label = "event")]
struct Event;

fn main() {}
