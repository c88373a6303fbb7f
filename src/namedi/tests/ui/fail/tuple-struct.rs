use namedi::prelude::*;

#[derive(InjectionTarget)]
struct Tuple(Option<Object>);

fn main() {}
