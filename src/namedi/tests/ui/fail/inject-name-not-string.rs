use namedi::prelude::*;

#[derive(InjectionTarget)]
struct Numbered {
    #[inject(name = 5)]
    slot: Option<Object>,
}

fn main() {}
