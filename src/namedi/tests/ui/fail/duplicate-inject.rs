use namedi::prelude::*;

#[derive(InjectionTarget)]
struct Twice {
    #[inject]
    #[inject(name = "other")]
    slot: Option<Object>,
}

fn main() {}
