use namedi::prelude::*;

#[derive(InjectionTarget)]
struct NoOptIn {
    #[inject]
    slot: Option<Object>,
}

#[lifecycle]
impl NoOptIn {
    #[hook]
    fn post_injections(&mut self) {
        self.slot = None;
    }
}

fn main() {}
