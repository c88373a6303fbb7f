use namedi::prelude::*;

#[derive(InjectionTarget)]
#[injection(hooks)]
struct Consumed {
    #[inject]
    slot: Option<Object>,
}

#[lifecycle]
impl Consumed {
    #[hook]
    fn post_injections(self) {}
}

fn main() {}
