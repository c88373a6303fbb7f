use namedi::prelude::*;

#[derive(InjectionTarget)]
#[injection(hooks)]
struct Destructured {
    #[inject]
    slot: Option<Object>,
}

#[lifecycle]
impl Destructured {
    #[hook]
    fn post_injections(&mut self, (first, _): (Option<Object>, Option<Object>)) {
        self.slot = first;
    }
}

fn main() {}
