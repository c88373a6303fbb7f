use namedi::prelude::*;

#[derive(InjectionTarget)]
#[injection(hooks)]
struct Quiet {
    #[inject]
    slot: Option<Object>,
}

#[lifecycle]
impl Quiet {
    fn helper(&mut self) {}
}

fn main() {}
