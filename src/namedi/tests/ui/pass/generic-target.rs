use std::marker::PhantomData;

use namedi::prelude::*;

#[derive(InjectionTarget)]
struct Holder<T: Send + Sync + 'static> {
    #[inject(name = "value")]
    slot: Option<Object>,
    marker: PhantomData<T>,
}

fn main() {
    let mut injector = Injector::new();
    injector.add_mapping("value").unwrap().to_value(7u8).unwrap();

    let holder = injector.create_injected_instance_with(
        || Holder::<String> {
            slot: None,
            marker: PhantomData,
        },
        true,
    );
    assert_eq!(holder.slot.map(|o| o.render()).as_deref(), Some("7"));
}
