use namedi::prelude::*;

#[derive(Default, InjectionTarget)]
#[injection(hooks)]
struct Keywords {
    seen: Vec<String>,
}

#[lifecycle]
impl Keywords {
    #[hook]
    fn post_injections(&mut self, r#type: Option<Object>, r#match: Option<Object>) {
        self.seen.extend(r#type.map(|o| o.render()));
        self.seen.extend(r#match.map(|o| o.render()));
    }

    fn unrelated(&self) -> usize {
        self.seen.len()
    }
}

fn main() {
    let mut injector = Injector::new();
    injector.add_mapping("type").unwrap().to_value("t").unwrap();
    injector.add_mapping("match").unwrap().to_value('m').unwrap();

    let keywords: Keywords = injector.create_injected_instance(true);
    assert_eq!(keywords.seen, ["t", "m"]);
    assert_eq!(keywords.unrelated(), 2);
}
