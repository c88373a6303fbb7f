use namedi::prelude::*;

fn main() {
    let injector = configure();

    let mut app: App = injector.create_injected_instance(true);
    app.run();

    println!("{}", injector.parse_str("${app_name} knows ${greeting} (${missing})"));
}

fn configure() -> Injector {
    let mut injector = Injector::new();

    injector
        .add_mapping("app_name")
        .unwrap()
        .to_value("greeter")
        .unwrap();

    injector
        .add_mapping("language")
        .unwrap()
        .to_value(Language::English)
        .unwrap();

    injector
        .add_mapping("greeting")
        .unwrap()
        .to_provider(injectable!(|language| {
            let language = language
                .and_then(|l| l.downcast_ref::<Language>().copied())
                .unwrap_or(Language::English);
            Some(Object::new(language.greeting()))
        }))
        .unwrap()
        .as_singleton()
        .unwrap();

    injector
}

#[derive(Debug, Clone, Copy)]
enum Language {
    English,
    #[allow(dead_code)]
    Chinese,
}

impl Language {
    fn greeting(self) -> &'static str {
        match self {
            Language::English => "Hello",
            Language::Chinese => "你好",
        }
    }
}

#[derive(Debug, Default, InjectionTarget)]
#[injection(hooks)]
struct App {
    #[inject]
    greeting: Option<Object>,
    banner: String,
}

#[lifecycle]
impl App {
    #[hook]
    fn post_injections(&mut self, app_name: Option<Object>) {
        let app_name = app_name.map(|o| o.render()).unwrap_or_default();
        self.banner = format!("[{app_name}]");
    }
}

impl App {
    fn run(&mut self) {
        let greeting = self.greeting.as_ref().map(Object::render).unwrap_or_default();
        println!("{} {greeting}, world!", self.banner);
    }
}
