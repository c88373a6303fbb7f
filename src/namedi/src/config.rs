/// The name looked up by default for the hook run after object injection.
pub const DEFAULT_POST_INJECTIONS_HOOK: &str = "post_injections";

/// Settings of an [`Injector`].
///
/// [`Injector`]: crate::injector::Injector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectorConfig {
    post_injections_hook: String,
}

impl InjectorConfig {
    pub fn new() -> Self {
        Self {
            post_injections_hook: String::from(DEFAULT_POST_INJECTIONS_HOOK),
        }
    }

    /// Renames the hook invoked on targets after their fields are injected.
    pub fn with_post_injections_hook(mut self, name: impl Into<String>) -> Self {
        self.post_injections_hook = name.into();
        self
    }

    pub fn post_injections_hook(&self) -> &str {
        &self.post_injections_hook
    }

    pub(crate) fn set_post_injections_hook(&mut self, name: String) {
        self.post_injections_hook = name;
    }
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self::new()
    }
}
