mod template;

use std::collections::hash_map::{Entry, HashMap};

use snafu::prelude::*;
use tracing::{debug, trace};

use crate::config::InjectorConfig;
use crate::mapping::InjectionMapping;
use crate::object::Object;
use crate::provider::{Injectable, Resolver};
use crate::target::InjectionTarget;

/// A registry of named mappings and the entry point of every injection.
///
/// Mutating the registry requires `&mut self`, while resolution only needs
/// `&self`. An injector can therefore be shared freely once it's configured.
///
/// # Examples
///
/// ```rust
/// # use namedi::prelude::*;
/// let mut injector = Injector::new();
/// injector.add_mapping("greeting").unwrap().to_value("hello").unwrap();
/// injector
///     .add_mapping("name")
///     .unwrap()
///     .to_provider(injectable!(|| Some(Object::new("world"))))
///     .unwrap();
///
/// assert_eq!(injector.parse_str("${greeting}, ${name}!"), "hello, world!");
/// ```
#[derive(Debug, Default)]
pub struct Injector {
    mappings: HashMap<String, InjectionMapping>,
    config: InjectorConfig,
}

impl Injector {
    pub fn new() -> Self {
        Self::with_config(InjectorConfig::default())
    }

    pub fn with_config(config: InjectorConfig) -> Self {
        Self {
            mappings: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &InjectorConfig {
        &self.config
    }

    /// Renames the hook invoked by [`Injector::inject_into`].
    pub fn set_post_injections_hook(&mut self, name: impl Into<String>) {
        self.config.set_post_injections_hook(name.into());
    }

    /// Registers a new unset mapping and returns it for configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a mapping with the same name already exists. The
    /// registry is left unchanged.
    pub fn add_mapping(
        &mut self,
        name: impl Into<String>,
    ) -> Result<&mut InjectionMapping, InjectorError> {
        match self.mappings.entry(name.into()) {
            Entry::Occupied(entry) => DuplicateMappingSnafu {
                name: entry.key().clone(),
            }
            .fail(),
            Entry::Vacant(entry) => {
                debug!(mapping = %entry.key(), "mapping added");
                let mapping = InjectionMapping::new(entry.key().clone());
                Ok(entry.insert(mapping))
            }
        }
    }

    pub fn get_mapping(&self, name: &str) -> Option<&InjectionMapping> {
        self.mappings.get(name)
    }

    pub fn get_mapping_mut(&mut self, name: &str) -> Option<&mut InjectionMapping> {
        self.mappings.get_mut(name)
    }

    pub fn has_mapping(&self, name: &str) -> bool {
        self.mappings.contains_key(name)
    }

    /// Removes a mapping. Removing an unknown name does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping is sealed.
    pub fn remove_mapping(&mut self, name: &str) -> Result<(), InjectorError> {
        if let Some(mapping) = self.mappings.get(name) {
            ensure!(
                !mapping.is_sealed(),
                SealedMappingSnafu {
                    name: mapping.name(),
                }
            );
            self.mappings.remove(name);
            debug!(mapping = %name, "mapping removed");
        }
        Ok(())
    }

    pub fn mapping_names(&self) -> impl Iterator<Item = &str> {
        self.mappings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Resolves the mapping called `name`, or returns `None` if there is no
    /// such mapping.
    pub fn resolve(&self, name: &str) -> Option<Object> {
        match self.mappings.get(name) {
            Some(mapping) => mapping.resolve_injection(self),
            None => {
                trace!(mapping = %name, "no mapping to resolve");
                None
            }
        }
    }

    /// Calls `function` with each of its parameters resolved by name and with
    /// `context` as its receiver. Parameters without a mapping get `None`.
    pub fn trigger_function_with_injected_params<C, R>(
        &self,
        function: &Injectable<C, R>,
        context: &mut C,
    ) -> R
    where
        C: ?Sized,
    {
        function.invoke(self, context)
    }

    /// Calls a context-free `function` with its parameters resolved by name.
    pub fn trigger_function<R>(&self, function: &Injectable<(), R>) -> R {
        self.trigger_function_with_injected_params(function, &mut ())
    }

    /// Fills every pending injection point of `instance` that has a matching
    /// mapping, then runs its post-injection hook if it has one.
    ///
    /// Points already holding a value are left untouched. When
    /// `proceed_to_injections_in_post_injections_method_too` is true, the hook's
    /// own parameters are resolved by name as well; otherwise they are all
    /// `None`.
    pub fn inject_into<T>(
        &self,
        instance: &mut T,
        proceed_to_injections_in_post_injections_method_too: bool,
    ) where
        T: InjectionTarget,
    {
        for mut point in instance.injection_points() {
            if !point.is_pending() {
                continue;
            }
            if let Some(mapping) = self.mappings.get(point.name()) {
                trace!(mapping = %point.name(), "injecting field");
                point.fill(mapping.resolve_injection(self));
            }
        }

        let hook_name = self.config.post_injections_hook();
        if let Some(hook) = T::hook(hook_name) {
            trace!(
                hook = %hook_name,
                injected = proceed_to_injections_in_post_injections_method_too,
                "running post-injection hook"
            );
            if proceed_to_injections_in_post_injections_method_too {
                self.trigger_function_with_injected_params(&hook, instance);
            } else {
                hook.invoke_bare(instance);
            }
        }
    }

    /// Creates a `T` with [`Default::default`] and injects it.
    pub fn create_injected_instance<T>(
        &self,
        proceed_to_injections_in_post_injections_method_too: bool,
    ) -> T
    where
        T: InjectionTarget + Default,
    {
        self.create_injected_instance_with(
            T::default,
            proceed_to_injections_in_post_injections_method_too,
        )
    }

    /// Creates a `T` with `constructor` and injects it.
    pub fn create_injected_instance_with<T, F>(
        &self,
        constructor: F,
        proceed_to_injections_in_post_injections_method_too: bool,
    ) -> T
    where
        T: InjectionTarget,
        F: FnOnce() -> T,
    {
        let mut instance = constructor();
        self.inject_into(
            &mut instance,
            proceed_to_injections_in_post_injections_method_too,
        );
        instance
    }

    /// Replaces every `${name}` in `source` with the textual form of the
    /// resolved mapping. Unknown names and `None` values become empty.
    pub fn parse_str(&self, source: &str) -> String {
        template::interpolate(source, self)
    }
}

impl Resolver for Injector {
    fn resolve(&self, name: &str) -> Option<Object> {
        Injector::resolve(self, name)
    }
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum InjectorError {
    #[snafu(display("the mapping {name} already exists in the injector"))]
    #[non_exhaustive]
    DuplicateMapping { name: String },
    #[snafu(display("the mapping {name} is sealed and can't be removed"))]
    #[non_exhaustive]
    SealedMapping { name: String },
}
