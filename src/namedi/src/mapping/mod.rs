mod seal;
mod strategy;

use parking_lot::Mutex;
use snafu::prelude::*;
use tracing::{debug, trace, warn};

use crate::object::{Managed, Object};
use crate::provider::Resolver;

pub use seal::SealKey;
pub use strategy::{Constructor, ProviderFn};

use seal::SealLock;
use strategy::Strategy;

/// A named binding owned by an [`Injector`].
///
/// A mapping starts unset and is configured through its builder methods,
/// which can be chained:
///
/// ```rust
/// # use namedi::prelude::*;
/// let mut injector = Injector::new();
/// injector
///     .add_mapping("answer")
///     .unwrap()
///     .to_value(42)
///     .unwrap()
///     .as_singleton()
///     .unwrap();
/// let answer = injector.resolve("answer").unwrap();
/// assert_eq!(answer.downcast_ref::<i32>(), Some(&42));
/// ```
///
/// [`Injector`]: crate::injector::Injector
#[derive(Debug)]
pub struct InjectionMapping {
    name: String,
    strategy: Strategy,
    singleton: bool,
    cached: Mutex<Option<Option<Object>>>,
    lock: Option<SealLock>,
}

impl InjectionMapping {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strategy: Strategy::Unset,
            singleton: false,
            cached: Mutex::new(None),
            lock: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_singleton(&self) -> bool {
        self.singleton
    }

    pub fn is_sealed(&self) -> bool {
        self.lock.is_some()
    }

    /// Binds the mapping to a fixed value, returned as the same shared
    /// instance on every resolution.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping is sealed.
    pub fn to_value<T: Managed>(&mut self, value: T) -> Result<&mut Self, MappingError> {
        self.to_object(Object::new(value))
    }

    /// Binds the mapping to a prebuilt [`Object`], or to nothing at all,
    /// which resolves exactly like an unset mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping is sealed.
    pub fn to_object(
        &mut self,
        object: impl Into<Option<Object>>,
    ) -> Result<&mut Self, MappingError> {
        self.replace_strategy(Strategy::Value(object.into()))
    }

    /// Binds the mapping to a provider function. Its parameters are injected
    /// by name whenever the mapping is resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping is sealed.
    pub fn to_provider(&mut self, provider: ProviderFn) -> Result<&mut Self, MappingError> {
        self.replace_strategy(Strategy::Provider(provider))
    }

    /// Binds the mapping to a type, instantiated with [`Default::default`] on
    /// resolution.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping is sealed.
    pub fn to_type<T: Managed + Default>(&mut self) -> Result<&mut Self, MappingError> {
        self.replace_strategy(Strategy::Type(Constructor::of::<T>()))
    }

    /// Binds the mapping to a type with an explicit zero-argument
    /// constructor.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping is sealed.
    pub fn to_constructor<T, F>(&mut self, constructor: F) -> Result<&mut Self, MappingError>
    where
        T: Managed,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.replace_strategy(Strategy::Type(Constructor::new(constructor)))
    }

    /// Caches the first resolution and returns it from then on. Nothing is
    /// resolved until the mapping is first requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping is sealed.
    pub fn as_singleton(&mut self) -> Result<&mut Self, MappingError> {
        self.ensure_unsealed()?;
        self.singleton = true;
        Ok(self)
    }

    /// Resolves the mapping. Provider parameters are looked up through
    /// `resolver`, which is usually the [`Injector`] owning this mapping.
    ///
    /// [`Injector`]: crate::injector::Injector
    pub fn resolve_injection(&self, resolver: &dyn Resolver) -> Option<Object> {
        if self.singleton {
            if let Some(cached) = self.cached.lock().as_ref() {
                trace!(mapping = %self.name, "resolved from singleton cache");
                return cached.clone();
            }
        }

        trace!(mapping = %self.name, strategy = self.strategy.kind(), "resolving");
        let resolved = self.strategy.resolve(resolver);

        if self.singleton {
            // The lock is released while resolving, so a concurrent first
            // resolution may have stored its result in the meantime.
            let mut cached = self.cached.lock();
            cached.get_or_insert(resolved).clone()
        } else {
            resolved
        }
    }

    /// Seals the mapping against any further configuration and returns the
    /// only key able to unseal it.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping is already sealed.
    pub fn seal(&mut self) -> Result<SealKey, MappingError> {
        ensure!(
            self.lock.is_none(),
            AlreadySealedSnafu {
                name: self.name.clone(),
            }
        );
        let (key, lock) = SealKey::generate();
        self.lock = Some(lock);
        debug!(mapping = %self.name, "sealed");
        Ok(key)
    }

    /// Unseals the mapping with the key returned by the latest
    /// [`InjectionMapping::seal`]. The key is useless afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` is absent or doesn't belong to the current
    /// seal, in which case the mapping stays sealed.
    pub fn unseal<'k>(&mut self, key: impl Into<Option<&'k SealKey>>) -> Result<(), MappingError> {
        let opened = match (self.lock.as_ref(), key.into()) {
            (Some(lock), Some(key)) => lock.opens_with(key),
            _ => false,
        };
        if !opened {
            warn!(mapping = %self.name, "rejected an invalid seal key");
            return InvalidSealKeySnafu {
                name: self.name.clone(),
            }
            .fail();
        }
        self.lock = None;
        debug!(mapping = %self.name, "unsealed");
        Ok(())
    }

    fn replace_strategy(&mut self, strategy: Strategy) -> Result<&mut Self, MappingError> {
        self.ensure_unsealed()?;
        debug!(
            mapping = %self.name,
            from = self.strategy.kind(),
            to = strategy.kind(),
            "strategy replaced"
        );
        self.strategy = strategy;
        *self.cached.get_mut() = None;
        Ok(self)
    }

    fn ensure_unsealed(&self) -> Result<(), MappingError> {
        ensure!(
            self.lock.is_none(),
            SealedSnafu {
                name: self.name.clone(),
            }
        );
        Ok(())
    }
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum MappingError {
    #[snafu(display("the mapping {name} is sealed and can't be modified"))]
    #[non_exhaustive]
    Sealed { name: String },
    #[snafu(display("the mapping {name} is already sealed"))]
    #[non_exhaustive]
    AlreadySealed { name: String },
    #[snafu(display("the key doesn't unseal the mapping {name}"))]
    #[non_exhaustive]
    InvalidSealKey { name: String },
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use mockall::predicate::eq;

    use crate::injectable;
    use crate::provider::MockResolver;

    use super::*;

    static INSTANCES: AtomicUsize = AtomicUsize::new(0);

    struct Instance {
        id: usize,
    }

    impl Default for Instance {
        fn default() -> Self {
            Self {
                id: INSTANCES.fetch_add(1, Ordering::SeqCst) + 1,
            }
        }
    }

    fn counting_provider(calls: &Arc<AtomicUsize>) -> ProviderFn {
        let calls = Arc::clone(calls);
        injectable!(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Some(Object::new(10i32))
        })
    }

    fn int(object: &Option<Object>) -> Option<i32> {
        object.as_ref().and_then(|o| o.downcast_ref::<i32>().copied())
    }

    #[test]
    fn mapping_resolve_succeeds_with_none_when_unset() {
        let mapping = InjectionMapping::new("test");

        assert!(mapping.resolve_injection(&MockResolver::new()).is_none());
        assert_eq!(mapping.name(), "test");
    }

    #[test]
    fn mapping_to_value_succeeds_with_the_same_value() {
        let resolver = MockResolver::new();
        let mut mapping = InjectionMapping::new("test");
        mapping.to_value(10i32).unwrap();

        let first = mapping.resolve_injection(&resolver);
        let second = mapping.resolve_injection(&resolver);
        assert_eq!(int(&first), Some(10));
        assert!(first.unwrap().ptr_eq(&second.unwrap()));
    }

    #[test]
    fn mapping_to_object_succeeds_with_none() {
        let mut mapping = InjectionMapping::new("test");
        mapping.to_object(None).unwrap();

        assert!(mapping.resolve_injection(&MockResolver::new()).is_none());
    }

    #[test]
    fn mapping_to_provider_succeeds_with_one_call_per_resolution() {
        let resolver = MockResolver::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut mapping = InjectionMapping::new("test");
        mapping.to_provider(counting_provider(&calls)).unwrap();

        assert_eq!(int(&mapping.resolve_injection(&resolver)), Some(10));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(int(&mapping.resolve_injection(&resolver)), Some(10));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn mapping_to_provider_succeeds_with_injected_arguments() {
        let mut resolver = MockResolver::new();
        resolver
            .expect_resolve()
            .with(eq("injection1"))
            .returning(|_| Some(Object::new(-10i32)));
        resolver
            .expect_resolve()
            .with(eq("injection2"))
            .returning(|_| Some(Object::new(-20i32)));
        resolver
            .expect_resolve()
            .withf(|name| name.starts_with("dummy"))
            .returning(|_| None);

        let mut mapping = InjectionMapping::new("test");
        mapping
            .to_provider(injectable!(|injection1, dummy1, injection2, dummy2| {
                assert_eq!(int(&injection1), Some(-10));
                assert!(dummy1.is_none());
                assert_eq!(int(&injection2), Some(-20));
                assert!(dummy2.is_none());
                Some(Object::new(10i32))
            }))
            .unwrap();

        assert_eq!(int(&mapping.resolve_injection(&resolver)), Some(10));
    }

    #[test]
    fn mapping_as_singleton_succeeds_with_one_provider_call() {
        let resolver = MockResolver::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut mapping = InjectionMapping::new("test");
        mapping
            .to_provider(counting_provider(&calls))
            .unwrap()
            .as_singleton()
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let first = mapping.resolve_injection(&resolver).unwrap();
        let second = mapping.resolve_injection(&resolver).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(first.ptr_eq(&second));
        assert!(mapping.is_singleton());
    }

    #[test]
    fn mapping_to_type_succeeds_with_new_or_shared_instances() {
        let resolver = MockResolver::new();
        let mut transient = InjectionMapping::new("transient");
        transient.to_type::<Instance>().unwrap();
        let mut singleton = InjectionMapping::new("singleton");
        singleton.to_type::<Instance>().unwrap().as_singleton().unwrap();

        let id = |object: Option<Object>| object.unwrap().downcast::<Instance>().unwrap().id;
        let a = id(transient.resolve_injection(&resolver));
        let b = id(transient.resolve_injection(&resolver));
        assert_ne!(a, b);

        let first = singleton.resolve_injection(&resolver).unwrap();
        let second = singleton.resolve_injection(&resolver).unwrap();
        assert!(first.ptr_eq(&second));
        assert!(first.is::<Instance>());
    }

    #[test]
    fn mapping_to_constructor_succeeds() {
        let mut mapping = InjectionMapping::new("test");
        mapping.to_constructor(|| String::from("built")).unwrap();

        let built = mapping.resolve_injection(&MockResolver::new()).unwrap();
        assert_eq!(built.downcast_ref::<String>().map(String::as_str), Some("built"));
    }

    #[test]
    fn mapping_replace_strategy_succeeds_and_clears_cache() {
        let resolver = MockResolver::new();
        let mut mapping = InjectionMapping::new("test");
        mapping.to_value(1i32).unwrap().as_singleton().unwrap();
        assert_eq!(int(&mapping.resolve_injection(&resolver)), Some(1));

        mapping.to_value(2i32).unwrap();
        assert_eq!(int(&mapping.resolve_injection(&resolver)), Some(2));
    }

    #[test]
    fn mapping_builders_fail_when_sealed() {
        let resolver = MockResolver::new();
        let mut mapping = InjectionMapping::new("test");
        mapping.to_value(10i32).unwrap();
        let _key = mapping.seal().unwrap();

        assert!(mapping.is_sealed());
        assert!(matches!(
            mapping.as_singleton(),
            Err(MappingError::Sealed { .. })
        ));
        assert!(matches!(
            mapping.to_value(20i32),
            Err(MappingError::Sealed { .. })
        ));
        assert!(matches!(
            mapping.to_provider(injectable!(|| Some(Object::new(30i32)))),
            Err(MappingError::Sealed { .. })
        ));
        assert!(matches!(
            mapping.to_type::<Instance>(),
            Err(MappingError::Sealed { .. })
        ));
        assert!(!mapping.is_singleton());
        assert_eq!(int(&mapping.resolve_injection(&resolver)), Some(10));
    }

    #[test]
    fn mapping_seal_fails_when_already_sealed() {
        let mut mapping = InjectionMapping::new("test");
        let _key = mapping.seal().unwrap();

        assert!(matches!(
            mapping.seal(),
            Err(MappingError::AlreadySealed { .. })
        ));
    }

    #[test]
    fn mapping_unseal_fails_when_key_is_invalid() {
        let mut mapping = InjectionMapping::new("test");
        let mut other = InjectionMapping::new("other");
        mapping.to_value(10i32).unwrap();
        let _key = mapping.seal().unwrap();
        let other_key = other.seal().unwrap();

        assert!(matches!(
            mapping.unseal(None),
            Err(MappingError::InvalidSealKey { .. })
        ));
        assert!(matches!(
            mapping.unseal(&other_key),
            Err(MappingError::InvalidSealKey { .. })
        ));
        assert!(mapping.is_sealed());
    }

    #[test]
    fn mapping_unseal_succeeds_with_the_seal_key() {
        let mut mapping = InjectionMapping::new("test");
        mapping.to_value(10i32).unwrap();
        let key = mapping.seal().unwrap();

        mapping.unseal(&key).unwrap();
        assert!(!mapping.is_sealed());
        mapping.to_value(20i32).unwrap();

        let _new_key = mapping.seal().unwrap();
        assert!(matches!(
            mapping.unseal(&key),
            Err(MappingError::InvalidSealKey { .. })
        ));
    }

    #[test]
    fn mapping_unseal_fails_when_not_sealed() {
        let mut mapping = InjectionMapping::new("test");
        let mut other = InjectionMapping::new("other");
        let key = other.seal().unwrap();

        assert!(matches!(
            mapping.unseal(&key),
            Err(MappingError::InvalidSealKey { .. })
        ));
    }
}
