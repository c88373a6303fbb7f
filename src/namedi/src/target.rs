use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::object::Object;
use crate::provider::Injectable;

/// A hook run on an injection target, with the target as its context.
pub type Hook<T> = Injectable<T, ()>;

/// A field of an [`InjectionTarget`] waiting to receive an injection.
pub struct InjectionPoint<'a> {
    name: &'static str,
    slot: &'a mut Option<Object>,
}

impl<'a> InjectionPoint<'a> {
    pub fn new(name: &'static str, slot: &'a mut Option<Object>) -> Self {
        Self { name, slot }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if the slot doesn't hold a value yet.
    pub fn is_pending(&self) -> bool {
        self.slot.is_none()
    }

    pub fn fill(&mut self, object: Option<Object>) {
        *self.slot = object;
    }
}

impl Debug for InjectionPoint<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("InjectionPoint")
            .field("name", &self.name)
            .field("pending", &self.is_pending())
            .finish()
    }
}

/// A type whose fields can be injected by name.
///
/// Usually, you don't need to implement [`InjectionTarget`] manually, since
/// `#[derive(InjectionTarget)]` generates the manifest from fields marked
/// with `#[inject]`. A manual implementation looks like this:
///
/// ```rust
/// # use namedi::prelude::*;
/// struct Greeting {
///     name: Option<Object>,
///     punctuation: Option<Object>,
/// }
///
/// impl InjectionTarget for Greeting {
///     fn injection_points(&mut self) -> Vec<InjectionPoint<'_>> {
///         vec![
///             InjectionPoint::new("name", &mut self.name),
///             InjectionPoint::new("punctuation", &mut self.punctuation),
///         ]
///     }
/// }
/// ```
pub trait InjectionTarget: Sized + 'static {
    /// Lists every injectable field, named by the mapping it expects.
    fn injection_points(&mut self) -> Vec<InjectionPoint<'_>>;

    /// Looks up a lifecycle hook by name. Targets have no hooks by default.
    fn hook(name: &str) -> Option<Hook<Self>> {
        let _ = name;
        None
    }
}

/// Marks an [`InjectionTarget`] whose [`InjectionTarget::hook`] forwards to
/// its [`LifecycleHooks`].
///
/// `#[derive(InjectionTarget)]` implements it when the struct carries
/// `#[injection(hooks)]`. Hooks of a type without it could never run, so
/// [`LifecycleHooks`] requires it.
#[diagnostic::on_unimplemented(
    message = "hooks of `{Self}` are never looked up by its `InjectionTarget` implementation",
    label = "`{Self}` doesn't forward hook lookups",
    note = "add `#[injection(hooks)]` next to `#[derive(InjectionTarget)]`"
)]
pub trait HooksForwarded: InjectionTarget {}

/// Named lifecycle hooks of a type, usually generated by `#[lifecycle]`.
pub trait LifecycleHooks: HooksForwarded + Sized + 'static {
    fn hook(name: &str) -> Option<Hook<Self>>;
}
