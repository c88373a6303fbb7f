mod text;

use std::any::Any;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::util::any::AsAny;

/// Any type that can be stored in an [`Injector`] and handed out by name.
///
/// [`Injector`]: crate::injector::Injector
pub trait Managed: AsAny + Send + Sync + 'static {}

impl<T> Managed for T where T: AsAny + Send + Sync + 'static {}

type Renderer = fn(&dyn Any) -> String;

/// A shared, type-erased handle to an injected value.
///
/// Cloning an [`Object`] never clones the underlying value: all clones point
/// to the same instance, which is what singleton mappings rely on. Use
/// [`Object::ptr_eq`] to compare identities.
#[derive(Clone)]
pub struct Object {
    inner: Arc<dyn Managed>,
    renderer: Option<Renderer>,
}

impl Object {
    /// Wraps `value` in a new shared handle.
    ///
    /// The textual form used by [`Injector::parse_str`] is available for
    /// common scalar and string types only. Use [`Object::display`] to render
    /// any other type.
    ///
    /// [`Injector::parse_str`]: crate::injector::Injector::parse_str
    pub fn new<T: Managed>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wraps `value` and renders it through its [`Display`] implementation.
    pub fn display<T: Managed + Display>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            renderer: Some(render_display::<T>),
        }
    }

    pub fn from_arc<T: Managed>(value: Arc<T>) -> Self {
        Self {
            inner: value,
            renderer: None,
        }
    }

    pub fn is<T: Managed>(&self) -> bool {
        self.inner.as_ref().as_any().is::<T>()
    }

    pub fn downcast_ref<T: Managed>(&self) -> Option<&T> {
        self.inner.as_ref().as_any().downcast_ref::<T>()
    }

    /// Returns a typed handle to the same instance, or `None` if the stored
    /// value is not a `T`.
    pub fn downcast<T: Managed>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.inner).into_any_arc().downcast::<T>().ok()
    }

    /// Returns true if both handles point to the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn type_name(&self) -> &'static str {
        self.inner.as_ref().type_name()
    }

    /// Renders the value as text. Values without a known textual form render
    /// to an empty string.
    pub fn render(&self) -> String {
        let value = self.inner.as_ref().as_any();
        match self.renderer {
            Some(renderer) => renderer(value),
            None => text::render(value).unwrap_or_default(),
        }
    }
}

impl Debug for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Object")
            .field("type", &self.type_name())
            .finish_non_exhaustive()
    }
}

fn render_display<T: Display + 'static>(value: &dyn Any) -> String {
    match value.downcast_ref::<T>() {
        Some(value) => value.to_string(),
        None => unreachable!("a renderer is only paired with values of its own type"),
    }
}
