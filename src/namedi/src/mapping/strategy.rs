use std::any;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::object::{Managed, Object};
use crate::provider::{Injectable, Resolver};

/// A provider function whose parameters are injected on each call.
pub type ProviderFn = Injectable<(), Option<Object>>;

/// A zero-argument constructor for values of one type.
pub struct Constructor {
    type_name: &'static str,
    construct: Box<dyn Fn() -> Object + Send + Sync>,
}

impl Constructor {
    pub fn new<T, F>(constructor: F) -> Self
    where
        T: Managed,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            type_name: any::type_name::<T>(),
            construct: Box::new(move || Object::new(constructor())),
        }
    }

    pub fn of<T: Managed + Default>() -> Self {
        Self::new(T::default)
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn construct(&self) -> Object {
        (self.construct)()
    }
}

impl Debug for Constructor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Constructor")
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub(super) enum Strategy {
    Unset,
    Value(Option<Object>),
    Provider(ProviderFn),
    Type(Constructor),
}

impl Strategy {
    pub(super) fn kind(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Value(_) => "value",
            Self::Provider(_) => "provider",
            Self::Type(_) => "type",
        }
    }

    pub(super) fn resolve(&self, resolver: &dyn Resolver) -> Option<Object> {
        match self {
            Self::Unset => None,
            Self::Value(value) => value.clone(),
            Self::Provider(provider) => provider.invoke(resolver, &mut ()),
            Self::Type(constructor) => Some(constructor.construct()),
        }
    }
}
