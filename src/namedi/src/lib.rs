extern crate self as namedi;

pub mod config;
pub mod injector;
pub mod mapping;
pub mod object;
pub mod provider;
pub mod target;
mod util;

pub use namedi_derive::{lifecycle, InjectionTarget};

pub mod prelude {
    pub use crate::config::InjectorConfig;
    pub use crate::injectable;
    pub use crate::injector::{Injector, InjectorError};
    pub use crate::mapping::{InjectionMapping, MappingError, SealKey};
    pub use crate::object::Object;
    pub use crate::provider::{Injectable, ParameterError, Resolver};
    pub use crate::target::{Hook, HooksForwarded, InjectionPoint, InjectionTarget, LifecycleHooks};
    pub use crate::{lifecycle, InjectionTarget};
}
