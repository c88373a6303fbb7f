mod closure;

use std::borrow::Cow;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::vec::IntoIter;

use snafu::prelude::*;

use crate::object::Object;

pub use closure::{Closure, Method};

/// A source of named injections.
///
/// [`Injector`] is the canonical implementation. Resolution never fails: an
/// unknown name yields `None`.
///
/// [`Injector`]: crate::injector::Injector
#[cfg_attr(test, mockall::automock)]
pub trait Resolver {
    fn resolve(&self, name: &str) -> Option<Object>;
}

/// The ordered binding names requested by an [`Injectable`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    names: Vec<Cow<'static, str>>,
}

impl Parameters {
    pub fn new<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Cow<'static, str>>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(AsRef::as_ref)
    }

    /// Looks up every parameter name, in declaration order.
    pub fn resolve_with(&self, resolver: &dyn Resolver) -> Arguments {
        let values = self.iter().map(|name| resolver.resolve(name)).collect();
        Arguments::new(self.names.clone(), values)
    }

    /// Produces arguments where every parameter is `None`.
    pub fn unresolved(&self) -> Arguments {
        Arguments::new(self.names.clone(), vec![None; self.names.len()])
    }
}

/// Values resolved for a call, paired with the names they were requested by.
#[derive(Debug, Clone)]
pub struct Arguments {
    names: Vec<Cow<'static, str>>,
    values: Vec<Option<Object>>,
}

impl Arguments {
    pub(crate) fn new(names: Vec<Cow<'static, str>>, values: Vec<Option<Object>>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { names, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Object> {
        self.values.get(index).and_then(Option::as_ref)
    }

    pub fn named(&self, name: &str) -> Option<&Object> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|index| self.get(index))
    }

    pub fn into_values(self) -> IntoIter<Option<Object>> {
        self.values.into_iter()
    }
}

type Callable<C, R> = dyn Fn(&mut C, Arguments) -> R + Send + Sync;

/// A callable paired with the names of its parameters.
///
/// This is the explicit replacement for reading parameter names off a
/// function's signature at runtime. An [`Injector`] resolves each named
/// parameter and calls the underlying function with the results and a
/// context of type `C`.
///
/// The [`injectable!`] macro derives the names from a closure's parameter
/// list, and hooks generated by `#[lifecycle]` derive them from a method's
/// signature.
///
/// # Examples
///
/// ```rust
/// # use namedi::prelude::*;
/// let sum: Injectable<(), i32> = Injectable::new(["a", "b"], |a: Option<Object>, b: Option<Object>| {
///     let value = |o: Option<Object>| o.and_then(|o| o.downcast_ref::<i32>().copied());
///     value(a).unwrap_or(0) + value(b).unwrap_or(0)
/// })
/// .unwrap();
/// assert_eq!(sum.parameters().len(), 2);
/// ```
///
/// [`Injector`]: crate::injector::Injector
/// [`injectable!`]: crate::injectable
pub struct Injectable<C: ?Sized, R> {
    parameters: Parameters,
    callable: Box<Callable<C, R>>,
}

impl<C: ?Sized + 'static, R: 'static> Injectable<C, R> {
    /// Pairs a context-free [`Closure`] with its parameter names.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of names differs from the closure's
    /// arity.
    pub fn new<F, D, I, N>(names: I, closure: F) -> Result<Self, ParameterError>
    where
        F: Closure<D, Output = R>,
        I: IntoIterator<Item = N>,
        N: Into<Cow<'static, str>>,
    {
        let parameters = Parameters::new(names);
        check_arity(&parameters, F::ARITY)?;
        Ok(Self::raw(parameters, move |_: &mut C, arguments| {
            closure.run(arguments)
        }))
    }

    /// Pairs a [`Method`] with its parameter names.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of names differs from the method's
    /// arity, not counting the context.
    pub fn method<F, D, I, N>(names: I, method: F) -> Result<Self, ParameterError>
    where
        F: Method<C, D, Output = R>,
        I: IntoIterator<Item = N>,
        N: Into<Cow<'static, str>>,
    {
        let parameters = Parameters::new(names);
        check_arity(&parameters, F::ARITY)?;
        Ok(Self::raw(parameters, move |context: &mut C, arguments| {
            method.run(context, arguments)
        }))
    }

    /// Wraps a function which receives all resolved [`Arguments`] at once.
    pub fn raw<F>(parameters: Parameters, callable: F) -> Self
    where
        F: Fn(&mut C, Arguments) -> R + Send + Sync + 'static,
    {
        Self {
            parameters,
            callable: Box::new(callable),
        }
    }
}

impl<C: ?Sized, R> Injectable<C, R> {
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Calls the function with arguments resolved from `resolver`.
    pub fn invoke(&self, resolver: &dyn Resolver, context: &mut C) -> R {
        let arguments = self.parameters.resolve_with(resolver);
        (self.callable)(context, arguments)
    }

    /// Calls the function with every parameter set to `None`.
    pub fn invoke_bare(&self, context: &mut C) -> R {
        (self.callable)(context, self.parameters.unresolved())
    }
}

impl<C: ?Sized, R> Debug for Injectable<C, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Injectable<C, R>")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

fn check_arity(parameters: &Parameters, arity: usize) -> Result<(), ParameterError> {
    ensure!(
        parameters.len() == arity,
        CountMismatchSnafu {
            expected: arity,
            actual: parameters.len(),
        }
    );
    Ok(())
}

/// Builds an [`Injectable`] from a closure, using its parameter identifiers as
/// binding names.
///
/// Every parameter receives an `Option<Object>`. A leading `this: &mut T =>`
/// form builds a method-like injectable whose context is `T`.
///
/// ```rust
/// # use namedi::prelude::*;
/// let provider: Injectable<(), Option<Object>> = injectable!(|injection1, injection2| {
///     injection1.or(injection2)
/// });
/// assert_eq!(provider.parameters().iter().collect::<Vec<_>>(), ["injection1", "injection2"]);
/// ```
///
/// [`Injectable`]: crate::provider::Injectable
#[macro_export]
macro_rules! injectable {
    ($this:ident: &mut $context:ty => || $body:expr) => {
        $crate::injectable!($this: &mut $context => | | $body)
    };
    ($this:ident: &mut $context:ty => |$($param:ident),* $(,)?| $body:expr) => {
        $crate::provider::Injectable::raw(
            $crate::injectable!(@parameters $($param),*),
            #[allow(unused_mut, unused_variables)]
            move |$this: &mut $context, arguments: $crate::provider::Arguments| {
                let mut values = arguments.into_values();
                $(
                    let $param: ::std::option::Option<$crate::object::Object> =
                        values.next().flatten();
                )*
                $body
            },
        )
    };
    (|| $body:expr) => {
        $crate::injectable!(| | $body)
    };
    (|$($param:ident),* $(,)?| $body:expr) => {
        $crate::provider::Injectable::raw(
            $crate::injectable!(@parameters $($param),*),
            #[allow(unused_mut, unused_variables)]
            move |_context, arguments: $crate::provider::Arguments| {
                let mut values = arguments.into_values();
                $(
                    let $param: ::std::option::Option<$crate::object::Object> =
                        values.next().flatten();
                )*
                $body
            },
        )
    };
    (@parameters $($param:ident),*) => {{
        let names: &[&'static str] = &[$(stringify!($param)),*];
        $crate::provider::Parameters::new(names.iter().copied())
    }};
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ParameterError {
    #[snafu(display("the callable takes {expected} parameters but {actual} names were given"))]
    #[non_exhaustive]
    CountMismatch { expected: usize, actual: usize },
}
