use crate::object::Object;
use crate::provider::Arguments;

/// A specialized form of [`Fn`] whose parameters are all resolved by name.
///
/// Closures of `Fn(Option<Object>, ...) -> R + Send + Sync + 'static` are
/// [`Closure`]s. The parameter names are not part of the closure itself;
/// they're supplied alongside it when building an [`Injectable`].
///
/// [`Closure`] is only implemented by closures whose arity is at most 12.
///
/// [`Injectable`]: crate::provider::Injectable
pub trait Closure<D>: Send + Sync + 'static {
    type Output;

    const ARITY: usize;

    fn run(&self, arguments: Arguments) -> Self::Output;
}

/// A variant of [`Closure`] which additionally receives a mutable context as
/// its first argument, like a method receives `self`.
pub trait Method<C: ?Sized, D>: Send + Sync + 'static {
    type Output;

    const ARITY: usize;

    fn run(&self, context: &mut C, arguments: Arguments) -> Self::Output;
}

macro_rules! for_all_arities {
    ($implementation:ident) => {
        $implementation!();
        $implementation!(D1);
        $implementation!(D1, D2);
        $implementation!(D1, D2, D3);
        $implementation!(D1, D2, D3, D4);
        $implementation!(D1, D2, D3, D4, D5);
        $implementation!(D1, D2, D3, D4, D5, D6);
        $implementation!(D1, D2, D3, D4, D5, D6, D7);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12);
    };
}

macro_rules! slot {
    ($dep:ident) => {
        Option<Object>
    };
}

macro_rules! count {
    () => { 0usize };
    ($head:ident $(, $tail:ident)*) => { 1usize + count!($($tail),*) };
}

macro_rules! impl_closure {
    ($($dep:ident),*) => {
        #[allow(non_snake_case, unused_mut, unused_variables)]
        impl<F, R> Closure<($(slot!($dep),)*)> for F
        where
            F: Fn($(slot!($dep),)*) -> R + Send + Sync + 'static,
        {
            type Output = R;

            const ARITY: usize = count!($($dep),*);

            fn run(&self, arguments: Arguments) -> Self::Output {
                let mut values = arguments.into_values();
                $(
                    let $dep = values.next().flatten();
                )*
                self($($dep,)*)
            }
        }

        #[allow(non_snake_case, unused_mut, unused_variables)]
        impl<F, C, R> Method<C, ($(slot!($dep),)*)> for F
        where
            C: ?Sized,
            F: Fn(&mut C, $(slot!($dep),)*) -> R + Send + Sync + 'static,
        {
            type Output = R;

            const ARITY: usize = count!($($dep),*);

            fn run(&self, context: &mut C, arguments: Arguments) -> Self::Output {
                let mut values = arguments.into_values();
                $(
                    let $dep = values.next().flatten();
                )*
                self(context, $($dep,)*)
            }
        }
    };
}

for_all_arities!(impl_closure);
