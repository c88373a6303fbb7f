use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

use crate::provider::Resolver;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^{}]+)\}")
        .unwrap_or_else(|err| unreachable!("the placeholder pattern should be valid: {err}"))
});

/// Replaces each `${name}` placeholder with the textual form of the
/// resolved injection, or with nothing if `name` resolves to `None`. Any
/// name without braces is looked up, exactly as registered.
pub(super) fn interpolate(source: &str, resolver: &dyn Resolver) -> String {
    PLACEHOLDER
        .replace_all(source, |captures: &Captures<'_>| {
            let name = &captures[1];
            let text = resolver
                .resolve(name)
                .map(|object| object.render())
                .unwrap_or_default();
            trace!(placeholder = name, %text, "interpolated");
            text
        })
        .into_owned()
}
