use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

#[derive(Debug)]
struct SealToken;

/// The capability required to unseal a sealed [`InjectionMapping`].
///
/// A key can only be obtained from [`InjectionMapping::seal`] and can't be
/// cloned. Keys are compared by identity, so a key from another mapping or
/// from an earlier seal of the same mapping is always rejected.
///
/// [`InjectionMapping`]: crate::mapping::InjectionMapping
/// [`InjectionMapping::seal`]: crate::mapping::InjectionMapping::seal
pub struct SealKey {
    token: Arc<SealToken>,
}

impl SealKey {
    pub(super) fn generate() -> (Self, SealLock) {
        let token = Arc::new(SealToken);
        let lock = SealLock {
            token: Arc::clone(&token),
        };
        (Self { token }, lock)
    }
}

impl Debug for SealKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SealKey").finish_non_exhaustive()
    }
}

/// The mapping's half of a seal, kept while the mapping stays sealed.
#[derive(Debug)]
pub(super) struct SealLock {
    token: Arc<SealToken>,
}

impl SealLock {
    pub(super) fn opens_with(&self, key: &SealKey) -> bool {
        Arc::ptr_eq(&self.token, &key.token)
    }
}
