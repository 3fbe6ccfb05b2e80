use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one request issued through [`RequestTokens`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// A monotonically increasing request counter.
///
/// Every call to [`RequestTokens::begin`] supersedes the tokens handed
/// out before it. A response is only worth applying when its token is
/// still current; otherwise a newer request is in flight and will
/// deliver fresher data.
#[derive(Debug, Default)]
pub struct RequestTokens {
    latest: AtomicU64,
}

impl RequestTokens {
    /// Starts a new request and returns its token.
    #[inline]
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns whether no request has started after `token`.
    #[inline]
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }
}
