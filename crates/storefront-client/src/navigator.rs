//! Client-side navigation seam.

/// Performs client navigation on behalf of the [`crate::AccessHook`].
pub trait Navigator: Send + Sync + 'static {
    /// Replaces the current history entry with `path`.
    ///
    /// Runs while the hook holds its transition lock, so it must not call
    /// back into the hook.
    fn replace(&self, path: &str);
}
