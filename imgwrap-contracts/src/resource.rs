use imgwrap_model::{AttributeName, AttributeSet, ResourceStatus, SourceId};

/// One shared image, loading or loaded, keyed by its source id.
///
/// A resource is owned by its cache and shared read-mostly between every
/// consumer rendering the same source. The only mutation a consumer performs
/// is requesting a clone and handing it back; implementations are expected
/// to count or pool clones internally.
pub trait CachedResource {
    /// Consumer-exclusive render handle produced by [`create_clone`].
    ///
    /// [`create_clone`]: CachedResource::create_clone
    type Handle;

    /// Identifier this resource was resolved from.
    fn source(&self) -> &SourceId;

    /// Current load status. Changes asynchronously as loading settles.
    fn status(&self) -> ResourceStatus;

    /// Produce a new clone carrying `attributes`.
    ///
    /// Returns `None` when the resource has nothing renderable yet.
    fn create_clone(&self, attributes: &AttributeSet) -> Option<Self::Handle>;

    /// Take back a clone previously produced by this resource.
    ///
    /// Passing a clone created by another resource breaks the contract;
    /// callers guarantee it never happens.
    fn release_clone(&self, clone: Self::Handle);

    /// Update one attribute on a live clone.
    fn set_clone_attribute(
        &self,
        clone: &Self::Handle,
        name: AttributeName,
        value: &str,
    );

    /// Clear one attribute on a live clone.
    fn remove_clone_attribute(&self, clone: &Self::Handle, name: AttributeName);
}
