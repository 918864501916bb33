//! Resource notification handlers.

/// Handles notifications for events that happen to a resource.
///
/// The events are informational only: an error returned from a callback is
/// reported to whoever drives the handler but never stops the watch that
/// produced the event.
///
/// * [`on_add`](Self::on_add) is called when an object is added.
/// * [`on_update`](Self::on_update) is called when an object is modified. `old`
///   is the last known state of the object; several changes may have been
///   combined, so it cannot be used to observe every single change. It is also
///   called when a re-list happens, even if nothing changed, which is useful
///   for periodically resyncing something.
/// * [`on_delete`](Self::on_delete) gets the final known state of the object.
pub trait ResourceHandler<K> {
    type Error;

    fn on_add(&self, obj: &K) -> Result<Option<K>, Self::Error>;

    fn on_update(&self, old: &K, new: &K) -> Result<Option<K>, Self::Error>;

    fn on_delete(&self, obj: &K) -> Result<(), Self::Error>;
}

type AddFn<K, E> = Box<dyn Fn(&K) -> Result<Option<K>, E> + Send + Sync>;
type UpdateFn<K, E> = Box<dyn Fn(&K, &K) -> Result<Option<K>, E> + Send + Sync>;
type DeleteFn<K, E> = Box<dyn Fn(&K) -> Result<(), E> + Send + Sync>;

/// Adaptor to implement [`ResourceHandler`] with as many or as few of the
/// notification functions as needed.
///
/// Unset functions behave as no-ops.
pub struct ResourceHandlerFuncs<K, E> {
    pub add_func: Option<AddFn<K, E>>,
    pub update_func: Option<UpdateFn<K, E>>,
    pub delete_func: Option<DeleteFn<K, E>>,
}

impl<K, E> ResourceHandlerFuncs<K, E> {
    pub fn new() -> Self {
        Self {
            add_func: None,
            update_func: None,
            delete_func: None,
        }
    }

    pub fn with_add<F>(mut self, f: F) -> Self
    where
        F: Fn(&K) -> Result<Option<K>, E> + Send + Sync + 'static,
    {
        self.add_func = Some(Box::new(f));
        self
    }

    pub fn with_update<F>(mut self, f: F) -> Self
    where
        F: Fn(&K, &K) -> Result<Option<K>, E> + Send + Sync + 'static,
    {
        self.update_func = Some(Box::new(f));
        self
    }

    pub fn with_delete<F>(mut self, f: F) -> Self
    where
        F: Fn(&K) -> Result<(), E> + Send + Sync + 'static,
    {
        self.delete_func = Some(Box::new(f));
        self
    }
}

impl<K, E> Default for ResourceHandlerFuncs<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, E> std::fmt::Debug for ResourceHandlerFuncs<K, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceHandlerFuncs")
            .field("add_func", &self.add_func.is_some())
            .field("update_func", &self.update_func.is_some())
            .field("delete_func", &self.delete_func.is_some())
            .finish()
    }
}

impl<K, E> ResourceHandler<K> for ResourceHandlerFuncs<K, E> {
    type Error = E;

    /// Calls `add_func` if it is set.
    fn on_add(&self, obj: &K) -> Result<Option<K>, E> {
        match &self.add_func {
            Some(f) => f(obj),
            None => Ok(None),
        }
    }

    /// Calls `update_func` if it is set.
    fn on_update(&self, old: &K, new: &K) -> Result<Option<K>, E> {
        match &self.update_func {
            Some(f) => f(old, new),
            None => Ok(None),
        }
    }

    /// Calls `delete_func` if it is set.
    fn on_delete(&self, obj: &K) -> Result<(), E> {
        match &self.delete_func {
            Some(f) => f(obj),
            None => Ok(()),
        }
    }
}
