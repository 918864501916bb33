//! Routes watch events to a [`ResourceHandler`].

use std::collections::HashMap;
use std::fmt::Debug;
use std::pin::pin;

use error_stack::Report;
use futures::Stream;
use futures::StreamExt;
use kube::runtime::reflector::ObjectRef;
use kube::runtime::watcher;
use kube::runtime::watcher::Event;
use kube::Resource;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::error::WatchError;
use crate::handler::ResourceHandler;

/// Turns a raw watch stream into add/update/delete notifications.
///
/// A watch only reports the current state of an object, so the dispatcher
/// keeps the last known state of every object it has seen in order to tell
/// additions from updates and to hand the old state to
/// [`ResourceHandler::on_update`].
pub struct ResourceEventDispatcher<K, H>
where
    K: Resource<DynamicType = ()>,
{
    handler: H,
    known: HashMap<ObjectRef<K>, K>,
}

impl<K, H> ResourceEventDispatcher<K, H>
where
    K: Resource<DynamicType = ()> + Clone,
    H: ResourceHandler<K>,
    H::Error: Debug,
{
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            known: HashMap::new(),
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Number of objects whose last state is currently remembered.
    pub fn known_objects(&self) -> usize {
        self.known.len()
    }

    /// Deliver a single watch event to the handler.
    ///
    /// Handler errors are logged and swallowed.
    pub fn dispatch(&mut self, event: Event<K>) {
        match event {
            Event::Applied(obj) => self.apply(obj),
            Event::Deleted(obj) => {
                let key = ObjectRef::from_obj(&obj);
                self.known.remove(&key);
                self.notify_delete(&key, &obj);
            }
            Event::Restarted(objs) => {
                debug!(count = objs.len(), "Watch restarted, resyncing");
                let mut previous = std::mem::take(&mut self.known);
                for obj in objs {
                    let key = ObjectRef::from_obj(&obj);
                    match previous.remove(&key) {
                        Some(old) => self.notify_update(&key, &old, &obj),
                        None => self.notify_add(&key, &obj),
                    }
                    self.known.insert(key, obj);
                }
                for (key, gone) in previous {
                    self.notify_delete(&key, &gone);
                }
            }
        }
    }

    /// Consume a watch stream until it ends.
    ///
    /// # Errors
    ///
    /// - [`WatchError::StreamFailed`] on the first error yielded by the stream
    pub async fn run<S>(&mut self, stream: S) -> Result<(), Report<WatchError>>
    where
        S: Stream<Item = Result<Event<K>, watcher::Error>>,
    {
        info!("Starting resource event dispatch");
        let mut stream = pin!(stream);

        while let Some(event) = stream.next().await {
            match event {
                Ok(event) => self.dispatch(event),
                Err(e) => {
                    let message = format!("Watch stream error: {e}");
                    return Err(Report::new(e).change_context(WatchError::StreamFailed { message }));
                }
            }
        }

        info!("Resource event stream ended");
        Ok(())
    }

    fn apply(&mut self, obj: K) {
        let key = ObjectRef::from_obj(&obj);
        match self.known.get(&key) {
            Some(old) => {
                let old = old.clone();
                self.notify_update(&key, &old, &obj);
            }
            None => self.notify_add(&key, &obj),
        }
        self.known.insert(key, obj);
    }

    fn notify_add(&self, key: &ObjectRef<K>, obj: &K) {
        if let Err(e) = self.handler.on_add(obj) {
            warn!(object = %key, "Add handler failed: {e:?}");
        }
    }

    fn notify_update(&self, key: &ObjectRef<K>, old: &K, new: &K) {
        if let Err(e) = self.handler.on_update(old, new) {
            warn!(object = %key, "Update handler failed: {e:?}");
        }
    }

    fn notify_delete(&self, key: &ObjectRef<K>, obj: &K) {
        if let Err(e) = self.handler.on_delete(obj) {
            warn!(object = %key, "Delete handler failed: {e:?}");
        }
    }
}
