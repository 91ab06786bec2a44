//! # Resource Actor
//!
//! `ResourceActor<T>` is the server half of a resource kind. It owns every entity of that
//! kind and processes requests one at a time, so the store needs no locks.

use crate::client::ResourceClient;
use crate::entity::ResourceEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::notify::{ChangeKind, Notifier};
use crate::query::{ListQuery, Page};
use std::collections::BTreeMap;
use std::ops::Bound;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that stores all entities of one kind, keyed by resource name.
///
/// # Concurrency Model
/// Each actor runs in its own Tokio task and handles its messages sequentially. Several kinds
/// run in parallel; a kind that needs another kind (a Version checking its Api) talks to it
/// through the client injected as `Context`.
///
/// # Ordering
/// The store is a `BTreeMap`, so listings come back ordered by name and page tokens can be
/// the last name of the previous page.
///
/// ```rust
/// use registry_framework::{FieldMask, ResourceActor, ResourceEntity};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { name: String, text: String }
/// #[derive(Debug)] struct NoteCreate { text: String }
/// #[derive(Debug)] struct NoteUpdate { text: Option<String> }
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl ResourceEntity for Note {
///     const KIND: &'static str = "notes";
///     const UPDATABLE_FIELDS: &'static [&'static str] = &["text"];
///     type Create = NoteCreate; type Update = NoteUpdate;
///     type Action = (); type ActionResult = (); type Context = (); type Error = NoteError;
///
///     fn name(&self) -> &str { &self.name }
///     fn field(&self, path: &str) -> Option<String> {
///         (path == "text").then(|| self.text.clone())
///     }
///     fn from_create_params(name: String, p: NoteCreate) -> Result<Self, NoteError> {
///         Ok(Self { name, text: p.text })
///     }
///     async fn on_update(&mut self, u: NoteUpdate, mask: &FieldMask, _: &()) -> Result<(), NoteError> {
///         if mask.applies("text", u.text.is_some()) { self.text = u.text.unwrap_or_default(); }
///         Ok(())
///     }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Note>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let note = client
///         .create("notes/a".into(), NoteCreate { text: "hi".into() })
///         .await
///         .unwrap();
///     assert_eq!(note.text, "hi");
/// }
/// ```
pub struct ResourceActor<T: ResourceEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<String, T>,
    notifier: Option<Notifier>,
}

impl<T: ResourceEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            notifier: None,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Publish changes to `notifier` from now on.
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let kind = T::KIND;
        info!(kind, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create {
                    name,
                    params,
                    respond_to,
                } => {
                    debug!(kind, %name, ?params, "Create");
                    let _ = respond_to.send(self.create(name, params, &context).await);
                }
                ResourceRequest::Get { name, respond_to } => {
                    let item = self.store.get(&name).cloned();
                    debug!(kind, %name, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { query, respond_to } => {
                    let page = self.list(&query);
                    debug!(
                        kind,
                        pattern = %query.pattern(),
                        count = page.items.len(),
                        more = page.next_page_token.is_some(),
                        "List"
                    );
                    let _ = respond_to.send(Ok(page));
                }
                ResourceRequest::Update {
                    name,
                    update,
                    mask,
                    respond_to,
                } => {
                    debug!(kind, %name, ?update, ?mask, "Update");
                    if let Err(e) = mask.validate(T::UPDATABLE_FIELDS) {
                        warn!(kind, %name, error = %e, "Update rejected");
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    let Some(item) = self.store.get_mut(&name) else {
                        warn!(kind, %name, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(name)));
                        continue;
                    };
                    // Hooks work on a copy so a failed update leaves the stored entity intact.
                    let mut updated = item.clone();
                    match updated.on_update(update, &mask, &context).await {
                        Ok(()) => {
                            *item = updated.clone();
                            info!(kind, %name, "Updated");
                            self.notify(ChangeKind::Updated, updated.notification_name());
                            let _ = respond_to.send(Ok(updated));
                        }
                        Err(e) => {
                            warn!(kind, %name, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Delete { name, respond_to } => {
                    debug!(kind, %name, "Delete");
                    let Some(item) = self.store.get(&name) else {
                        warn!(kind, %name, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(name)));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(kind, %name, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&name);
                    info!(kind, %name, size = self.store.len(), "Deleted");
                    self.notify(ChangeKind::Deleted, name);
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    name,
                    action,
                    respond_to,
                } => {
                    debug!(kind, %name, ?action, "Action");
                    let Some(item) = self.store.get_mut(&name) else {
                        warn!(kind, %name, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(name)));
                        continue;
                    };
                    let result = item
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    match &result {
                        Ok(_) => debug!(kind, %name, "Action ok"),
                        Err(e) => warn!(kind, %name, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(kind, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        name: String,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let kind = T::KIND;
        if self.store.contains_key(&name) {
            warn!(kind, %name, "Already exists");
            return Err(FrameworkError::AlreadyExists(name));
        }
        let mut item = T::from_create_params(name.clone(), params).map_err(|e| {
            warn!(kind, %name, error = %e, "Create failed");
            FrameworkError::EntityError(Box::new(e))
        })?;
        if let Err(e) = item.on_create(context).await {
            warn!(kind, %name, error = %e, "on_create failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }
        self.store.insert(name.clone(), item.clone());
        info!(kind, %name, size = self.store.len(), "Created");
        self.notify(ChangeKind::Created, item.notification_name());
        Ok(item)
    }

    fn notify(&self, change: ChangeKind, name: String) {
        if let Some(notifier) = &self.notifier {
            notifier.publish(change, name);
        }
    }

    fn list(&self, query: &ListQuery) -> Page<T> {
        let start = match query.page_token() {
            Some(token) => Bound::Excluded(token.to_string()),
            None => Bound::Unbounded,
        };
        let mut matching = self
            .store
            .range((start, Bound::Unbounded))
            .map(|(_, item)| item)
            .filter(|item| query.pattern().matches(item.name()))
            .filter(|item| query.filter().map_or(true, |f| f.eval(|path| item.field(path))));

        let items: Vec<T> = matching.by_ref().take(query.page_size()).cloned().collect();
        let next_page_token = match (matching.next(), items.last()) {
            (Some(_), Some(last)) => Some(last.name().to_string()),
            _ => None,
        };
        Page {
            items,
            next_page_token,
        }
    }
}
