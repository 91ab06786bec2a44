//! # TypedClient Trait
//!
//! Shared `get`, `list`, `list_all` and `delete` for kind-specific client wrappers, built on the
//! generic [`ResourceClient`].
use crate::{FrameworkError, ListQuery, Page, ResourceClient, ResourceEntity};
use async_trait::async_trait;

/// Trait for kind-specific clients to inherit the read and delete operations.
///
/// Implementors only provide access to the inner client and an error conversion.
///
/// ```rust
/// use registry_framework::{FieldMask, FrameworkError, ResourceClient, ResourceEntity, TypedClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { name: String }
/// #[derive(Debug)] struct NoteCreate;
/// #[derive(Debug)] struct NoteUpdate;
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct NoteError(String);
///
/// #[async_trait]
/// impl ResourceEntity for Note {
///     const KIND: &'static str = "notes";
///     const UPDATABLE_FIELDS: &'static [&'static str] = &[];
///     type Create = NoteCreate; type Update = NoteUpdate;
///     type Action = (); type ActionResult = (); type Context = (); type Error = NoteError;
///     fn name(&self) -> &str { &self.name }
///     fn field(&self, _: &str) -> Option<String> { None }
///     fn from_create_params(name: String, _: NoteCreate) -> Result<Self, NoteError> { Ok(Self { name }) }
///     async fn on_update(&mut self, _: NoteUpdate, _: &FieldMask, _: &()) -> Result<(), NoteError> { Ok(()) }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
/// }
///
/// struct NoteClient { inner: ResourceClient<Note> }
///
/// #[async_trait]
/// impl TypedClient<Note> for NoteClient {
///     type Error = NoteError;
///     fn inner(&self) -> &ResourceClient<Note> { &self.inner }
///     fn map_error(e: FrameworkError) -> NoteError { NoteError(e.to_string()) }
/// }
///
/// async fn usage(client: NoteClient) {
///     // get(), list(), list_all() and delete() come for free
///     let _ = client.get("notes/a".to_string()).await;
///     let _ = client.delete("notes/a".to_string()).await;
/// }
/// ```
#[async_trait]
pub trait TypedClient<T: ResourceEntity>: Send + Sync {
    /// The kind-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the kind-specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a resource by name.
    #[tracing::instrument(skip(self), fields(kind = T::KIND))]
    async fn get(&self, name: String) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(name).await.map_err(Self::map_error)
    }

    /// Fetch one page of resources.
    #[tracing::instrument(skip(self), fields(kind = T::KIND))]
    async fn list(&self, query: ListQuery) -> Result<Page<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(query).await.map_err(Self::map_error)
    }

    /// Fetch every page of `query`.
    #[tracing::instrument(skip(self), fields(kind = T::KIND))]
    async fn list_all(&self, query: ListQuery) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list_all(query).await.map_err(Self::map_error)
    }

    /// Delete a resource by name.
    #[tracing::instrument(skip(self), fields(kind = T::KIND))]
    async fn delete(&self, name: String) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(name).await.map_err(Self::map_error)
    }
}
