//! # ResourceEntity Trait
//!
//! The `ResourceEntity` trait is the contract every registry resource (Project, Api, Version,
//! Spec, Artifact) implements to be stored by the generic [`ResourceActor`](crate::ResourceActor).
//! It fixes the DTOs used for creation, updates and custom actions, the context injected into
//! the lifecycle hooks, and the fields a list filter can look at.
//!
//! # Naming
//! Entities are addressed by their fully-qualified resource name
//! (`projects/demo/apis/petstore`). Names are chosen by the caller on creation, so unlike a
//! counter-keyed store the actor never invents identifiers; it only enforces uniqueness.
//!
//! # Provided Methods (Hooks)
//! - [`ResourceEntity::on_create`]
//! - [`ResourceEntity::on_delete`]
//!
//! Both default to `Ok(())`. Override `on_create` to check that a parent exists.

use crate::mask::FieldMask;
use async_trait::async_trait;
use std::fmt::Debug;

/// Trait that any registry resource must implement to be managed by a `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so they can call other actors. The `Context` associated type is injected
/// into every hook at `run()` time, which lets a child kind hold the client of its parent kind
/// without creating it up front.
#[async_trait]
pub trait ResourceEntity: Clone + Send + Sync + 'static {
    /// Collection segment for this kind (`"apis"`, `"versions"`, ...). Used in logs.
    const KIND: &'static str;

    /// Field-mask paths accepted by `Update`.
    const UPDATABLE_FIELDS: &'static [&'static str];

    /// Payload required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Payload carried by an update. Which of its fields apply is decided by the mask.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations beyond CRUD (e.g. reading spec contents).
    type Action: Send + Sync + Debug;

    /// Result of a custom action.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into the actor. Use `()` if none are needed.
    type Context: Send + Sync;

    /// One error enum for the whole kind.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fully-qualified resource name.
    fn name(&self) -> &str;

    /// Name published with create and update notifications.
    fn notification_name(&self) -> String {
        self.name().to_string()
    }

    /// Value of a filterable field, or `None` if the kind has no such field.
    fn field(&self, path: &str) -> Option<String>;

    /// Build the entity from its name and creation payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(name: String, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction and before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update restricted to `mask`. The mask has already been validated
    /// against [`ResourceEntity::UPDATABLE_FIELDS`].
    async fn on_update(
        &mut self,
        update: Self::Update,
        mask: &FieldMask,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
