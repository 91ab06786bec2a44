//! # Registry Framework
//!
//! Generic building blocks for an in-memory resource registry built on Tokio actors.
//!
//! Every resource kind (projects, apis, versions, ...) gets one [`ResourceActor`] that owns all
//! entities of that kind, keyed by fully-qualified resource name, and processes requests one at
//! a time. Callers talk to it through a cloneable [`ResourceClient`]. The request set is the
//! standard resource lifecycle:
//!
//! - **Create** a named resource (`AlreadyExists` if the name is taken)
//! - **Get** by name
//! - **List** by name pattern (`-` matches any segment), filter expression and page
//! - **Update** restricted by a [`FieldMask`]
//! - **Delete** by name
//! - **Action** for kind-specific operations
//!
//! ## Layers
//!
//! 1. **Entity** ([`ResourceEntity`]) - your resource type, its DTOs and hooks
//! 2. **Runtime** ([`ResourceActor`]) - message loop and store
//! 3. **Interface** ([`ResourceClient`], [`TypedClient`]) - typed requests
//!
//! ## Context Injection
//!
//! Dependencies are injected when the actor starts (`actor.run(context)`), not when it is
//! built. A child kind receives its parent kind's client this way and checks parent existence
//! in [`ResourceEntity::on_create`].
//!
//! ## Change Notifications
//!
//! An actor built with [`ResourceActor::with_notifier`] publishes a [`Notification`] for every
//! successful create, update and delete. See the [`notify`] module.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient` from scripted expectations. See the
//! [`mock`] module for the testing patterns.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod mask;
pub mod message;
pub mod mock;
pub mod notify;
pub mod query;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::TypedClient;
pub use entity::ResourceEntity;
pub use error::FrameworkError;
pub use mask::FieldMask;
pub use message::{ResourceRequest, Response};
pub use notify::{ChangeKind, Notification, Notifier};
pub use query::{Filter, ListQuery, NamePattern, Page};
