//! # Generic Messages
//!
//! Request types exchanged between a `ResourceClient` and its `ResourceActor`.

use crate::entity::ResourceEntity;
use crate::error::FrameworkError;
use crate::mask::FieldMask;
use crate::query::{ListQuery, Page};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to a resource actor.
///
/// The variants are the standard resource lifecycle (Create, Get, List, Update, Delete) plus
/// `Action` for kind-specific operations. Every payload type comes from the
/// [`ResourceEntity`] implementation, so a `Spec` payload can never reach the `Api` actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ResourceEntity> {
    Create {
        name: String,
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        name: String,
        respond_to: Response<Option<T>>,
    },
    List {
        query: ListQuery,
        respond_to: Response<Page<T>>,
    },
    Update {
        name: String,
        update: T::Update,
        mask: FieldMask,
        respond_to: Response<T>,
    },
    Delete {
        name: String,
        respond_to: Response<()>,
    },
    Action {
        name: String,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
