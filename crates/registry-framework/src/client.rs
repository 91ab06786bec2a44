//! # Generic Client
//!
//! The client half of a resource kind.

use crate::entity::ResourceEntity;
use crate::error::FrameworkError;
use crate::mask::FieldMask;
use crate::message::ResourceRequest;
use crate::query::{ListQuery, Page};
use tokio::sync::{mpsc, oneshot};

/// A type-safe, cloneable handle to a `ResourceActor`.
///
/// Every method sends one request over the actor's channel and awaits the reply on a
/// oneshot. Cloning only clones the sender.
pub struct ResourceClient<T: ResourceEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ResourceEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ResourceEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, name: String, params: T::Create) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create {
            name,
            params,
            respond_to,
        })
        .await
    }

    pub async fn get(&self, name: String) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { name, respond_to })
            .await
    }

    pub async fn list(&self, query: ListQuery) -> Result<Page<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { query, respond_to })
            .await
    }

    /// Drain every page of `query`.
    pub async fn list_all(&self, query: ListQuery) -> Result<Vec<T>, FrameworkError> {
        let mut items = Vec::new();
        let mut query = query.with_page_size(crate::query::MAX_PAGE_SIZE as i32)?;
        loop {
            let page = self.list(query.clone()).await?;
            items.extend(page.items);
            match page.next_page_token {
                Some(token) => query = query.with_page_token(Some(token)),
                None => return Ok(items),
            }
        }
    }

    pub async fn update(
        &self,
        name: String,
        update: T::Update,
        mask: FieldMask,
    ) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            name,
            update,
            mask,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, name: String) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { name, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        name: String,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            name,
            action,
            respond_to,
        })
        .await
    }
}
