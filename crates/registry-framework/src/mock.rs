//! # Mock Clients & Testing Guide
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered from a
//! queue of expectations instead of a `ResourceActor`. Use it to test code that sits on top of
//! a client (kind wrappers, the controller's store adapter) without running any actors.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | | MockClient | Real Actor |
//! |---|---|---|
//! | **State** | none, scripted replies | real store |
//! | **Use case** | logic around the client | the actor itself, full system |
//! | **Failures** | `return_err` on any request | needs a state that fails |
//!
//! ## Testing Strategies
//!
//! 1. **Pure mock**: script replies with [`MockClient`] and drive the code under test.
//! 2. **Single actor**: spawn one `ResourceActor` with `()` context.
//! 3. **Actor with mocked dependencies**: spawn the real child actor and inject mocked parent
//!    clients as its context (e.g. a Version actor whose Api parent is a mock).
//! 4. **Full system**: the application's lifecycle orchestrator with every actor running.
//!
//! ```rust
//! use registry_framework::mock::MockClient;
//! use registry_framework::{FieldMask, FrameworkError, ResourceEntity};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Note { name: String }
//! #[derive(Debug)] struct NoteCreate;
//! #[derive(Debug)] struct NoteUpdate;
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! #[async_trait]
//! impl ResourceEntity for Note {
//!     const KIND: &'static str = "notes";
//!     const UPDATABLE_FIELDS: &'static [&'static str] = &[];
//!     type Create = NoteCreate; type Update = NoteUpdate;
//!     type Action = (); type ActionResult = (); type Context = (); type Error = NoteError;
//!     fn name(&self) -> &str { &self.name }
//!     fn field(&self, _: &str) -> Option<String> { None }
//!     fn from_create_params(name: String, _: NoteCreate) -> Result<Self, NoteError> { Ok(Self { name }) }
//!     async fn on_update(&mut self, _: NoteUpdate, _: &FieldMask, _: &()) -> Result<(), NoteError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Note>::new();
//!     mock.expect_get("notes/a").return_ok(Some(Note { name: "notes/a".into() }));
//!     mock.expect_get("notes/b").return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(client.get("notes/a".into()).await.unwrap().is_some());
//!     assert!(matches!(client.get("notes/b".into()).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For step-by-step control there is also [`create_mock_client`], which returns the raw
//! request receiver, and the `expect_*` helper functions to pull typed requests off it.

use crate::client::ResourceClient;
use crate::entity::ResourceEntity;
use crate::error::FrameworkError;
use crate::mask::FieldMask;
use crate::message::ResourceRequest;
use crate::query::{ListQuery, Page};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// One scripted reply, matched in order against incoming requests.
enum Expectation<T: ResourceEntity> {
    Get {
        name: String,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    List {
        response: Result<Page<T>, FrameworkError>,
    },
    Update {
        name: String,
        response: Result<T, FrameworkError>,
    },
    Delete {
        name: String,
        response: Result<(), FrameworkError>,
    },
    Action {
        name: String,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with ordered expectations.
///
/// Requests that arrive out of order, for the wrong name, or after the queue is exhausted
/// make the background task panic, which surfaces in the test as `ActorDropped`.
pub struct MockClient<T: ResourceEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ResourceEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_name(expected: &str, actual: &str) {
    assert_eq!(expected, actual, "mock received a request for the wrong resource");
}

impl<T: ResourceEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();
                match (request, expectation) {
                    (
                        ResourceRequest::Get { name, respond_to },
                        Some(Expectation::Get { name: want, response }),
                    ) => {
                        check_name(&want, &name);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::List { respond_to, .. },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update {
                            name, respond_to, ..
                        },
                        Some(Expectation::Update { name: want, response }),
                    ) => {
                        check_name(&want, &name);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { name, respond_to },
                        Some(Expectation::Delete { name: want, response }),
                    ) => {
                        check_name(&want, &name);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action {
                            name, respond_to, ..
                        },
                        Some(Expectation::Action { name: want, response }),
                    ) => {
                        check_name(&want, &name);
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, name: impl Into<String>) -> ExpectationBuilder<T, Option<T>> {
        let name = name.into();
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Get { name, response }
        })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), |response| {
            Expectation::Create { response }
        })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Page<T>> {
        ExpectationBuilder::new(self.expectations.clone(), |response| {
            Expectation::List { response }
        })
    }

    pub fn expect_update(&mut self, name: impl Into<String>) -> ExpectationBuilder<T, T> {
        let name = name.into();
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Update { name, response }
        })
    }

    pub fn expect_delete(&mut self, name: impl Into<String>) -> ExpectationBuilder<T, ()> {
        let name = name.into();
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Delete { name, response }
        })
    }

    pub fn expect_action(
        &mut self,
        name: impl Into<String>,
    ) -> ExpectationBuilder<T, T::ActionResult> {
        let name = name.into();
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Action { name, response }
        })
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

type Make<T, R> = Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>;

/// Completes an expectation with its reply.
pub struct ExpectationBuilder<T: ResourceEntity, R> {
    expectations: Queue<T>,
    make: Make<T, R>,
}

impl<T: ResourceEntity, R> ExpectationBuilder<T, R> {
    fn new(
        expectations: Queue<T>,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations,
            make: Box::new(make),
        }
    }

    /// Reply with a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Reply with an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.make)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client whose requests land on the returned receiver.
///
/// The test pulls requests with the `expect_*` helpers below, inspects them and answers on
/// the enclosed responder, which gives full control over timing.
pub fn create_mock_client<T: ResourceEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

type Responder<R> = oneshot::Sender<Result<R, FrameworkError>>;

/// Next request, if it is a Create.
pub async fn expect_create<T: ResourceEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(String, T::Create, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create {
            name,
            params,
            respond_to,
        }) => Some((name, params, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a Get.
pub async fn expect_get<T: ResourceEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(String, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { name, respond_to }) => Some((name, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a List.
pub async fn expect_list<T: ResourceEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(ListQuery, Responder<Page<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an Update.
pub async fn expect_update<T: ResourceEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(String, T::Update, FieldMask, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            name,
            update,
            mask,
            respond_to,
        }) => Some((name, update, mask, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an Action.
pub async fn expect_action<T: ResourceEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(String, T::Action, Responder<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            name,
            action,
            respond_to,
        }) => Some((name, action, respond_to)),
        _ => None,
    }
}
