use async_trait::async_trait;
use registry_framework::{
    ChangeKind, FieldMask, FrameworkError, ListQuery, Notifier, ResourceActor, ResourceEntity,
};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Shelf {
    name: String,
    genre: String,
    capacity: u32,
    locked: bool,
}

#[derive(Debug)]
struct ShelfCreate {
    genre: String,
    capacity: u32,
}

#[derive(Debug, Default)]
struct ShelfUpdate {
    genre: Option<String>,
    capacity: Option<u32>,
}

#[derive(Debug)]
enum ShelfAction {
    Lock,
}

#[derive(Debug, thiserror::Error)]
enum ShelfError {
    #[error("capacity must be positive")]
    ZeroCapacity,
    #[error("shelf is locked")]
    Locked,
}

#[async_trait]
impl ResourceEntity for Shelf {
    const KIND: &'static str = "shelves";
    const UPDATABLE_FIELDS: &'static [&'static str] = &["genre", "capacity"];
    type Create = ShelfCreate;
    type Update = ShelfUpdate;
    type Action = ShelfAction;
    type ActionResult = bool;
    type Context = ();
    type Error = ShelfError;

    fn name(&self) -> &str {
        &self.name
    }

    fn field(&self, path: &str) -> Option<String> {
        match path {
            "genre" => Some(self.genre.clone()),
            "capacity" => Some(self.capacity.to_string()),
            _ => None,
        }
    }

    fn from_create_params(name: String, params: ShelfCreate) -> Result<Self, Self::Error> {
        if params.capacity == 0 {
            return Err(ShelfError::ZeroCapacity);
        }
        Ok(Self {
            name,
            genre: params.genre,
            capacity: params.capacity,
            locked: false,
        })
    }

    async fn on_update(
        &mut self,
        update: ShelfUpdate,
        mask: &FieldMask,
        _ctx: &(),
    ) -> Result<(), Self::Error> {
        if mask.applies("genre", update.genre.is_some()) {
            self.genre = update.genre.unwrap_or_default();
        }
        if mask.applies("capacity", update.capacity.is_some()) {
            self.capacity = update.capacity.unwrap_or_default();
        }
        if self.locked {
            return Err(ShelfError::Locked);
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: ShelfAction, _ctx: &()) -> Result<bool, Self::Error> {
        match action {
            ShelfAction::Lock => {
                let changed = !self.locked;
                self.locked = true;
                Ok(changed)
            }
        }
    }
}

fn create(genre: &str, capacity: u32) -> ShelfCreate {
    ShelfCreate {
        genre: genre.to_string(),
        capacity,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    tokio::spawn(actor.run(()));

    // 1. Create
    let shelf = client
        .create("rooms/a/shelves/s1".into(), create("poetry", 10))
        .await
        .unwrap();
    assert_eq!(shelf.genre, "poetry");

    // 2. Duplicate names are rejected
    let duplicate = client
        .create("rooms/a/shelves/s1".into(), create("poetry", 10))
        .await;
    assert!(matches!(duplicate, Err(FrameworkError::AlreadyExists(_))));

    // 3. Update with an empty mask only touches fields that are set
    let updated = client
        .update(
            "rooms/a/shelves/s1".into(),
            ShelfUpdate {
                capacity: Some(20),
                ..Default::default()
            },
            FieldMask::all(),
        )
        .await
        .unwrap();
    assert_eq!(updated.capacity, 20);
    assert_eq!(updated.genre, "poetry");

    // 4. Explicit mask clears an unset field
    let cleared = client
        .update(
            "rooms/a/shelves/s1".into(),
            ShelfUpdate::default(),
            FieldMask::new(["genre"]),
        )
        .await
        .unwrap();
    assert_eq!(cleared.genre, "");
    assert_eq!(cleared.capacity, 20);

    // 5. Action
    let changed = client
        .perform_action("rooms/a/shelves/s1".into(), ShelfAction::Lock)
        .await
        .unwrap();
    assert!(changed);

    // 6. Delete
    client.delete("rooms/a/shelves/s1".into()).await.unwrap();
    assert!(client.get("rooms/a/shelves/s1".into()).await.unwrap().is_none());
    assert!(matches!(
        client.delete("rooms/a/shelves/s1".into()).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn failed_create_hook_is_reported_as_entity_error() {
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    tokio::spawn(actor.run(()));

    let result = client
        .create("rooms/a/shelves/empty".into(), create("poetry", 0))
        .await;
    match result {
        Err(FrameworkError::EntityError(e)) => {
            assert!(e.downcast_ref::<ShelfError>().is_some())
        }
        other => panic!("expected entity error, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_update_leaves_stored_entity_untouched() {
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    tokio::spawn(actor.run(()));

    client
        .create("rooms/a/shelves/s1".into(), create("poetry", 10))
        .await
        .unwrap();
    client
        .perform_action("rooms/a/shelves/s1".into(), ShelfAction::Lock)
        .await
        .unwrap();

    let result = client
        .update(
            "rooms/a/shelves/s1".into(),
            ShelfUpdate {
                genre: Some("drama".into()),
                ..Default::default()
            },
            FieldMask::all(),
        )
        .await;
    assert!(result.is_err());

    let stored = client
        .get("rooms/a/shelves/s1".into())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.genre, "poetry");
}

#[tokio::test]
async fn unknown_mask_path_is_invalid() {
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    tokio::spawn(actor.run(()));

    client
        .create("rooms/a/shelves/s1".into(), create("poetry", 10))
        .await
        .unwrap();
    let result = client
        .update(
            "rooms/a/shelves/s1".into(),
            ShelfUpdate::default(),
            FieldMask::new(["locked"]),
        )
        .await;
    assert!(matches!(result, Err(FrameworkError::InvalidArgument(_))));
}

#[tokio::test]
async fn list_pages_by_name_with_pattern_and_filter() {
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    tokio::spawn(actor.run(()));

    for (name, genre) in [
        ("rooms/a/shelves/s3", "poetry"),
        ("rooms/a/shelves/s1", "poetry"),
        ("rooms/b/shelves/s2", "poetry"),
        ("rooms/a/shelves/s2", "drama"),
        ("rooms/a/shelves/s4", "poetry"),
    ] {
        client.create(name.into(), create(genre, 5)).await.unwrap();
    }

    let query = ListQuery::new("rooms/a/shelves/-")
        .unwrap()
        .with_filter("genre == 'poetry'")
        .unwrap()
        .with_page_size(2)
        .unwrap();

    let first = client.list(query.clone()).await.unwrap();
    let names: Vec<_> = first.items.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["rooms/a/shelves/s1", "rooms/a/shelves/s3"]);
    let token = first.next_page_token.expect("more results");

    let second = client
        .list(query.clone().with_page_token(Some(token)))
        .await
        .unwrap();
    let names: Vec<_> = second.items.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["rooms/a/shelves/s4"]);
    assert!(second.next_page_token.is_none());

    let everything = client
        .list_all(ListQuery::new("rooms/-/shelves/-").unwrap())
        .await
        .unwrap();
    assert_eq!(everything.len(), 5);
}

/// Only changes that actually happened are published.
#[tokio::test]
async fn successful_changes_are_published() {
    let notifier = Notifier::new(16);
    let mut events = notifier.subscribe();
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    tokio::spawn(actor.with_notifier(notifier).run(()));

    let name = "rooms/a/shelves/s1".to_string();
    client.create(name.clone(), create("poetry", 10)).await.unwrap();
    assert!(client.create(name.clone(), create("poetry", 10)).await.is_err());
    assert!(client
        .create("rooms/a/shelves/empty".into(), create("poetry", 0))
        .await
        .is_err());
    client
        .update(
            name.clone(),
            ShelfUpdate {
                capacity: Some(20),
                ..Default::default()
            },
            FieldMask::default(),
        )
        .await
        .unwrap();
    client.perform_action(name.clone(), ShelfAction::Lock).await.unwrap();
    assert!(client
        .update(name.clone(), ShelfUpdate::default(), FieldMask::all())
        .await
        .is_err());
    client.delete(name.clone()).await.unwrap();
    assert!(client.delete(name.clone()).await.is_err());

    let expected = [ChangeKind::Created, ChangeKind::Updated, ChangeKind::Deleted];
    for kind in expected {
        let event = events.recv().await.unwrap();
        assert_eq!((event.kind, event.name.as_str()), (kind, name.as_str()));
    }
    assert!(events.try_recv().is_err());
}
