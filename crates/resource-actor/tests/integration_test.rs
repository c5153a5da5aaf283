use async_trait::async_trait;
use resource_actor::mock::{create_mock_client, expect_action, MockClient};
use resource_actor::{ActorEntity, FrameworkError, ResourceActor};

// --- Test Entity: a running bill for one table, keyed by table number ---

#[derive(Clone, Debug, PartialEq)]
struct Tab {
    table: u32,
    covers: u32,
    amount_minor: u64,
}

#[derive(Debug)]
struct TabOpen {
    table: u32,
    covers: u32,
}

#[derive(Debug)]
enum TabAction {
    Charge(u64),
    Split,
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum TabError {
    #[error("a tab needs at least one cover")]
    NoCovers,
    #[error("nothing to split")]
    Empty,
}

#[async_trait]
impl ActorEntity for Tab {
    type Id = u32;
    type Create = TabOpen;
    type Action = TabAction;
    type ActionResult = u64;
    type Context = ();
    type Error = TabError;

    fn assign_id(_sequence: u32, params: &TabOpen) -> u32 {
        params.table
    }

    fn from_create_params(table: u32, params: TabOpen) -> Result<Self, TabError> {
        Ok(Self {
            table,
            covers: params.covers,
            amount_minor: 0,
        })
    }

    async fn on_create(&mut self, _ctx: &()) -> Result<(), TabError> {
        if self.covers == 0 {
            return Err(TabError::NoCovers);
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: TabAction, _ctx: &()) -> Result<u64, TabError> {
        match action {
            TabAction::Charge(amount) => {
                self.amount_minor += amount;
                Ok(self.amount_minor)
            }
            TabAction::Split => {
                if self.amount_minor == 0 {
                    return Err(TabError::Empty);
                }
                Ok(self.amount_minor / u64::from(self.covers))
            }
        }
    }
}

#[tokio::test]
async fn test_natural_keys_and_actions() {
    let (actor, client) = ResourceActor::<Tab>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let id = client.create(TabOpen { table: 7, covers: 2 }).await.unwrap();
    assert_eq!(id, 7);

    assert_eq!(client.perform_action(7, TabAction::Charge(1250)).await.unwrap(), 1250);
    assert_eq!(client.perform_action(7, TabAction::Charge(750)).await.unwrap(), 2000);
    assert_eq!(client.perform_action(7, TabAction::Split).await.unwrap(), 1000);

    let tab = client.get(7).await.unwrap().unwrap();
    assert_eq!(tab.amount_minor, 2000);

    client.delete(7).await.unwrap();
    assert!(client.get(7).await.unwrap().is_none());

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_opening_the_same_key_twice_is_rejected() {
    let (actor, client) = ResourceActor::<Tab>::new(10);
    tokio::spawn(actor.run(()));

    client.create(TabOpen { table: 3, covers: 4 }).await.unwrap();
    let second = client.create(TabOpen { table: 3, covers: 1 }).await;
    assert!(matches!(second, Err(FrameworkError::AlreadyExists(key)) if key == "3"));

    // The first tab is untouched.
    assert_eq!(client.get(3).await.unwrap().unwrap().covers, 4);
}

#[tokio::test]
async fn test_hook_and_action_errors_carry_the_entity_error() {
    let (actor, client) = ResourceActor::<Tab>::new(10);
    tokio::spawn(actor.run(()));

    let err = client.create(TabOpen { table: 1, covers: 0 }).await.unwrap_err();
    assert_eq!(err.downcast_entity::<TabError>().unwrap(), TabError::NoCovers);
    assert!(client.get(1).await.unwrap().is_none());

    client.create(TabOpen { table: 2, covers: 1 }).await.unwrap();
    let err = client.perform_action(2, TabAction::Split).await.unwrap_err();
    assert_eq!(err.downcast_entity::<TabError>().unwrap(), TabError::Empty);

    let missing = client.perform_action(99, TabAction::Charge(1)).await;
    assert!(matches!(missing, Err(FrameworkError::NotFound(_))));
    let missing = client.delete(99).await;
    assert!(matches!(missing, Err(FrameworkError::NotFound(_))));
}

#[tokio::test]
async fn test_closed_actor_is_reported() {
    let (actor, client) = ResourceActor::<Tab>::new(1);
    drop(actor);

    let result = client.get(1).await;
    assert!(matches!(result, Err(FrameworkError::ActorClosed)));
}

#[tokio::test]
async fn test_raw_mock_receiver_sees_actions() {
    let (client, mut receiver) = create_mock_client::<Tab>(4);

    let task = tokio::spawn(async move { client.perform_action(5, TabAction::Charge(300)).await });

    let (id, action, responder) = expect_action(&mut receiver).await.expect("Expected Action");
    assert_eq!(id, 5);
    assert!(matches!(action, TabAction::Charge(300)));
    responder.send(Ok(300)).unwrap();

    assert_eq!(task.await.unwrap().unwrap(), 300);
}

#[tokio::test]
async fn test_scripted_mock_answers_in_order() {
    let mut mock = MockClient::<Tab>::new();
    mock.expect_create().return_ok(4);
    mock.expect_action().return_err(FrameworkError::NotFound("4".into()));
    mock.expect_get().return_ok(None);

    let client = mock.client();
    assert_eq!(client.create(TabOpen { table: 4, covers: 1 }).await.unwrap(), 4);
    assert!(client.perform_action(4, TabAction::Split).await.is_err());
    assert!(client.get(4).await.unwrap().is_none());

    mock.verify();
}

#[tokio::test]
async fn test_scripted_mock_flags_unexpected_requests() {
    let mut mock = MockClient::<Tab>::new();
    mock.expect_get().return_ok(None);

    let client = mock.client();
    let result = client.delete(1).await;
    assert!(matches!(result, Err(FrameworkError::ActorDropped)));

    let verified = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mock.verify()));
    assert!(verified.is_err());
}
