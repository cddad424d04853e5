use std::{sync::Arc, time::Duration};

use lto_common::{
    config::COIN_VALUE,
    crypto::{base58_encode, Account},
    transaction::{DataValue, TxKind},
};
use lto_e2e::{
    actions::{
        anchor::{anchor, is_anchored},
        association::{
            assert_data, ensure_associated, ensure_not_associated, is_associated,
            revoke_association, set_data,
        },
        balance::{balance_of, set_balance},
        lease::{cancel_lease, ensure_leasing, ensure_not_leasing, is_leasing, lease},
        mass_transfer::mass_transfer,
    },
    context::{PollConfig, ScenarioContext},
    memory_node::MemoryNode,
    tools::encode_hash,
};

const ROOT_BALANCE: u64 = 10_000 * COIN_VALUE;

struct Harness {
    node: Arc<MemoryNode>,
    ctx: ScenarioContext,
}

impl Harness {
    fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let root = Account::from_seed("actions root", b'T');
        let node = Arc::new(MemoryNode::with_balance(root.address(), ROOT_BALANCE));
        let poll = PollConfig {
            interval: Duration::from_millis(5),
            timeout: Duration::from_secs(2),
        };
        let ctx = ScenarioContext::new(node.clone(), root, poll);
        Self { node, ctx }
    }

    async fn actor(&mut self, name: &str, balance: u64) {
        self.ctx.add_user(name, Account::random(b'T'));
        if balance > 0 {
            set_balance(&self.ctx, name, balance).await.unwrap();
        }
    }
}

#[tokio::test]
async fn test_anchor_is_found_by_digest() {
    let mut h = Harness::new();
    h.actor("Alice", 10 * COIN_VALUE).await;

    anchor(&h.ctx, Some("Alice"), Some("abc123"), None, None)
        .await
        .unwrap();

    let alice = h.ctx.user("Alice").unwrap();
    let records = h
        .ctx
        .node()
        .transactions(alice.address(), Some(TxKind::Anchor), 10)
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].anchors,
        vec![base58_encode(encode_hash("abc123"))]
    );

    assert!(is_anchored(&h.ctx, "Alice", "abc123").await.unwrap());
    assert!(!is_anchored(&h.ctx, "Alice", "other").await.unwrap());
}

#[tokio::test]
async fn test_anchor_without_user_is_signed_by_root() {
    let h = Harness::new();
    anchor(&h.ctx, None, None, None, None).await.unwrap();

    let records = h
        .ctx
        .node()
        .transactions(h.ctx.root().address(), Some(TxKind::Anchor), 10)
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_direct_action_error_carries_node_reason() {
    let mut h = Harness::new();
    h.actor("Alice", 0).await;
    h.actor("Bob", 0).await;

    let err = lease(&h.ctx, "Alice", "Bob", Some(10 * COIN_VALUE), None)
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("insufficient funds"));
}

#[tokio::test]
async fn test_lease_and_cancel() {
    let mut h = Harness::new();
    h.actor("Alice", 10 * COIN_VALUE).await;
    h.actor("Bob", 0).await;

    let id = lease(&h.ctx, "Alice", "Bob", Some(COIN_VALUE), None)
        .await
        .unwrap();
    let leases = is_leasing(&h.ctx, "Alice", "Bob", Some(COIN_VALUE))
        .await
        .unwrap();
    assert_eq!(leases.len(), 1);
    assert_eq!(leases[0].id, id);

    // Incoming leases of Bob do not count as Bob leasing
    assert!(is_leasing(&h.ctx, "Bob", "Alice", None)
        .await
        .unwrap()
        .is_empty());

    cancel_lease(&h.ctx, "Alice", "Bob", None).await.unwrap();
    assert!(is_leasing(&h.ctx, "Alice", "Bob", None)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(balance_of(&h.ctx, "Alice").await.unwrap(), 8 * COIN_VALUE);

    let err = cancel_lease(&h.ctx, "Alice", "Bob", None).await.unwrap_err();
    assert!(err.to_string().contains("No lease found"));
}

#[tokio::test]
async fn test_association_data_and_revoke() {
    let mut h = Harness::new();
    h.actor("Alice", 10 * COIN_VALUE).await;
    h.actor("Bob", 0).await;

    set_data(&h.ctx, "Alice", "Bob", "foo", DataValue::String("bar".into()))
        .await
        .unwrap();
    let associations = is_associated(&h.ctx, "Alice", "Bob").await.unwrap();
    assert_eq!(associations.len(), 1);
    assert_eq!(associations[0].association_type, 1);
    assert_eq!(
        associations[0].data_value("foo"),
        Some(&DataValue::String("bar".into()))
    );

    assert_data(&h.ctx, "Alice", "Bob", "foo", &DataValue::String("bar".into()))
        .await
        .unwrap();
    assert!(
        assert_data(&h.ctx, "Alice", "Bob", "foo", &DataValue::String("baz".into()))
            .await
            .is_err()
    );

    revoke_association(&h.ctx, "Alice", 1, "Bob", None, None)
        .await
        .unwrap();
    assert!(is_associated(&h.ctx, "Alice", "Bob").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_lookups_are_idempotent() {
    let mut h = Harness::new();
    h.actor("Alice", 10 * COIN_VALUE).await;
    h.actor("Bob", 0).await;
    ensure_associated(&h.ctx, "Alice", "Bob", 3, None).await.unwrap();
    ensure_leasing(&h.ctx, "Alice", "Bob", COIN_VALUE).await.unwrap();

    let associations = is_associated(&h.ctx, "Alice", "Bob").await.unwrap();
    assert_eq!(
        is_associated(&h.ctx, "Alice", "Bob").await.unwrap(),
        associations
    );
    let leases = is_leasing(&h.ctx, "Alice", "Bob", None).await.unwrap();
    assert_eq!(
        is_leasing(&h.ctx, "Alice", "Bob", None).await.unwrap(),
        leases
    );
}

#[tokio::test]
async fn test_ensure_actions_are_idempotent() {
    let mut h = Harness::new();
    h.actor("Alice", 10 * COIN_VALUE).await;
    h.actor("Bob", 0).await;

    ensure_leasing(&h.ctx, "Alice", "Bob", 2 * COIN_VALUE)
        .await
        .unwrap();
    let count = h.node.transaction_count();
    ensure_leasing(&h.ctx, "Alice", "Bob", 2 * COIN_VALUE)
        .await
        .unwrap();
    assert_eq!(h.node.transaction_count(), count);

    ensure_associated(&h.ctx, "Alice", "Bob", 5, None).await.unwrap();
    let count = h.node.transaction_count();
    ensure_associated(&h.ctx, "Alice", "Bob", 5, None).await.unwrap();
    assert_eq!(h.node.transaction_count(), count);

    ensure_not_associated(&h.ctx, "Alice", "Bob", 5).await.unwrap();
    let count = h.node.transaction_count();
    ensure_not_associated(&h.ctx, "Alice", "Bob", 5).await.unwrap();
    assert_eq!(h.node.transaction_count(), count);

    ensure_not_leasing(&h.ctx, "Alice", "Bob").await.unwrap();
    let count = h.node.transaction_count();
    ensure_not_leasing(&h.ctx, "Alice", "Bob").await.unwrap();
    assert_eq!(h.node.transaction_count(), count);
}

#[tokio::test]
async fn test_set_balance_reaches_exact_amount() {
    let mut h = Harness::new();
    h.actor("Alice", 10 * COIN_VALUE).await;

    for target in [350_000_000, 3 * COIN_VALUE, 0] {
        set_balance(&h.ctx, "Alice", target).await.unwrap();
        assert_eq!(balance_of(&h.ctx, "Alice").await.unwrap(), target);
    }
}

#[tokio::test]
async fn test_mass_transfer_pays_every_recipient() {
    let mut h = Harness::new();
    h.actor("Alice", 10 * COIN_VALUE).await;
    h.actor("Bob", 0).await;
    h.actor("Carol", 0).await;

    mass_transfer(
        &h.ctx,
        "Alice",
        &[("Bob", COIN_VALUE), ("Carol", COIN_VALUE / 2)],
    )
    .await
    .unwrap();

    assert_eq!(balance_of(&h.ctx, "Bob").await.unwrap(), COIN_VALUE);
    assert_eq!(balance_of(&h.ctx, "Carol").await.unwrap(), COIN_VALUE / 2);
    // 1.5 sent, 1.2 fee
    assert_eq!(balance_of(&h.ctx, "Alice").await.unwrap(), 730_000_000);
}

#[tokio::test]
async fn test_unknown_actor_is_an_error() {
    let h = Harness::new();
    let err = anchor(&h.ctx, Some("Mallory"), Some("abc"), None, None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Unknown actor 'Mallory'"));
}
