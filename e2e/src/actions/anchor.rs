use anyhow::Result;
use lto_common::{
    crypto::base58_encode,
    transaction::{Transaction, TxKind},
};

use crate::{
    context::ScenarioContext,
    tools::{broadcast, encode_hash, random_hash},
};

// Anchor transactions scanned when looking for a hash
const ANCHOR_SEARCH_LIMIT: usize = 100;

/// Anchor `sha256(hash)`. No user means root, no hash a random one.
pub async fn anchor(
    ctx: &ScenarioContext,
    user: Option<&str>,
    hash: Option<&str>,
    sponsor: Option<&str>,
    version: Option<u8>,
) -> Result<String> {
    let account = ctx.account(user)?;
    let hash = match hash {
        Some(hash) if !hash.is_empty() => hash.to_string(),
        _ => random_hash(),
    };

    let mut transaction = Transaction::anchor(vec![encode_hash(&hash).to_vec()]);
    if let Some(version) = version {
        transaction = transaction.with_version(version)?;
    }
    transaction.sign_with(account)?;

    if let Some(sponsor) = sponsor {
        transaction.sponsor_with(ctx.user(sponsor)?)?;
    }

    broadcast(ctx, &transaction).await
}

/// Whether `user` signed an anchor transaction for `hash`
pub async fn is_anchored(ctx: &ScenarioContext, user: &str, hash: &str) -> Result<bool> {
    let account = ctx.user(user)?;
    let digest = base58_encode(encode_hash(hash));

    let transactions = ctx
        .node()
        .transactions(account.address(), Some(TxKind::Anchor), ANCHOR_SEARCH_LIMIT)
        .await?;

    Ok(transactions
        .iter()
        .flat_map(|tx| tx.anchors.iter())
        .any(|anchor| *anchor == digest))
}
