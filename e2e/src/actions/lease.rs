use anyhow::{Context, Result};
use lto_common::{
    api::LeaseInfo,
    config::COIN_VALUE,
    transaction::{Transaction, TxKind},
};

use crate::{
    context::ScenarioContext,
    tools::{broadcast, funds_for_transaction, minimum_balance},
};

/// Amount leased when a step does not name one
pub const DEFAULT_LEASE_AMOUNT: u64 = COIN_VALUE;

/// Active leases from `sender` to `recipient`, of `amount` when given
pub async fn is_leasing(
    ctx: &ScenarioContext,
    sender: &str,
    recipient: &str,
    amount: Option<u64>,
) -> Result<Vec<LeaseInfo>> {
    let sender = ctx.user(sender)?;
    let recipient = ctx.user(recipient)?.address().to_string();
    let sender_address = sender.address().to_string();

    let leases = ctx.node().lease_list(sender.address()).await?;
    Ok(leases
        .into_iter()
        .filter(|lease| lease.sender == sender_address && lease.recipient == recipient)
        .filter(|lease| amount.map_or(true, |amount| lease.amount == amount))
        .collect())
}

/// Lease `amount` units, 1 LTO when not given
pub async fn lease(
    ctx: &ScenarioContext,
    sender: &str,
    recipient: &str,
    amount: Option<u64>,
    version: Option<u8>,
) -> Result<String> {
    let sender = ctx.user(sender)?;
    let recipient = ctx.user(recipient)?;

    let mut transaction =
        Transaction::lease(*recipient.address(), amount.unwrap_or(DEFAULT_LEASE_AMOUNT));
    if let Some(version) = version {
        transaction = transaction.with_version(version)?;
    }
    transaction.sign_with(sender)?;

    broadcast(ctx, &transaction).await
}

/// Cancel the first active lease from `sender` to `recipient`
pub async fn cancel_lease(
    ctx: &ScenarioContext,
    sender: &str,
    recipient: &str,
    version: Option<u8>,
) -> Result<String> {
    let lease_id = is_leasing(ctx, sender, recipient, None)
        .await?
        .into_iter()
        .next()
        .map(|lease| lease.id)
        .context("No lease found")?;

    let mut transaction = Transaction::cancel_lease(lease_id);
    if let Some(version) = version {
        transaction = transaction.with_version(version)?;
    }
    transaction.sign_with(ctx.user(sender)?)?;

    broadcast(ctx, &transaction).await
}

/// Lease `amount` units unless such a lease is already active
pub async fn ensure_leasing(
    ctx: &ScenarioContext,
    sender: &str,
    recipient: &str,
    amount: u64,
) -> Result<()> {
    if is_leasing(ctx, sender, recipient, Some(amount))
        .await?
        .is_empty()
    {
        let required = amount
            .checked_add(TxKind::Lease.base_fee())
            .context("Lease amount is too large")?;
        minimum_balance(ctx, ctx.user(sender)?, required).await?;
        lease(ctx, sender, recipient, Some(amount), None).await?;
    }
    Ok(())
}

/// Cancel the lease to `recipient` if there is one
pub async fn ensure_not_leasing(ctx: &ScenarioContext, sender: &str, recipient: &str) -> Result<()> {
    if !is_leasing(ctx, sender, recipient, None).await?.is_empty() {
        funds_for_transaction(ctx, ctx.user(sender)?, TxKind::CancelLease.base_fee()).await?;
        cancel_lease(ctx, sender, recipient, None).await?;
    }
    Ok(())
}
