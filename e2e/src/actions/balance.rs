//! Actor funding and plain transfers.

use anyhow::Result;
use lto_common::transaction::TxKind;

use crate::{context::ScenarioContext, tools::transfer};

/// Regular balance of a named actor, in units
pub async fn balance_of(ctx: &ScenarioContext, name: &str) -> Result<u64> {
    let user = ctx.user(name)?;
    Ok(ctx.node().balance_details(user.address()).await?.regular)
}

/// Bring the regular balance of `name` to exactly `balance` units
pub async fn set_balance(ctx: &ScenarioContext, name: &str, balance: u64) -> Result<()> {
    let user = ctx.user(name)?;
    let regular = balance_of(ctx, name).await?;
    let fee = TxKind::Transfer.base_fee();

    if regular < balance {
        transfer(ctx, ctx.root(), user.address(), balance - regular).await?;
    } else if regular > balance {
        let mut excess = regular - balance;
        // Too little to pay for its own return, so top up by one fee first
        if excess <= fee {
            transfer(ctx, ctx.root(), user.address(), fee).await?;
            excess += fee;
        }
        transfer(ctx, user, ctx.root().address(), excess - fee).await?;
    }
    Ok(())
}

/// Transfer between two named actors
pub async fn transfer_to(
    ctx: &ScenarioContext,
    sender: &str,
    recipient: &str,
    amount: u64,
) -> Result<String> {
    let sender = ctx.user(sender)?;
    let recipient = ctx.user(recipient)?;
    transfer(ctx, sender, recipient.address(), amount).await
}
