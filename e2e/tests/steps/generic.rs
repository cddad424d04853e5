//! Actor setup, plain transfers and outcome checks.

use anyhow::{bail, ensure, Result};
use cucumber::{given, then, when};
use log::info;
use lto_common::crypto::Account;
use lto_e2e::{
    actions::balance::{balance_of, set_balance, transfer_to},
    context::{ScenarioContext, TxOutcome},
    params::Lto,
};

#[given(expr = "{word} has a new account")]
async fn new_account(ctx: &mut ScenarioContext, user: String) {
    let account = Account::random(ctx.chain_id());
    ctx.add_user(user, account);
}

#[given(expr = "{word} has an account with {lto} lto")]
async fn funded_account(ctx: &mut ScenarioContext, user: String, balance: Lto) -> Result<()> {
    let account = Account::random(ctx.chain_id());
    ctx.add_user(user.clone(), account);
    if balance.0 > 0 {
        set_balance(ctx, &user, balance.0).await?;
    }
    info!("{} has an account with {} units", user, balance.0);
    Ok(())
}

#[given(expr = "{word} has {lto} lto")]
async fn has_balance(ctx: &mut ScenarioContext, user: String, balance: Lto) -> Result<()> {
    set_balance(ctx, &user, balance.0).await
}

#[when(expr = "{word} transfers {lto} lto to {word}")]
async fn transfers(
    ctx: &mut ScenarioContext,
    user: String,
    amount: Lto,
    recipient: String,
) -> Result<()> {
    let result = transfer_to(ctx, &user, &recipient, amount.0).await;
    ctx.confirm(result)
}

#[when(expr = "{word} tries to transfer {lto} lto to {word}")]
async fn tries_to_transfer(ctx: &mut ScenarioContext, user: String, amount: Lto, recipient: String) {
    let result = transfer_to(ctx, &user, &recipient, amount.0).await;
    ctx.attempt(result);
}

#[then(expr = "{word} has {lto} lto")]
async fn assert_balance(ctx: &mut ScenarioContext, user: String, balance: Lto) -> Result<()> {
    let regular = balance_of(ctx, &user).await?;
    ensure!(
        regular == balance.0,
        "{} has {} units instead of {}",
        user,
        regular,
        balance.0
    );
    Ok(())
}

#[then("the transaction is successful")]
async fn transaction_succeeded(ctx: &mut ScenarioContext) -> Result<()> {
    match ctx.last_outcome() {
        Some(TxOutcome::Confirmed { .. }) => Ok(()),
        Some(TxOutcome::Failed { error }) => bail!("The transaction failed: {}", error),
        None => bail!("No transaction was submitted"),
    }
}

#[then("the transaction fails")]
async fn transaction_failed(ctx: &mut ScenarioContext) -> Result<()> {
    match ctx.last_outcome() {
        Some(TxOutcome::Failed { .. }) => Ok(()),
        Some(TxOutcome::Confirmed { id }) => {
            bail!("Transaction {} succeeded, expected it to fail", id)
        }
        None => bail!("No transaction was submitted"),
    }
}
