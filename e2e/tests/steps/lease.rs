use anyhow::{ensure, Result};
use cucumber::{given, then, when};
use lto_e2e::{
    actions::lease::{cancel_lease, ensure_leasing, ensure_not_leasing, is_leasing, lease},
    context::ScenarioContext,
    params::{Lto, Version},
};

#[given(expr = "{word} is not leasing to {word}")]
async fn not_leasing(ctx: &mut ScenarioContext, sender: String, recipient: String) -> Result<()> {
    ensure_not_leasing(ctx, &sender, &recipient).await
}

#[given(expr = "{word} is leasing {lto} lto to {word}")]
async fn leasing(
    ctx: &mut ScenarioContext,
    sender: String,
    amount: Lto,
    recipient: String,
) -> Result<()> {
    ensure_leasing(ctx, &sender, &recipient, amount.0).await
}

#[when(expr = "{word} leases {lto} lto to {word}")]
async fn leases(
    ctx: &mut ScenarioContext,
    sender: String,
    amount: Lto,
    recipient: String,
) -> Result<()> {
    let result = lease(ctx, &sender, &recipient, Some(amount.0), None).await;
    ctx.confirm(result)
}

#[when(expr = "{word} leases {version} {lto} lto to {word}")]
async fn leases_version(
    ctx: &mut ScenarioContext,
    sender: String,
    version: Version,
    amount: Lto,
    recipient: String,
) -> Result<()> {
    let result = lease(ctx, &sender, &recipient, Some(amount.0), Some(version.0)).await;
    ctx.confirm(result)
}

#[when(expr = "{word} cancels the lease to {word}")]
async fn cancels(ctx: &mut ScenarioContext, sender: String, recipient: String) -> Result<()> {
    let result = cancel_lease(ctx, &sender, &recipient, None).await;
    ctx.confirm(result)
}

#[when(expr = "{word} cancels the lease {version} to {word}")]
async fn cancels_version(
    ctx: &mut ScenarioContext,
    sender: String,
    version: Version,
    recipient: String,
) -> Result<()> {
    let result = cancel_lease(ctx, &sender, &recipient, Some(version.0)).await;
    ctx.confirm(result)
}

#[when(expr = "{word} tries to lease {lto} lto to {word}")]
async fn tries_to_lease(ctx: &mut ScenarioContext, sender: String, amount: Lto, recipient: String) {
    let result = lease(ctx, &sender, &recipient, Some(amount.0), None).await;
    ctx.attempt(result);
}

// "tries to cancels" is the wording of the older feature files
#[when(expr = "{word} tries to cancel/cancels the lease to {word}")]
async fn tries_to_cancel(ctx: &mut ScenarioContext, sender: String, recipient: String) {
    let result = cancel_lease(ctx, &sender, &recipient, None).await;
    ctx.attempt(result);
}

#[then(expr = "{word} is leasing {lto} lto to {word}")]
async fn assert_leasing(
    ctx: &mut ScenarioContext,
    sender: String,
    amount: Lto,
    recipient: String,
) -> Result<()> {
    ensure!(
        !is_leasing(ctx, &sender, &recipient, Some(amount.0))
            .await?
            .is_empty(),
        "{} is not leasing to {}",
        sender,
        recipient
    );
    Ok(())
}

#[then(expr = "{word} is not leasing to {word}")]
async fn assert_not_leasing(
    ctx: &mut ScenarioContext,
    sender: String,
    recipient: String,
) -> Result<()> {
    let leases = is_leasing(ctx, &sender, &recipient, None).await?;
    ensure!(
        leases.is_empty(),
        "{} is still leasing to {}: {:?}",
        sender,
        recipient,
        leases
    );
    Ok(())
}
