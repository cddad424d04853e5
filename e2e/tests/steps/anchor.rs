use anyhow::{ensure, Result};
use cucumber::{then, when};
use lto_e2e::{
    actions::anchor::{anchor, is_anchored},
    context::ScenarioContext,
    params::{Text, Version},
};

#[when(expr = "{word} anchors {text}")]
async fn anchors(ctx: &mut ScenarioContext, user: String, hash: Text) -> Result<()> {
    let result = anchor(ctx, Some(&user), Some(&hash.0), None, None).await;
    ctx.confirm(result)
}

#[when(expr = "{word} anchors {version} {text}")]
async fn anchors_version(
    ctx: &mut ScenarioContext,
    user: String,
    version: Version,
    hash: Text,
) -> Result<()> {
    let result = anchor(ctx, Some(&user), Some(&hash.0), None, Some(version.0)).await;
    ctx.confirm(result)
}

#[when(expr = "{word} anchors {text} sponsored by {word}")]
async fn anchors_sponsored(
    ctx: &mut ScenarioContext,
    user: String,
    hash: Text,
    sponsor: String,
) -> Result<()> {
    let result = anchor(ctx, Some(&user), Some(&hash.0), Some(&sponsor), None).await;
    ctx.confirm(result)
}

#[when(expr = "{word} tries to anchor")]
async fn tries_to_anchor(ctx: &mut ScenarioContext, user: String) {
    let result = anchor(ctx, Some(&user), None, None, None).await;
    ctx.attempt(result);
}

#[when(expr = "{word} tries to anchor {text}")]
async fn tries_to_anchor_hash(ctx: &mut ScenarioContext, user: String, hash: Text) {
    let result = anchor(ctx, Some(&user), Some(&hash.0), None, None).await;
    ctx.attempt(result);
}

#[when(expr = "{word} tries to anchor {text} sponsored by {word}")]
async fn tries_to_anchor_sponsored(
    ctx: &mut ScenarioContext,
    user: String,
    hash: Text,
    sponsor: String,
) {
    let result = anchor(ctx, Some(&user), Some(&hash.0), Some(&sponsor), None).await;
    ctx.attempt(result);
}

#[then(expr = "There is an anchor transaction with hash {text} signed by {word}")]
async fn assert_anchored(ctx: &mut ScenarioContext, hash: Text, user: String) -> Result<()> {
    ensure!(
        is_anchored(ctx, &user, &hash.0).await?,
        "Anchor tx with hash \"{}\" not found",
        hash.0
    );
    Ok(())
}
