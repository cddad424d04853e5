use anyhow::{ensure, Result};
use cucumber::{given, then, when};
use lto_e2e::{
    actions::association::{
        assert_data, association, ensure_associated, ensure_data, ensure_not_associated,
        is_associated, revoke_association, set_data,
    },
    context::ScenarioContext,
    params::{Text, Value, Version},
};

#[given(expr = "{word} has an association with {word} of type {int}")]
async fn has_association(
    ctx: &mut ScenarioContext,
    sender: String,
    recipient: String,
    association_type: u64,
) -> Result<()> {
    ensure_associated(ctx, &sender, &recipient, association_type, None).await
}

#[given(expr = "{word} has an association with {word} of type {int} and subject {word}")]
async fn has_association_with_subject(
    ctx: &mut ScenarioContext,
    sender: String,
    recipient: String,
    association_type: u64,
    subject: String,
) -> Result<()> {
    ensure_associated(ctx, &sender, &recipient, association_type, Some(&subject)).await
}

#[given(expr = "{word} does not have an association with {word} of type {int}")]
async fn has_no_association(
    ctx: &mut ScenarioContext,
    sender: String,
    recipient: String,
    association_type: u64,
) -> Result<()> {
    ensure_not_associated(ctx, &sender, &recipient, association_type).await
}

#[given(expr = "{word} has an association with {word} that has data {text} with value {value}")]
async fn has_data(
    ctx: &mut ScenarioContext,
    sender: String,
    recipient: String,
    key: Text,
    value: Value,
) -> Result<()> {
    let result = ensure_data(ctx, &sender, &recipient, &key.0, value.0).await;
    ctx.confirm(result)
}

#[when(expr = "{word} issues an association with {word} of type {int}")]
async fn issues(
    ctx: &mut ScenarioContext,
    sender: String,
    recipient: String,
    association_type: u64,
) -> Result<()> {
    let result = association(ctx, &sender, association_type, &recipient, None, Vec::new(), None).await;
    ctx.confirm(result)
}

#[when(expr = "{word} issues an association {version} with {word} of type {int}")]
async fn issues_version(
    ctx: &mut ScenarioContext,
    sender: String,
    version: Version,
    recipient: String,
    association_type: u64,
) -> Result<()> {
    let result = association(
        ctx,
        &sender,
        association_type,
        &recipient,
        None,
        Vec::new(),
        Some(version.0),
    )
    .await;
    ctx.confirm(result)
}

#[when(expr = "{word} issues an association with {word} that sets data {text} to {value}")]
async fn issues_with_data(
    ctx: &mut ScenarioContext,
    sender: String,
    recipient: String,
    key: Text,
    value: Value,
) -> Result<()> {
    let result = set_data(ctx, &sender, &recipient, &key.0, value.0).await;
    ctx.confirm(result)
}

#[when(expr = "{word} revokes the association with {word} of type {int}")]
async fn revokes(
    ctx: &mut ScenarioContext,
    sender: String,
    recipient: String,
    association_type: u64,
) -> Result<()> {
    let result = revoke_association(ctx, &sender, association_type, &recipient, None, None).await;
    ctx.confirm(result)
}

#[when(expr = "{word} revokes the association with {word} of type {int} and subject {word}")]
async fn revokes_with_subject(
    ctx: &mut ScenarioContext,
    sender: String,
    recipient: String,
    association_type: u64,
    subject: String,
) -> Result<()> {
    let result = revoke_association(
        ctx,
        &sender,
        association_type,
        &recipient,
        Some(subject.as_bytes()),
        None,
    )
    .await;
    ctx.confirm(result)
}

#[when(expr = "{word} revokes the association {version} with {word} of type {int}")]
async fn revokes_version(
    ctx: &mut ScenarioContext,
    sender: String,
    version: Version,
    recipient: String,
    association_type: u64,
) -> Result<()> {
    let result = revoke_association(
        ctx,
        &sender,
        association_type,
        &recipient,
        None,
        Some(version.0),
    )
    .await;
    ctx.confirm(result)
}

#[when(expr = "{word} tries to issue an association with {word} of type {int}")]
async fn tries_to_issue(
    ctx: &mut ScenarioContext,
    sender: String,
    recipient: String,
    association_type: u64,
) {
    let result = association(ctx, &sender, association_type, &recipient, None, Vec::new(), None).await;
    ctx.attempt(result);
}

#[when(expr = "{word} tries to revoke an association with {word} of type {int}")]
async fn tries_to_revoke(
    ctx: &mut ScenarioContext,
    sender: String,
    recipient: String,
    association_type: u64,
) {
    let result = revoke_association(ctx, &sender, association_type, &recipient, None, None).await;
    ctx.attempt(result);
}

#[then(expr = "{word} has an association with {word} that has data {text} with value {value}")]
async fn assert_has_data(
    ctx: &mut ScenarioContext,
    sender: String,
    recipient: String,
    key: Text,
    value: Value,
) -> Result<()> {
    assert_data(ctx, &sender, &recipient, &key.0, &value.0).await
}

#[then(expr = "{word} is associated with {word}")]
async fn assert_associated(
    ctx: &mut ScenarioContext,
    sender: String,
    recipient: String,
) -> Result<()> {
    ensure!(
        !is_associated(ctx, &sender, &recipient).await?.is_empty(),
        "{} is not associated with {}",
        ctx.user(&sender)?.address(),
        ctx.user(&recipient)?.address()
    );
    Ok(())
}

#[then(expr = "{word} is not associated with {word}")]
async fn assert_not_associated(
    ctx: &mut ScenarioContext,
    sender: String,
    recipient: String,
) -> Result<()> {
    let associations = is_associated(ctx, &sender, &recipient).await?;
    ensure!(
        associations.is_empty(),
        "{} is still associated with {}: {:?}",
        sender,
        recipient,
        associations
    );
    Ok(())
}
