use anyhow::{bail, ensure, Context, Result};
use log::debug;
use lto_common::{
    api::AssociationInfo,
    crypto::base58_decode,
    transaction::{DataEntry, DataValue, Transaction, TxKind},
};

use crate::{
    context::ScenarioContext,
    tools::{broadcast, funds_for_transaction},
};

/// Data entries can only be set on this type, with version 4
pub const DATA_ASSOCIATION_TYPE: u64 = 1;
pub const DATA_ASSOCIATION_VERSION: u8 = 4;

/// Issue an association from `sender` to `recipient`
pub async fn association(
    ctx: &ScenarioContext,
    sender: &str,
    association_type: u64,
    recipient: &str,
    subject: Option<&[u8]>,
    data: Vec<DataEntry>,
    version: Option<u8>,
) -> Result<String> {
    let sender = ctx.user(sender)?;
    let recipient = ctx.user(recipient)?;

    let mut transaction = Transaction::association(
        *recipient.address(),
        association_type,
        subject.unwrap_or_default().to_vec(),
        data,
    );
    if let Some(version) = version {
        transaction = transaction.with_version(version)?;
    }
    transaction.sign_with(sender)?;

    broadcast(ctx, &transaction).await
}

/// Issue a type 1, version 4 association carrying one data entry
pub async fn set_data(
    ctx: &ScenarioContext,
    sender: &str,
    recipient: &str,
    key: &str,
    value: DataValue,
) -> Result<String> {
    association(
        ctx,
        sender,
        DATA_ASSOCIATION_TYPE,
        recipient,
        None,
        vec![DataEntry::new(key, value)],
        Some(DATA_ASSOCIATION_VERSION),
    )
    .await
}

pub async fn revoke_association(
    ctx: &ScenarioContext,
    sender: &str,
    association_type: u64,
    recipient: &str,
    subject: Option<&[u8]>,
    version: Option<u8>,
) -> Result<String> {
    let sender = ctx.user(sender)?;
    let recipient = ctx.user(recipient)?;

    let mut transaction = Transaction::revoke_association(
        *recipient.address(),
        association_type,
        subject.unwrap_or_default().to_vec(),
    );
    if let Some(version) = version {
        transaction = transaction.with_version(version)?;
    }
    transaction.sign_with(sender)?;

    broadcast(ctx, &transaction).await
}

/// Outgoing associations of `sender` to `recipient`
pub async fn is_associated(
    ctx: &ScenarioContext,
    sender: &str,
    recipient: &str,
) -> Result<Vec<AssociationInfo>> {
    let sender = ctx.user(sender)?;
    let recipient = ctx.user(recipient)?.address().to_string();

    let status = ctx.node().association_status(sender.address()).await?;
    Ok(status
        .outgoing
        .into_iter()
        .filter(|association| association.recipient == recipient)
        .collect())
}

fn subject_bytes(association: &AssociationInfo) -> Result<Vec<u8>> {
    match &association.subject {
        Some(subject) => base58_decode(subject)
            .with_context(|| format!("Invalid association subject '{}'", subject)),
        None => Ok(Vec::new()),
    }
}

/// Issue an association of `association_type` unless one exists
pub async fn ensure_associated(
    ctx: &ScenarioContext,
    sender: &str,
    recipient: &str,
    association_type: u64,
    subject: Option<&str>,
) -> Result<()> {
    let subject = subject.map(str::as_bytes);
    let matches = |associations: &[AssociationInfo]| {
        associations.iter().any(|association| {
            association.association_type == association_type
                && subject.map_or(true, |s| {
                    subject_bytes(association).ok().as_deref() == Some(s)
                })
        })
    };

    if matches(&is_associated(ctx, sender, recipient).await?) {
        return Ok(());
    }

    funds_for_transaction(ctx, ctx.user(sender)?, TxKind::Association.base_fee()).await?;
    association(ctx, sender, association_type, recipient, subject, Vec::new(), None).await?;

    ensure!(
        matches(&is_associated(ctx, sender, recipient).await?),
        "Failed to issue association"
    );
    Ok(())
}

/// Revoke every association of `association_type` to `recipient`
pub async fn ensure_not_associated(
    ctx: &ScenarioContext,
    sender: &str,
    recipient: &str,
    association_type: u64,
) -> Result<()> {
    let existing = is_associated(ctx, sender, recipient).await?;
    for found in existing
        .iter()
        .filter(|association| association.association_type == association_type)
    {
        debug!(
            "Revoking association {} of type {}",
            found.issue_transaction_id, association_type
        );
        let subject = subject_bytes(found)?;
        funds_for_transaction(ctx, ctx.user(sender)?, TxKind::RevokeAssociation.base_fee()).await?;
        revoke_association(
            ctx,
            sender,
            association_type,
            recipient,
            Some(&subject),
            None,
        )
        .await?;
    }

    let remaining = is_associated(ctx, sender, recipient).await?;
    ensure!(
        !remaining
            .iter()
            .any(|association| association.association_type == association_type),
        "Failed to revoke association"
    );
    Ok(())
}

/// Fund the fee, then set a data entry on the association to `recipient`
pub async fn ensure_data(
    ctx: &ScenarioContext,
    sender: &str,
    recipient: &str,
    key: &str,
    value: DataValue,
) -> Result<String> {
    let fee = TxKind::Association.base_fee() + TxKind::Association.var_fee();
    funds_for_transaction(ctx, ctx.user(sender)?, fee).await?;
    set_data(ctx, sender, recipient, key, value).await
}

/// Check that an association to `recipient` carries `key` with `expected`
pub async fn assert_data(
    ctx: &ScenarioContext,
    sender: &str,
    recipient: &str,
    key: &str,
    expected: &DataValue,
) -> Result<()> {
    let associations = is_associated(ctx, sender, recipient).await?;
    if associations.is_empty() {
        bail!(
            "{} is not associated with {}",
            ctx.user(sender)?.address(),
            ctx.user(recipient)?.address()
        );
    }

    let found = associations
        .iter()
        .find_map(|association| association.data_value(key))
        .with_context(|| format!("No association with key {}", key))?;
    ensure!(
        found == expected,
        "Association data {} is {} instead of {}",
        key,
        found,
        expected
    );
    Ok(())
}
