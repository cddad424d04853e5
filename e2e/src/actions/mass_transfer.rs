use anyhow::Result;
use lto_common::transaction::{Transaction, TransferEntry};

use crate::{context::ScenarioContext, tools::broadcast};

/// Send every `(recipient, amount)` pair in a single transaction
pub async fn mass_transfer(
    ctx: &ScenarioContext,
    sender: &str,
    transfers: &[(&str, u64)],
) -> Result<String> {
    let sender = ctx.user(sender)?;
    let transfers = transfers
        .iter()
        .map(|(recipient, amount)| {
            Ok(TransferEntry {
                recipient: *ctx.user(recipient)?.address(),
                amount: *amount,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut transaction = Transaction::mass_transfer(transfers);
    transaction.sign_with(sender)?;

    broadcast(ctx, &transaction).await
}
