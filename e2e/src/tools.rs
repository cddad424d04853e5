//! Helpers shared by the step modules: amount parsing, funding and
//! broadcast with confirmation polling.

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info};
use lto_common::{
    api::{NodeApi, TransactionRecord},
    config::{COIN_DECIMALS, COIN_VALUE},
    crypto::{sha256, Account, Address, HASH_SIZE},
    transaction::{DataValue, Transaction, TxKind},
};
use rand::{distributions::Uniform, Rng};
use tokio::time::{sleep, timeout};

use crate::context::{PollConfig, ScenarioContext};

const RANDOM_HASH_LENGTH: usize = 6;

/// Convert an LTO amount such as `"1.5"` to units.
///
/// The conversion is exact: more than 8 fractional digits is an error.
pub fn convert_balance(amount: &str) -> Result<u64> {
    let amount = amount.trim();
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !is_digits(whole) || !is_digits(fraction) {
        bail!("Invalid amount '{}'", amount);
    }
    if fraction.len() > COIN_DECIMALS as usize {
        bail!(
            "Amount '{}' has more than {} decimals",
            amount,
            COIN_DECIMALS
        );
    }

    let whole: u64 = whole.parse().with_context(|| format!("Invalid amount '{}'", amount))?;
    let fraction_units = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", fraction, width = COIN_DECIMALS as usize);
        padded.parse::<u64>()?
    };

    whole
        .checked_mul(COIN_VALUE)
        .and_then(|units| units.checked_add(fraction_units))
        .ok_or_else(|| anyhow!("Amount '{}' is too large", amount))
}

/// Cast an unquoted step value to a boolean, or else an integer
pub fn cast_boolean_or_int(value: &str) -> Result<DataValue> {
    match value.trim() {
        "true" => Ok(DataValue::Boolean(true)),
        "false" => Ok(DataValue::Boolean(false)),
        other => other
            .parse::<i64>()
            .map(DataValue::Integer)
            .with_context(|| format!("'{}' is neither a boolean nor an integer", other)),
    }
}

/// Digest anchored for a human readable hash text
pub fn encode_hash(text: &str) -> [u8; HASH_SIZE] {
    sha256(text.as_bytes())
}

/// Random lowercase text used when a step anchors without a hash
pub fn random_hash() -> String {
    rand::thread_rng()
        .sample_iter(Uniform::new_inclusive(b'a', b'z'))
        .take(RANDOM_HASH_LENGTH)
        .map(char::from)
        .collect()
}

/// Poll the node until it knows the transaction.
///
/// Fails once `poll.timeout` has elapsed.
pub async fn wait_for_transaction(
    node: &dyn NodeApi,
    id: &str,
    poll: PollConfig,
) -> Result<TransactionRecord> {
    timeout(poll.timeout, async {
        loop {
            if let Some(record) = node.transaction_info(id).await? {
                return Ok::<_, anyhow::Error>(record);
            }
            debug!("Transaction {} not yet known, retrying in {:?}", id, poll.interval);
            sleep(poll.interval).await;
        }
    })
    .await
    .map_err(|_| {
        anyhow!(
            "Timeout waiting for transaction {} after {:?}",
            id,
            poll.timeout
        )
    })?
}

/// Submit a signed transaction and wait for the node to confirm it
pub async fn broadcast(ctx: &ScenarioContext, transaction: &Transaction) -> Result<String> {
    let kind = transaction.kind();
    let receipt = ctx
        .node()
        .broadcast(transaction)
        .await
        .with_context(|| format!("Failed to broadcast {} transaction", kind))?;

    wait_for_transaction(ctx.node(), &receipt.id, ctx.poll())
        .await
        .with_context(|| format!("{} transaction was not confirmed", kind))?;

    info!("{} transaction {} confirmed", kind, receipt.id);
    Ok(receipt.id)
}

/// Transfer `amount` units from one account to an address
pub async fn transfer(
    ctx: &ScenarioContext,
    sender: &Account,
    recipient: &Address,
    amount: u64,
) -> Result<String> {
    let mut transaction = Transaction::transfer(*recipient, amount);
    transaction.sign_with(sender)?;
    broadcast(ctx, &transaction).await
}

/// Make sure `user` can pay `fee`, transferring it from root if not
pub async fn funds_for_transaction(ctx: &ScenarioContext, user: &Account, fee: u64) -> Result<()> {
    let balance = ctx.node().balance_details(user.address()).await?;
    if balance.available < fee {
        debug!(
            "Funding {} with {} for a transaction fee",
            user.address(),
            fee
        );
        transfer(ctx, ctx.root(), user.address(), fee)
            .await
            .context("Failed to fund transaction fee")?;
    }
    Ok(())
}

/// Make sure `user` has at least `amount` available
pub async fn minimum_balance(ctx: &ScenarioContext, user: &Account, amount: u64) -> Result<()> {
    let balance = ctx.node().balance_details(user.address()).await?;
    if balance.available < amount {
        let top_up = (amount - balance.available)
            .checked_add(TxKind::Transfer.base_fee())
            .with_context(|| format!("Cannot top up to {} units", amount))?;
        debug!("Topping up {} with {}", user.address(), top_up);
        transfer(ctx, ctx.root(), user.address(), top_up)
            .await
            .context("Failed to top up balance")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_balance_is_exact() {
        assert_eq!(convert_balance("1.5").unwrap(), 150_000_000);
        assert_eq!(convert_balance("10").unwrap(), 10 * COIN_VALUE);
        assert_eq!(convert_balance("0.00000001").unwrap(), 1);
        assert_eq!(convert_balance("0.1").unwrap(), 10_000_000);
        assert_eq!(convert_balance(" 2.25 ").unwrap(), 225_000_000);
    }

    #[test]
    fn test_convert_balance_rejects_garbage() {
        assert!(convert_balance("0.000000001").is_err());
        assert!(convert_balance("-1").is_err());
        assert!(convert_balance("1e8").is_err());
        assert!(convert_balance(".5").is_err());
        assert!(convert_balance("").is_err());
        assert!(convert_balance("999999999999999").is_err());
    }

    #[test]
    fn test_cast_boolean_or_int() {
        assert_eq!(cast_boolean_or_int("true").unwrap(), DataValue::Boolean(true));
        assert_eq!(cast_boolean_or_int("false").unwrap(), DataValue::Boolean(false));
        assert_eq!(cast_boolean_or_int("-42").unwrap(), DataValue::Integer(-42));
        assert!(cast_boolean_or_int("bar").is_err());
    }

    #[test]
    fn test_random_hash_is_lowercase() {
        let hash = random_hash();
        assert_eq!(hash.len(), RANDOM_HASH_LENGTH);
        assert!(hash.bytes().all(|b| b.is_ascii_lowercase()));
    }

    #[test]
    fn test_encode_hash_is_sha256() {
        assert_eq!(encode_hash("abc"), sha256(b"abc"));
    }
}
