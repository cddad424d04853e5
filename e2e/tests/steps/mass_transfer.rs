use anyhow::Result;
use cucumber::when;
use lto_e2e::{actions::mass_transfer::mass_transfer, context::ScenarioContext, params::Lto};

#[when(expr = "{word} does a mass-transfer of {lto} lto to {word} and {lto} lto to {word}")]
async fn does_mass_transfer(
    ctx: &mut ScenarioContext,
    sender: String,
    amount1: Lto,
    recipient1: String,
    amount2: Lto,
    recipient2: String,
) -> Result<()> {
    let transfers = [(recipient1.as_str(), amount1.0), (recipient2.as_str(), amount2.0)];
    let result = mass_transfer(ctx, &sender, &transfers).await;
    ctx.confirm(result)
}

#[when(expr = "{word} tries to do a mass-transfer of {lto} lto to {word} and {lto} lto to {word}")]
async fn tries_to_mass_transfer(
    ctx: &mut ScenarioContext,
    sender: String,
    amount1: Lto,
    recipient1: String,
    amount2: Lto,
    recipient2: String,
) {
    let transfers = [(recipient1.as_str(), amount1.0), (recipient2.as_str(), amount2.0)];
    let result = mass_transfer(ctx, &sender, &transfers).await;
    ctx.attempt(result);
}
