use poise::CreateReply;

use crate::{Context, Error};

async fn ping_impl(ctx: Context<'_>) -> Result<(), Error> {
    ctx.send(CreateReply::default().content("Pong!").ephemeral(true))
        .await?;
    Ok(())
}

/// Ping the bot
#[poise::command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    ping_impl(ctx).await
}
