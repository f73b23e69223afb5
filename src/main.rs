use fundamentos_bot::sheets::{SpreadsheetManager, TokenManager, GCP_CREDENTIALS_FILENAME};
use fundamentos_bot::{commands, config, Data};
use poise::serenity_prelude as serenity;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    let http_client = reqwest::Client::new();
    let token_manager =
        match TokenManager::from_file(GCP_CREDENTIALS_FILENAME, http_client.clone()) {
            Ok(manager) => manager,
            Err(e) => {
                tracing::error!("Failed to load service account credentials: {e}");
                std::process::exit(1);
            }
        };
    let spreadsheet_manager =
        SpreadsheetManager::new(token_manager, config.spreadsheet_id.clone(), http_client);

    let intents = serenity::GatewayIntents::non_privileged();
    let guild_id = config.guild_id;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                match guild_id {
                    Some(id) => {
                        tracing::info!("Guild ID: {id}");
                        poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            serenity::GuildId::new(id),
                        )
                        .await?;
                    }
                    None => {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await?;
                    }
                }
                tracing::info!("Slash commands synced!");
                tracing::info!("Logged in as {}", ready.user.name);
                Ok(Data { spreadsheet_manager })
            })
        })
        .build();

    let mut client = match serenity::ClientBuilder::new(&config.token, intents)
        .framework(framework)
        .await
    {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create client: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = client.start().await {
        tracing::error!("client error: {e}");
    }
}
