//! Core bot logic using the Poise framework.

use crate::error::{BotError, BotResult};
use crate::events::{self, GuildSnapshot};
use crate::platform::SerenityPlatform;
use emote_commands::{
    register_builtin_commands, ChatPlatform, CommandContext, CommandRegistry, Dispatcher,
    ShutdownController, ShutdownReason,
};
use emote_common::{MessageId, UserId};
use emote_config::Config;
use emote_i18n::{Locale, Translator};
use emote_tracking::{spawn_daily_purge, EmoteStore, EmoteTracker, SqliteEmoteStore};
use poise::serenity_prelude as serenity;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

type Error = Box<dyn std::error::Error + Send + Sync>;

/// Shared state handed to the Poise event handler.
pub struct Data {
    /// Routes messages to commands or emote tracking.
    pub dispatcher: Arc<Dispatcher>,
    /// Records reactions.
    pub tracker: Arc<EmoteTracker>,
    /// Presence text shown as the bot's activity.
    pub activity: String,
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("dispatcher", &"<Dispatcher>")
            .field("tracker", &self.tracker)
            .field("activity", &self.activity)
            .finish()
    }
}

/// Collaborators that do not depend on a Discord connection.
#[derive(Clone)]
pub struct Services {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Emote usage storage.
    pub store: Arc<dyn EmoteStore>,
    /// Localized reply messages.
    pub translator: Arc<Translator>,
    /// Built-in commands.
    pub registry: Arc<CommandRegistry>,
    /// Emote tracker shared by messages and reactions.
    pub tracker: Arc<EmoteTracker>,
    /// Shutdown requests from ctrl-c and the `reboot` command.
    pub shutdown: ShutdownController,
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("registry", &self.registry)
            .field("tracker", &self.tracker)
            .field("shutdown", &self.shutdown)
            .finish_non_exhaustive()
    }
}

impl Services {
    /// Opens the configured database and builds the services on top of it.
    pub async fn connect(config: Config) -> BotResult<Self> {
        let store = SqliteEmoteStore::connect(&config.database.url, config.database.max_connections)
            .await?;
        info!("Connected to database {}", config.database.url);
        Self::new(config, Arc::new(store))
    }

    /// Builds the services over an existing store.
    pub fn new(config: Config, store: Arc<dyn EmoteStore>) -> BotResult<Self> {
        let locale: Locale = config.locale.parse()?;
        let translator = Arc::new(Translator::new(locale)?);
        info!("Replies localized for {}", locale);

        let mut registry = CommandRegistry::new();
        register_builtin_commands(&mut registry, &config.commands);
        info!("{} commands registered", registry.len());

        let tracker = Arc::new(EmoteTracker::new(
            store.clone(),
            config.tracking.reaction_history,
            config.tracking.allow_duplicates,
        ));

        Ok(Self {
            config: Arc::new(config),
            store,
            translator,
            registry: Arc::new(registry),
            tracker,
            shutdown: ShutdownController::new(),
        })
    }

    /// Builds the message dispatcher on top of `platform`.
    pub fn dispatcher(&self, platform: Arc<dyn ChatPlatform>) -> Dispatcher {
        let context = CommandContext::new(
            self.config.clone(),
            platform,
            self.store.clone(),
            self.registry.clone(),
            self.translator.clone(),
            self.shutdown.clone(),
        );
        Dispatcher::new(context, self.tracker.clone())
    }

    /// Presence text advertising the help command.
    pub fn activity(&self) -> String {
        format!("{}help", self.config.discord.prefix)
    }
}

/// Main bot structure.
#[derive(Debug)]
pub struct EmoteBot {
    services: Services,
}

impl EmoteBot {
    /// Creates a new bot instance.
    pub const fn new(services: Services) -> Self {
        Self { services }
    }

    /// Handle for requesting a shutdown from outside the bot.
    pub fn shutdown(&self) -> ShutdownController {
        self.services.shutdown.clone()
    }

    /// Runs the bot until ctrl-c or a `reboot` command. Returns why it
    /// stopped.
    pub async fn start(self) -> BotResult<ShutdownReason> {
        let shutdown = self.services.shutdown.clone();
        let purge = spawn_daily_purge(
            self.services.store.clone(),
            self.services.config.tracking.retention_days,
            shutdown.token(),
        );

        let token = self.services.config.discord.token.clone();
        let services = self.services;
        let framework = poise::Framework::builder()
            .options(poise::FrameworkOptions {
                on_error: |error| Box::pin(on_error(error)),
                event_handler: |ctx, event, framework, data| {
                    Box::pin(event_handler(ctx, event, framework, data))
                },
                ..Default::default()
            })
            .setup(move |ctx, ready, _framework| Box::pin(setup(ctx, ready, services)))
            .build();

        let intents = serenity::GatewayIntents::GUILDS
            | serenity::GatewayIntents::GUILD_MESSAGES
            | serenity::GatewayIntents::DIRECT_MESSAGES
            | serenity::GatewayIntents::MESSAGE_CONTENT
            | serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS
            | serenity::GatewayIntents::GUILD_EMOJIS_AND_STICKERS;

        let mut client = serenity::ClientBuilder::new(&token, intents)
            .framework(framework)
            .await?;
        info!("Discord client created");

        let shard_manager = client.shard_manager.clone();
        let watcher = shutdown.clone();
        tokio::spawn(async move {
            wait_for_shutdown(&watcher).await;
            info!("Shutting down Discord shards");
            shard_manager.shutdown_all().await;
        });

        let result = client.start().await;
        if let Err(e) = &result {
            error!("Client error: {:?}", e);
        }

        // Stops the purge loop when the client exits on its own.
        shutdown.request(ShutdownReason::Interrupted);
        if let Err(e) = purge.await {
            warn!("Maintenance task ended abnormally: {}", e);
        }

        result?;
        Ok(shutdown.reason().unwrap_or(ShutdownReason::Interrupted))
    }
}

/// Resolves once ctrl-c is pressed or another shutdown was requested.
async fn wait_for_shutdown(shutdown: &ShutdownController) {
    let token = shutdown.token();
    tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => {
                info!("Received shutdown signal, starting graceful shutdown");
                shutdown.request(ShutdownReason::Interrupted);
            }
            Err(e) => {
                error!("Failed to listen for shutdown signal: {:?}", e);
                token.cancelled().await;
            }
        },
        () = token.cancelled() => {
            info!("Shutdown requested ({})", shutdown.reason().unwrap_or(ShutdownReason::Interrupted));
        }
    }
}

/// Runs the configured reboot command. An empty command does nothing.
pub async fn run_reboot_command(command: &[String]) -> BotResult<()> {
    let Some((program, args)) = command.split_first() else {
        info!("No reboot command configured");
        return Ok(());
    };

    info!("Running reboot command: {}", command.join(" "));
    let status = tokio::process::Command::new(program)
        .args(args)
        .status()
        .await?;

    if status.success() {
        Ok(())
    } else {
        Err(BotError::RebootFailed(status.to_string()))
    }
}

/// Setup function for Poise framework, run on the first ready event.
async fn setup(
    ctx: &serenity::Context,
    ready: &serenity::Ready,
    services: Services,
) -> Result<Data, Error> {
    info!("Bot connected as: {}", ready.user.name);
    info!("Connected to {} guilds", ready.guilds.len());

    let activity = services.activity();
    ctx.set_activity(Some(serenity::ActivityData::playing(activity.clone())));

    let platform = Arc::new(SerenityPlatform::new(
        ctx.http.clone(),
        UserId(ready.user.id.get()),
    ));

    Ok(Data {
        dispatcher: Arc::new(services.dispatcher(platform)),
        tracker: services.tracker.clone(),
        activity,
    })
}

/// Global error handler for the framework
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!("Error in event handler for {:?}: {:?}", event.snake_case_name(), error);
        }
        error => {
            error!("Other error: {:?}", error);
        }
    }
}

/// Central event handler for Discord events
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!("Bot ready event received for: {}", data_about_bot.user.name);
            ctx.set_activity(Some(serenity::ActivityData::playing(data.activity.clone())));
        }
        serenity::FullEvent::Message { new_message } => {
            let guild = new_message.guild_id.and_then(|guild_id| {
                GuildSnapshot::from_cache(
                    &ctx.cache,
                    guild_id,
                    new_message.author.id,
                    events::author_roles(new_message),
                )
            });
            let inbound = events::from_message(new_message, guild);
            let outcome = data.dispatcher.handle_message(&inbound).await;
            debug!(?outcome, "Message handled");
        }
        serenity::FullEvent::ReactionAdd { add_reaction } => {
            reaction_add(ctx, add_reaction, data).await;
        }
        _ => {}
    }
    Ok(())
}

async fn reaction_add(ctx: &serenity::Context, reaction: &serenity::Reaction, data: &Data) {
    let (Some(guild_id), Some(user_id)) = (reaction.guild_id, reaction.user_id) else {
        return;
    };
    let Some(guild) = GuildSnapshot::from_cache(&ctx.cache, guild_id, user_id, &[]) else {
        debug!("Guild {} not cached, reaction skipped", guild_id);
        return;
    };

    let Some(event) = events::reaction_event(
        guild,
        UserId(user_id.get()),
        MessageId(reaction.message_id.get()),
        &reaction.emoji,
    ) else {
        return;
    };

    if let Err(e) = data.tracker.process(&event).await {
        error!("Failed to track reaction: {}", e);
    }
}
