use crate::arguments::{Arguments, Signature};
use crate::context::CommandContext;
use crate::error::CommandResult;
use crate::permissions::Permission;
use crate::platform::InboundMessage;
use crate::registry::CommandHandler;
use async_trait::async_trait;
use emote_i18n::keys;
use tracing::{error, info};

/// Most messages the platform returns from one history request.
const MAX_HISTORY: u8 = 100;

/// `clean <limit>`
#[derive(Debug, Default)]
pub struct CleanCommand;

#[async_trait]
impl CommandHandler for CleanCommand {
    fn help(&self) -> &'static str {
        "The command clears bot's messages\n\
         \n\
         Parameters\n\
         --------------\n\
         limit: int\n    \
         How many messages to delete"
    }

    fn signature(&self) -> Signature {
        Signature::Named(&["limit"])
    }

    async fn call(
        &self,
        ctx: &CommandContext,
        message: &InboundMessage,
        args: Arguments,
    ) -> CommandResult<()> {
        let limit = args.required_int("limit")?;

        if !ctx.is_allowed(message, Permission::Administrator) {
            ctx.reply(message, &ctx.text(keys::NOT_AUTHORIZED)).await?;
            return Ok(());
        }

        let max = ctx.config.commands.clean_limit;
        if limit > i64::from(max) {
            let reply = ctx.text_with(keys::CLEAN_LIMIT, &[("limit", max.into())]);
            ctx.reply(message, &reply).await?;
            return Ok(());
        }

        let limit = u8::try_from(limit.clamp(0, i64::from(MAX_HISTORY))).unwrap_or(MAX_HISTORY);
        if limit == 0 {
            return Ok(());
        }

        let history = match ctx.platform.recent_messages(message.channel_id, limit).await {
            Ok(history) => history,
            Err(e) => {
                error!("Failed to read history of channel {}: {}", message.channel_id, e);
                return Ok(());
            }
        };

        let bot = ctx.platform.bot_user_id();
        let mut deleted = 0usize;
        for summary in history.iter().filter(|summary| summary.author_id == bot) {
            match ctx.platform.delete_message(message.channel_id, summary.id).await {
                Ok(()) => deleted += 1,
                Err(e) => error!("Failed to delete message {}: {}", summary.id, e),
            }
        }

        info!("Deleted {} bot messages in channel {}", deleted, message.channel_id);
        Ok(())
    }
}
