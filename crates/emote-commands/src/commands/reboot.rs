use crate::arguments::{Arguments, Signature};
use crate::context::CommandContext;
use crate::error::{CommandError, CommandResult};
use crate::permissions::Permission;
use crate::platform::InboundMessage;
use crate::registry::CommandHandler;
use crate::shutdown::ShutdownReason;
use async_trait::async_trait;
use emote_i18n::keys;
use std::time::Duration;
use tracing::{info, warn};

/// How long the denial reply stays visible.
pub const DENIAL_VISIBLE_FOR: Duration = Duration::from_secs(5);

/// `reboot <time>`
#[derive(Debug, Default)]
pub struct RebootCommand;

#[async_trait]
impl CommandHandler for RebootCommand {
    fn help(&self) -> &'static str {
        "The command reboots the bot.\n\
         \n\
         Parameters\n\
         --------------\n\
         time: int\n    \
         Time in seconds after which to reboot."
    }

    fn signature(&self) -> Signature {
        Signature::Named(&["time"])
    }

    async fn call(
        &self,
        ctx: &CommandContext,
        message: &InboundMessage,
        args: Arguments,
    ) -> CommandResult<()> {
        let delay = args.required_int("time")?;

        if !ctx.is_allowed(message, Permission::Owner) {
            let reply = ctx.reply(message, &ctx.text(keys::NOT_AUTHORIZED)).await?;
            tokio::time::sleep(DENIAL_VISIBLE_FOR).await;
            if let Err(e) = ctx.platform.delete_message(message.channel_id, reply).await {
                warn!("Failed to delete denial reply {}: {}", reply, e);
            }
            return Ok(());
        }

        let delay = u64::try_from(delay)
            .map_err(|_| CommandError::validation("'time' parameter must not be negative!"))?;

        info!("Reboot requested by {} in {}s", message.author_id, delay);
        let token = ctx.shutdown.token();
        tokio::select! {
            () = token.cancelled() => {}
            () = tokio::time::sleep(Duration::from_secs(delay)) => {
                ctx.shutdown.request(ShutdownReason::Reboot);
            }
        }
        Ok(())
    }
}
