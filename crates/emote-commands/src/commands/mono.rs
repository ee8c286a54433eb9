use crate::arguments::{Arguments, Signature};
use crate::context::CommandContext;
use crate::error::{CommandError, CommandResult};
use crate::platform::InboundMessage;
use crate::registry::CommandHandler;
use async_trait::async_trait;
use emote_common::{code_block, MessageId};

/// `mono [content] [message_id]`
#[derive(Debug, Default)]
pub struct MonoCommand;

#[async_trait]
impl CommandHandler for MonoCommand {
    fn help(&self) -> &'static str {
        "Resends the text in monospace.\n\
         \n\
         Parameters\n\
         -------------------\n\
         content: Optional[str]\n    \
         The content to resend.\n\
         message_id: Optional[int]\n    \
         The snowflake id of the message to get content from."
    }

    fn signature(&self) -> Signature {
        Signature::Named(&["content", "message_id"])
    }

    async fn call(
        &self,
        ctx: &CommandContext,
        message: &InboundMessage,
        args: Arguments,
    ) -> CommandResult<()> {
        let content = args.string("content")?;
        let message_id = args.int("message_id")?;

        let content = match (content, message_id) {
            (Some(_), Some(_)) => {
                return Err(CommandError::validation(
                    "message_id was provided, cannot use both parameters at once.",
                ))
            }
            (Some(content), None) => content.to_string(),
            (None, Some(id)) => {
                let invalid = || {
                    CommandError::validation(
                        "Invalid message_id provided (cannot obtain message from id)",
                    )
                };
                let id = u64::try_from(id).map_err(|_| invalid())?;
                ctx.platform
                    .fetch_message(message.channel_id, MessageId(id))
                    .await?
                    .ok_or_else(invalid)?
            }
            (None, None) => {
                return Err(CommandError::validation(
                    "Either content or message_id must be provided.",
                ))
            }
        };

        ctx.reply(message, &code_block(&content)).await?;
        Ok(())
    }
}
