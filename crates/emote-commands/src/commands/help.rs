use crate::arguments::{Arguments, Signature};
use crate::context::CommandContext;
use crate::error::CommandResult;
use crate::platform::InboundMessage;
use crate::registry::CommandHandler;
use async_trait::async_trait;
use emote_i18n::keys;
use std::fmt::Write;

/// `help [names...]`
#[derive(Debug, Default)]
pub struct HelpCommand;

#[async_trait]
impl CommandHandler for HelpCommand {
    fn help(&self) -> &'static str {
        "Returns help.\n\
         \n\
         Parameters\n\
         -----------------\n\
         commands: Sequence\n    \
         Sequence of commands to display help for (Leave empty for all)"
    }

    fn signature(&self) -> Signature {
        Signature::Variadic
    }

    async fn call(
        &self,
        ctx: &CommandContext,
        message: &InboundMessage,
        args: Arguments,
    ) -> CommandResult<()> {
        let requested: Vec<String> = args.rest().iter().map(ToString::to_string).collect();

        let mut response = String::new();
        let names: Vec<&str> = if requested.is_empty() {
            response.push_str(&ctx.text_with(keys::HELP_HEADER, &[("prefix", ctx.prefix().into())]));
            response.push('\n');
            ctx.registry.iter().map(|command| command.name.as_str()).collect()
        } else {
            requested.iter().map(String::as_str).collect()
        };

        for name in names {
            let Some(command) = ctx.registry.get(name) else {
                continue;
            };
            let entry = ctx.text_with(
                keys::HELP_ENTRY,
                &[
                    ("name", command.name.as_str().into()),
                    ("cooldown", command.cooldown_seconds.into()),
                ],
            );
            let _ = write!(response, "{entry}\n```\n{}\n```\n", command.handler.help());
        }

        if response.is_empty() {
            response = ctx.text_with(keys::UNKNOWN_COMMAND, &[("name", requested.join(", ").into())]);
        }

        ctx.reply(message, &response).await?;
        Ok(())
    }
}
