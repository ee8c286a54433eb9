use crate::arguments::{Arguments, Signature};
use crate::context::CommandContext;
use crate::error::{CommandError, CommandResult};
use crate::platform::InboundMessage;
use crate::registry::CommandHandler;
use crate::value::TypedValue;
use async_trait::async_trait;
use emote_common::{EmoteId, MAX_MESSAGE_LENGTH};
use emote_i18n::keys;
use emote_tracking::{parse_emote_reference, EmoteStatistics, StatisticsQuery};
use tracing::debug;

const DEFAULT_COLUMNS: i64 = 3;

/// `usage [emote] [ascending] [columns] [limit]`
#[derive(Debug, Default)]
pub struct UsageCommand;

#[async_trait]
impl CommandHandler for UsageCommand {
    fn help(&self) -> &'static str {
        "Returns a list of emotes and their usage.\n\
         \n\
         Parameters\n\
         --------------\n\
         emote: str\n    \
         Returns the usage for only this emote (Returns all emotes if not given).\n\
         ascending: bool\n    \
         (True/False) Order by usage in ascending order (those with lower usage first).\n\
         columns: int\n    \
         How many emotes to print in single row\n\
         limit: int\n    \
         How many emotes to display"
    }

    fn signature(&self) -> Signature {
        Signature::Named(&["emote", "ascending", "columns", "limit"])
    }

    async fn call(
        &self,
        ctx: &CommandContext,
        message: &InboundMessage,
        args: Arguments,
    ) -> CommandResult<()> {
        let hard_limit = ctx.config.commands.usage_limit;
        let limit = args.int_or("limit", i64::from(hard_limit))?;
        if limit > i64::from(hard_limit) {
            return Err(CommandError::validation(format!(
                "'limit' parameter has a hard limit of {hard_limit}!"
            )));
        }
        let limit = u32::try_from(limit)
            .map_err(|_| CommandError::validation("'limit' parameter must not be negative!"))?;

        let columns = args.int_or("columns", DEFAULT_COLUMNS)?;
        let columns = usize::try_from(columns)
            .ok()
            .filter(|&columns| columns > 0)
            .ok_or_else(|| CommandError::validation("'columns' parameter must be at least 1!"))?;

        let ascending = args.bool_or("ascending", false)?;
        let emote = resolve_emote(args.get("emote"))?;

        let server = message
            .server
            .as_ref()
            .ok_or_else(|| CommandError::validation("This command can only be used in a server."))?;

        let query = StatisticsQuery {
            server: server.id,
            limit,
            day_window: ctx.config.tracking.statistics_days,
            emote,
            ascending,
        };
        let rows = ctx.store.query_statistics(&query).await?;
        debug!("Usage query returned {} rows", rows.len());

        let response = if rows.is_empty() {
            ctx.text(keys::NO_DATA)
        } else {
            let header = ctx.text_with(
                keys::USAGE_HEADER,
                &[("days", ctx.config.tracking.statistics_days.into())],
            );
            let budget = MAX_MESSAGE_LENGTH.saturating_sub(header.chars().count() + 1);
            format!("{header}\n{}", format_table(&rows, columns, budget))
        };

        ctx.reply(message, &response).await?;
        Ok(())
    }
}

/// Accepts emote markup, a string containing markup, or a bare id.
fn resolve_emote(value: Option<&TypedValue>) -> CommandResult<Option<EmoteId>> {
    match value {
        None => Ok(None),
        Some(TypedValue::Integer(id)) => u64::try_from(*id)
            .map(|id| Some(EmoteId(id)))
            .map_err(|_| CommandError::validation("'emote' must be an emote or an emote id")),
        Some(TypedValue::String(text)) => parse_emote_reference(text)
            .map(Some)
            .ok_or_else(|| CommandError::validation("'emote' must be an emote or an emote id")),
        Some(other) => Err(CommandError::validation(format!(
            "'emote' must be an emote or an emote id, got {}",
            other.type_name()
        ))),
    }
}

/// One `<:name:id> `total` `window`` cell per emote, `columns` per line.
///
/// Trailing lines that do not fit in `max_chars` are dropped whole.
fn format_table(rows: &[EmoteStatistics], columns: usize, max_chars: usize) -> String {
    let cells: Vec<String> = rows
        .iter()
        .map(|row| {
            format!(
                "{} `{:5}` `{:5}`",
                row.markup(),
                row.total_count,
                row.window_count
            )
        })
        .collect();

    let mut table = String::new();
    let mut used = 0;
    for line in cells.chunks(columns).map(|line| line.join("**|**")) {
        let separator = usize::from(!table.is_empty());
        let len = line.chars().count();
        if used + separator + len > max_chars {
            debug!("Usage table cut to fit the message length");
            break;
        }
        if separator == 1 {
            table.push('\n');
        }
        table.push_str(&line);
        used += separator + len;
    }
    table
}
