//! Extraction of custom emote markup from message text.

use emote_common::{EmoteId, EmoteRecord};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// `<:name:id>` as Discord renders a static custom emote.
static EMOTE_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<:(\w*):(\d+)>").expect("Invalid emote markup regex pattern"));

/// Scans `text` for emotes that belong to `known`.
///
/// Matches whose id is not in `known` are skipped. Unless `allow_duplicates`
/// is set, only the first occurrence of each id is kept. Output preserves
/// the order of first appearance.
pub fn extract_emotes(
    text: &str,
    known: &HashSet<EmoteId>,
    allow_duplicates: bool,
) -> Vec<EmoteRecord> {
    let mut seen = HashSet::new();
    let mut emotes = Vec::new();

    for captures in EMOTE_MARKUP.captures_iter(text) {
        let Ok(raw_id) = captures[2].parse::<u64>() else {
            continue;
        };
        let id = EmoteId(raw_id);
        if !known.contains(&id) {
            continue;
        }
        if !seen.insert(id) && !allow_duplicates {
            continue;
        }
        emotes.push(EmoteRecord::new(&captures[1], id));
    }

    emotes
}

/// Returns the id of the first emote markup found anywhere in `text`.
pub fn parse_emote_reference(text: &str) -> Option<EmoteId> {
    EMOTE_MARKUP
        .captures(text)
        .and_then(|captures| captures[2].parse::<u64>().ok())
        .map(EmoteId)
}
