//! Text cleanup applied before classification.
//!
//! Strips the noise social posts carry that a polarity classifier chokes on:
//! repost markers, URLs, hash symbols (the word stays), mentions, emoji, and
//! raw newlines.

use regex::Regex;
use std::sync::LazyLock;

static REPOST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^RT\s+").unwrap());
// `.` stops at newlines, so a URL is wiped to end of line; trailing line
// breaks go with it.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://.*[\r\n]*").unwrap());
static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@[A-Za-z0-9]+").unwrap());
static EMOJI_RE: LazyLock<Regex> = LazyLock::new(|| {
    // emoticons, symbols & pictographs, transport & map symbols, flags
    Regex::new(
        r"[\u{1F600}-\u{1F64F}\u{1F300}-\u{1F5FF}\u{1F680}-\u{1F6FF}\u{1F1E0}-\u{1F1FF}]+",
    )
    .unwrap()
});

/// Clean raw post text for classification. Total and side-effect free; the
/// result may be empty.
pub fn normalize(raw: &str) -> String {
    let text = REPOST_RE.replace(raw, "");
    let text = URL_RE.replace_all(&text, "");
    let text = text.replace('#', "");
    let text = MENTION_RE.replace_all(&text, "");
    let text = EMOJI_RE.replace_all(&text, "");
    text.replace('\n', " ")
}
