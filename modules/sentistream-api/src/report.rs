//! CSV artifacts for a completed session.
//!
//! One directory per session under the configured report root:
//! `<search_key>.csv` with every scored post (most-liked first) and
//! `author_freq.csv` with per-author post counts. Purged when the owning
//! connection goes away.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;

use sentistream_common::{ScoredPost, SentiStreamError};
use sentistream_core::ReportBuilder;

pub struct CsvReportBuilder {
    root: PathBuf,
}

impl CsvReportBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn session_dir(&self, session_id: &str) -> PathBuf {
        self.root.join(session_id)
    }
}

#[async_trait]
impl ReportBuilder for CsvReportBuilder {
    async fn build(
        &self,
        session_id: &str,
        search_key: &str,
        posts: &[ScoredPost],
    ) -> Result<(), SentiStreamError> {
        let dir = self.session_dir(session_id);
        tokio::fs::create_dir_all(&dir).await.map_err(io_err)?;

        let posts_path = dir.join(format!("{}.csv", file_stem(search_key)));
        tokio::fs::write(&posts_path, posts_csv(posts))
            .await
            .map_err(io_err)?;

        let freq_path = dir.join("author_freq.csv");
        tokio::fs::write(&freq_path, author_freq_csv(posts))
            .await
            .map_err(io_err)?;

        tracing::info!(session = session_id, path = %posts_path.display(), "Report written");
        Ok(())
    }

    async fn purge(&self, session_id: &str) -> Result<(), SentiStreamError> {
        match tokio::fs::remove_dir_all(self.session_dir(session_id)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_err(err)),
        }
    }
}

fn io_err(err: std::io::Error) -> SentiStreamError {
    SentiStreamError::Report(err.to_string())
}

/// Search keys arrive with a leading `#` and may contain path separators.
fn file_stem(search_key: &str) -> String {
    search_key
        .trim_start_matches('#')
        .replace(['/', '\\'], "_")
}

fn posts_csv(posts: &[ScoredPost]) -> String {
    let mut sorted: Vec<&ScoredPost> = posts.iter().collect();
    sorted.sort_by(|a, b| {
        let ka = (a.record.post.like_count, a.record.post.repost_count, a.record.post.followers_count);
        let kb = (b.record.post.like_count, b.record.post.repost_count, b.record.post.followers_count);
        kb.cmp(&ka)
    });

    let mut out = String::from(
        "ordinal,source_id,author_handle,author_name,posted_at,location,\
         like_count,repost_count,followers_count,following_count,text,permalink,\
         polarity,polarity_score\n",
    );
    for scored in sorted {
        let p = &scored.record.post;
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
            scored.record.ordinal,
            field(&p.source_id),
            field(&p.author_handle),
            field(&p.author_name),
            field(&p.posted_at.to_rfc3339()),
            field(&p.location),
            p.like_count,
            p.repost_count,
            p.followers_count,
            p.following_count,
            field(&p.text),
            field(&p.permalink),
            scored.polarity,
            scored.score,
        ));
    }
    out
}

fn author_freq_csv(posts: &[ScoredPost]) -> String {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for scored in posts {
        *counts.entry(scored.record.post.author_handle.as_str()).or_default() += 1;
    }
    let mut rows: Vec<(&str, u32)> = counts.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let mut out = String::from("author_handle,post_count\n");
    for (handle, count) in rows {
        out.push_str(&format!("{},{}\n", field(handle), count));
    }
    out
}

/// Quote a field when it holds CSV metacharacters; double any inner quotes.
fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
