//! Push event payload and chat message formatting

use serde::Deserialize;

/// A single commit inside a push event payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    /// Commit message
    pub message: String,

    /// Link to the commit on the forge
    pub url: String,
}

/// Inbound push event, as delivered to `/webhook`.
#[derive(Debug, Clone, Deserialize)]
pub struct PushEvent {
    /// Revision before the push
    pub before: String,

    /// Revision after the push
    pub after: String,

    /// Commits contained in the push
    pub commits: Vec<Commit>,
}

impl PushEvent {
    /// Title of the relayed chat post, e.g. `pushed 2 commits`.
    /// Pluralized only when more than one commit was pushed.
    pub fn title(&self) -> String {
        let n = self.commits.len();
        format!("pushed {} commit{}", n, if n > 1 { "s" } else { "" })
    }

    /// Body of the relayed chat post: the revision range, a separator,
    /// then one line per commit.
    pub fn body(&self) -> String {
        let mut body = format!("{} -> {}\n---\n", self.before, self.after);
        body.push_str(
            &self
                .commits
                .iter()
                .map(|c| format!("- {} ({})", c.message, c.url))
                .collect::<Vec<_>>()
                .join("\n"),
        );
        body
    }
}
