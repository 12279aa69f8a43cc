use crate::{Intent, KeywordTable};
use tracing::trace;

/// First-match substring classifier over a [`KeywordTable`].
///
/// No tokenization and no scoring: the text is scanned for each keyword of
/// each set, in table order, and the first hit decides the intent.
#[derive(Debug, Clone, Default)]
pub struct CommandClassifier {
    table: KeywordTable,
}

impl CommandClassifier {
    pub fn new(table: KeywordTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    pub fn classify(&self, text: &str) -> Intent {
        self.explain(text)
            .map(|(intent, _)| intent)
            .unwrap_or(Intent::Unknown)
    }

    /// The winning intent together with the keyword that selected it.
    pub fn explain<'a>(&'a self, text: &str) -> Option<(Intent, &'a str)> {
        let hit = self
            .table
            .sets()
            .iter()
            .find_map(|set| set.find_in(text).map(|keyword| (set.intent, keyword)));
        if let Some((intent, keyword)) = hit {
            trace!(%intent, keyword, "keyword match");
        }
        hit
    }
}
