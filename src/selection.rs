use crate::feed::FeedEntry;

/// The single selected entry, if any. One of these lives in the app state
/// for the whole session and is only ever changed through `select` and
/// `deselect`.
#[derive(Debug, Default)]
pub struct Selection {
    current: Option<FeedEntry>,
}

impl Selection {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// From any state, selecting an entry makes it the selection.
    pub fn select(&mut self, entry: FeedEntry) {
        self.current = Some(entry);
    }

    /// From any state, deselecting clears the selection.
    pub fn deselect(&mut self) {
        self.current = None;
    }

    pub fn selected(&self) -> Option<&FeedEntry> {
        self.current.as_ref()
    }
}
