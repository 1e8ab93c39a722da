//! Removal counts per page and per document.

/// What was removed from a single page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageReport {
    /// Zero-based page index.
    pub page_index: usize,
    /// Annotations dropped from the page's annotation list.
    pub annotations_removed: usize,
    /// Content stream operators dropped (path construction plus fill).
    pub path_ops_removed: usize,
}

impl PageReport {
    /// Create an empty report for the page at `page_index`.
    pub fn new(page_index: usize) -> Self {
        Self {
            page_index,
            ..Self::default()
        }
    }

    /// Returns true if the page was not changed.
    pub fn is_unchanged(&self) -> bool {
        self.annotations_removed == 0 && self.path_ops_removed == 0
    }
}

/// Document totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemovalTotals {
    /// Annotations removed across all pages.
    pub annotations_removed: usize,
    /// Content stream operators removed across all pages.
    pub path_ops_removed: usize,
}

/// Per-page reports plus document totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnredactReport {
    /// One entry per page, in page order.
    pub pages: Vec<PageReport>,
    /// Sums over `pages`.
    pub totals: RemovalTotals,
}

impl UnredactReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page report and fold it into the totals.
    pub fn push(&mut self, page: PageReport) {
        self.totals.annotations_removed += page.annotations_removed;
        self.totals.path_ops_removed += page.path_ops_removed;
        self.pages.push(page);
    }

    /// Number of pages processed.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The one-line summary printed by the command line tool.
    pub fn summary(&self, output: &str) -> String {
        format!(
            "Removed {} redaction annotations and {} rectangle ops -> {}",
            self.totals.annotations_removed, self.totals.path_ops_removed, output
        )
    }
}
