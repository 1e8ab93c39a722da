//! Per-page orchestration of the two removal passes.

use unredact_core::{PageReport, UnredactOptions, UnredactReport, find_black_fill_paths};
use unredact_parse::DocumentBackend;

/// Runs the annotation filter and then the content stream pass over pages
/// of a document.
///
/// The backend is chosen per call, so the same processor drives any
/// [`DocumentBackend`]:
///
/// ```ignore
/// let processor = PageProcessor::new(UnredactOptions::aggressive());
/// let report = processor.process_document::<LopdfBackend>(&mut doc)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PageProcessor {
    options: UnredactOptions,
}

impl PageProcessor {
    /// Create a processor with the given options.
    pub fn new(options: UnredactOptions) -> Self {
        Self { options }
    }

    /// The options this processor applies.
    pub fn options(&self) -> &UnredactOptions {
        &self.options
    }

    /// Drop `/Redact` annotations, and in aggressive mode opaque black box
    /// annotations, from the page's annotation list.
    ///
    /// Returns the number of annotations removed. The page's content stream
    /// is never touched. An annotation list left empty is removed from the
    /// page.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the annotation list is malformed.
    pub fn remove_redaction_annotations<B: DocumentBackend>(
        &self,
        doc: &mut B::Document,
        page: &B::Page,
    ) -> Result<usize, B::Error> {
        let Some(annotations) = B::page_annotations(doc, page)? else {
            return Ok(0);
        };

        // Entries that did not resolve are kept untouched.
        let keep: Vec<bool> = annotations
            .iter()
            .map(|annot| annot.as_ref().is_none_or(|a| !a.should_remove(self.options.aggressive)))
            .collect();
        let removed = keep.iter().filter(|keep| !**keep).count();

        if removed > 0 || keep.is_empty() {
            B::retain_page_annotations(doc, page, &keep)?;
        }
        Ok(removed)
    }

    /// Remove black rectangles filled over the page's content.
    ///
    /// Returns the number of content stream operators removed. The page is
    /// left unmodified when nothing qualifies. The annotation list is never
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the content stream cannot be decoded or
    /// written back.
    pub fn remove_black_fill_paths<B: DocumentBackend>(
        &self,
        doc: &mut B::Document,
        page: &B::Page,
    ) -> Result<usize, B::Error> {
        let Some(content) = B::page_content(doc, page)? else {
            return Ok(0);
        };

        let ops = B::content_operations(&content);
        let marked = find_black_fill_paths(&ops, &self.options);
        if marked.is_empty() {
            return Ok(0);
        }

        let removed = marked.len();
        B::replace_page_content(doc, page, content, &marked, self.options.compress_streams)?;
        Ok(removed)
    }

    /// Run both passes over one page, annotations first.
    ///
    /// # Errors
    ///
    /// Returns the first backend error from either pass.
    pub fn process_page<B: DocumentBackend>(
        &self,
        doc: &mut B::Document,
        page: &B::Page,
        page_index: usize,
    ) -> Result<PageReport, B::Error> {
        let annotations_removed = self.remove_redaction_annotations::<B>(doc, page)?;
        let path_ops_removed = self.remove_black_fill_paths::<B>(doc, page)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(page = page_index, annotations_removed, path_ops_removed, "processed page");

        Ok(PageReport {
            page_index,
            annotations_removed,
            path_ops_removed,
        })
    }

    /// Run both passes over every page in order.
    ///
    /// # Errors
    ///
    /// Returns the first backend error; pages before it have already been
    /// modified in `doc`.
    pub fn process_document<B: DocumentBackend>(
        &self,
        doc: &mut B::Document,
    ) -> Result<UnredactReport, B::Error> {
        let mut report = UnredactReport::new();
        for index in 0..B::page_count(doc) {
            let page = B::get_page(doc, index)?;
            report.push(self.process_page::<B>(doc, &page, index)?);
        }
        Ok(report)
    }
}
