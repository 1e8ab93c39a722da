//! Document backend trait.
//!
//! Defines the [`DocumentBackend`] trait that abstracts the PDF operations
//! the unredaction pass needs: reading a page's annotations and content
//! stream, writing back filtered versions of both, and serializing.

use std::collections::BTreeSet;

use unredact_core::{Annotation, Operation, UnredactError};

/// Trait abstracting document access and mutation.
///
/// # Associated Types
///
/// - `Document`: The parsed, mutable document representation.
/// - `Page`: A reference to a single page within a document.
/// - `Content`: A page's decoded content stream in the backend's own form.
/// - `Error`: Backend-specific error type, convertible to [`UnredactError`].
///
/// # Usage
///
/// ```ignore
/// let mut doc = MyBackend::open(pdf_bytes)?;
/// let page = MyBackend::get_page(&doc, 0)?;
/// if let Some(content) = MyBackend::page_content(&doc, &page)? {
///     let ops = MyBackend::content_operations(&content);
///     let marked = find_black_fill_paths(&ops, &options);
///     MyBackend::replace_page_content(&mut doc, &page, content, &marked, true)?;
/// }
/// let bytes = MyBackend::save(&mut doc)?;
/// ```
pub trait DocumentBackend {
    /// The parsed document type.
    type Document;

    /// A reference to a single page within a document.
    type Page;

    /// A decoded content stream.
    type Content;

    /// Backend-specific error type, convertible to [`UnredactError`].
    type Error: std::error::Error + Into<UnredactError>;

    /// Parse PDF bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a readable PDF document, or if
    /// the document is encrypted.
    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error>;

    /// Return the number of pages in the document.
    fn page_count(doc: &Self::Document) -> usize;

    /// Access a page by 0-based index.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range.
    fn get_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error>;

    /// Read the page's annotation list.
    ///
    /// Returns `None` when the page has no annotation list. Otherwise returns
    /// one entry per list element in order; an element that cannot be
    /// resolved to an annotation dictionary is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the annotation list exists but is not an array.
    fn page_annotations(
        doc: &Self::Document,
        page: &Self::Page,
    ) -> Result<Option<Vec<Option<Annotation>>>, Self::Error>;

    /// Replace the page's annotation list with the elements whose `keep`
    /// flag is true, preserving their order and identity.
    ///
    /// When no element is kept the annotation list is removed from the page
    /// entirely rather than left empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the page or its annotation list cannot be resolved.
    fn retain_page_annotations(
        doc: &mut Self::Document,
        page: &Self::Page,
        keep: &[bool],
    ) -> Result<(), Self::Error>;

    /// Decode the page's logical content stream.
    ///
    /// Multiple physical streams are concatenated. Returns `None` when the
    /// page has no content.
    ///
    /// # Errors
    ///
    /// Returns an error if a stream cannot be resolved, decompressed or
    /// decoded into operations.
    fn page_content(
        doc: &Self::Document,
        page: &Self::Page,
    ) -> Result<Option<Self::Content>, Self::Error>;

    /// View the decoded content as engine [`Operation`]s, index-aligned with
    /// the backend's own operation list.
    fn content_operations(content: &Self::Content) -> Vec<Operation>;

    /// Write `content` back as the page's content stream, minus the
    /// operations at the `removed` indices.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be encoded or the page cannot
    /// be updated.
    fn replace_page_content(
        doc: &mut Self::Document,
        page: &Self::Page,
        content: Self::Content,
        removed: &BTreeSet<usize>,
        compress: bool,
    ) -> Result<(), Self::Error>;

    /// Serialize the document, dropping objects no longer referenced.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn save(doc: &mut Self::Document) -> Result<Vec<u8>, Self::Error>;
}
