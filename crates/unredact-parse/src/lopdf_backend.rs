//! lopdf-based document backend.
//!
//! Implements [`DocumentBackend`] using the [lopdf](https://crates.io/crates/lopdf)
//! crate for PDF parsing, editing and serialization.

use std::collections::BTreeSet;

use lopdf::content::Content;
use lopdf::{Object, ObjectId};
use unredact_core::{Annotation, AnnotationSubtype, Operand, Operation, UnredactError};

use crate::backend::DocumentBackend;
use crate::error::BackendError;
use crate::inline_image::{Segment, split_inline_images};

/// Operator tag standing in for a whole inline image in the operation view.
const INLINE_IMAGE_OPERATOR: &str = "BI";

/// A parsed PDF document backed by lopdf.
pub struct LopdfDocument {
    /// The underlying lopdf document.
    inner: lopdf::Document,
    /// Cached ordered list of page ObjectIds (indexed by 0-based page number).
    page_ids: Vec<ObjectId>,
}

impl LopdfDocument {
    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &lopdf::Document {
        &self.inner
    }
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

/// A reference to a single page within a [`LopdfDocument`].
#[derive(Debug, Clone, Copy)]
pub struct LopdfPage {
    /// The lopdf object ID for this page.
    pub object_id: ObjectId,
    /// The 0-based page index.
    pub index: usize,
}

/// One run of a page's content: decoded operators, or an inline image kept
/// as the raw bytes from `BI` through `EI`.
#[derive(Debug, Clone)]
pub enum ContentPart {
    Operations(Vec<lopdf::content::Operation>),
    InlineImage(Vec<u8>),
}

/// A page's logical content stream.
///
/// Each inline image counts as one operation, so indices from
/// [`DocumentBackend::content_operations`] line up with the parts.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub parts: Vec<ContentPart>,
}

impl PageContent {
    /// Decode content stream bytes, passing inline images through untouched.
    pub fn decode(bytes: &[u8]) -> Result<Self, BackendError> {
        let mut parts = Vec::new();
        for segment in split_inline_images(bytes)? {
            match segment {
                Segment::Operators(range) => {
                    let content = Content::decode(&bytes[range]).map_err(|e| {
                        BackendError::Parse(format!("failed to decode content stream: {e}"))
                    })?;
                    if !content.operations.is_empty() {
                        parts.push(ContentPart::Operations(content.operations));
                    }
                }
                Segment::InlineImage(range) => {
                    parts.push(ContentPart::InlineImage(bytes[range].to_vec()));
                }
            }
        }
        Ok(Self { parts })
    }

    /// Encode the content, skipping operations whose index is in `removed`.
    pub fn encode_without(self, removed: &BTreeSet<usize>) -> Result<Vec<u8>, BackendError> {
        let mut out = Vec::new();
        let mut index = 0;
        for part in self.parts {
            let bytes = match part {
                ContentPart::Operations(operations) => {
                    let operations: Vec<_> = operations
                        .into_iter()
                        .filter(|_| {
                            let keep = !removed.contains(&index);
                            index += 1;
                            keep
                        })
                        .collect();
                    Content { operations }.encode().map_err(|e| {
                        BackendError::Parse(format!("failed to encode content stream: {e}"))
                    })?
                }
                ContentPart::InlineImage(raw) => {
                    index += 1;
                    raw
                }
            };
            if bytes.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push(b'\n');
            }
            out.extend_from_slice(&bytes);
        }
        Ok(out)
    }
}

/// The lopdf-based document backend.
///
/// # Example
///
/// ```ignore
/// use unredact_parse::{DocumentBackend, LopdfBackend};
///
/// let mut doc = LopdfBackend::open(pdf_bytes)?;
/// let page = LopdfBackend::get_page(&doc, 0)?;
/// let annots = LopdfBackend::page_annotations(&doc, &page)?;
/// let bytes = LopdfBackend::save(&mut doc)?;
/// ```
pub struct LopdfBackend;

/// Resolve a potentially indirect object reference.
fn resolve_object<'a>(doc: &'a lopdf::Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Convert a lopdf object to an engine operand.
fn object_to_operand(obj: &Object) -> Operand {
    match obj {
        Object::Integer(i) => Operand::Integer(*i),
        // Reals are stored single precision; go through the shortest decimal
        // form so `0.9` reads back as 0.9.
        Object::Real(f) => Operand::Real(f.to_string().parse().unwrap_or(*f as f64)),
        Object::Name(name) => Operand::Name(String::from_utf8_lossy(name).into_owned()),
        _ => Operand::Other,
    }
}

fn page_dict(doc: &lopdf::Document, page_id: ObjectId) -> Result<&lopdf::Dictionary, BackendError> {
    doc.get_object(page_id)
        .and_then(|o| o.as_dict())
        .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))
}

fn page_dict_mut(
    doc: &mut lopdf::Document,
    page_id: ObjectId,
) -> Result<&mut lopdf::Dictionary, BackendError> {
    doc.get_object_mut(page_id)
        .and_then(|o| o.as_dict_mut())
        .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))
}

/// Get the page's /Annots array (may be a direct array or indirect reference).
fn annots_array(
    doc: &lopdf::Document,
    page_id: ObjectId,
) -> Result<Option<&Vec<Object>>, BackendError> {
    let annots_obj = match page_dict(doc, page_id)?.get(b"Annots") {
        Ok(obj) => obj,
        Err(_) => return Ok(None),
    };

    let annots_obj = match annots_obj {
        Object::Reference(id) => doc
            .get_object(*id)
            .map_err(|e| BackendError::Parse(format!("failed to resolve /Annots ref: {e}")))?,
        other => other,
    };

    annots_obj
        .as_array()
        .map(Some)
        .map_err(|e| BackendError::Parse(format!("/Annots is not an array: {e}")))
}

/// Read a color entry (/IC or /C). A value that is not an array becomes a
/// single non-numeric component so it is never mistaken for black.
fn color_entry(doc: &lopdf::Document, dict: &lopdf::Dictionary, key: &[u8]) -> Option<Vec<Operand>> {
    let obj = resolve_object(doc, dict.get(key).ok()?);
    Some(match obj {
        Object::Array(items) => items
            .iter()
            .map(|item| object_to_operand(resolve_object(doc, item)))
            .collect(),
        _ => vec![Operand::Other],
    })
}

fn number_entry(doc: &lopdf::Document, dict: &lopdf::Dictionary, key: &[u8]) -> Option<Operand> {
    dict.get(key)
        .ok()
        .map(|obj| object_to_operand(resolve_object(doc, obj)))
}

/// Build an [`Annotation`] from one /Annots entry, or `None` if the entry
/// does not resolve to a dictionary.
fn read_annotation(doc: &lopdf::Document, entry: &Object) -> Option<Annotation> {
    let annot_obj = match entry {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let dict = annot_obj.as_dict().ok()?;

    let subtype = match dict.get(b"Subtype").map(|obj| resolve_object(doc, obj)) {
        Ok(Object::Name(name)) => AnnotationSubtype::from_subtype(&String::from_utf8_lossy(name)),
        _ => AnnotationSubtype::Other(String::new()),
    };

    Some(Annotation {
        subtype,
        interior_color: color_entry(doc, dict, b"IC"),
        color: color_entry(doc, dict, b"C"),
        stroke_opacity: number_entry(doc, dict, b"CA"),
        fill_opacity: number_entry(doc, dict, b"ca"),
    })
}

/// Append the decoded bytes of a /Contents value (stream, array of streams,
/// or a reference to either) to `out`, separating streams with a space.
///
/// `chain` holds the references being followed; meeting one of them again is
/// a cycle.
fn collect_content_bytes(
    doc: &lopdf::Document,
    obj: &Object,
    chain: &mut Vec<ObjectId>,
    out: &mut Vec<u8>,
) -> Result<(), BackendError> {
    match obj {
        Object::Reference(id) => {
            if chain.contains(id) {
                return Err(BackendError::Parse(format!(
                    "/Contents reference cycle at object {} {}",
                    id.0, id.1
                )));
            }
            let target = doc
                .get_object(*id)
                .map_err(|e| BackendError::Parse(format!("failed to resolve /Contents: {e}")))?;
            chain.push(*id);
            let result = collect_content_bytes(doc, target, chain, out);
            chain.pop();
            result
        }
        Object::Stream(stream) => {
            let bytes = decode_content_stream(stream)?;
            if !out.is_empty() {
                out.push(b' ');
            }
            out.extend_from_slice(&bytes);
            Ok(())
        }
        Object::Array(items) => {
            for item in items {
                match item {
                    Object::Reference(_) | Object::Stream(_) => {
                        collect_content_bytes(doc, item, chain, out)?
                    }
                    _ => {
                        return Err(BackendError::Parse(
                            "/Contents array item is not a stream".to_string(),
                        ));
                    }
                }
            }
            Ok(())
        }
        _ => Err(BackendError::Parse(
            "/Contents is not a stream or array".to_string(),
        )),
    }
}

/// Decode a content stream, decompressing if needed.
fn decode_content_stream(stream: &lopdf::Stream) -> Result<Vec<u8>, BackendError> {
    if stream.dict.get(b"Filter").is_ok() {
        stream
            .decompressed_content()
            .map_err(|e| BackendError::Parse(format!("failed to decompress content stream: {e}")))
    } else {
        Ok(stream.content.clone())
    }
}

impl DocumentBackend for LopdfBackend {
    type Document = LopdfDocument;
    type Page = LopdfPage;
    type Content = PageContent;
    type Error = BackendError;

    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        if inner.is_encrypted() {
            return Err(BackendError::Core(UnredactError::EncryptedDocument));
        }

        // get_pages returns BTreeMap<u32, ObjectId> with 1-based keys
        let page_ids: Vec<ObjectId> = inner.get_pages().values().copied().collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(pages = page_ids.len(), "opened document");

        Ok(LopdfDocument { inner, page_ids })
    }

    fn page_count(doc: &Self::Document) -> usize {
        doc.page_ids.len()
    }

    fn get_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error> {
        let object_id = doc.page_ids.get(index).copied().ok_or_else(|| {
            BackendError::Parse(format!(
                "page index {index} out of range (0..{})",
                doc.page_ids.len()
            ))
        })?;
        Ok(LopdfPage { object_id, index })
    }

    fn page_annotations(
        doc: &Self::Document,
        page: &Self::Page,
    ) -> Result<Option<Vec<Option<Annotation>>>, Self::Error> {
        let Some(entries) = annots_array(&doc.inner, page.object_id)? else {
            return Ok(None);
        };

        let annotations: Vec<Option<Annotation>> = entries
            .iter()
            .map(|entry| read_annotation(&doc.inner, entry))
            .collect();

        #[cfg(feature = "tracing")]
        {
            let unresolved = annotations.iter().filter(|a| a.is_none()).count();
            if unresolved > 0 {
                tracing::debug!(page = page.index, unresolved, "keeping unresolvable annotation entries");
            }
        }

        Ok(Some(annotations))
    }

    fn retain_page_annotations(
        doc: &mut Self::Document,
        page: &Self::Page,
        keep: &[bool],
    ) -> Result<(), Self::Error> {
        let entries = match annots_array(&doc.inner, page.object_id)? {
            Some(entries) => entries.clone(),
            None => return Ok(()),
        };

        // Entries beyond the end of `keep` are kept.
        let flags = keep.iter().copied().chain(std::iter::repeat(true));
        let kept: Vec<Object> = entries
            .into_iter()
            .zip(flags)
            .filter_map(|(entry, keep)| keep.then_some(entry))
            .collect();

        let dict = page_dict_mut(&mut doc.inner, page.object_id)?;
        if kept.is_empty() {
            dict.remove(b"Annots");
        } else {
            dict.set("Annots", Object::Array(kept));
        }
        Ok(())
    }

    fn page_content(
        doc: &Self::Document,
        page: &Self::Page,
    ) -> Result<Option<Self::Content>, Self::Error> {
        let contents = match page_dict(&doc.inner, page.object_id)?.get(b"Contents") {
            Ok(obj) => obj,
            Err(_) => return Ok(None),
        };

        let mut bytes = Vec::new();
        collect_content_bytes(&doc.inner, contents, &mut Vec::new(), &mut bytes)?;
        PageContent::decode(&bytes).map(Some)
    }

    fn content_operations(content: &Self::Content) -> Vec<Operation> {
        let mut ops = Vec::new();
        for part in &content.parts {
            match part {
                ContentPart::Operations(operations) => {
                    ops.extend(operations.iter().map(|op| {
                        Operation::new(
                            op.operator.clone(),
                            op.operands.iter().map(object_to_operand).collect(),
                        )
                    }));
                }
                ContentPart::InlineImage(_) => {
                    ops.push(Operation::new(INLINE_IMAGE_OPERATOR, Vec::new()));
                }
            }
        }
        ops
    }

    fn replace_page_content(
        doc: &mut Self::Document,
        page: &Self::Page,
        content: Self::Content,
        removed: &BTreeSet<usize>,
        compress: bool,
    ) -> Result<(), Self::Error> {
        let bytes = content.encode_without(removed)?;

        let mut stream = lopdf::Stream::new(lopdf::Dictionary::new(), bytes);
        if compress {
            // Left uncompressed if Flate fails.
            let _ = stream.compress();
        }
        let stream_id = doc.inner.add_object(Object::Stream(stream));

        page_dict_mut(&mut doc.inner, page.object_id)?.set("Contents", Object::Reference(stream_id));

        #[cfg(feature = "tracing")]
        tracing::trace!(page = page.index, removed = removed.len(), "rewrote content stream");

        Ok(())
    }

    fn save(doc: &mut Self::Document) -> Result<Vec<u8>, Self::Error> {
        let _pruned = doc.inner.prune_objects();

        #[cfg(feature = "tracing")]
        tracing::debug!(pruned = _pruned.len(), "pruned unreferenced objects");

        let mut buf = Vec::new();
        doc.inner
            .save_to(&mut buf)
            .map_err(|e| BackendError::Parse(format!("failed to serialize PDF: {e}")))?;
        Ok(buf)
    }
}
