//! Shared helpers for building test PDFs with lopdf.

#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

/// One page of a test document.
#[derive(Default)]
pub struct TestPage {
    pub content: Option<Vec<u8>>,
    pub annots: Vec<Dictionary>,
    /// Write an empty /Annots array when `annots` is empty.
    pub empty_annots: bool,
}

impl TestPage {
    pub fn with_content(content: &[u8]) -> Self {
        Self {
            content: Some(content.to_vec()),
            ..Self::default()
        }
    }

    pub fn annot(mut self, annot: Dictionary) -> Self {
        self.annots.push(annot);
        self
    }
}

/// Build a PDF from the given pages. Annotations are stored as indirect
/// objects referenced from a direct /Annots array.
pub fn build_pdf(pages: Vec<TestPage>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let count = pages.len() as i64;
    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
        };
        if let Some(content) = page.content {
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            page_dict.set("Contents", Object::Reference(content_id));
        }
        if !page.annots.is_empty() {
            let refs: Vec<Object> = page
                .annots
                .into_iter()
                .map(|annot| Object::Reference(doc.add_object(annot)))
                .collect();
            page_dict.set("Annots", refs);
        } else if page.empty_annots {
            page_dict.set("Annots", Vec::<Object>::new());
        }
        kids.push(Object::Reference(doc.add_object(page_dict)));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(count),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

/// A single-page PDF with the given content stream.
pub fn pdf_with_content(content: &[u8]) -> Vec<u8> {
    build_pdf(vec![TestPage::with_content(content)])
}

/// An annotation dictionary with the given /Subtype.
pub fn annot(subtype: &str) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => Object::Name(subtype.as_bytes().to_vec()),
        "Rect" => vec![
            Object::Integer(72),
            Object::Integer(700),
            Object::Integer(300),
            Object::Integer(720),
        ],
    }
}

/// An annotation with a black interior color and the given /CA opacity.
pub fn black_box(subtype: &str, opacity: f32) -> Dictionary {
    let mut dict = annot(subtype);
    dict.set(
        "IC",
        vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)],
    );
    dict.set("CA", Object::Real(opacity.into()));
    dict
}

/// Content stream operators of every page, in page order.
pub fn page_operators(bytes: &[u8]) -> Vec<Vec<String>> {
    let doc = Document::load_mem(bytes).expect("output should parse");
    doc.get_pages()
        .values()
        .map(|page_id| match doc.get_page_content(*page_id) {
            Ok(content) => lopdf::content::Content::decode(&content)
                .expect("content should decode")
                .operations
                .into_iter()
                .map(|op| op.operator)
                .collect(),
            Err(_) => Vec::new(),
        })
        .collect()
}

/// /Subtype names of the annotations on every page, in page order. A page
/// without /Annots yields `None`.
pub fn page_annotation_subtypes(bytes: &[u8]) -> Vec<Option<Vec<String>>> {
    let doc = Document::load_mem(bytes).expect("output should parse");
    doc.get_pages()
        .values()
        .map(|page_id| {
            let page = doc.get_dictionary(*page_id).expect("page dictionary");
            let annots = page.get(b"Annots").ok()?;
            let annots = match annots {
                Object::Reference(id) => doc.get_object(*id).expect("annots array"),
                other => other,
            };
            Some(
                annots
                    .as_array()
                    .expect("annots array")
                    .iter()
                    .map(|entry| {
                        let dict = match entry {
                            Object::Reference(id) => doc.get_dictionary(*id).expect("annotation"),
                            other => other.as_dict().expect("annotation"),
                        };
                        match dict.get(b"Subtype") {
                            Ok(Object::Name(name)) => String::from_utf8_lossy(name).into_owned(),
                            _ => String::new(),
                        }
                    })
                    .collect(),
            )
        })
        .collect()
}
