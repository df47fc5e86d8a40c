// Native text layer on PDFs built in-process with lopdf
use docsum::config::ExtractionConfig;
use docsum::pdf_extraction::{get_page_count, ExtractionBackend, NativeTextBackend};
use docsum::types::BackendError;
use docsum::{PageExtractor, Summarizer};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;

const REVENUE: &str =
    "Revenue grew 12% year over year to $450 million, driven by strong demand in core markets.";
const MARGIN: &str = "Operating margin expanded to 18.4% as input costs eased and pricing held firm.";

/// One page per entry. `None` pages only paint a rectangle, like a scan with no
/// text layer.
fn write_pdf(pages: &[Option<&str>]) -> tempfile::NamedTempFile {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::new();
    for text in pages {
        let operations = match text {
            Some(text) => vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 11.into()]),
                Operation::new("Td", vec![50.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
            None => vec![
                Operation::new("re", vec![50.into(), 50.into(), 400.into(), 600.into()]),
                Operation::new("f", vec![]),
            ],
        };
        let content = Content { operations }.encode().unwrap();
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => Object::Array(kids),
            "Count" => count,
            "MediaBox" => Object::Array(vec![0.into(), 0.into(), 595.into(), 842.into()]),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let file = tempfile::Builder::new().prefix("acme_native").suffix(".pdf").tempfile().unwrap();
    doc.save(file.path()).unwrap();
    file
}

fn native_only() -> ExtractionConfig {
    ExtractionConfig {
        layout: false,
        optical: false,
        ..ExtractionConfig::default()
    }
}

#[test]
fn native_backend_reads_text_layer_in_page_order() {
    let file = write_pdf(&[Some(REVENUE), Some(MARGIN)]);
    let backend = NativeTextBackend::new();

    let pages = backend.extract_document(file.path()).unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].trim(), REVENUE);
    assert_eq!(pages[1].trim(), MARGIN);

    assert_eq!(get_page_count(file.path()).unwrap(), 2);
    assert_eq!(backend.extract_page(file.path(), 1).unwrap().trim(), MARGIN);
    assert!(matches!(
        backend.extract_page(file.path(), 2),
        Err(BackendError::PageOutOfRange { index: 2, count: 2 })
    ));
}

#[test]
fn page_without_text_layer_comes_back_empty() {
    let file = write_pdf(&[Some(REVENUE), None]);
    let pages = NativeTextBackend::new().extract_document(file.path()).unwrap();
    assert_eq!(pages.len(), 2);
    assert!(pages[1].trim().is_empty());
}

#[test]
fn stock_extractor_feeds_summarizer_from_native_tier() {
    let file = write_pdf(&[Some(REVENUE), Some(MARGIN), None]);
    let doc = PageExtractor::new(&native_only()).extract(file.path()).unwrap();

    assert_eq!(doc.backend, "native");
    assert_eq!(doc.page_texts(), vec![REVENUE, MARGIN, ""]);
    assert!(doc.id().starts_with("acme_native"));

    let result = Summarizer::default().run(&doc.page_texts());
    assert_eq!(result.key_points[0], REVENUE);
    assert!(result.key_points.iter().any(|k| k == MARGIN));
    assert!(result.summary.contains(REVENUE));
}

/// OCR stand-in that "recognizes" a fixed paragraph on any page.
struct FixedOcr(&'static str);

impl ExtractionBackend for FixedOcr {
    fn name(&self) -> &'static str {
        "fixed-ocr"
    }

    fn page_count(&self, path: &Path) -> Result<usize, BackendError> {
        get_page_count(path)
    }

    fn extract_page(&self, _path: &Path, _page_index: usize) -> Result<String, BackendError> {
        Ok(self.0.to_string())
    }
}

#[test]
fn scanned_page_is_salvaged_by_ocr() {
    let scanned = "Free cash flow reached $120 million while capital expenditure fell 8% this year.";
    let file = write_pdf(&[Some(REVENUE), None]);
    let extractor = PageExtractor::with_backends(
        Some(Box::new(NativeTextBackend::new())),
        None,
        Some(Box::new(FixedOcr(scanned))),
    );

    let doc = extractor.extract(file.path()).unwrap();
    assert_eq!(doc.backend, "native");
    assert_eq!(doc.page_texts(), vec![REVENUE, scanned]);
}
