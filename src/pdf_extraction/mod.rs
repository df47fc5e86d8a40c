// PDF extraction module
pub mod backend;
pub mod extractor;
pub mod layout;
pub mod native;
pub mod normalize;
pub mod optical;

pub use backend::{ensure_available, ExtractionBackend};
pub use extractor::PageExtractor;
pub use layout::LayoutBackend;
pub use native::{get_page_count, NativeTextBackend};
pub use normalize::{clean_page, normalize_whitespace, strip_headers_footers};
pub use optical::OpticalBackend;
