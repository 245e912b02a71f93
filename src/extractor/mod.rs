pub mod authenticated;
pub mod basic_auth;
pub mod json;
pub mod path;
pub mod validated;

/// An extractor that wraps the extracted value.
///
/// Lets wrapping extractors like [`validated::Validated`] reach the inner value.
pub trait Extractor {
    type Extracted;

    fn extracted(&self) -> &Self::Extracted;
}
