// Text source trait: the seam between document formats and the pipeline.

use anyhow::Result;

use super::Fragment;

/// Anything that can yield text fragments in document order.
pub trait TextSource {
    /// Short human-readable description, e.g. "pdf informe.pdf".
    fn describe(&self) -> String;

    /// Extract all fragments, pages in order, fragments in page order.
    fn fragments(&self) -> Result<Vec<Fragment>>;
}
