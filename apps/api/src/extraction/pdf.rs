use lopdf::Document;
use tracing::warn;

/// Concatenates the text of every page. A page that fails to decode contributes
/// nothing; only a document that cannot be loaded at all is an error.
pub(super) fn extract_pdf(bytes: &[u8]) -> Result<String, lopdf::Error> {
    let doc = Document::load_mem(bytes)?;

    let mut text = String::new();
    for page_number in doc.get_pages().keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => warn!("Skipping unreadable PDF page {page_number}: {e}"),
        }
    }

    Ok(text)
}
