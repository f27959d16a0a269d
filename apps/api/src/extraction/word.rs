use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, ReaderError, RunChild};

/// Body paragraphs only, one per line. Tables, headers and footers are skipped.
pub(super) fn extract_word(bytes: &[u8]) -> Result<String, ReaderError> {
    let docx = read_docx(bytes)?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    paragraph
        .children
        .iter()
        .filter_map(|child| match child {
            ParagraphChild::Run(run) => Some(run),
            _ => None,
        })
        .flat_map(|run| run.children.iter())
        .filter_map(|child| match child {
            RunChild::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect()
}
