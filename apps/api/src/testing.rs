//! Test doubles and in-memory document fixtures shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{Embedder, LanguageModel, LlmError};

/// Replays canned replies in order and records every prompt it was sent.
/// Running out of replies behaves like an empty provider response.
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedLlm {
    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

enum EmbedMode {
    Keyed {
        vectors: HashMap<String, Vec<f32>>,
        default: Vec<f32>,
    },
    Hashing,
    Failing,
}

pub struct FakeEmbedder {
    mode: EmbedMode,
    calls: AtomicUsize,
}

impl FakeEmbedder {
    fn with_mode(mode: EmbedMode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
        }
    }

    /// Exact-text lookup, `default` for anything else.
    pub fn with_vectors(vectors: HashMap<String, Vec<f32>>, default: Vec<f32>) -> Self {
        Self::with_mode(EmbedMode::Keyed { vectors, default })
    }

    /// Same vector for every input, so every similarity is 1.0.
    pub fn uniform() -> Self {
        Self::with_vectors(HashMap::new(), vec![1.0, 1.0, 1.0, 1.0])
    }

    /// Bag of hashed tokens: deterministic, non-negative, overlap-sensitive.
    pub fn hashing() -> Self {
        Self::with_mode(EmbedMode::Hashing)
    }

    pub fn failing() -> Self {
        Self::with_mode(EmbedMode::Failing)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for FakeEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.mode {
            EmbedMode::Keyed { vectors, default } => {
                Ok(vectors.get(text).cloned().unwrap_or_else(|| default.clone()))
            }
            EmbedMode::Hashing => {
                let mut vector = vec![0.0; 16];
                for token in text.split_whitespace() {
                    let bucket = token.bytes().map(usize::from).sum::<usize>() % vector.len();
                    vector[bucket] += 1.0;
                }
                Ok(vector)
            }
            EmbedMode::Failing => Err(LlmError::Api {
                status: 503,
                message: "embedding backend unavailable".to_string(),
            }),
        }
    }
}

/// A DOCX package with one run per paragraph.
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    use docx_rs::{Docx, Paragraph, Run};

    let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
    });
    let mut cursor = Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).unwrap();
    cursor.into_inner()
}

/// A single-page PDF drawing `text` in Courier.
pub fn pdf_bytes(text: &str) -> Vec<u8> {
    pdf_from_page_contents(vec![text_page_content(text)])
}

/// Two pages: the first selects its font with a number instead of a name,
/// which the text extractor rejects; the second draws `text`.
pub fn pdf_bytes_with_broken_first_page(text: &str) -> Vec<u8> {
    pdf_from_page_contents(vec![
        b"BT 24 24 Tf 72 700 Td (Unreachable) Tj ET".to_vec(),
        text_page_content(text),
    ])
}

fn text_page_content(text: &str) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::Object;

    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![72.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    content.encode().unwrap()
}

fn pdf_from_page_contents(page_contents: Vec<Vec<u8>>) -> Vec<u8> {
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for content in page_contents {
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn text(name: &str, value: &str) -> Self {
        FormPart::Text {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn file(name: &str, filename: &str, bytes: Vec<u8>) -> Self {
        FormPart::File {
            name: name.to_string(),
            filename: filename.to_string(),
            bytes,
        }
    }
}

const BOUNDARY: &str = "skillmatch-test-boundary";

/// Encodes `parts` as multipart/form-data, returning (content type, body).
pub fn multipart_body(parts: &[FormPart]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            FormPart::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File {
                name,
                filename,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
