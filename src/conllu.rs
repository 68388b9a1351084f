//! CoNLL-U reader.
//!
//! Only the columns the chunker needs are kept: ID, FORM, LEMMA, UPOS, HEAD
//! and DEPREL. Multiword ranges (`3-4`) and empty nodes (`5.1`) are skipped.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{Sentence, Token, Upos};

const MIN_FIELDS: usize = 8;

#[derive(Debug, Error)]
pub enum ConllError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected at least 8 tab-separated fields, found {found}")]
    MissingFields { line: usize, found: usize },
    #[error("line {line}: invalid token id '{value}'")]
    InvalidId { line: usize, value: String },
    #[error("line {line}: invalid head '{value}'")]
    InvalidHead { line: usize, value: String },
}

#[derive(Default)]
struct Pending {
    sent_id: Option<String>,
    text: Option<String>,
    tokens: Vec<Token>,
}

impl Pending {
    fn finish(&mut self, sentences: &mut Vec<Sentence>) {
        let pending = std::mem::take(self);
        if pending.tokens.is_empty() {
            return;
        }
        let sent_id = pending.sent_id.unwrap_or_else(|| (sentences.len() + 1).to_string());
        let sentence = match pending.text {
            Some(text) => Sentence::new(sent_id, text, pending.tokens),
            None => Sentence::from_tokens(sent_id, pending.tokens),
        };
        sentences.push(sentence);
    }
}

/// Parse CoNLL-U text into sentences, in input order.
pub fn parse_conllu(input: &str) -> Result<Vec<Sentence>, ConllError> {
    let mut sentences = Vec::new();
    let mut pending = Pending::default();

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end_matches('\r');

        if line.trim().is_empty() {
            pending.finish(&mut sentences);
            continue;
        }
        if line.starts_with('#') {
            if let Some(caps) = regex!(r"^#\s*sent_id\s*=\s*(.*?)\s*$").captures(line) {
                pending.sent_id = Some(caps[1].to_string());
            } else if let Some(caps) = regex!(r"^#\s*text\s*=\s*(.*?)\s*$").captures(line) {
                pending.text = Some(caps[1].to_string());
            }
            continue;
        }

        if let Some(token) = parse_token_line(line, line_no)? {
            pending.tokens.push(token);
        }
    }
    pending.finish(&mut sentences);

    tracing::debug!(sentences = sentences.len(), "parsed CoNLL-U input");
    Ok(sentences)
}

pub fn read_conllu_file(path: impl AsRef<Path>) -> Result<Vec<Sentence>, ConllError> {
    let path = path.as_ref();
    let input =
        std::fs::read_to_string(path).map_err(|source| ConllError::Io { path: path.to_path_buf(), source })?;
    parse_conllu(&input)
}

fn parse_token_line(line: &str, line_no: usize) -> Result<Option<Token>, ConllError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MIN_FIELDS {
        return Err(ConllError::MissingFields { line: line_no, found: fields.len() });
    }

    let id_field = fields[0].trim();
    if id_field.contains('-') || id_field.contains('.') {
        return Ok(None);
    }
    let id = id_field
        .parse::<u32>()
        .map_err(|_| ConllError::InvalidId { line: line_no, value: id_field.to_string() })?;
    let head_field = fields[6].trim();
    let head = head_field
        .parse::<u32>()
        .map_err(|_| ConllError::InvalidHead { line: line_no, value: head_field.to_string() })?;

    Ok(Some(Token::new(id, fields[1], fields[2], Upos::from_tag(fields[3].trim()), head, fields[7].trim())))
}
