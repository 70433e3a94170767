//! Loading question pools from CSV.
//!
//! Format: header `id,prompt,answer,points`, one row per answer. Consecutive rows sharing an
//! `id` make up one question; answers keep row order.

use crate::models::{Answer, Question};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Errors while reading a question bank.
#[derive(Debug)]
pub enum BankError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for BankError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BankError::Io(e) => write!(f, "could not read question bank: {}", e),
            BankError::Csv(e) => write!(f, "invalid question bank: {}", e),
        }
    }
}

impl std::error::Error for BankError {}

impl From<std::io::Error> for BankError {
    fn from(e: std::io::Error) -> Self {
        BankError::Io(e)
    }
}

impl From<csv::Error> for BankError {
    fn from(e: csv::Error) -> Self {
        BankError::Csv(e)
    }
}

#[derive(Deserialize)]
struct Row {
    id: String,
    prompt: String,
    answer: String,
    points: u32,
}

/// Parse questions from CSV content. All questions start unused.
pub fn read_questions<R: Read>(reader: R) -> Result<Vec<Question>, BankError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut questions: Vec<Question> = Vec::new();
    for row in rdr.deserialize() {
        let row: Row = row?;
        let answer = Answer::new(row.answer, row.points);
        match questions.last_mut() {
            Some(q) if q.id == row.id => q.answers.push(answer),
            _ => questions.push(Question::new(row.id, row.prompt, vec![answer])),
        }
    }
    Ok(questions)
}

/// Load a question bank file. A missing file yields an empty pool.
pub fn load_questions(path: impl AsRef<Path>) -> Result<Vec<Question>, BankError> {
    let path = path.as_ref();
    match std::fs::File::open(path) {
        Ok(file) => read_questions(file),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("Question bank {} not found; pool is empty", path.display());
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}
