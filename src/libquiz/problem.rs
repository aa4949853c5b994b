use crate::{Error, Result};
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub number: usize,
    pub question: String,
    pub answer: String,
}

impl Problem {
    pub fn new(number: usize, question: &str, answer: &str) -> Problem {
        Problem {
            number,
            question: question.trim().to_string(),
            answer: answer.trim().to_string(),
        }
    }

    pub fn is_correct(&self, response: &str) -> bool {
        self.answer == response
    }
}

/// Turns loaded rows into problems numbered from 1 in input order. A row
/// without exactly two fields fails the build instead of leaving a gap.
pub fn build_problems(rows: &[Vec<String>]) -> Result<Vec<Problem>> {
    let mut problems = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        match row.as_slice() {
            [question, answer] => problems.push(Problem::new(idx + 1, question, answer)),
            _ => {
                return Err(Error::Parse {
                    line: idx as u64 + 1,
                    reason: format!("expected 2 fields, found {}", row.len()),
                })
            }
        }
    }
    debug!("[Setup] Built {} problems.", problems.len());
    Ok(problems)
}
