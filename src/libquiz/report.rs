use crate::cli::RunResult;
use crate::libquiz::problem::Problem;
use log::debug;
use std::io::{self, Write};

pub fn summary_line(total_correct: usize, total_questions: usize) -> String {
    format!("You got {} out of {} correct!", total_correct, total_questions)
}

pub fn missed_line(problem: &Problem) -> String {
    format!(
        "Problem {}: {} = {}",
        problem.number, problem.question, problem.answer
    )
}

/// Prints the score followed by every missed problem with its expected answer.
pub fn print_report<W: Write>(out: &mut W, result: &RunResult) -> io::Result<()> {
    debug!(
        "[Report] {} correct, {} incorrect, {} total ({:?})",
        result.total_correct,
        result.incorrect.len(),
        result.total_questions,
        result.outcome
    );
    writeln!(
        out,
        "{}",
        summary_line(result.total_correct, result.total_questions)
    )?;
    for problem in &result.incorrect {
        writeln!(out, "{}", missed_line(problem))?;
    }
    out.flush()
}
