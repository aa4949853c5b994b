use crate::libquiz::problem::Problem;
use crate::{Error, Result};
use log::{debug, info, warn};
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Untimed,
    /// One countdown for the whole run, started before the first question.
    Timed(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    /// Waiting on the answer to the problem at this zero-based index.
    Presenting(usize),
    TimedOut,
    Done,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::TimedOut | RunState::Done)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub total_correct: usize,
    pub total_questions: usize,
    pub incorrect: Vec<Problem>,
    pub outcome: RunState,
}

impl RunResult {
    fn new(total_questions: usize) -> RunResult {
        RunResult {
            total_correct: 0,
            total_questions,
            incorrect: Vec::new(),
            outcome: RunState::Idle,
        }
    }

    fn tally(&mut self, problem: &Problem, answer: &str) {
        if problem.is_correct(answer) {
            self.total_correct += 1;
            debug!("[Quiz] Problem {} correct", problem.number);
        } else {
            self.incorrect.push(problem.clone());
            debug!("[Quiz] Problem {} incorrect: {:?}", problem.number, answer);
        }
    }

    fn advance(&mut self, next: RunState) {
        debug!("[Quiz] {:?} -> {:?}", self.outcome, next);
        self.outcome = next;
    }

    /// Problems that were never answered because the countdown ran out.
    pub fn unanswered(&self) -> usize {
        self.total_questions - self.total_correct - self.incorrect.len()
    }
}

/// Reads one answer line. The line terminator is dropped, nothing else is
/// normalised. End of input gives an empty answer and bytes that are not
/// UTF-8 are replaced, so such a line simply scores as wrong.
pub fn read_answer<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut raw = Vec::new();
    reader.read_until(b'\n', &mut raw)?;
    if raw.last() == Some(&b'\n') {
        raw.pop();
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
    }
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

fn present<W: Write>(out: &mut W, problem: &Problem) -> Result<()> {
    writeln!(out, "Problem {}: {}", problem.number, problem.question).map_err(Error::Output)?;
    out.flush().map_err(Error::Output)
}

/// Runs every problem in order against answers read from `input`, writing
/// prompts to `out`. In timed mode the run stops as soon as the countdown
/// elapses and the remaining problems are left uncounted.
pub fn quiz_loop<R, W>(problems: &[Problem], mode: Mode, input: R, out: &mut W) -> Result<RunResult>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    info!("[Quiz] Starting {} problems in {:?} mode", problems.len(), mode);
    let result = match mode {
        Mode::Untimed => untimed_loop(problems, input, out)?,
        Mode::Timed(limit) => timed_loop(problems, limit, input, out)?,
    };
    info!(
        "[Quiz] Finished ({:?}): {}/{} correct, {} unanswered",
        result.outcome,
        result.total_correct,
        result.total_questions,
        result.unanswered()
    );
    Ok(result)
}

fn untimed_loop<R: BufRead, W: Write>(
    problems: &[Problem],
    mut input: R,
    out: &mut W,
) -> Result<RunResult> {
    let mut result = RunResult::new(problems.len());
    for (idx, problem) in problems.iter().enumerate() {
        result.advance(RunState::Presenting(idx));
        present(out, problem)?;
        let answer = read_answer(&mut input).map_err(Error::Input)?;
        result.tally(problem, &answer);
    }
    result.advance(RunState::Done);
    Ok(result)
}

fn timed_loop<R, W>(problems: &[Problem], limit: Duration, input: R, out: &mut W) -> Result<RunResult>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    let deadline = match Instant::now().checked_add(limit) {
        Some(deadline) => deadline,
        None => {
            warn!("[Quiz] Limit {:?} is out of range, running without a countdown", limit);
            return untimed_loop(problems, input, out);
        }
    };
    let input = Arc::new(Mutex::new(input));
    let mut result = RunResult::new(problems.len());

    for (idx, problem) in problems.iter().enumerate() {
        result.advance(RunState::Presenting(idx));
        present(out, problem)?;

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            warn!("[Quiz] Countdown elapsed before problem {}", problem.number);
            result.advance(RunState::TimedOut);
            return Ok(result);
        }

        // A fresh reader per problem. On timeout it is left blocked on input
        // and dies with the process.
        let (tx, rx) = mpsc::sync_channel(1);
        let reader = Arc::clone(&input);
        thread::spawn(move || {
            let answer = match reader.lock() {
                Ok(mut guard) => read_answer(&mut *guard),
                Err(_) => Err(io::Error::new(
                    io::ErrorKind::Other,
                    "answer reader poisoned",
                )),
            };
            let _ = tx.send(answer);
        });

        match rx.recv_timeout(remaining) {
            Ok(answer) => {
                let answer = answer.map_err(Error::Input)?;
                result.tally(problem, &answer);
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    "[Quiz] Countdown elapsed while waiting on problem {}",
                    problem.number
                );
                result.advance(RunState::TimedOut);
                return Ok(result);
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(Error::Input(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "answer reader exited without an answer",
                )));
            }
        }
    }

    result.advance(RunState::Done);
    Ok(result)
}
