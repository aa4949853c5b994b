use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use log::debug;
use quizrunner::cli::{quiz_loop, Mode, RunState};
use quizrunner::libquiz::loader::load_rows;
use quizrunner::libquiz::problem::build_problems;
use quizrunner::libquiz::report::print_report;
use quizrunner::Error;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::process::exit;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "quizrunner")]
#[command(version, about, long_about = None)]
struct Args {
    /// a csv file in the format of 'question,answer'
    #[arg(short, long, value_name = "FILE", default_value = "problems.csv")]
    csv: PathBuf,
    /// the time limit for the whole quiz in seconds
    #[arg(short = 't', long, value_name = "SECONDS", default_value = "30")]
    limit: u64,
    /// ask every question without a time limit
    #[arg(long, conflicts_with = "limit")]
    untimed: bool,
    #[arg(short, long, default_value = "error")]
    log_level: String,
}

impl Args {
    fn mode(&self) -> Mode {
        if self.untimed {
            Mode::Untimed
        } else {
            Mode::Timed(Duration::from_secs(self.limit))
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let rows = load_rows(&args.csv)?;
    let problems = build_problems(&rows)?;
    debug!("[Setup] Problems: {:?}", problems);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = quiz_loop(&problems, args.mode(), BufReader::new(io::stdin()), &mut out)?;
    if result.outcome == RunState::TimedOut {
        writeln!(out, "{}", "Time's up!".yellow()).map_err(Error::Output)?;
    }
    print_report(&mut out, &result).map_err(Error::Output)
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str())).init();
    colored::control::set_override(io::stdout().is_terminal());
    debug!("[Setup] {:?}", args);

    if let Err(err) = run(&args) {
        println!("{}", err.to_string().red());
        exit(1);
    }
}
