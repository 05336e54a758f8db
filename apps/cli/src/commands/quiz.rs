//! Interactive quiz loop over stdin.

use std::io::{self, BufRead, Write};

use quiz_core::{Clock, MatchingMode, PoolStore, SystemClock};
use rand::Rng;

use super::QUIT;
use crate::cli::{QuizArgs, QuizMode};
use crate::config::Config;
use crate::data;
use crate::error::Result;
use crate::render::{feedback_line, flag_emoji};
use crate::session::{Question, QuizSession, Response};
use crate::store::JsonFileStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub asked: usize,
    pub correct: usize,
}

pub fn run(config: &Config, args: QuizArgs) -> Result<()> {
    let records = data::load_records(&config.data_path)?;
    let store = JsonFileStore::new(&config.state_path);
    let matching = MatchingMode::from_strict(args.strict || config.strict);

    let mut session = QuizSession::open(&records, store, SystemClock, config.rng())?
        .with_category(args.category)
        .with_matching(matching)
        .with_policy(config.review_policy()?);

    let stdin = io::stdin();
    let tally = play(&mut session, args.mode, stdin.lock(), io::stdout().lock())?;
    tracing::info!(asked = tally.asked, correct = tally.correct, "quiz finished");
    Ok(())
}

/// Ask questions until the input ends, the learner quits, or the category runs dry.
pub fn play<S, C, R, I, W>(
    session: &mut QuizSession<S, C, R>,
    mode: QuizMode,
    mut input: I,
    mut out: W,
) -> Result<Tally>
where
    S: PoolStore,
    C: Clock,
    R: Rng,
    I: BufRead,
    W: Write,
{
    let mut tally = Tally::default();
    writeln!(out, "Type `{QUIT}` to stop. Press enter to skip a flag.")?;

    loop {
        let Some(question) = session.next_question(mode == QuizMode::MultipleChoice) else {
            writeln!(out, "Nothing to ask in '{}' right now.", session.category())?;
            break;
        };

        writeln!(out)?;
        writeln!(out, "{}  Which country's flag is this?", flag_emoji(&question.code))?;
        for (i, choice) in question.choices.iter().enumerate() {
            writeln!(out, "  {}. {choice}", i + 1)?;
        }

        let Some(response) = read_response(&mut input, &mut out, &question)? else {
            break;
        };
        let feedback = session.answer(&question.code, response)?;
        tally.asked += 1;
        if feedback.kind.is_positive() {
            tally.correct += 1;
        }
        writeln!(out, "{}", feedback_line(&feedback))?;
    }

    writeln!(out, "Answered {}, {} correct.", tally.asked, tally.correct)?;
    Ok(tally)
}

/// `None` when the learner quits or input is exhausted.
fn read_response<I: BufRead, W: Write>(
    input: &mut I,
    out: &mut W,
    question: &Question,
) -> Result<Option<Response>> {
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line == QUIT {
            return Ok(None);
        }
        if line.is_empty() {
            return Ok(Some(Response::Skip));
        }
        if question.choices.is_empty() {
            return Ok(Some(Response::Typed(line.to_string())));
        }

        match parse_choice(line, &question.choices) {
            Some(choice) => return Ok(Some(Response::Choice(choice))),
            None => writeln!(
                out,
                "Pick a number between 1 and {}.",
                question.choices.len()
            )?,
        }
    }
}

/// A 1-based option number, or an option typed out in full.
fn parse_choice(line: &str, choices: &[String]) -> Option<String> {
    if let Ok(number) = line.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| choices.get(index))
            .cloned();
    }
    choices
        .iter()
        .find(|choice| choice.eq_ignore_ascii_case(line))
        .cloned()
}
