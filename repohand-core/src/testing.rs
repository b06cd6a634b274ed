//! Scripted fakes for driving orchestrators without a real `git` or terminal.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use crate::console::{Console, Tone};
use crate::error::ConsoleError;
use crate::runner::{CommandResult, CommandRunner};

/// Replies to argument vectors with canned results.
///
/// Keys are the arguments after the program name, joined by single spaces.
/// Replies queued with [`ScriptedRunner::then`] are handed out in order; the
/// last one repeats.
/// Unscripted commands fail with an `unscripted:` stderr.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    replies: RefCell<HashMap<String, VecDeque<CommandResult>>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `args` with `reply`, replacing anything scripted before.
    pub fn on(self, args: &str, reply: CommandResult) -> Self {
        self.replies
            .borrow_mut()
            .insert(args.to_string(), VecDeque::from([reply]));
        self
    }

    /// Queue another reply for `args` after those already scripted.
    pub fn then(self, args: &str, reply: CommandResult) -> Self {
        self.replies
            .borrow_mut()
            .entry(args.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Every invocation so far, program name stripped.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn called(&self, args: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == args)
    }

    pub fn count(&self, args: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == args).count()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, argv: &[&str], _capture_output: bool, _enforce_zero_exit: bool) -> CommandResult {
        let key = argv.get(1..).unwrap_or_default().join(" ");
        self.calls.borrow_mut().push(key.clone());

        let mut replies = self.replies.borrow_mut();
        match replies.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some(queue) => queue.front().cloned().unwrap_or_default(),
            None => CommandResult::failed("", format!("unscripted: {key}")),
        }
    }
}

/// Console fed from a fixed list of answers, recording everything written.
///
/// Running out of answers reads as end of input.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub out: Vec<(Tone, String)>,
    pub err: Vec<String>,
    pub prompts: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<'a>(answers: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            answers: answers.into_iter().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn stdout(&self) -> String {
        self.out
            .iter()
            .map(|(_, line)| line.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn stderr(&self) -> String {
        self.err.join("\n")
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Console for ScriptedConsole {
    fn emit(&mut self, tone: Tone, line: &str) -> Result<(), ConsoleError> {
        self.out.push((tone, line.to_string()));
        Ok(())
    }

    fn emit_err(&mut self, line: &str) -> Result<(), ConsoleError> {
        self.err.push(line.to_string());
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}
