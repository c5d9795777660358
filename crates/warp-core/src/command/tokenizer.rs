//! Shell-like command string tokenizer
//!
//! Splits on unquoted, unescaped spaces and tabs. Supports `'...'` and
//! `"..."` quoting and backslash escaping outside quotes. Nothing else from
//! shell syntax is recognized.

use crate::error::{Error, Result};

/// Tokenizer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Between tokens, skipping whitespace
    StartOfToken,
    /// Accumulating an unquoted token
    InToken,
    /// Inside a quoted segment opened by the contained character
    InQuote(char),
    /// The next character is taken literally
    EscapePending,
}

/// What to do with the character that caused a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Append it to the current token
    Append,
    /// Drop it and emit the current token
    Emit,
    /// Drop it
    Discard,
}

fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Single step of the state machine.
pub fn transition(state: State, c: char) -> (State, Action) {
    match state {
        State::EscapePending => (State::InToken, Action::Append),
        State::InQuote(quote) if c == quote => (State::StartOfToken, Action::Emit),
        State::InQuote(quote) => (State::InQuote(quote), Action::Append),
        State::StartOfToken | State::InToken if c == '\\' => {
            (State::EscapePending, Action::Discard)
        }
        State::StartOfToken | State::InToken if is_quote(c) => {
            (State::InQuote(c), Action::Discard)
        }
        State::StartOfToken if is_whitespace(c) => (State::StartOfToken, Action::Discard),
        State::InToken if is_whitespace(c) => (State::StartOfToken, Action::Emit),
        State::StartOfToken | State::InToken => (State::InToken, Action::Append),
    }
}

/// Incremental tokenizer over a command string.
///
/// Starts in [`State::EscapePending`], so the very first character of the
/// input is always literal.
#[derive(Debug)]
pub struct Tokenizer {
    state: State,
    current: String,
    tokens: Vec<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Create a tokenizer positioned before the first character
    pub fn new() -> Self {
        Self {
            state: State::EscapePending,
            current: String::new(),
            tokens: Vec::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Feed one character
    pub fn feed(&mut self, c: char) {
        let (next, action) = transition(self.state, c);
        match action {
            Action::Append => self.current.push(c),
            Action::Emit => self.tokens.push(std::mem::take(&mut self.current)),
            Action::Discard => {}
        }
        self.state = next;
    }

    /// Finish tokenizing. `command` is only used for the error message.
    pub fn finish(mut self, command: &str) -> Result<Vec<String>> {
        if let State::InQuote(_) = self.state {
            return Err(Error::UnclosedQuote {
                command: command.to_string(),
            });
        }

        // A trailing backslash leaves EscapePending with nothing to escape.
        if !self.current.is_empty() {
            self.tokens.push(self.current);
        }

        Ok(self.tokens)
    }
}

/// Split a command string into arguments.
///
/// # Errors
///
/// Returns [`Error::UnclosedQuote`] when the input ends inside a quoted
/// segment.
pub fn tokenize(command: &str) -> Result<Vec<String>> {
    let mut tokenizer = Tokenizer::new();
    for c in command.chars() {
        tokenizer.feed(c);
    }
    tokenizer.finish(command)
}
