//! Turning a desktop entry `Exec` line into a process invocation.
//!
//! Field codes (`%U`, `%f`, ...) are not expanded: the line is cut at the
//! first `%`. Splitting is on single spaces; quotes were already stripped by
//! the entry parser.

use crate::entry::DesktopEntry;

/// What to start: executable, arguments and extra `KEY=VALUE` environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationSpec {
    pub executable: String,
    pub arguments: Vec<String>,
    /// Raw `KEY=VALUE` tokens appended to the inherited environment
    pub env_overrides: Vec<String>,
}

impl InvocationSpec {
    /// Wrap the bare executable in `terminal`, dropping all other arguments.
    #[must_use]
    pub fn in_terminal(self, terminal: &str) -> Self {
        Self {
            executable: terminal.to_string(),
            arguments: vec![self.executable],
            env_overrides: self.env_overrides,
        }
    }

    /// `(key, value)` pairs of the env overrides, split at the first `=`.
    pub fn env_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.env_overrides
            .iter()
            .filter_map(|token| token.split_once('='))
    }
}

/// Parse an `Exec` line into an [`InvocationSpec`].
#[must_use]
pub fn parse_command(exec: &str) -> InvocationSpec {
    let command = strip_field_codes(exec);
    let tokens: Vec<&str> = command.split(' ').collect();

    let mut env_overrides = Vec::new();
    let mut exec_idx = None;

    if command.contains('=') {
        for (idx, token) in tokens.iter().enumerate() {
            if token.contains('=') {
                env_overrides.push((*token).to_string());
            } else if !token.starts_with('-') && exec_idx.is_none() {
                exec_idx = Some(idx);
            }
        }
    }

    let exec_idx = exec_idx.unwrap_or(0);

    InvocationSpec {
        executable: tokens.get(exec_idx).copied().unwrap_or_default().to_string(),
        arguments: first_token_relative_args(&tokens),
        env_overrides,
    }
}

/// Arguments are every token after the first one of the raw split, even when
/// env assignments push the executable further right.
fn first_token_relative_args(tokens: &[&str]) -> Vec<String> {
    tokens
        .iter()
        .skip(1)
        .map(|token| (*token).to_string())
        .collect()
}

/// Cut `exec` at the first `%`, also dropping the separator right before it.
///
/// A `%` at the very start leaves an empty command.
fn strip_field_codes(exec: &str) -> &str {
    let Some(cut) = exec.find('%') else {
        return exec;
    };
    let head = &exec[..cut];
    match head.char_indices().next_back() {
        Some((last, _)) => &head[..last],
        None => "",
    }
}

/// Builds invocations for entries, wrapping terminal apps in the configured emulator.
#[derive(Debug, Clone)]
pub struct CommandInterpreter {
    terminal: String,
}

impl CommandInterpreter {
    #[must_use]
    pub fn new(terminal: impl Into<String>) -> Self {
        Self {
            terminal: terminal.into(),
        }
    }

    #[must_use]
    pub fn terminal(&self) -> &str {
        &self.terminal
    }

    /// Invocation for `exec`, run inside the terminal emulator when `terminal` is set.
    #[must_use]
    pub fn interpret(&self, exec: &str, terminal: bool) -> InvocationSpec {
        let spec = parse_command(exec);
        if terminal {
            spec.in_terminal(&self.terminal)
        } else {
            spec
        }
    }

    #[must_use]
    pub fn for_entry(&self, entry: &DesktopEntry) -> InvocationSpec {
        self.interpret(&entry.exec, entry.terminal)
    }
}
