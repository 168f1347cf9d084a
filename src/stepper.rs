//! A terminal-rendered, single-step-at-a-time view of the parser's state.
//!
//! Grounded on `kneasle-sapling/src/config.rs`'s plain-struct configuration pattern
//! and on the crate's `crossterm` dependency (used there via `tui`'s
//! `CrosstermBackend`; used here directly, since this crate carries no `tui`
//! dependency of its own).

use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

use crate::action::Action;
use crate::kind::Kind;
use crate::token::Token;

/// Tunable knobs for [`step`]. Mirrors `kneasle-sapling::config::Config`: a plain
/// struct with a `Default` impl, constructed once by the caller and passed by
/// reference, no env-var or file parsing.
#[derive(Debug, Clone)]
pub struct StepperConfig {
    /// Width, in columns, a literal tab character in the source is expanded to.
    /// A value `<= 0` prints the tab byte literally instead of expanding it.
    pub tab_size: i32,
    /// Number of source lines printed before and after the line containing the
    /// current input position.
    pub context_lines: usize,
    /// Terminal width used to decide how many remaining-input tokens fit on one
    /// line before collapsing the rest into a `+ N more` tag.
    pub width: usize,
    /// When set, [`step`]'s terminal-clearing and "Press ENTER" pause become
    /// no-ops. Intended for non-interactive runs (tests, CI, piped output).
    pub non_interactive: bool,
}

impl Default for StepperConfig {
    fn default() -> Self {
        StepperConfig {
            tab_size: 4,
            context_lines: 1,
            width: 240,
            non_interactive: !std::io::IsTerminal::is_terminal(&io::stdin()),
        }
    }
}

/// Renders one frame of parser state: a boxed window of `source` around the
/// current input position, the remaining input, the shifted-token stack (each
/// entry as a small tree), the most recently committed action, and - unless
/// [`StepperConfig::non_interactive`] is set - a blocking "Press ENTER" pause.
pub fn step<K: Kind>(
    title: &str,
    stack: &[Token<K>],
    input: &std::collections::VecDeque<Token<K>>,
    last_action: Option<&Action<K>>,
    source: &[u8],
    config: &StepperConfig,
) {
    if !config.non_interactive {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, Clear(ClearType::All), MoveTo(0, 0));
        let _ = stdout.flush();
    }

    println!("=== {} ===", title);

    let at = input.front().or_else(|| stack.last()).map(Token::at).unwrap_or(0);
    print_source_context(source, at, config);

    print!("input: ");
    print_remaining_input(input, config);

    println!("stack:");
    for (i, tok) in stack.iter().enumerate() {
        print_tree(tok, "  ", i + 1 == stack.len());
    }

    match last_action {
        Some(action) => println!("last action: {}", action.describe()),
        None => println!("last action: (none yet)"),
    }

    if !config.non_interactive {
        print!("Press ENTER to continue...");
        let _ = io::stdout().flush();
        let mut discard = String::new();
        let _ = io::stdin().lock().read_line(&mut discard);
    }
}

fn print_source_context(source: &[u8], at: usize, config: &StepperConfig) {
    let text = String::from_utf8_lossy(source);
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        println!("+{:-<40}+", "");
        println!("| (empty source) |");
        println!("+{:-<40}+", "");
        return;
    }

    let current_line = line_number_at(source, at);
    let first = current_line.saturating_sub(config.context_lines);
    let last = (current_line + config.context_lines).min(lines.len().saturating_sub(1));

    println!("+{:-<40}+", "");
    for (i, line) in lines.iter().enumerate().take(last + 1).skip(first) {
        let marker = if i == current_line { ">" } else { " " };
        println!("|{} {}", marker, expand_tabs(line, config.tab_size));
    }
    println!("+{:-<40}+", "");
}

fn line_number_at(source: &[u8], at: usize) -> usize {
    source[..at.min(source.len())].iter().filter(|&&b| b == b'\n').count()
}

fn expand_tabs(line: &str, tab_size: i32) -> String {
    if tab_size <= 0 {
        return line.to_string();
    }
    let width = tab_size as usize;
    let mut out = String::with_capacity(line.len());
    for ch in line.chars() {
        if ch == '\t' {
            out.push_str(&" ".repeat(width));
        } else {
            out.push(ch);
        }
    }
    out
}

fn print_remaining_input<K: Kind>(input: &std::collections::VecDeque<Token<K>>, config: &StepperConfig) {
    let mut rendered = String::new();
    let mut shown = 0;
    for tok in input.iter() {
        let piece = format!("{}", tok.kind());
        if rendered.len() + piece.len() + 4 > config.width && shown > 0 {
            break;
        }
        if shown > 0 {
            rendered.push_str(" <- ");
        }
        rendered.push_str(&piece);
        shown += 1;
    }
    let remaining = input.len().saturating_sub(shown);
    if remaining > 0 {
        rendered.push_str(&format!(" <- (+{} more)", remaining));
    }
    println!("{}", rendered);
}

fn print_tree<K: Kind>(tok: &Token<K>, prefix: &str, is_last: bool) {
    let branch = if is_last { "`-- " } else { "|-- " };
    match tok.text() {
        Some(text) => println!("{}{}{} {:?}", prefix, branch, tok.kind(), text),
        None => println!("{}{}{}", prefix, branch, tok.kind()),
    }
    if let Some(children) = tok.children() {
        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "|   " });
        for (i, child) in children.iter().enumerate() {
            print_tree(child, &child_prefix, i + 1 == children.len());
        }
    }
}
