//! Textual key scripts: a compact way to describe a sequence of editor input
//!
//! ```text
//! "hello world" enter "second" ctrl+left click:0,1,2 backspace
//! ```
//!
//! - `"text"` types each character (`\"`, `\\`, `\n` and `\t` escapes allowed)
//! - `mod+...+key` presses one key with modifiers (`ctrl`, `shift`, `alt`,
//!   `meta`/`super`/`win`, `cmd`)
//! - `click:ROW,TOKEN[,CHAR]` clicks on a token

use thiserror::Error;

use super::types::{KeyCode, KeyDownEvent, Modifiers};
use crate::messages::{EditorMsg, Msg};
use crate::model::EditorKey;

/// Errors produced while parsing a key script
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unterminated quoted text starting at byte {0}")]
    UnterminatedQuote(usize),
    #[error("unknown escape sequence \\{0}")]
    InvalidEscape(char),
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("invalid click (expected click:ROW,TOKEN[,CHAR]): {0}")]
    InvalidClick(String),
}

/// One step of a key script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptAction {
    Key(KeyDownEvent),
    Click {
        row_index: usize,
        token_index: usize,
        char_index: Option<usize>,
    },
}

impl ScriptAction {
    /// The message that delivers this action to an editor instance
    pub fn into_msg(self, key: EditorKey) -> Msg {
        let msg = match self {
            ScriptAction::Key(event) => EditorMsg::KeyDown(event),
            ScriptAction::Click {
                row_index,
                token_index,
                char_index,
            } => EditorMsg::OnClick {
                row_index,
                token_index,
                char_index,
            },
        };
        Msg::Editor { key, msg }
    }
}

/// Parse a whole script into actions
pub fn parse_script(script: &str) -> Result<Vec<ScriptAction>, ScriptError> {
    let mut actions = Vec::new();
    let mut chars = script.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c == '"' {
            chars.next();
            let mut closed = false;
            while let Some((_, c)) = chars.next() {
                let ch = match c {
                    '"' => {
                        closed = true;
                        break;
                    }
                    '\\' => match chars.next() {
                        Some((_, '"')) => '"',
                        Some((_, '\\')) => '\\',
                        Some((_, 'n')) => '\n',
                        Some((_, 't')) => '\t',
                        Some((_, other)) => return Err(ScriptError::InvalidEscape(other)),
                        None => break,
                    },
                    other => other,
                };
                actions.push(ScriptAction::Key(KeyDownEvent::char(ch)));
            }
            if !closed {
                return Err(ScriptError::UnterminatedQuote(start));
            }
            continue;
        }

        let mut word = String::new();
        while let Some(&(_, c)) = chars.peek() {
            if c.is_whitespace() {
                break;
            }
            word.push(c);
            chars.next();
        }
        actions.push(parse_item(&word)?);
    }

    Ok(actions)
}

fn parse_item(item: &str) -> Result<ScriptAction, ScriptError> {
    match item.strip_prefix("click:") {
        Some(args) => parse_click(args).ok_or_else(|| ScriptError::InvalidClick(item.to_string())),
        None => parse_key_string(item).map(ScriptAction::Key),
    }
}

fn parse_click(args: &str) -> Option<ScriptAction> {
    let parts = args
        .split(',')
        .map(|p| p.trim().parse::<usize>().ok())
        .collect::<Option<Vec<_>>>()?;
    match parts.as_slice() {
        [row_index, token_index] => Some(ScriptAction::Click {
            row_index: *row_index,
            token_index: *token_index,
            char_index: None,
        }),
        [row_index, token_index, char_index] => Some(ScriptAction::Click {
            row_index: *row_index,
            token_index: *token_index,
            char_index: Some(*char_index),
        }),
        _ => None,
    }
}

/// Parse a key string like "ctrl+shift+left" into a key event
pub fn parse_key_string(key_str: &str) -> Result<KeyDownEvent, ScriptError> {
    // "+" alone, or a trailing "ctrl++", names the plus key itself
    let (mods_part, key_part) = match key_str.strip_suffix("++") {
        Some(mods) => (Some(mods), "+"),
        None if key_str == "+" => (None, "+"),
        None => match key_str.rsplit_once('+') {
            Some((mods, key)) => (Some(mods), key),
            None => (None, key_str),
        },
    };

    let mut mods = Modifiers::NONE;
    for part in mods_part.into_iter().flat_map(|m| m.split('+')) {
        mods = mods
            | match part.to_lowercase().as_str() {
                "cmd" => Modifiers::cmd(),
                "ctrl" | "control" => Modifiers::CTRL,
                "shift" => Modifiers::SHIFT,
                "alt" | "option" | "opt" => Modifiers::ALT,
                "meta" | "super" | "win" => Modifiers::META,
                _ => return Err(ScriptError::InvalidKey(key_str.to_string())),
            };
    }

    let key_code = parse_key_code(key_part)
        .ok_or_else(|| ScriptError::InvalidKey(key_str.to_string()))?;
    Ok(KeyDownEvent::from_key_code(key_code, mods))
}

/// Parse a key name; single characters are taken literally
fn parse_key_code(key: &str) -> Option<KeyCode> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::from_key(&c.to_string()));
    }

    let key = key.to_lowercase();
    let code = match key.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "escape" | "esc" => KeyCode::Escape,
        "tab" => KeyCode::Tab,
        "backspace" | "back" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "space" => KeyCode::Space,

        "up" | "arrowup" => KeyCode::Up,
        "down" | "arrowdown" => KeyCode::Down,
        "left" | "arrowleft" => KeyCode::Left,
        "right" | "arrowright" => KeyCode::Right,

        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdown" | "pgdn" => KeyCode::PageDown,
        "insert" | "ins" => KeyCode::Insert,

        _ => {
            let n = key.strip_prefix('f')?.parse::<u8>().ok()?;
            if !(1..=24).contains(&n) {
                return None;
            }
            KeyCode::F(n)
        }
    };
    Some(code)
}
