//! Core key types: Modifiers, KeyCode, KeyDownEvent and key classification

use std::fmt;

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000); // Cmd on macOS, Win on Windows

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b0001;
        }
        if shift {
            bits |= 0b0010;
        }
        if alt {
            bits |= 0b0100;
        }
        if meta {
            bits |= 0b1000;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// True when a held modifier turns a character key into a command
    #[inline]
    pub const fn suppresses_text(self) -> bool {
        self.ctrl() || self.alt() || self.meta()
    }

    /// The platform "command" modifier (Cmd on macOS, Ctrl elsewhere)
    pub fn cmd() -> Modifiers {
        if cfg!(target_os = "macos") {
            Modifiers::META
        } else {
            Modifiers::CTRL
        }
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl() {
            parts.push("Ctrl");
        }
        if self.shift() {
            parts.push("Shift");
        }
        if self.alt() {
            parts.push("Alt");
        }
        if self.meta() {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A logical key, decoded from a browser-style `key` string
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A text-producing key, case preserved
    Char(char),

    // Named keys
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    Insert,

    // Function keys
    F(u8), // F1-F24

    /// Anything else (dead keys, media keys, lone modifiers, ...)
    Unidentified,
}

impl KeyCode {
    /// Decode a browser `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> KeyCode {
        let mut chars = key.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return match c {
                ' ' => KeyCode::Space,
                '\t' => KeyCode::Tab,
                '\n' | '\r' => KeyCode::Enter,
                c => KeyCode::Char(c),
            };
        }

        match key {
            "Spacebar" => KeyCode::Space,
            "Tab" => KeyCode::Tab,
            "Enter" | "Return" => KeyCode::Enter,
            "Escape" | "Esc" => KeyCode::Escape,
            "Backspace" => KeyCode::Backspace,
            "Delete" | "Del" => KeyCode::Delete,
            "ArrowUp" | "Up" => KeyCode::Up,
            "ArrowDown" | "Down" => KeyCode::Down,
            "ArrowLeft" | "Left" => KeyCode::Left,
            "ArrowRight" | "Right" => KeyCode::Right,
            "Home" => KeyCode::Home,
            "End" => KeyCode::End,
            "PageUp" => KeyCode::PageUp,
            "PageDown" => KeyCode::PageDown,
            "Insert" => KeyCode::Insert,
            _ => key
                .strip_prefix('F')
                .and_then(|n| n.parse::<u8>().ok())
                .filter(|n| (1..=24).contains(n))
                .map(KeyCode::F)
                .unwrap_or(KeyCode::Unidentified),
        }
    }

    /// The browser `key` string for this key
    pub fn key_name(self) -> String {
        match self {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Escape => "Escape".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Backspace => "Backspace".into(),
            KeyCode::Delete => "Delete".into(),
            KeyCode::Space => " ".into(),
            KeyCode::Up => "ArrowUp".into(),
            KeyCode::Down => "ArrowDown".into(),
            KeyCode::Left => "ArrowLeft".into(),
            KeyCode::Right => "ArrowRight".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::Insert => "Insert".into(),
            KeyCode::F(n) => format!("F{}", n),
            KeyCode::Unidentified => "Unidentified".into(),
        }
    }

    /// The browser `code` string (physical key) for this key, best effort
    pub fn code_name(self) -> String {
        match self {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                format!("Key{}", c.to_ascii_uppercase())
            }
            KeyCode::Char(c) if c.is_ascii_digit() => format!("Digit{}", c),
            KeyCode::Char(_) => "Unidentified".into(),
            KeyCode::Space => "Space".into(),
            other => other.key_name(),
        }
    }

    #[inline]
    pub fn is_whitespace(self) -> bool {
        matches!(self, KeyCode::Space | KeyCode::Tab | KeyCode::Enter)
    }

    #[inline]
    pub fn is_movement(self) -> bool {
        matches!(
            self,
            KeyCode::Up
                | KeyCode::Down
                | KeyCode::Left
                | KeyCode::Right
                | KeyCode::Home
                | KeyCode::End
        )
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Space => write!(f, "Space"),
            KeyCode::Up => write!(f, "↑"),
            KeyCode::Down => write!(f, "↓"),
            KeyCode::Left => write!(f, "←"),
            KeyCode::Right => write!(f, "→"),
            other => write!(f, "{}", other.key_name()),
        }
    }
}

/// The four disjoint ways a key press is handled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCategory {
    /// Space, Tab or Enter
    Whitespace(KeyCode),
    /// Arrows, Home, End
    Movement(KeyCode),
    /// Keys that produce no text
    Meta(KeyCode),
    /// A literal character to insert
    Text(char),
}

/// A key press as delivered by the host (mirrors a browser keyboard event)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyDownEvent {
    /// Logical key value, e.g. `"a"`, `"A"`, `"ArrowLeft"`, `" "`
    pub key: String,
    /// Physical key code, e.g. `"KeyA"`; informational only
    pub code: String,
    pub modifiers: Modifiers,
}

impl KeyDownEvent {
    pub fn new(key: impl Into<String>, code: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            code: code.into(),
            modifiers,
        }
    }

    /// Build the event a browser would report for `key_code`
    pub fn from_key_code(key_code: KeyCode, modifiers: Modifiers) -> Self {
        Self::new(key_code.key_name(), key_code.code_name(), modifiers)
    }

    /// An unmodified character key press
    pub fn char(ch: char) -> Self {
        Self::from_key_code(KeyCode::from_key(&ch.to_string()), Modifiers::NONE)
    }

    /// An unmodified named key press
    pub fn plain(key_code: KeyCode) -> Self {
        Self::from_key_code(key_code, Modifiers::NONE)
    }

    pub fn key_code(&self) -> KeyCode {
        KeyCode::from_key(&self.key)
    }

    /// Classify this event, in priority order: whitespace, movement, meta, text
    pub fn category(&self) -> KeyCategory {
        let key_code = self.key_code();
        if key_code.is_whitespace() {
            return KeyCategory::Whitespace(key_code);
        }
        if key_code.is_movement() {
            return KeyCategory::Movement(key_code);
        }
        match key_code {
            KeyCode::Char(c) if !self.modifiers.suppresses_text() => KeyCategory::Text(c),
            other => KeyCategory::Meta(other),
        }
    }
}

impl fmt::Display for KeyDownEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key_code())
        } else {
            write!(f, "{}+{}", self.modifiers, self.key_code())
        }
    }
}
