//! Keyboard input: key types, classification and key scripts
//!
//! # Architecture
//!
//! ```text
//! host key event → KeyDownEvent → KeyDownEvent::category() → update::handle_key_down_event
//! key script     → parse_script() → Vec<ScriptAction> → Vec<Msg>
//! ```

mod script;
mod types;

pub use script::{parse_key_string, parse_script, ScriptAction, ScriptError};
pub use types::{KeyCategory, KeyCode, KeyDownEvent, Modifiers};
