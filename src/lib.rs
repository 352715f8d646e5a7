//! Plain-text editor state machine
//!
//! This crate provides the immutable document model (rows of typed tokens
//! with a single caret) and the pure transitions that edit it, following the
//! Elm Architecture pattern, plus a message-passing registry that owns the
//! committed state of many editor instances.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod registry;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use messages::{EditorMsg, Msg};
pub use model::{Document, EditorKey, EditorOptions, EditorStates};
pub use registry::{EditorRegistry, RegistryError};
pub use update::{handle_key_down_event, handle_on_click_event, update};
