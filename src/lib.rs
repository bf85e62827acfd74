//! Token Selection - Elm-style text selection and line indentation engine
//!
//! This crate provides the selection and indentation core of a text view:
//! caret navigation, enclosing selections, pointer-driven selection and
//! atomic multi-line indent/outdent, wired together with the Elm
//! Architecture pattern (`Msg` → `update` → `Cmd`).

pub mod cli;
pub mod commands;
pub mod config;
pub mod editable;
pub mod error;
pub mod layout;
pub mod messages;
pub mod model;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use error::EditError;
pub use messages::Msg;
pub use model::EditorModel;
pub use update::update;
