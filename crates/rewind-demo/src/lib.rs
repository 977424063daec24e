#![forbid(unsafe_code)]

//! Console walkthrough of the `rewind` undo/redo flows.
//!
//! - `checkpoint`: one save/restore slot
//! - `editor`: a text editor checkpointed after every edit, then unwound
//! - `script`: an arbitrary sequence of set/record/undo/redo/revert steps

pub mod cli;
pub mod error;
pub mod flows;
pub mod logging;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{DemoError, Result};
