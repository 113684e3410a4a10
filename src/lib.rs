//! # userinfos-panel
//!
//! View model for the "user infos" desktop panel: a provider name, a fetch
//! action, and the list of property rows returned by the host shell's
//! `get_userinfos` command.
//!
//! The crate holds the panel state and actions (`panel`), the adapters that
//! reach the host shell (`gateway`), and a small terminal binding layer
//! (`binding`, `render`) used by the `userinfos` binary.

pub mod binding;
pub mod config;
pub mod gateway;
pub mod panel;
pub mod render;
