//! Helpers for joining and classifying resource web paths.
//!
//! Path joining lives apart from the pattern and external-reference checks so each can be
//! tested on its own. All of them are used when expanding groups and when rendering tags.

mod bundle;
mod filters;

pub use bundle::join_resource_path;
pub use filters::{is_ant_pattern, is_external_reference};
