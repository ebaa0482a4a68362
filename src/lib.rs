#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod cache;
pub mod config;
pub mod error;
pub mod group;
pub mod lister;
pub mod models;
pub mod renderer;
pub mod tag;

pub use cache::ResolvedResourceCache;
pub use config::{NameTemplate, ResourcePaths, TagProperties};
pub use error::{Result, TagError};
pub use group::{GroupModel, GroupResolver};
pub use lister::{DirectoryLister, FsDirectoryLister};
pub use models::{Resource, ResourceGroup, ResourceType};
pub use renderer::TagRenderer;
pub use tag::{ResourceHtmlTag, TagSet};
