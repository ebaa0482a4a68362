//! HTML tag kinds and the de-duplicated sets a renderer is configured with.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TagError};
use crate::models::ResourceType;

/// Markup emitted for one resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceHtmlTag {
  /// `<script>` element for JavaScript resources.
  Script,
  /// `<link rel="stylesheet">` element for CSS resources.
  Stylesheet,
}

impl ResourceHtmlTag {
  /// Every tag kind, in declaration order.
  pub const ALL: [ResourceHtmlTag; 2] = [ResourceHtmlTag::Script, ResourceHtmlTag::Stylesheet];

  /// Resource type rendered by this tag.
  pub fn resource_type(self) -> ResourceType {
    match self {
      ResourceHtmlTag::Script => ResourceType::Js,
      ResourceHtmlTag::Stylesheet => ResourceType::Css,
    }
  }

  /// Tag that renders resources of the given type.
  pub fn for_type(resource_type: ResourceType) -> Self {
    match resource_type {
      ResourceType::Js => ResourceHtmlTag::Script,
      ResourceType::Css => ResourceHtmlTag::Stylesheet,
    }
  }

  /// Render the element referencing `uri`, without a trailing newline.
  pub fn render(self, uri: &str) -> String {
    let uri = escape_attribute(uri);
    match self {
      ResourceHtmlTag::Script => {
        format!(r#"<script type="text/javascript" src="{uri}"></script>"#)
      }
      ResourceHtmlTag::Stylesheet => {
        format!(r#"<link rel="stylesheet" type="text/css" href="{uri}"/>"#)
      }
    }
  }

  fn name(self) -> &'static str {
    match self {
      ResourceHtmlTag::Script => "SCRIPT",
      ResourceHtmlTag::Stylesheet => "STYLESHEET",
    }
  }
}

impl fmt::Display for ResourceHtmlTag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for ResourceHtmlTag {
  type Err = TagError;

  fn from_str(value: &str) -> Result<Self> {
    match value.trim().to_ascii_lowercase().as_str() {
      "script" | "js" => Ok(ResourceHtmlTag::Script),
      "stylesheet" | "style" | "css" => Ok(ResourceHtmlTag::Stylesheet),
      _ => Err(TagError::UnknownTag {
        value: value.to_string(),
      }),
    }
  }
}

fn escape_attribute(value: &str) -> String {
  let mut escaped = String::with_capacity(value.len());
  for c in value.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '"' => escaped.push_str("&quot;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      _ => escaped.push(c),
    }
  }
  escaped
}

/// Non-empty set of tag kinds, iterated in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
  tags: BTreeSet<ResourceHtmlTag>,
}

impl TagSet {
  /// Build a set from any collection of tags, dropping duplicates.
  pub fn new(tags: impl IntoIterator<Item = ResourceHtmlTag>) -> Result<Self> {
    let tags: BTreeSet<_> = tags.into_iter().collect();
    if tags.is_empty() {
      return Err(TagError::EmptyTagSet);
    }
    Ok(Self { tags })
  }

  /// Set containing every tag kind.
  pub fn all() -> Self {
    Self {
      tags: ResourceHtmlTag::ALL.into_iter().collect(),
    }
  }

  /// Iterate the tags in declaration order.
  pub fn iter(&self) -> impl Iterator<Item = ResourceHtmlTag> + '_ {
    self.tags.iter().copied()
  }

  /// Returns `true` when some tag in the set renders the given type.
  pub fn supports(&self, resource_type: ResourceType) -> bool {
    self
      .tags
      .iter()
      .any(|tag| tag.resource_type() == resource_type)
  }

  /// Names of the tags joined by `separator`.
  pub fn join(&self, separator: &str) -> String {
    self
      .tags
      .iter()
      .map(|tag| tag.name())
      .collect::<Vec<_>>()
      .join(separator)
  }

  /// Number of tag kinds in the set.
  pub fn len(&self) -> usize {
    self.tags.len()
  }

  /// Returns `true` when the set has no tags, which construction rules out.
  pub fn is_empty(&self) -> bool {
    self.tags.is_empty()
  }
}

impl FromStr for TagSet {
  type Err = TagError;

  /// Parse a comma separated list such as `script,stylesheet`.
  fn from_str(value: &str) -> Result<Self> {
    let tags = value
      .split(',')
      .filter(|part| !part.trim().is_empty())
      .map(ResourceHtmlTag::from_str)
      .collect::<Result<Vec<_>>>()?;
    TagSet::new(tags)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn renders_script_and_stylesheet_markup() {
    assert_eq!(
      ResourceHtmlTag::Script.render("/app/js/a.js"),
      r#"<script type="text/javascript" src="/app/js/a.js"></script>"#
    );
    assert_eq!(
      ResourceHtmlTag::Stylesheet.render("/app/css/a.css"),
      r#"<link rel="stylesheet" type="text/css" href="/app/css/a.css"/>"#
    );
  }

  #[test]
  fn escapes_attribute_breaking_characters() {
    let markup = ResourceHtmlTag::Script.render(r#"/a.js?x=1&y="2""#);
    assert!(markup.contains("/a.js?x=1&amp;y=&quot;2&quot;"));
  }

  #[test]
  fn maps_tags_to_types_both_ways() {
    for tag in ResourceHtmlTag::ALL {
      assert_eq!(ResourceHtmlTag::for_type(tag.resource_type()), tag);
    }
  }

  #[test]
  fn set_deduplicates_and_keeps_declaration_order() {
    let set = TagSet::new([
      ResourceHtmlTag::Stylesheet,
      ResourceHtmlTag::Script,
      ResourceHtmlTag::Stylesheet,
    ])
    .unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![
      ResourceHtmlTag::Script,
      ResourceHtmlTag::Stylesheet
    ]);
    assert_eq!(set.join("_"), "SCRIPT_STYLESHEET");
  }

  #[test]
  fn rejects_empty_sets() {
    assert!(matches!(TagSet::new(Vec::new()), Err(TagError::EmptyTagSet)));
    assert!(matches!(" , ".parse::<TagSet>(), Err(TagError::EmptyTagSet)));
  }

  #[test]
  fn parses_comma_separated_names() {
    let set: TagSet = "css, Script".parse().unwrap();
    assert_eq!(set, TagSet::all());
    assert!(matches!(
      "script,image".parse::<TagSet>(),
      Err(TagError::UnknownTag { value }) if value == "image"
    ));
  }

  #[test]
  fn supports_only_configured_types() {
    let scripts = TagSet::new([ResourceHtmlTag::Script]).unwrap();
    assert!(scripts.supports(ResourceType::Js));
    assert!(!scripts.supports(ResourceType::Css));
  }
}
