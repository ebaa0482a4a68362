//! Resource descriptors and the groups that collect them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of static resource a group member refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
  /// JavaScript source.
  Js,
  /// Cascading stylesheet.
  Css,
}

impl ResourceType {
  /// File extension used by compressed bundles of this type.
  pub fn extension(self) -> &'static str {
    match self {
      ResourceType::Js => "js",
      ResourceType::Css => "css",
    }
  }
}

impl fmt::Display for ResourceType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.extension())
  }
}

/// Single static resource: a web path plus its type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Resource {
  /// Web path or ant-style pattern of the resource.
  pub uri: String,
  /// Resource type that decides which tag renders it.
  #[serde(rename = "type")]
  pub resource_type: ResourceType,
}

impl Resource {
  /// Create a resource descriptor.
  pub fn new(uri: impl Into<String>, resource_type: ResourceType) -> Self {
    Self {
      uri: uri.into(),
      resource_type,
    }
  }
}

/// Named, ordered collection of resources resolved from the group model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceGroup {
  /// Group name referenced from templates.
  pub name: String,
  /// Members in declaration order.
  pub resources: Vec<Resource>,
}

impl ResourceGroup {
  /// Create a group from its name and members.
  pub fn new(name: impl Into<String>, resources: Vec<Resource>) -> Self {
    Self {
      name: name.into(),
      resources,
    }
  }

  /// Returns `true` when at least one member has the given type.
  pub fn has_resources_of_type(&self, resource_type: ResourceType) -> bool {
    self
      .resources
      .iter()
      .any(|resource| resource.resource_type == resource_type)
  }

  /// Members of the given type, in declaration order.
  pub fn resources_of_type(&self, resource_type: ResourceType) -> impl Iterator<Item = &Resource> {
    self
      .resources
      .iter()
      .filter(move |resource| resource.resource_type == resource_type)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn group() -> ResourceGroup {
    ResourceGroup::new("home", vec![
      Resource::new("js/app.js", ResourceType::Js),
      Resource::new("css/site.css", ResourceType::Css),
      Resource::new("js/vendor/*.js", ResourceType::Js),
    ])
  }

  #[test]
  fn reports_membership_by_type() {
    let group = group();
    assert!(group.has_resources_of_type(ResourceType::Js));
    assert!(group.has_resources_of_type(ResourceType::Css));

    let scripts_only = ResourceGroup::new("scripts", vec![Resource::new(
      "js/a.js",
      ResourceType::Js,
    )]);
    assert!(!scripts_only.has_resources_of_type(ResourceType::Css));
  }

  #[test]
  fn filters_members_in_declaration_order() {
    let group = group();
    let uris: Vec<&str> = group
      .resources_of_type(ResourceType::Js)
      .map(|resource| resource.uri.as_str())
      .collect();
    assert_eq!(uris, vec!["js/app.js", "js/vendor/*.js"]);
  }

  #[test]
  fn deserializes_lowercase_types() {
    let resource: Resource = serde_json::from_str(r#"{"type": "css", "uri": "a.css"}"#).unwrap();
    assert_eq!(resource, Resource::new("a.css", ResourceType::Css));
  }
}
