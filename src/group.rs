//! Group model: named resource groups loaded from YAML or JSON.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, TagError};
use crate::models::{Resource, ResourceGroup};

/// Resolves group names to their member resources.
pub trait GroupResolver {
  /// Look up `name`, failing with [`TagError::UnknownGroup`] when it is not defined.
  fn group(&self, name: &str) -> Result<ResourceGroup>;
}

impl<T: GroupResolver + ?Sized> GroupResolver for &T {
  fn group(&self, name: &str) -> Result<ResourceGroup> {
    (**self).group(name)
  }
}

impl<T: GroupResolver + ?Sized> GroupResolver for std::sync::Arc<T> {
  fn group(&self, name: &str) -> Result<ResourceGroup> {
    (**self).group(name)
  }
}

#[derive(Debug, Deserialize)]
struct GroupModelFile {
  #[serde(default)]
  groups: Vec<GroupRecord>,
}

#[derive(Debug, Deserialize)]
struct GroupRecord {
  name: String,
  #[serde(default)]
  resources: Vec<MemberRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MemberRecord {
  Import { group: String },
  Resource(Resource),
}

/// Fully expanded group model.
///
/// Group imports are flattened at load time, so lookups never recurse.
#[derive(Debug, Clone, Default)]
pub struct GroupModel {
  order: Vec<String>,
  groups: BTreeMap<String, ResourceGroup>,
}

impl GroupModel {
  /// Load a model file, choosing the format from its extension (`.json`, otherwise YAML).
  pub fn load(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path).map_err(|err| TagError::Config {
      path: path.to_path_buf(),
      message: err.to_string(),
    })?;

    let is_json = path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
      Self::from_json_str(&content)
    } else {
      Self::from_yaml_str(&content)
    }
  }

  /// Parse a YAML model.
  pub fn from_yaml_str(content: &str) -> Result<Self> {
    let file: GroupModelFile =
      serde_yaml::from_str(content).map_err(|err| TagError::model(err.to_string()))?;
    Self::from_records(file.groups)
  }

  /// Parse a JSON model.
  pub fn from_json_str(content: &str) -> Result<Self> {
    let file: GroupModelFile =
      serde_json::from_str(content).map_err(|err| TagError::model(err.to_string()))?;
    Self::from_records(file.groups)
  }

  /// Build a model from already constructed groups.
  pub fn from_groups(groups: impl IntoIterator<Item = ResourceGroup>) -> Result<Self> {
    let mut model = Self::default();
    for group in groups {
      model.insert(group)?;
    }
    Ok(model)
  }

  /// Group names in model order.
  pub fn group_names(&self) -> impl Iterator<Item = &str> {
    self.order.iter().map(String::as_str)
  }

  fn insert(&mut self, group: ResourceGroup) -> Result<()> {
    if self.groups.contains_key(&group.name) {
      return Err(TagError::model(format!(
        "group '{}' is defined more than once",
        group.name
      )));
    }
    self.order.push(group.name.clone());
    self.groups.insert(group.name.clone(), group);
    Ok(())
  }

  fn from_records(records: Vec<GroupRecord>) -> Result<Self> {
    let mut raw = BTreeMap::new();
    let mut order = Vec::new();
    for record in records {
      if raw.contains_key(&record.name) {
        return Err(TagError::model(format!(
          "group '{}' is defined more than once",
          record.name
        )));
      }
      order.push(record.name.clone());
      raw.insert(record.name, record.resources);
    }

    let mut expanded = BTreeMap::new();
    for name in &order {
      let mut visiting = BTreeSet::new();
      expand_group(name, &raw, &mut expanded, &mut visiting)?;
    }

    let mut model = Self::default();
    for name in order {
      if let Some(resources) = expanded.remove(&name) {
        model.insert(ResourceGroup::new(name, resources))?;
      }
    }
    Ok(model)
  }
}

fn expand_group(
  name: &str,
  raw: &BTreeMap<String, Vec<MemberRecord>>,
  expanded: &mut BTreeMap<String, Vec<Resource>>,
  visiting: &mut BTreeSet<String>,
) -> Result<Vec<Resource>> {
  if let Some(resources) = expanded.get(name) {
    return Ok(resources.clone());
  }

  let members = raw
    .get(name)
    .ok_or_else(|| TagError::model(format!("import of unknown group '{name}'")))?;

  if !visiting.insert(name.to_string()) {
    return Err(TagError::model(format!(
      "group '{name}' imports itself through a cycle"
    )));
  }

  let mut resources = Vec::new();
  for member in members {
    match member {
      MemberRecord::Resource(resource) => resources.push(resource.clone()),
      MemberRecord::Import { group } => {
        resources.extend(expand_group(group, raw, expanded, visiting)?);
      }
    }
  }

  visiting.remove(name);
  expanded.insert(name.to_string(), resources.clone());
  Ok(resources)
}

impl GroupResolver for GroupModel {
  fn group(&self, name: &str) -> Result<ResourceGroup> {
    self
      .groups
      .get(name)
      .cloned()
      .ok_or_else(|| TagError::UnknownGroup {
        name: name.to_string(),
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::ResourceType;
  use tempfile::tempdir;

  const MODEL: &str = r#"
groups:
  - name: common
    resources:
      - { type: js, uri: "js/lib/*.js" }
      - { type: css, uri: "css/reset.css" }
  - name: home
    resources:
      - { group: common }
      - { type: js, uri: "js/home.js" }
"#;

  #[test]
  fn expands_imports_in_place() {
    let model = GroupModel::from_yaml_str(MODEL).unwrap();
    let home = model.group("home").unwrap();

    assert_eq!(home.name, "home");
    assert_eq!(home.resources, vec![
      Resource::new("js/lib/*.js", ResourceType::Js),
      Resource::new("css/reset.css", ResourceType::Css),
      Resource::new("js/home.js", ResourceType::Js),
    ]);
    assert_eq!(model.group_names().collect::<Vec<_>>(), vec!["common", "home"]);
  }

  #[test]
  fn unknown_groups_fail_to_resolve() {
    let model = GroupModel::from_yaml_str(MODEL).unwrap();
    assert!(matches!(
      model.group("missing"),
      Err(TagError::UnknownGroup { name }) if name == "missing"
    ));
  }

  #[test]
  fn rejects_import_cycles() {
    let model = r#"
groups:
  - name: a
    resources: [{ group: b }]
  - name: b
    resources: [{ group: a }]
"#;
    let error = GroupModel::from_yaml_str(model).unwrap_err();
    assert!(error.to_string().contains("cycle"));
  }

  #[test]
  fn rejects_unknown_imports_and_duplicates() {
    let unknown = r#"{"groups": [{"name": "a", "resources": [{"group": "nope"}]}]}"#;
    assert!(
      GroupModel::from_json_str(unknown)
        .unwrap_err()
        .to_string()
        .contains("nope")
    );

    let duplicate = r#"{"groups": [{"name": "a"}, {"name": "a"}]}"#;
    assert!(matches!(
      GroupModel::from_json_str(duplicate),
      Err(TagError::Model { .. })
    ));
  }

  #[test]
  fn load_picks_format_from_extension() {
    let temp = tempdir().expect("failed to create temp dir");
    let json = temp.path().join("wro.json");
    std::fs::write(
      &json,
      r#"{"groups": [{"name": "admin", "resources": [{"type": "css", "uri": "css/admin.css"}]}]}"#,
    )
    .unwrap();
    let yaml = temp.path().join("wro.yaml");
    std::fs::write(&yaml, MODEL).unwrap();

    let admin = GroupModel::load(&json).unwrap().group("admin").unwrap();
    assert!(admin.has_resources_of_type(ResourceType::Css));
    assert!(GroupModel::load(&yaml).unwrap().group("home").is_ok());
  }
}
