//! Tag renderer turning a resource group into `<script>` and `<link>` elements.

use std::io::Write;
use std::sync::Arc;

use regex::Regex;

use crate::asset_paths::{is_ant_pattern, is_external_reference, join_resource_path};
use crate::cache::{ResolvedResourceCache, cache_key};
use crate::config::TagProperties;
use crate::error::{Result, TagError};
use crate::group::GroupResolver;
use crate::lister::DirectoryLister;
use crate::models::{Resource, ResourceGroup};
use crate::tag::{ResourceHtmlTag, TagSet};

/// Renders the tags of a resource group.
///
/// In debug mode every source file of the group is emitted, with ant-style paths expanded
/// through the [`DirectoryLister`]. Otherwise one compressed bundle per configured tag kind is
/// emitted.
pub struct TagRenderer<G, L> {
  groups: G,
  properties: TagProperties,
  tags: TagSet,
  lister: L,
  cache: Arc<ResolvedResourceCache>,
}

impl<G: GroupResolver, L: DirectoryLister> TagRenderer<G, L> {
  /// Create a renderer sharing `cache` with any other renderer holding it.
  pub fn new(
    groups: G,
    properties: TagProperties,
    tags: TagSet,
    lister: L,
    cache: Arc<ResolvedResourceCache>,
  ) -> Self {
    Self {
      groups,
      properties,
      tags,
      lister,
      cache,
    }
  }

  /// Create a renderer with a private cache.
  pub fn with_fresh_cache(groups: G, properties: TagProperties, tags: TagSet, lister: L) -> Self {
    Self::new(
      groups,
      properties,
      tags,
      lister,
      Arc::new(ResolvedResourceCache::new()),
    )
  }

  /// Write one tag per line for the resources of `group_name`.
  pub fn render<W: Write + ?Sized>(
    &self,
    writer: &mut W,
    group_name: &str,
    context_path: &str,
  ) -> Result<()> {
    let group = self.groups.group(group_name)?;
    for resource in self.collect_resources(&group)?.iter() {
      let tag = self.render_tag(context_path, resource);
      log::trace!("{}: {tag}", group.name);
      writeln!(writer, "{tag}")?;
    }
    Ok(())
  }

  /// Render the tags of `group_name` into a string.
  pub fn render_to_string(&self, group_name: &str, context_path: &str) -> Result<String> {
    let mut buffer = Vec::new();
    self.render(&mut buffer, group_name, context_path)?;
    String::from_utf8(buffer)
      .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err).into())
  }

  /// Resources to emit for `group` under the current mode.
  pub fn collect_resources(&self, group: &ResourceGroup) -> Result<Arc<[Resource]>> {
    if self.properties.is_debug_on() {
      self.uncompressed_resources(group)
    } else {
      self.compressed_bundle(group).map(Arc::from)
    }
  }

  /// One bundle per configured tag kind that the group has members for, in tag order.
  pub fn compressed_bundle(&self, group: &ResourceGroup) -> Result<Vec<Resource>> {
    let mut bundles = Vec::new();
    for tag in self.tags.iter() {
      if group.has_resources_of_type(tag.resource_type()) {
        bundles.push(self.resource_for_bundle(group, tag)?);
      }
    }
    Ok(bundles)
  }

  /// Supported members of `group` with their paths expanded, memoised per tag set and group.
  pub fn uncompressed_resources(&self, group: &ResourceGroup) -> Result<Arc<[Resource]>> {
    let key = cache_key(&self.tags, &group.name);
    if let Some(cached) = self.cache.get(&key) {
      log::debug!("using cached resources for {key}");
      return Ok(cached);
    }

    log::debug!("expanding resources for {key}");
    let mut files = Vec::new();
    for member in group.resources.iter().filter(|r| self.is_supported(r)) {
      for filename in self.lister.list(&member.uri)? {
        let uri = listed_resource_uri(&member.uri, filename);
        files.push(Resource::new(uri, member.resource_type));
      }
    }

    Ok(self.cache.insert(key, files))
  }

  /// Locate the compressed bundle of `group` for `tag`.
  ///
  /// The first listed file whose whole name matches the configured name template wins.
  pub fn resource_for_bundle(&self, group: &ResourceGroup, tag: ResourceHtmlTag) -> Result<Resource> {
    let pattern = self.properties.name_template.for_group(&group.name, tag);
    let anchored = format!("^(?:{pattern})$");
    let matcher = Regex::new(&anchored).map_err(|source| TagError::InvalidNameTemplate {
      pattern: pattern.clone(),
      source,
    })?;
    let path = self.properties.resource_path(tag.resource_type());

    let found = self
      .lister
      .list(path)?
      .into_iter()
      .find(|filename| matcher.is_match(filename));

    match found {
      Some(filename) => {
        log::debug!("{tag} bundle for {}: {filename}", group.name);
        Ok(Resource::new(
          join_resource_path(path, &filename),
          tag.resource_type(),
        ))
      }
      None => {
        log::warn!("no {tag} bundle for {} matching {pattern} in {path}", group.name);
        Err(TagError::BundleNotFound {
          pattern,
          path: path.to_string(),
        })
      }
    }
  }

  /// Whether some configured tag kind renders `resource`.
  pub fn is_supported(&self, resource: &Resource) -> bool {
    self.tags.supports(resource.resource_type)
  }

  /// Markup for a single resource, without a trailing newline.
  pub fn render_tag(&self, context_path: &str, resource: &Resource) -> String {
    let uri = join_resource_path(context_path, &resource.uri);
    ResourceHtmlTag::for_type(resource.resource_type).render(&uri)
  }
}

/// Web path of a listed file relative to the member it was listed for.
///
/// Listing a directory yields bare file names, which are placed back under the member path.
/// Pattern matches, external URLs and plain files already carry their full path.
fn listed_resource_uri(member_uri: &str, listed: String) -> String {
  if is_ant_pattern(member_uri)
    || is_external_reference(&listed)
    || listed.contains('/')
    || listed
      .strip_prefix(member_uri)
      .is_some_and(|rest| rest.is_empty() || rest.starts_with(['?', '#']))
  {
    listed
  } else {
    join_resource_path(member_uri, &listed)
  }
}
