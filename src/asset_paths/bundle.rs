use super::filters::is_external_reference;

/// Join a base web path and a child path with exactly one separator between them.
///
/// A leading separator on `base` is preserved, so context paths such as `/app` stay rooted.
/// Backslashes from Windows-style inputs are normalised to forward slashes. External
/// references are returned unchanged.
pub fn join_resource_path(base: &str, child: &str) -> String {
    if is_external_reference(child) {
        return child.to_string();
    }

    let base = base.replace('\\', "/");
    let child = child.replace('\\', "/");

    if base.is_empty() {
        return child;
    }
    if child.is_empty() {
        return base;
    }

    let head = base.trim_end_matches('/');
    let tail = child.trim_start_matches('/');
    format!("{head}/{tail}")
}
