//! Lexical path relativization.
//!
//! Addresses carry their file segment as plain text, so relativizing it must
//! not touch the filesystem: no canonicalization, no symlink resolution.

use std::path::{Component, Path, PathBuf};

use super::error::RelativePathError;

/// Compute `target` relative to `base` without consulting the filesystem.
///
/// Both paths are cleaned lexically first (`.` dropped, `dir/..` collapsed).
/// Fails if only one of the paths is rooted, or if the base still climbs
/// out of the shared ancestor with `..` after cleaning.
///
/// ```
/// # use std::path::{Path, PathBuf};
/// # use ato::base::relative_path;
/// let rel = relative_path(Path::new("/proj"), Path::new("/proj/elec/src/main.ato")).unwrap();
/// assert_eq!(rel, PathBuf::from("elec/src/main.ato"));
/// ```
pub fn relative_path(base: &Path, target: &Path) -> Result<PathBuf, RelativePathError> {
    let (base_root, base_parts) = clean(base);
    let (target_root, target_parts) = clean(target);

    if base_root != target_root {
        return Err(RelativePathError::Incompatible {
            base: base.to_path_buf(),
            target: target.to_path_buf(),
        });
    }

    let common = base_parts
        .iter()
        .zip(target_parts.iter())
        .take_while(|(b, t)| b == t)
        .count();

    let base_rest = &base_parts[common..];
    if base_rest.iter().any(|c| matches!(c, Component::ParentDir)) {
        return Err(RelativePathError::Unreachable {
            base: base.to_path_buf(),
            target: target.to_path_buf(),
        });
    }

    let mut rel = PathBuf::new();
    for _ in base_rest {
        rel.push(Component::ParentDir);
    }
    for part in &target_parts[common..] {
        rel.push(part);
    }

    if rel.as_os_str().is_empty() {
        rel.push(Component::CurDir);
    }
    Ok(rel)
}

/// Split a path into its root (prefix and root dir) and its cleaned body.
fn clean(path: &Path) -> (Vec<Component<'_>>, Vec<Component<'_>>) {
    let mut root = Vec::new();
    let mut body: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => root.push(component),
            Component::CurDir => {}
            Component::ParentDir => match body.last().copied() {
                Some(Component::Normal(_)) => {
                    body.pop();
                }
                // `/..` is `/`
                None if !root.is_empty() => {}
                _ => body.push(component),
            },
            Component::Normal(_) => body.push(component),
        }
    }

    (root, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(base: &str, target: &str) -> Result<PathBuf, RelativePathError> {
        relative_path(Path::new(base), Path::new(target))
    }

    #[test]
    fn test_relative_descendant() {
        assert_eq!(rel("/a/b", "/a/b/c/file.ato").unwrap(), PathBuf::from("c/file.ato"));
    }

    #[test]
    fn test_relative_sibling() {
        assert_eq!(rel("/a/b", "/a/x/f.ato").unwrap(), PathBuf::from("../x/f.ato"));
    }

    #[test]
    fn test_relative_same_path() {
        assert_eq!(rel("/a", "/a").unwrap(), PathBuf::from("."));
        assert_eq!(rel("a/b", "a/b/").unwrap(), PathBuf::from("."));
    }

    #[test]
    fn test_relative_cleans_inputs() {
        assert_eq!(rel("a/./b/../c", "a/c/d").unwrap(), PathBuf::from("d"));
        assert_eq!(rel(".", "x/y.ato").unwrap(), PathBuf::from("x/y.ato"));
    }

    #[test]
    fn test_relative_target_climbs() {
        assert_eq!(rel("a", "../b").unwrap(), PathBuf::from("../../b"));
    }

    #[test]
    fn test_relative_mixed_roots() {
        assert!(matches!(
            rel("/abs", "rel/file.ato"),
            Err(RelativePathError::Incompatible { .. })
        ));
        assert!(matches!(
            rel("rel", "/abs/file.ato"),
            Err(RelativePathError::Incompatible { .. })
        ));
    }

    #[test]
    fn test_relative_base_escapes() {
        assert!(matches!(
            rel("../x", "y"),
            Err(RelativePathError::Unreachable { .. })
        ));
    }
}
