//! Name, identifier, and path conversion helpers.

use std::fs;
use std::path::{Path, PathBuf};

/// Convert a dash/slash separated name to namespace form:
/// `foo-bar/baz` → `FooBar::Baz`.
pub fn name_to_namespace(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for ch in name.chars() {
        match ch {
            '-' => upper_next = true,
            '/' => {
                out.push_str("::");
                upper_next = true;
            }
            _ => {
                if upper_next {
                    out.extend(ch.to_uppercase());
                    upper_next = false;
                } else {
                    out.push(ch);
                }
            }
        }
    }
    out
}

/// Convert a type name to underscore form: `FooBar` → `foo_bar`.
pub fn class_to_name(class: &str) -> String {
    let mut out = String::with_capacity(class.len() + 4);
    for (i, ch) in class.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Convert a dash/underscore name to type-name form, capitalizing only the
/// segment after the last `/`: `foo_bar` → `FooBar`, `user/login` →
/// `user/Login`.
pub fn name_to_class(name: &str) -> String {
    let mut joined = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        match ch {
            '-' | '_' => upper_next = true,
            _ => {
                if upper_next {
                    joined.extend(ch.to_uppercase());
                    upper_next = false;
                } else {
                    joined.push(ch);
                }
            }
        }
    }

    match joined.rfind('/') {
        Some(pos) if pos > 0 => {
            let (path, class) = joined.split_at(pos + 1);
            format!("{path}{}", ucfirst(class))
        }
        _ => ucfirst(&joined),
    }
}

/// Resolve `name`'s `/`-separated components against the directories under
/// `base`, matching case-insensitively. Returns the real-cased path, rooted
/// at `base` when `full` is set and relative otherwise, or `None` when any
/// component has no matching directory.
pub fn guess_path(base: &Path, name: &str, full: bool) -> Option<PathBuf> {
    if !base.is_dir() {
        return None;
    }

    let mut current = base.to_path_buf();
    let mut real = PathBuf::new();
    for component in name.trim_matches('/').split('/') {
        let wanted = component.to_lowercase();
        let entries = fs::read_dir(&current).ok()?;
        let found = entries.filter_map(Result::ok).find(|entry| {
            entry.file_name().to_string_lossy().to_lowercase() == wanted
                && entry.path().is_dir()
        })?;
        current = found.path();
        real.push(found.file_name());
    }
    Some(if full { current } else { real })
}

fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn name_to_namespace_capitalizes_segments() {
        assert_eq!(name_to_namespace("foo-bar/baz"), "FooBar::Baz");
        assert_eq!(name_to_namespace("foo"), "Foo");
        assert_eq!(name_to_namespace("admin/user-group"), "Admin::UserGroup");
    }

    #[test]
    fn class_to_name_underscores_uppercase() {
        assert_eq!(class_to_name("FooBar"), "foo_bar");
        assert_eq!(class_to_name("foo"), "foo");
        assert_eq!(class_to_name("HTTPServer"), "h_t_t_p_server");
    }

    #[test]
    fn name_to_class_capitalizes_last_segment_only() {
        assert_eq!(name_to_class("foo_bar"), "FooBar");
        assert_eq!(name_to_class("foo-bar"), "FooBar");
        assert_eq!(name_to_class("user/login"), "user/Login");
        assert_eq!(name_to_class("admin/user_group"), "admin/UserGroup");
    }

    #[test]
    fn guess_path_matches_directories_case_insensitively() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("App/Commands")).unwrap();

        assert_eq!(
            guess_path(temp.path(), "app/commands", false).unwrap(),
            PathBuf::from("App/Commands")
        );
        assert!(guess_path(temp.path(), "app/missing", false).is_none());
        assert!(guess_path(&temp.path().join("nope"), "app", false).is_none());
    }

    #[test]
    fn guess_path_full_returns_the_rooted_path() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("App/Commands")).unwrap();

        assert_eq!(
            guess_path(temp.path(), "app/commands", true).unwrap(),
            temp.path().join("App/Commands")
        );
    }

    #[test]
    fn guess_path_ignores_files_with_matching_names() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("app"), "").unwrap();

        assert!(guess_path(temp.path(), "app", false).is_none());
    }
}
