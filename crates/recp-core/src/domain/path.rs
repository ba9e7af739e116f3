//! Lexical path helpers.
//!
//! Nothing here touches the filesystem: normalization is purely symbolic,
//! so `parent_dir` gives the same answer whether or not the path exists.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path.
///
/// Repeated and trailing separators collapse, `.` segments disappear and
/// `..` cancels the preceding normal segment. Leading `..` segments of a
/// relative path are kept; `..` directly under the root is dropped. An
/// empty result becomes `.`.
pub fn normalize(path: &str) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Parent directory of the normalized `path`, as text.
///
/// `/a/b/c/` and `/a/b/c` both give `/a/b`; the root is its own parent and
/// a single relative segment has an empty parent.
pub fn parent_of(path: &str) -> String {
    let normalized = normalize(path);
    match normalized.parent() {
        Some(parent) => parent.to_string_lossy().into_owned(),
        None => {
            if normalized.has_root() {
                normalized.to_string_lossy().into_owned()
            } else {
                String::new()
            }
        }
    }
}

/// Expand a leading `~` and `$NAME` / `${NAME}` references.
///
/// `lookup` resolves variable names (the home directory is looked up as
/// `HOME`). Unknown variables are left untouched, as a shell's
/// `expandvars` would.
pub fn expand_user_and_vars<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut text = input.to_string();

    if text == "~" || text.starts_with("~/") {
        if let Some(home) = lookup("HOME") {
            text = format!("{}{}", home, &text[1..]);
        }
    }

    if !text.contains('$') {
        return text;
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text.as_str();

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };

        match (name.is_empty(), lookup(name)) {
            (false, Some(value)) => out.push_str(&value),
            _ => {
                out.push('$');
                out.push_str(&after[..consumed]);
            }
        }
        rest = &after[consumed..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(name: &str) -> Option<String> {
        match name {
            "HOME" => Some("/home/ada".into()),
            "OUT" => Some("/srv/out".into()),
            _ => None,
        }
    }

    #[test]
    fn trailing_separator_does_not_change_parent() {
        assert_eq!(parent_of("/a/b/c/"), "/a/b");
        assert_eq!(parent_of("/a/b/c"), "/a/b");
        assert_eq!(parent_of("/a/b/c//"), "/a/b");
    }

    #[test]
    fn parent_resolves_dot_segments() {
        assert_eq!(parent_of("/a/./b/../c/d"), "/a/c");
        assert_eq!(parent_of("a/b/."), "a");
    }

    #[test]
    fn parent_edge_cases() {
        assert_eq!(parent_of("/"), "/");
        assert_eq!(parent_of("/a"), "/");
        assert_eq!(parent_of("file.txt"), "");
        assert_eq!(parent_of(""), "");
        assert_eq!(parent_of("../.."), "..");
    }

    #[test]
    fn normalize_keeps_leading_parent_segments() {
        assert_eq!(normalize("../x/../y"), PathBuf::from("../y"));
        assert_eq!(normalize("/../x"), PathBuf::from("/x"));
        assert_eq!(normalize("./"), PathBuf::from("."));
    }

    #[test]
    fn expands_home_and_variables() {
        assert_eq!(expand_user_and_vars("~/music", env), "/home/ada/music");
        assert_eq!(expand_user_and_vars("$OUT/mp3", env), "/srv/out/mp3");
        assert_eq!(expand_user_and_vars("${OUT}_old", env), "/srv/out_old");
    }

    #[test]
    fn unknown_variables_are_left_alone() {
        assert_eq!(expand_user_and_vars("$NOPE/x", env), "$NOPE/x");
        assert_eq!(expand_user_and_vars("${NOPE}", env), "${NOPE}");
        assert_eq!(expand_user_and_vars("cost: $", env), "cost: $");
        assert_eq!(expand_user_and_vars("${unterminated", env), "${unterminated");
    }

    #[test]
    fn tilde_only_expands_at_start() {
        assert_eq!(expand_user_and_vars("a/~/b", env), "a/~/b");
        assert_eq!(expand_user_and_vars("~user", env), "~user");
    }
}
