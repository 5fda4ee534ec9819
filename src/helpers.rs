/// Canonicalises a virtual server path: collapses `.` and `..` components and
/// duplicate separators. `..` saturates at the root rather than escaping it,
/// so the result always begins with `/`. The driver is still responsible for
/// mapping the virtual path onto backing storage safely.
pub fn clean_virtual_path(path: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }
    if stack.is_empty() {
        String::from("/")
    } else {
        format!("/{}", stack.join("/"))
    }
}

/// Resolves a client-supplied path against the current working directory.
///
/// ```text
/// build_path("/", "one.txt")            => "/one.txt"
/// build_path("/files", "two.txt")       => "/files/two.txt"
/// build_path("/home", "/../../etc")     => "/etc"
/// build_path("/files", "")              => "/files"
/// ```
pub fn build_path(name_prefix: &str, filename: &str) -> String {
    if filename.starts_with('/') {
        clean_virtual_path(filename)
    } else if !filename.is_empty() {
        clean_virtual_path(&format!("{}/{}", name_prefix, filename))
    } else {
        clean_virtual_path(name_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_are_cleaned() {
        assert_eq!(clean_virtual_path("/"), "/");
        assert_eq!(clean_virtual_path("/a/b/c"), "/a/b/c");
        assert_eq!(clean_virtual_path("/a//b/./c"), "/a/b/c");
        assert_eq!(clean_virtual_path("//"), "/");
    }

    #[test]
    fn traversal_saturates_at_root() {
        assert_eq!(clean_virtual_path("/../../../../etc/passwd"), "/etc/passwd");
        assert_eq!(build_path("/home", "/../../../../etc/passwd"), "/etc/passwd");
        assert_eq!(build_path("/", "../.."), "/");
    }

    #[test]
    fn relative_paths_join_the_prefix() {
        assert_eq!(build_path("/", "one.txt"), "/one.txt");
        assert_eq!(build_path("/files", "two.txt"), "/files/two.txt");
        assert_eq!(build_path("/files", ".."), "/");
        assert_eq!(build_path("/files", ""), "/files");
    }

    #[test]
    fn build_path_is_idempotent() {
        for (prefix, input) in [
            ("/", "one.txt"),
            ("/files", "../../x/./y"),
            ("/home", "/../../etc/passwd"),
            ("/deep/nest", "a/b/../c"),
        ] {
            let once = build_path(prefix, input);
            assert!(once.starts_with('/'));
            assert!(!once.split('/').any(|part| part == "." || part == ".."));
            assert_eq!(build_path("/", &once), once);
        }
    }
}
