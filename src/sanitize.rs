use std::path::{Component, Path, PathBuf};

const REPLACEMENT: char = '_';

fn is_illegal(ch: char) -> bool {
    matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || ch.is_control()
}

/// Makes a single path component safe to create on any common filesystem.
///
/// Illegal characters become `_`, trailing dots and spaces are dropped, and
/// names that would otherwise be empty or refer to `.`/`..` become `_`.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|ch| if is_illegal(ch) { REPLACEMENT } else { ch })
        .collect();
    let trimmed = replaced.trim_end_matches(['.', ' ']).trim_start();

    if trimmed.is_empty() {
        REPLACEMENT.to_string()
    } else {
        trimmed.to_owned()
    }
}

/// Sanitizes each component of a folder path while keeping its structure.
pub fn sanitize_folder(folder: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in folder.components() {
        match component {
            Component::Normal(part) => out.push(sanitize_filename(&part.to_string_lossy())),
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_illegal_characters() {
        assert_eq!(
            sanitize_filename("1. Автор - Что? Где: Когда*.txt"),
            "1. Автор - Что_ Где_ Когда_.txt"
        );
        assert_eq!(sanitize_filename("a/b\\c|d<e>f\"g"), "a_b_c_d_e_f_g");
        assert_eq!(sanitize_filename("tab\there"), "tab_here");
    }

    #[test]
    fn trims_trailing_dots_and_spaces() {
        assert_eq!(sanitize_filename("Конец... "), "Конец");
        assert_eq!(sanitize_filename("  leading"), "leading");
    }

    #[test]
    fn degenerate_names_become_placeholder() {
        assert_eq!(sanitize_filename(""), "_");
        assert_eq!(sanitize_filename(".."), "_");
        assert_eq!(sanitize_filename(" . "), "_");
    }

    #[test]
    fn folder_keeps_separators() {
        let folder = sanitize_folder(Path::new("out/my:books/images"));
        assert_eq!(folder, Path::new("out").join("my_books").join("images"));
    }

    #[test]
    fn folder_keeps_root_and_parent_components() {
        let folder = sanitize_folder(Path::new("/tmp/../data"));
        assert_eq!(folder, PathBuf::from("/tmp/../data"));
    }
}
