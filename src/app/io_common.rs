use std::path::Path;

/// Resolves a path from a configuration file against the directory of that file.
pub fn resolve_path(root: Option<&Path>, path: &str) -> String {
    match root {
        Some(r) if Path::new(path).is_relative() => r.join(path).display().to_string(),
        _ => path.to_string(),
    }
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_follow_the_config() {
        let root = Path::new("/data/hr");
        assert_eq!(
            resolve_path(Some(root), "staff.csv"),
            Path::new("/data/hr").join("staff.csv").display().to_string()
        );
        assert_eq!(resolve_path(None, "staff.csv"), "staff.csv");
    }

    #[test]
    fn absolute_paths_are_kept() {
        let abs = std::env::temp_dir().join("staff.csv");
        let abs = abs.to_str().unwrap();
        assert_eq!(resolve_path(Some(Path::new("/data/hr")), abs), abs);
    }

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/data/hr/staff.csv"), "staff.csv");
        assert_eq!(simplify_file_name("staff.csv"), "staff.csv");
    }
}
