//! Writing transform output and generating default output paths

use std::io;
use std::path::{Path, PathBuf};

/// File extension for a transform's output format.
pub fn extension_for(transform: &str) -> &'static str {
    if transform.eq_ignore_ascii_case(crate::transforms::BLINK) {
        "gif"
    } else {
        "png"
    }
}

/// Write encoded bytes to `path`, creating parent directories as needed.
pub fn write_output(bytes: &[u8], path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)
}

/// Generate the output path for a transform.
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `-o` | `{input_stem}_{transform}.{ext}` next to the input |
/// | `-o out.png` | `out.png` |
/// | `-o dir/` or an existing directory | `dir/{input_stem}_{transform}.{ext}` |
pub fn generate_output_path(input: &Path, transform: &str, output_arg: Option<&Path>) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let file_name = format!("{}_{}.{}", stem, transform, extension_for(transform));

    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(file_name)
            } else {
                output.to_path_buf()
            }
        }
        None => {
            let parent = input.parent().unwrap_or(Path::new(""));
            if parent.as_os_str().is_empty() {
                PathBuf::from(file_name)
            } else {
                parent.join(file_name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_output_path() {
        let path = generate_output_path(Path::new("img/avatar.png"), "circle", None);
        assert_eq!(path, PathBuf::from("img/avatar_circle.png"));

        let path = generate_output_path(Path::new("a.png"), "blink", None);
        assert_eq!(path, PathBuf::from("a_blink.gif"));
    }

    #[test]
    fn test_explicit_file_output() {
        let path = generate_output_path(Path::new("a.png"), "color", Some(Path::new("out/x.png")));
        assert_eq!(path, PathBuf::from("out/x.png"));
    }

    #[test]
    fn test_directory_output() {
        let path = generate_output_path(Path::new("a.png"), "greyscale", Some(Path::new("build/")));
        assert_eq!(path, PathBuf::from("build/a_greyscale.png"));
    }

    #[test]
    fn test_write_output_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dirs/out.png");
        write_output(b"abc", &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"abc");
    }
}
