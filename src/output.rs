use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Give up after this many suffixed candidates.
const MAX_SUFFIX: u32 = 100;

/// Create the output file at `path`, or at `stem_1.ext`, `stem_2.ext`, ...
/// when the requested name cannot be created (typically because another
/// program holds it open). Returns the file and the path actually used.
pub fn create_with_fallback(path: &Path) -> Result<(File, PathBuf), AppError> {
    let first_err = match File::create(path) {
        Ok(file) => return Ok((file, path.to_path_buf())),
        Err(e) => e,
    };

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let extension = path.extension().map(|e| e.to_string_lossy().into_owned());

    for n in 1..=MAX_SUFFIX {
        let name = match &extension {
            Some(ext) => format!("{}_{}.{}", stem, n, ext),
            None => format!("{}_{}", stem, n),
        };
        let candidate = path.with_file_name(name);
        if let Ok(file) = File::create(&candidate) {
            return Ok((file, candidate));
        }
    }

    Err(first_err.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("clue-cards-{}-{}", tag, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn uses_requested_path_when_writable() {
        let dir = scratch_dir("plain");
        let path = dir.join("cards.pdf");
        let (_file, used) = create_with_fallback(&path).unwrap();
        assert_eq!(used, path);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn falls_back_to_numbered_suffixes() {
        let dir = scratch_dir("collide");
        // Directories at the target names make File::create fail
        fs::create_dir_all(dir.join("cards.pdf")).unwrap();
        fs::create_dir_all(dir.join("cards_1.pdf")).unwrap();

        let (_file, used) = create_with_fallback(&dir.join("cards.pdf")).unwrap();
        assert_eq!(used, dir.join("cards_2.pdf"));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn suffix_without_extension() {
        let dir = scratch_dir("noext");
        fs::create_dir_all(dir.join("cards")).unwrap();

        let (_file, used) = create_with_fallback(&dir.join("cards")).unwrap();
        assert_eq!(used, dir.join("cards_1"));
        fs::remove_dir_all(&dir).ok();
    }
}
