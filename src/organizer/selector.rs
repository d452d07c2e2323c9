use std::cmp::Reverse;
use std::path::{Path, PathBuf};

/// Kind sub-folders in selection priority order. Bitmap-bearing folders come
/// first; shapes hold vector exports and are the last resort.
const KIND_PRIORITY: [&str; 5] = ["images", "sprites", "buttons", "frames", "shapes"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetFormat {
    Png,
    Jpeg,
    Svg,
}

impl AssetFormat {
    pub fn from_path(path: &Path) -> Option<AssetFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "png" => Some(AssetFormat::Png),
            "jpg" | "jpeg" => Some(AssetFormat::Jpeg),
            "svg" => Some(AssetFormat::Svg),
            _ => None,
        }
    }

    /// Canonical extension used for destination file names.
    pub fn extension(&self) -> &'static str {
        match self {
            AssetFormat::Png => "png",
            AssetFormat::Jpeg => "jpg",
            AssetFormat::Svg => "svg",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            AssetFormat::Png => 0,
            AssetFormat::Jpeg => 1,
            AssetFormat::Svg => 2,
        }
    }
}

/// The single file chosen to represent one asset directory.
#[derive(Debug, Clone)]
pub struct SelectedAsset {
    pub path: PathBuf,
    pub format: AssetFormat,
    pub size: u64,
}

/// Choose the best representative file for one extracted asset directory.
///
/// Kind sub-folders are examined in priority order; the first one holding a
/// recognized file decides. Within it, PNG beats JPEG beats SVG, larger files
/// beat smaller ones (size is the completeness proxy), and equal sizes fall
/// back to name order. Pure function of the directory contents: identical
/// trees always yield the identical choice.
pub fn select_best(asset_dir: &Path) -> Option<SelectedAsset> {
    for subdir in KIND_PRIORITY {
        let subdir_path = asset_dir.join(subdir);
        if !subdir_path.is_dir() {
            continue;
        }

        let mut candidates = collect_candidates(&subdir_path);
        if candidates.is_empty() {
            continue;
        }

        candidates.sort_by_key(|c| {
            (
                c.format.rank(),
                Reverse(c.size),
                c.path.file_name().map(|n| n.to_os_string()),
            )
        });

        return candidates.into_iter().next();
    }

    None
}

fn collect_candidates(subdir: &Path) -> Vec<SelectedAsset> {
    let entries = match std::fs::read_dir(subdir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter_map(|path| {
            let format = AssetFormat::from_path(&path)?;
            let size = std::fs::metadata(&path).ok()?.len();
            Some(SelectedAsset { path, format, size })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, bytes: usize) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), vec![0u8; bytes]).unwrap();
    }

    #[test]
    fn test_largest_png_wins() {
        let temp_dir = TempDir::new().unwrap();
        let images = temp_dir.path().join("images");
        write_file(&images, "a.png", 1000);
        write_file(&images, "b.png", 2000);

        let selected = select_best(temp_dir.path()).unwrap();
        assert_eq!(selected.path.file_name().unwrap(), "b.png");
        assert_eq!(selected.size, 2000);
        assert_eq!(selected.format, AssetFormat::Png);
    }

    #[test]
    fn test_png_beats_larger_jpeg() {
        let temp_dir = TempDir::new().unwrap();
        let images = temp_dir.path().join("images");
        write_file(&images, "small.png", 100);
        write_file(&images, "large.jpg", 9000);

        let selected = select_best(temp_dir.path()).unwrap();
        assert_eq!(selected.path.file_name().unwrap(), "small.png");
    }

    #[test]
    fn test_jpeg_beats_svg() {
        let temp_dir = TempDir::new().unwrap();
        let shapes = temp_dir.path().join("shapes");
        write_file(&shapes, "vector.svg", 5000);
        write_file(&shapes, "render.jpeg", 50);

        let selected = select_best(temp_dir.path()).unwrap();
        assert_eq!(selected.path.file_name().unwrap(), "render.jpeg");
        assert_eq!(selected.format, AssetFormat::Jpeg);
    }

    #[test]
    fn test_vector_as_last_resort() {
        let temp_dir = TempDir::new().unwrap();
        let shapes = temp_dir.path().join("shapes");
        write_file(&shapes, "outline.svg", 300);

        let selected = select_best(temp_dir.path()).unwrap();
        assert_eq!(selected.format, AssetFormat::Svg);
        assert_eq!(selected.format.extension(), "svg");
    }

    #[test]
    fn test_kind_priority_order() {
        let temp_dir = TempDir::new().unwrap();
        write_file(&temp_dir.path().join("sprites"), "sprite.png", 100);
        write_file(&temp_dir.path().join("images"), "image.png", 50);

        let selected = select_best(temp_dir.path()).unwrap();
        assert_eq!(selected.path.file_name().unwrap(), "image.png");
    }

    #[test]
    fn test_subfolder_without_recognized_files_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        write_file(&temp_dir.path().join("images"), "readme.txt", 10);
        write_file(&temp_dir.path().join("buttons"), "press.png", 10);

        let selected = select_best(temp_dir.path()).unwrap();
        assert_eq!(selected.path.file_name().unwrap(), "press.png");
    }

    #[test]
    fn test_no_asset_found() {
        let temp_dir = TempDir::new().unwrap();
        assert!(select_best(temp_dir.path()).is_none());

        write_file(&temp_dir.path().join("images"), "notes.txt", 10);
        assert!(select_best(temp_dir.path()).is_none());
    }

    #[test]
    fn test_equal_sizes_tie_break_by_name() {
        let temp_dir = TempDir::new().unwrap();
        let images = temp_dir.path().join("images");
        write_file(&images, "zz.png", 500);
        write_file(&images, "aa.png", 500);

        let selected = select_best(temp_dir.path()).unwrap();
        assert_eq!(selected.path.file_name().unwrap(), "aa.png");
    }

    #[test]
    fn test_selection_is_deterministic() {
        let temp_dir = TempDir::new().unwrap();
        let images = temp_dir.path().join("images");
        write_file(&images, "a.png", 700);
        write_file(&images, "b.jpg", 700);
        write_file(&images, "c.png", 700);

        let first = select_best(temp_dir.path()).unwrap();
        for _ in 0..5 {
            let again = select_best(temp_dir.path()).unwrap();
            assert_eq!(again.path, first.path);
        }
    }
}
