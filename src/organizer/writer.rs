use crate::error::{PipelineError, Result};
use crate::organizer::categorizer::{categorize, category_labels};
use crate::organizer::selector::{select_best, SelectedAsset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// File name of the categorized-layout mapping document.
pub const MAPPING_FILE: &str = "asset_mapping.json";

/// File name of the flat-lookup document.
pub const LOOKUP_FILE: &str = "asset_lookup.json";

/// One record of the categorized lookup table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupEntry {
    pub category: String,
    pub organized_path: String,
    pub original_path: String,
    pub file_type: String,
}

/// One record of the flat hash-lookup table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatLookupEntry {
    pub path: String,
    pub original_path: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub size: u64,
}

#[derive(Debug)]
pub struct OrganizeReport {
    pub category_counts: BTreeMap<String, usize>,
    pub organized: usize,
    pub skipped_no_asset: usize,
    pub errors: Vec<String>,
    pub mapping_path: PathBuf,
}

#[derive(Debug)]
pub struct LookupReport {
    pub total: usize,
    pub organized: usize,
    pub skipped_no_asset: usize,
    pub type_counts: BTreeMap<String, usize>,
    pub errors: Vec<String>,
    pub document_path: PathBuf,
}

#[derive(Debug)]
pub struct MaterializeReport {
    pub copied: usize,
    pub skipped_existing: usize,
    pub errors: Vec<String>,
}

/// List the per-input asset directories under an extraction root, sorted by
/// name so every downstream pass sees a stable order.
pub fn list_asset_dirs(extracted_dir: &Path) -> Result<Vec<PathBuf>> {
    if !extracted_dir.is_dir() {
        return Err(PipelineError::NothingToOrganize {
            path: extracted_dir.display().to_string(),
        });
    }

    let mut dirs: Vec<PathBuf> = std::fs::read_dir(extracted_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();

    dirs.sort();
    Ok(dirs)
}

fn asset_dir_name(asset_dir: &Path) -> String {
    asset_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_string()
}

/// Probe destination names until a free one is found. `_1`, `_2`, ... suffixes
/// disambiguate collisions; an existing entry is never overwritten. A dangling
/// symlink still occupies its name.
fn free_destination(dir: &Path, asset_name: &str, extension: &str) -> PathBuf {
    let mut candidate = dir.join(format!("{}.{}", asset_name, extension));
    let mut counter = 1;

    while candidate.symlink_metadata().is_ok() {
        candidate = dir.join(format!("{}_{}.{}", asset_name, counter, extension));
        counter += 1;
    }

    candidate
}

/// Place the representative file at its destination, as a symlink reference
/// by default or a full copy when requested. Platforms without reliable
/// unprivileged symlinks get a copy either way.
fn place_reference(source: &Path, dest: &Path, copy: bool) -> std::io::Result<()> {
    if copy {
        std::fs::copy(source, dest)?;
        return Ok(());
    }

    let target = source
        .canonicalize()
        .unwrap_or_else(|_| source.to_path_buf());

    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, dest)
    }

    #[cfg(not(unix))]
    {
        std::fs::copy(target, dest).map(|_| ())
    }
}

/// Express `to` relative to the directory `from_dir`. Both sides must share a
/// root (caller canonicalizes).
fn relative_path(from_dir: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component> = from_dir.components().collect();
    let to_components: Vec<Component> = to.components().collect();

    let mut shared = 0;
    while shared < from.len()
        && shared < to_components.len()
        && from[shared] == to_components[shared]
    {
        shared += 1;
    }

    let mut result = PathBuf::new();
    for _ in shared..from.len() {
        result.push("..");
    }
    for component in &to_components[shared..] {
        result.push(component.as_os_str());
    }

    result
}

fn portable_path_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Materializes the categorized destination layout plus the mapping document.
pub struct OrganizeWriter {
    organized_dir: PathBuf,
    copy: bool,
}

impl OrganizeWriter {
    pub fn new(organized_dir: PathBuf) -> Self {
        Self {
            organized_dir,
            copy: false,
        }
    }

    pub fn with_copy(mut self, copy: bool) -> Self {
        self.copy = copy;
        self
    }

    /// Walk every asset directory, place the chosen representative under its
    /// category, and write the complete mapping document (full overwrite).
    ///
    /// Filesystem trouble with one asset is recorded and skipped; it never
    /// aborts the rest of the batch.
    pub fn organize(
        &self,
        extracted_dir: &Path,
        progress: Option<&dyn Fn(usize, usize)>,
    ) -> Result<OrganizeReport> {
        let asset_dirs = list_asset_dirs(extracted_dir)?;
        let total = asset_dirs.len();

        std::fs::create_dir_all(&self.organized_dir)?;
        for label in category_labels() {
            std::fs::create_dir_all(self.organized_dir.join(label))?;
        }

        let mut lookup: BTreeMap<String, LookupEntry> = BTreeMap::new();
        let mut category_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut skipped_no_asset = 0;
        let mut errors = Vec::new();

        for (index, asset_dir) in asset_dirs.iter().enumerate() {
            let asset_name = asset_dir_name(asset_dir);

            if let Some(selected) = select_best(asset_dir) {
                let has_images = asset_dir.join("images").is_dir();
                let category = categorize(&asset_name, has_images);

                match self.place_asset(&asset_name, category, &selected) {
                    Ok(dest) => {
                        let organized_path = dest
                            .strip_prefix(&self.organized_dir)
                            .map(portable_path_string)
                            .unwrap_or_else(|_| portable_path_string(&dest));

                        lookup.insert(
                            asset_name,
                            LookupEntry {
                                category: category.to_string(),
                                organized_path,
                                original_path: portable_path_string(&selected.path),
                                file_type: selected.format.extension().to_string(),
                            },
                        );
                        *category_counts.entry(category.to_string()).or_insert(0) += 1;
                    }
                    Err(e) => {
                        errors.push(format!("{}: {}", asset_name, e));
                    }
                }
            } else {
                skipped_no_asset += 1;
            }

            if let Some(callback) = progress {
                callback(index + 1, total);
            }
        }

        let mapping_path = self.organized_dir.join(MAPPING_FILE);
        let json = serde_json::to_string_pretty(&lookup)?;
        std::fs::write(&mapping_path, json)?;

        Ok(OrganizeReport {
            organized: lookup.len(),
            category_counts,
            skipped_no_asset,
            errors,
            mapping_path,
        })
    }

    fn place_asset(
        &self,
        asset_name: &str,
        category: &str,
        selected: &SelectedAsset,
    ) -> std::io::Result<PathBuf> {
        let dest_dir = self.organized_dir.join(category);
        let dest = free_destination(&dest_dir, asset_name, selected.format.extension());
        place_reference(&selected.path, &dest, self.copy)?;
        Ok(dest)
    }
}

/// Builds the flat name-keyed lookup directory and its document.
pub struct LookupWriter {
    lookup_dir: PathBuf,
    resource_prefix: String,
}

impl LookupWriter {
    pub fn new(lookup_dir: PathBuf, resource_prefix: String) -> Self {
        Self {
            lookup_dir,
            resource_prefix,
        }
    }

    /// One relative-symlink reference per asset, plus the JSON document next
    /// to the lookup directory. A stale reference from a previous run is
    /// replaced, so re-running converges instead of accumulating suffixes.
    pub fn build(
        &self,
        extracted_dir: &Path,
        progress: Option<&dyn Fn(usize, usize)>,
    ) -> Result<LookupReport> {
        let asset_dirs = list_asset_dirs(extracted_dir)?;
        let total = asset_dirs.len();

        std::fs::create_dir_all(&self.lookup_dir)?;
        let lookup_dir_abs = self.lookup_dir.canonicalize()?;

        let mut lookup: BTreeMap<String, FlatLookupEntry> = BTreeMap::new();
        let mut type_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut skipped_no_asset = 0;
        let mut errors = Vec::new();

        let prefix = self.resource_prefix.trim_end_matches('/');

        for (index, asset_dir) in asset_dirs.iter().enumerate() {
            let asset_name = asset_dir_name(asset_dir);

            if let Some(selected) = select_best(asset_dir) {
                let file_type = selected.format.extension();
                let link_path = lookup_dir_abs.join(format!("{}.{}", asset_name, file_type));

                match self.place_lookup_reference(&selected, &link_path, &lookup_dir_abs) {
                    Ok(original_path) => {
                        lookup.insert(
                            asset_name.clone(),
                            FlatLookupEntry {
                                path: format!("{}/{}.{}", prefix, asset_name, file_type),
                                original_path: portable_path_string(&original_path),
                                file_type: file_type.to_string(),
                                size: selected.size,
                            },
                        );
                        *type_counts.entry(file_type.to_string()).or_insert(0) += 1;
                    }
                    Err(e) => {
                        errors.push(format!("{}: {}", asset_name, e));
                    }
                }
            } else {
                skipped_no_asset += 1;
            }

            if let Some(callback) = progress {
                callback(index + 1, total);
            }
        }

        let document_path = match lookup_dir_abs.parent() {
            Some(parent) => parent.join(LOOKUP_FILE),
            None => lookup_dir_abs.join(LOOKUP_FILE),
        };
        let json = serde_json::to_string_pretty(&lookup)?;
        std::fs::write(&document_path, json)?;

        Ok(LookupReport {
            total,
            organized: lookup.len(),
            skipped_no_asset,
            type_counts,
            errors,
            document_path,
        })
    }

    fn place_lookup_reference(
        &self,
        selected: &SelectedAsset,
        link_path: &Path,
        lookup_dir_abs: &Path,
    ) -> std::io::Result<PathBuf> {
        let source_abs = selected
            .path
            .canonicalize()
            .unwrap_or_else(|_| selected.path.clone());

        if link_path.symlink_metadata().is_ok() {
            std::fs::remove_file(link_path)?;
        }

        #[cfg(unix)]
        {
            let target = relative_path(lookup_dir_abs, &source_abs);
            std::os::unix::fs::symlink(target, link_path)?;
        }

        #[cfg(not(unix))]
        {
            let _ = lookup_dir_abs;
            std::fs::copy(&source_abs, link_path)?;
        }

        Ok(source_abs)
    }
}

/// Copies the organized layout into the consuming engine's folder structure,
/// resolving symlink references to real file content.
pub struct Materializer {
    engine_root: PathBuf,
}

/// Category labels mapped onto engine sprite folders; anything not listed
/// lands in "items". The misc catch-all has no engine folder and is skipped.
const ENGINE_FOLDER_MAP: [(&str, &str); 4] = [
    ("pets", "pet"),
    ("ui", "ui"),
    ("backgrounds", "rooms"),
    ("effects", "effects"),
];

impl Materializer {
    pub fn new(engine_root: PathBuf) -> Self {
        Self { engine_root }
    }

    pub fn engine_folder(category: &str) -> Option<&'static str> {
        if category == crate::organizer::categorizer::MISC_CATEGORY {
            return None;
        }

        Some(
            ENGINE_FOLDER_MAP
                .iter()
                .find(|(label, _)| *label == category)
                .map(|(_, folder)| *folder)
                .unwrap_or("items"),
        )
    }

    pub fn materialize(&self, organized_dir: &Path) -> Result<MaterializeReport> {
        if !organized_dir.is_dir() {
            return Err(PipelineError::NothingToOrganize {
                path: organized_dir.display().to_string(),
            });
        }

        let sprites_root = self.engine_root.join("sprites");
        let mut copied = 0;
        let mut skipped_existing = 0;
        let mut errors = Vec::new();

        for category_dir in list_asset_dirs(organized_dir)? {
            let category = asset_dir_name(&category_dir);
            let folder = match Self::engine_folder(&category) {
                Some(folder) => folder,
                None => continue,
            };

            let dest_dir = sprites_root.join(folder);
            std::fs::create_dir_all(&dest_dir)?;

            let mut files: Vec<PathBuf> = std::fs::read_dir(&category_dir)?
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.symlink_metadata().map(|m| !m.is_dir()).unwrap_or(false))
                .collect();
            files.sort();

            for file in files {
                let file_name = match file.file_name() {
                    Some(name) => name.to_os_string(),
                    None => continue,
                };
                let dest = dest_dir.join(&file_name);

                if dest.exists() {
                    skipped_existing += 1;
                    continue;
                }

                match self.copy_resolved(&file, &dest) {
                    Ok(()) => copied += 1,
                    Err(e) => errors.push(format!("{}: {}", file.display(), e)),
                }
            }
        }

        Ok(MaterializeReport {
            copied,
            skipped_existing,
            errors,
        })
    }

    fn copy_resolved(&self, source: &Path, dest: &Path) -> std::io::Result<()> {
        // canonicalize follows symlink chains to the real content
        let resolved = source.canonicalize()?;
        std::fs::copy(&resolved, dest)?;

        if let Ok(metadata) = std::fs::metadata(&resolved) {
            if let Ok(modified) = metadata.modified() {
                let _ = filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(modified));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_asset_dir(root: &Path, name: &str, subdir: &str, files: &[(&str, usize)]) {
        let dir = root.join(name).join(subdir);
        fs::create_dir_all(&dir).unwrap();
        for (file, bytes) in files {
            fs::write(dir.join(file), vec![1u8; *bytes]).unwrap();
        }
    }

    #[test]
    fn test_list_asset_dirs_sorted() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("b.swf")).unwrap();
        fs::create_dir(temp_dir.path().join("a.swf")).unwrap();
        fs::write(temp_dir.path().join("stray.txt"), b"x").unwrap();

        let dirs = list_asset_dirs(temp_dir.path()).unwrap();
        let names: Vec<String> = dirs.iter().map(|d| asset_dir_name(d)).collect();
        assert_eq!(names, vec!["a.swf", "b.swf"]);
    }

    #[test]
    fn test_list_asset_dirs_missing_root() {
        let err = list_asset_dirs(Path::new("/no/such/tree")).unwrap_err();
        assert!(matches!(err, PipelineError::NothingToOrganize { .. }));
    }

    #[test]
    fn test_organize_places_and_maps() {
        let temp_dir = TempDir::new().unwrap();
        let extracted = temp_dir.path().join("extracted");
        let organized = temp_dir.path().join("organized");

        make_asset_dir(&extracted, "pet_head_01.swf", "images", &[("p.png", 100)]);
        make_asset_dir(&extracted, "red_sofa.swf", "images", &[("s.png", 100)]);
        make_asset_dir(&extracted, "empty_one.swf", "images", &[]);

        let writer = OrganizeWriter::new(organized.clone());
        let report = writer.organize(&extracted, None).unwrap();

        assert_eq!(report.organized, 2);
        assert_eq!(report.skipped_no_asset, 1);
        assert_eq!(report.category_counts.get("pets"), Some(&1));
        assert_eq!(report.category_counts.get("furniture"), Some(&1));
        assert!(report.errors.is_empty());

        assert!(organized.join("pets/pet_head_01.swf.png").symlink_metadata().is_ok());
        assert!(organized.join("furniture/red_sofa.swf.png").symlink_metadata().is_ok());

        let mapping: BTreeMap<String, LookupEntry> =
            serde_json::from_str(&fs::read_to_string(report.mapping_path).unwrap()).unwrap();
        let entry = &mapping["pet_head_01.swf"];
        assert_eq!(entry.category, "pets");
        assert_eq!(entry.organized_path, "pets/pet_head_01.swf.png");
        assert_eq!(entry.file_type, "png");
    }

    #[test]
    fn test_organize_skipped_assets_stay_out_of_mapping() {
        let temp_dir = TempDir::new().unwrap();
        let extracted = temp_dir.path().join("extracted");
        make_asset_dir(&extracted, "nothing_here.swf", "images", &[]);

        let writer = OrganizeWriter::new(temp_dir.path().join("organized"));
        let report = writer.organize(&extracted, None).unwrap();

        let mapping: BTreeMap<String, LookupEntry> =
            serde_json::from_str(&fs::read_to_string(report.mapping_path).unwrap()).unwrap();
        assert!(mapping.is_empty());
        assert_eq!(report.skipped_no_asset, 1);
    }

    #[test]
    fn test_collision_probing_never_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let extracted = temp_dir.path().join("extracted");
        let organized = temp_dir.path().join("organized");

        make_asset_dir(&extracted, "pet_head_01.swf", "images", &[("p.png", 100)]);

        let writer = OrganizeWriter::new(organized.clone()).with_copy(true);
        writer.organize(&extracted, None).unwrap();
        writer.organize(&extracted, None).unwrap();

        assert!(organized.join("pets/pet_head_01.swf.png").exists());
        assert!(organized.join("pets/pet_head_01.swf_1.png").exists());
    }

    #[test]
    fn test_recategorization_counts_are_stable() {
        let temp_dir = TempDir::new().unwrap();
        let extracted = temp_dir.path().join("extracted");
        let organized = temp_dir.path().join("organized");

        make_asset_dir(&extracted, "pet_head_01.swf", "images", &[("p.png", 100)]);
        make_asset_dir(&extracted, "beach_ball.swf", "sprites", &[("b.png", 50)]);
        make_asset_dir(&extracted, "xq_99.swf", "shapes", &[("v.svg", 10)]);

        let writer = OrganizeWriter::new(organized);
        let first = writer.organize(&extracted, None).unwrap();
        let second = writer.organize(&extracted, None).unwrap();

        assert_eq!(first.category_counts, second.category_counts);
        assert_eq!(first.organized, second.organized);
    }

    #[test]
    fn test_copy_mode_places_regular_files() {
        let temp_dir = TempDir::new().unwrap();
        let extracted = temp_dir.path().join("extracted");
        let organized = temp_dir.path().join("organized");

        make_asset_dir(&extracted, "pet_01.swf", "images", &[("p.png", 64)]);

        let writer = OrganizeWriter::new(organized.clone()).with_copy(true);
        writer.organize(&extracted, None).unwrap();

        let dest = organized.join("pets/pet_01.swf.png");
        let metadata = dest.symlink_metadata().unwrap();
        assert!(metadata.is_file());
        assert_eq!(metadata.len(), 64);
    }

    #[test]
    fn test_free_destination_probing() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.swf.png"), b"x").unwrap();
        fs::write(temp_dir.path().join("a.swf_1.png"), b"x").unwrap();

        let dest = free_destination(temp_dir.path(), "a.swf", "png");
        assert_eq!(dest.file_name().unwrap(), "a.swf_2.png");
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/data/lookup"), Path::new("/data/extracted/a/images/p.png")),
            PathBuf::from("../extracted/a/images/p.png")
        );
        assert_eq!(
            relative_path(Path::new("/data"), Path::new("/data/p.png")),
            PathBuf::from("p.png")
        );
    }

    #[test]
    fn test_lookup_build() {
        let temp_dir = TempDir::new().unwrap();
        let extracted = temp_dir.path().join("extracted");
        let lookup_dir = temp_dir.path().join("sprites/lookup");

        make_asset_dir(&extracted, "pet_head_01.swf", "images", &[("p.png", 321)]);
        make_asset_dir(&extracted, "dud.swf", "images", &[]);

        let writer = LookupWriter::new(lookup_dir.clone(), "res://assets/sprites/lookup".to_string());
        let report = writer.build(&extracted, None).unwrap();

        assert_eq!(report.total, 2);
        assert_eq!(report.organized, 1);
        assert_eq!(report.skipped_no_asset, 1);
        assert_eq!(report.type_counts.get("png"), Some(&1));

        let doc: BTreeMap<String, FlatLookupEntry> =
            serde_json::from_str(&fs::read_to_string(&report.document_path).unwrap()).unwrap();
        let entry = &doc["pet_head_01.swf"];
        assert_eq!(entry.path, "res://assets/sprites/lookup/pet_head_01.swf.png");
        assert_eq!(entry.file_type, "png");
        assert_eq!(entry.size, 321);

        // document sits next to the lookup directory
        assert_eq!(report.document_path.file_name().unwrap(), LOOKUP_FILE);
        assert!(report.document_path.parent().unwrap().ends_with("sprites"));
    }

    #[test]
    fn test_lookup_rerun_replaces_references() {
        let temp_dir = TempDir::new().unwrap();
        let extracted = temp_dir.path().join("extracted");
        let lookup_dir = temp_dir.path().join("lookup");

        make_asset_dir(&extracted, "pet_01.swf", "images", &[("p.png", 10)]);

        let writer = LookupWriter::new(lookup_dir.clone(), "res://lookup".to_string());
        writer.build(&extracted, None).unwrap();
        let report = writer.build(&extracted, None).unwrap();

        assert_eq!(report.organized, 1);
        // no suffixed duplicates accumulate
        let entries: Vec<_> = fs::read_dir(&lookup_dir).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_lookup_reference_resolves_to_source() {
        let temp_dir = TempDir::new().unwrap();
        let extracted = temp_dir.path().join("extracted");
        let lookup_dir = temp_dir.path().join("lookup");

        make_asset_dir(&extracted, "pet_01.swf", "images", &[("p.png", 42)]);

        let writer = LookupWriter::new(lookup_dir.clone(), "res://lookup".to_string());
        writer.build(&extracted, None).unwrap();

        let link = lookup_dir.join("pet_01.swf.png");
        let resolved = link.canonicalize().unwrap();
        assert!(resolved.ends_with("images/p.png"));
        assert_eq!(fs::metadata(&resolved).unwrap().len(), 42);
    }

    #[test]
    fn test_engine_folder_mapping() {
        assert_eq!(Materializer::engine_folder("pets"), Some("pet"));
        assert_eq!(Materializer::engine_folder("ui"), Some("ui"));
        assert_eq!(Materializer::engine_folder("backgrounds"), Some("rooms"));
        assert_eq!(Materializer::engine_folder("effects"), Some("effects"));
        assert_eq!(Materializer::engine_folder("furniture"), Some("items"));
        assert_eq!(Materializer::engine_folder("toys"), Some("items"));
        assert_eq!(Materializer::engine_folder("misc"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_materialize_resolves_references() {
        let temp_dir = TempDir::new().unwrap();
        let extracted = temp_dir.path().join("extracted");
        let organized = temp_dir.path().join("organized");
        let engine_root = temp_dir.path().join("engine");

        make_asset_dir(&extracted, "pet_head_01.swf", "images", &[("p.png", 77)]);
        make_asset_dir(&extracted, "toy_box.swf", "frames", &[("f.png", 11)]);

        OrganizeWriter::new(organized.clone())
            .organize(&extracted, None)
            .unwrap();

        let materializer = Materializer::new(engine_root.clone());
        let report = materializer.materialize(&organized).unwrap();

        assert_eq!(report.copied, 2);
        assert!(report.errors.is_empty());

        let dest = engine_root.join("sprites/pet/pet_head_01.swf.png");
        let metadata = dest.symlink_metadata().unwrap();
        assert!(metadata.is_file());
        assert_eq!(metadata.len(), 77);

        // second run skips everything already present
        let report = materializer.materialize(&organized).unwrap();
        assert_eq!(report.copied, 0);
        assert_eq!(report.skipped_existing, 2);
    }

    #[test]
    fn test_materialize_skips_misc() {
        let temp_dir = TempDir::new().unwrap();
        let organized = temp_dir.path().join("organized");
        let misc = organized.join("misc");
        fs::create_dir_all(&misc).unwrap();
        fs::write(misc.join("odd.swf.png"), b"x").unwrap();

        let engine_root = temp_dir.path().join("engine");
        let report = Materializer::new(engine_root.clone())
            .materialize(&organized)
            .unwrap();

        assert_eq!(report.copied, 0);
        assert!(!engine_root.join("sprites/items/odd.swf.png").exists());
    }
}
