//! Working-directory layout and artifact naming.
//!
//! The codec core works on byte slices; everything about where artifacts
//! live is decided here. The layout under the work root:
//!
//! ```text
//! work/raw/       input files
//! work/tables/    table artifacts: table_<id>_<stem>.bin
//! work/encoded/   encoded artifacts: encoded_<id>_<name>
//! work/decoded/   decoded outputs: decoded_<name>
//! ```
//!
//! The linking id appears in both artifact names as 16 lowercase hex
//! digits, which is how decode locates the table that matches an encoded
//! file. The id inside the artifacts is still verified by the core; the
//! name is only a lookup convention.
//!
//! Artifacts are written to a `.tmp` sibling and renamed into place, so
//! a failed operation never leaves behind a complete-looking partial
//! file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Handle on a created working-directory layout.
#[derive(Debug, Clone)]
pub struct WorkDir {
    root: PathBuf,
}

impl WorkDir {
    /// Create the layout under `root` (directories are created as needed).
    pub fn create(root: &Path) -> io::Result<Self> {
        for sub in ["raw", "tables", "encoded", "decoded"] {
            fs::create_dir_all(root.join(sub))?;
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.root.join("raw")
    }

    pub fn encoded_dir(&self) -> PathBuf {
        self.root.join("encoded")
    }

    /// Path for the table artifact of an encode run.
    pub fn table_path(&self, linking_id: u64, stem: &str) -> PathBuf {
        self.root
            .join("tables")
            .join(format!("table_{linking_id:016x}_{stem}.bin"))
    }

    /// Path for the encoded artifact of an encode run.
    pub fn encoded_path(&self, linking_id: u64, file_name: &str) -> PathBuf {
        self.root
            .join("encoded")
            .join(format!("encoded_{linking_id:016x}_{file_name}"))
    }

    /// Path for the decoded output of a decode run.
    pub fn decoded_path(&self, file_name: &str) -> PathBuf {
        self.root.join("decoded").join(format!("decoded_{file_name}"))
    }

    /// Regular files in a directory, sorted by name for stable listings.
    pub fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Split an encoded artifact file name into its linking id and the
/// original file name: `encoded_<16 hex digits>_<name>`.
pub fn parse_encoded_name(file_name: &str) -> Option<(u64, &str)> {
    let rest = file_name.strip_prefix("encoded_")?;
    let (hex, name) = rest.split_once('_')?;
    if hex.len() != 16 || name.is_empty() {
        return None;
    }
    let linking_id = u64::from_str_radix(hex, 16).ok()?;
    Some((linking_id, name))
}

/// File name without its extension, for table artifact naming.
pub fn stem_of(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(dot) => &file_name[..dot],
    }
}

/// Write `bytes` to `path` via a temporary sibling and rename.
///
/// The rename is atomic on the same filesystem, so readers never observe
/// a partially written artifact.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes)?;
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(err) => {
            let _ = fs::remove_file(&tmp);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_encoded_name() {
        let (id, name) = parse_encoded_name("encoded_00000000000000ab_sample.bin").unwrap();
        assert_eq!(id, 0xAB);
        assert_eq!(name, "sample.bin");
    }

    #[test]
    fn test_parse_encoded_name_keeps_underscores_in_original() {
        let (id, name) = parse_encoded_name("encoded_0000000000000001_my_file.txt").unwrap();
        assert_eq!(id, 1);
        assert_eq!(name, "my_file.txt");
    }

    #[test]
    fn test_parse_encoded_name_rejects_malformed() {
        assert!(parse_encoded_name("sample.bin").is_none());
        assert!(parse_encoded_name("encoded_xyz_sample.bin").is_none());
        assert!(parse_encoded_name("encoded_00ab_sample.bin").is_none());
        assert!(parse_encoded_name("encoded_00000000000000ab_").is_none());
    }

    #[test]
    fn test_stem_of() {
        assert_eq!(stem_of("sample.bin"), "sample");
        assert_eq!(stem_of("archive.tar.gz"), "archive.tar");
        assert_eq!(stem_of("noext"), "noext");
        assert_eq!(stem_of(".hidden"), ".hidden");
    }

    #[test]
    fn test_artifact_paths_embed_id() {
        let dir = std::env::temp_dir().join("shannon-codec-workdir-test");
        let work = WorkDir::create(&dir).unwrap();

        let table = work.table_path(0xAB, "sample");
        assert!(table
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("table_00000000000000ab_"));

        let encoded = work.encoded_path(0xAB, "sample.bin");
        let (id, name) =
            parse_encoded_name(encoded.file_name().unwrap().to_str().unwrap()).unwrap();
        assert_eq!(id, 0xAB);
        assert_eq!(name, "sample.bin");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_write_atomic_leaves_no_tmp_file() {
        let dir = std::env::temp_dir().join("shannon-codec-atomic-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("artifact.bin");

        write_atomic(&path, b"payload").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"payload");

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        assert!(!PathBuf::from(tmp).exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
