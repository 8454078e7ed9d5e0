//! Writing quote cards to disk.

use std::fs;
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use super::{CardExporter, ExportArtifact, QuoteCard};
use crate::error::ExportError;

/// Writes each card to `quote-<id>.txt` inside a directory.
#[derive(Debug, Clone)]
pub struct TextCardExporter {
    dir: PathBuf,
}

impl TextCardExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl CardExporter for TextCardExporter {
    fn export(&self, card: &QuoteCard) -> Result<ExportArtifact, ExportError> {
        let path = self.dir.join(card.file_name());
        let tmp_path = self.dir.join(format!(".{}.tmp", card.file_name()));
        let created = first_missing_ancestor(&self.dir);

        let written = (|| {
            fs::create_dir_all(&self.dir)?;
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(card.to_text().as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp_path, &path)
        })();

        match written {
            Ok(()) => Ok(ExportArtifact::File(path)),
            Err(source) => {
                discard_partial(&tmp_path, created.as_deref());
                Err(ExportError::Io { path, source })
            }
        }
    }
}

/// Outermost directory of `dir` that does not exist yet, i.e. the one
/// `create_dir_all` would create first.
fn first_missing_ancestor(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .take_while(|p| !p.as_os_str().is_empty() && !p.exists())
        .last()
        .map(Path::to_path_buf)
}

/// Remove the temporary card and any directories this export created.
fn discard_partial(tmp_path: &Path, created: Option<&Path>) {
    let _ = fs::remove_file(tmp_path);
    if let Some(dir) = created {
        let _ = fs::remove_dir_all(dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardSpec;
    use crate::estimate::{CalcMode, compute};
    use crate::records::SavedRecord;
    use tempfile::TempDir;

    fn card() -> QuoteCard {
        let spec = BoardSpec::new(25.0, 150.0, 3000.0);
        let result = compute(&spec, 15000.0, CalcMode::ByQuantity, "10");
        let record = SavedRecord::from_result(&spec, 15000.0, &result, None, 42).unwrap();
        QuoteCard::from_record(&record)
    }

    #[test]
    fn test_writes_card_file() {
        let dir = TempDir::new().unwrap();
        let exporter = TextCardExporter::new(dir.path().join("cards"));

        let artifact = exporter.export(&card()).unwrap();
        let expected = dir.path().join("cards").join("quote-42.txt");
        assert_eq!(artifact, ExportArtifact::File(expected.clone()));

        let text = fs::read_to_string(expected).unwrap();
        assert!(text.starts_with("Deck quote: 25×150×3000\n"));
        assert!(text.contains("Total: ₩150,000\n"));
    }

    #[test]
    fn test_first_missing_ancestor() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b").join("c");
        assert_eq!(first_missing_ancestor(&nested), Some(dir.path().join("a")));
        assert_eq!(first_missing_ancestor(dir.path()), None);
    }

    #[test]
    fn test_discard_removes_created_directories() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("a").join("cards");
        fs::create_dir_all(&out).unwrap();
        let tmp = out.join(".quote-42.txt.tmp");
        fs::write(&tmp, "partial").unwrap();

        discard_partial(&tmp, Some(&dir.path().join("a")));

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_failed_rename_keeps_existing_directory() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory where the card file should go
        let occupied = dir.path().join("quote-42.txt");
        fs::create_dir(&occupied).unwrap();
        fs::write(occupied.join("keep"), "x").unwrap();

        let exporter = TextCardExporter::new(dir.path());
        let err = exporter.export(&card()).unwrap_err();

        assert!(matches!(err, ExportError::Io { .. }));
        assert!(occupied.join("keep").exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failure_leaves_nothing_behind() {
        let dir = TempDir::new().unwrap();
        // A regular file where the output directory should be
        let blocker = dir.path().join("cards");
        fs::write(&blocker, "not a directory").unwrap();

        let exporter = TextCardExporter::new(&blocker);
        let err = exporter.export(&card()).unwrap_err();

        assert!(matches!(err, ExportError::Io { .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
