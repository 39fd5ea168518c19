use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One sheet to annotate: a CSV file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetFile {
    /// File stem, used as the sheet name in logs and the summary
    pub name: String,
    pub path: PathBuf,
}

impl SheetFile {
    fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();
        SheetFile { name, path }
    }

    /// File name to use when writing the annotated copy.
    pub fn file_name(&self) -> &std::ffi::OsStr {
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }
}

/// Discover the sheets under `input`.
///
/// A single `.csv` file is one sheet. A directory contributes every `.csv`
/// file directly inside it (no recursion), sorted by file name. Anything else
/// yields no sheets.
pub fn scan_sheets(input: &Path) -> Vec<SheetFile> {
    if input.is_file() {
        return if is_csv(input) {
            vec![SheetFile::from_path(input.to_path_buf())]
        } else {
            Vec::new()
        };
    }

    let mut sheets: Vec<SheetFile> = WalkDir::new(input)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_csv(e.path()))
        .map(|e| SheetFile::from_path(e.into_path()))
        .collect();

    // Office lock files (~$name.csv)
    sheets.retain(|s| !s.name.starts_with('~'));
    sheets
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}
