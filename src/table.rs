//! Sheet-level annotation: find the notice column, make room for the province
//! and entity columns, and fill them row by row.

use std::path::Path;

use tender_types::{Annotation, SheetReport};

use crate::config::ColumnConfig;
use crate::entity::extract_with;
use crate::error::SheetError;
use crate::gazetteer::Gazetteer;
use crate::keywords::KeywordSets;
use crate::locate::locate_province;
use crate::scanner::SheetFile;

type Row = Vec<String>;

/// Annotates notices against shared, read-only reference data.
pub struct Annotator<'a> {
    gazetteer: &'a Gazetteer,
    keywords: &'a KeywordSets,
    columns: &'a ColumnConfig,
}

impl<'a> Annotator<'a> {
    pub fn new(
        gazetteer: &'a Gazetteer,
        keywords: &'a KeywordSets,
        columns: &'a ColumnConfig,
    ) -> Self {
        Annotator {
            gazetteer,
            keywords,
            columns,
        }
    }

    /// Province and entity for one notice. Blank text yields neither.
    pub fn annotate(&self, text: &str) -> Annotation {
        if text.trim().is_empty() {
            return Annotation::default();
        }
        Annotation {
            province: locate_province(text, self.gazetteer).map(str::to_string),
            entity: extract_with(text, self.keywords).map(str::to_string),
        }
    }

    /// Read `sheet`, annotate it and write the result under `out_dir` with the
    /// same file name. Sheets without the notice column are copied unchanged.
    pub fn annotate_sheet(
        &self,
        sheet: &SheetFile,
        out_dir: &Path,
    ) -> Result<SheetReport, SheetError> {
        let rows = read_rows(&sheet.path)?;
        let (rows, report) = self.annotate_rows(&sheet.name, rows);
        write_rows(&out_dir.join(sheet.file_name()), &rows)?;
        Ok(report)
    }

    /// Annotate an in-memory table (header row included).
    pub fn annotate_rows(&self, sheet: &str, mut rows: Vec<Row>) -> (Vec<Row>, SheetReport) {
        let mut report = SheetReport {
            sheet: sheet.to_string(),
            ..Default::default()
        };

        let Some(header_idx) = self.find_header_row(&rows) else {
            tracing::warn!(
                sheet,
                column = %self.columns.text,
                "column not found, sheet left unchanged"
            );
            report.skipped = Some(format!("column {} not found", self.columns.text));
            return (rows, report);
        };
        if header_idx > 0 {
            tracing::debug!(sheet, "dropping title row above header");
            rows.drain(..header_idx);
        }

        let mut text_idx = column_index(&rows[0], &self.columns.text).unwrap_or_default();
        let width = rows[0].len();
        for row in rows.iter_mut().skip(1) {
            pad(row, width);
        }

        let province_idx = match column_index(&rows[0], &self.columns.province) {
            Some(idx) => idx,
            None => {
                let at = match column_index(&rows[0], &self.columns.anchor) {
                    Some(anchor) => anchor + 1,
                    None => {
                        tracing::warn!(
                            sheet,
                            anchor = %self.columns.anchor,
                            "anchor column not found, appending {} at the end",
                            self.columns.province
                        );
                        rows[0].len()
                    }
                };
                insert_column(&mut rows, at, &self.columns.province);
                if text_idx >= at {
                    text_idx += 1;
                }
                at
            }
        };

        let entity_idx = match column_index(&rows[0], &self.columns.entity) {
            Some(idx) => idx,
            None => {
                let at = province_idx + 1;
                insert_column(&mut rows, at, &self.columns.entity);
                if text_idx >= at {
                    text_idx += 1;
                }
                at
            }
        };

        for row in rows.iter_mut().skip(1) {
            report.rows += 1;
            let text = &row[text_idx];
            let annotation = self.annotate(text);
            if annotation.is_empty() {
                if !text.trim().is_empty() {
                    report.unmatched += 1;
                }
                continue;
            }
            if let Some(province) = annotation.province {
                row[province_idx] = province;
                report.province_hits += 1;
            }
            if let Some(entity) = annotation.entity {
                row[entity_idx] = entity;
                report.entity_hits += 1;
            }
        }

        tracing::info!(
            sheet,
            rows = report.rows,
            provinces = report.province_hits,
            entities = report.entity_hits,
            unmatched = report.unmatched,
            "sheet annotated"
        );
        (rows, report)
    }

    /// The header is the first row, or the second one when a title row sits
    /// above it.
    fn find_header_row(&self, rows: &[Row]) -> Option<usize> {
        rows.iter()
            .take(2)
            .position(|row| column_index(row, &self.columns.text).is_some())
    }
}

fn column_index(header: &[String], name: &str) -> Option<usize> {
    header
        .iter()
        .position(|cell| cell.trim_start_matches('\u{feff}').trim() == name)
}

fn pad(row: &mut Row, width: usize) {
    if row.len() < width {
        row.resize(width, String::new());
    }
}

fn insert_column(rows: &mut [Row], at: usize, name: &str) {
    for (i, row) in rows.iter_mut().enumerate() {
        let cell = if i == 0 { name.to_string() } else { String::new() };
        row.insert(at.min(row.len()), cell);
    }
}

// ── CSV I/O ──────────────────────────────────────────────────────────

fn read_rows(path: &Path) -> Result<Vec<Row>, SheetError> {
    let read_err = |source: csv::Error| {
        let bad_line = match source.kind() {
            csv::ErrorKind::Utf8 { pos, .. } => Some(pos.as_ref().map_or(0, |p| p.line())),
            _ => None,
        };
        match bad_line {
            Some(line) => SheetError::NotUtf8 {
                path: path.to_path_buf(),
                line,
            },
            None => SheetError::Read {
                path: path.to_path_buf(),
                source,
            },
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(read_err)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_err)?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn write_rows(path: &Path, rows: &[Row]) -> Result<(), SheetError> {
    let write_err = |source| SheetError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(write_err)?;
    for row in rows {
        writer.write_record(row).map_err(write_err)?;
    }
    writer.flush().map_err(|source| SheetError::Flush {
        path: path.to_path_buf(),
        source,
    })
}
