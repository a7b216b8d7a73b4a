// src/table.rs
use anyhow::{anyhow, Context};
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

/// Why a partition could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file does not exist. Callers skip these.
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// An uninterpreted CSV table held in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Table {
    /// Column names, from the first record of the file.
    pub headers: Vec<String>,
    /// Every following record, one String per column.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Load `path`, treating its first record as the header.
    ///
    /// Repeated header names are renamed `x`, `x.1`, `x.2`, ... so columns
    /// are unique. Short records are padded with empty cells; a record with
    /// more fields than the header is a parse error.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound(path.to_path_buf()))
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("Failed to open CSV file: {:?}", path))
                    .into())
            }
        };

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let headers = dedup_headers(
            rdr.headers()
                .with_context(|| format!("Failed to read header of {:?}", path))?
                .iter(),
        );
        if headers.is_empty() {
            return Err(anyhow!("No columns to parse from {:?}", path).into());
        }

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result
                .with_context(|| format!("CSV parse error in {:?} at record {}", path, idx))?;
            if record.len() > headers.len() {
                return Err(anyhow!(
                    "CSV parse error in {:?} at record {}: expected {} fields, saw {}",
                    path,
                    idx,
                    headers.len(),
                    record.len()
                )
                .into());
            }
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        debug!(
            path = %path.display(),
            rows = rows.len(),
            columns = headers.len(),
            "loaded table"
        );
        Ok(Self { headers, rows })
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Append `other` below `self`.
    ///
    /// Columns become the union of both header sets in first-seen order;
    /// cells a source table has no column for are left empty.
    pub fn append(&mut self, other: Table) {
        if self.headers.is_empty() && self.rows.is_empty() {
            *self = other;
            return;
        }
        if self.headers == other.headers {
            self.rows.extend(other.rows);
            return;
        }

        // header names are unique, so each of other's columns maps onto
        // exactly one (possibly new) column of self
        let mut mapping = Vec::with_capacity(other.headers.len());
        for name in &other.headers {
            let col = match self.headers.iter().position(|h| h == name) {
                Some(i) => i,
                None => {
                    self.headers.push(name.clone());
                    self.headers.len() - 1
                }
            };
            mapping.push(col);
        }

        let width = self.headers.len();
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
        for row in other.rows {
            let mut out = vec![String::new(); width];
            for (cell, &col) in row.into_iter().zip(&mapping) {
                out[col] = cell;
            }
            self.rows.push(out);
        }
    }

    /// Write header and rows to `path` with minimal quoting.
    ///
    /// The parent directory must already exist.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {:?}", path))?;
        let mut wtr = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(BufWriter::new(file));

        wtr.write_record(&self.headers)
            .with_context(|| format!("Failed to write header to {:?}", path))?;
        for row in &self.rows {
            wtr.write_record(row)
                .with_context(|| format!("Failed to write row to {:?}", path))?;
        }

        let mut inner = wtr
            .into_inner()
            .map_err(|e| anyhow!("Failed to flush {:?}: {}", path, e.error()))?;
        inner
            .flush()
            .with_context(|| format!("Failed to flush {:?}", path))?;
        Ok(())
    }
}

/// Rename repeated names to `name.1`, `name.2`, ... skipping any suffix
/// already taken by another column.
fn dedup_headers<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let names: Vec<&str> = names.collect();
    let mut seen: HashSet<String> = names.iter().map(|s| s.to_string()).collect();
    let mut first = HashSet::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    let mut out = Vec::with_capacity(names.len());
    for name in names {
        if first.insert(name) {
            out.push(name.to_string());
            continue;
        }
        let n = counts.entry(name).or_insert(0);
        let renamed = loop {
            *n += 1;
            let candidate = format!("{}.{}", name, n);
            if seen.insert(candidate.clone()) {
                break candidate;
            }
        };
        out.push(renamed);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_read_csv() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("a.csv");
        fs::write(
            &path,
            "url,caption,objects\nhttp://x/1.jpg,\"a dog, running\",\"['dog']\"\nhttp://x/2.jpg,cat,[]\n",
        )?;

        let t = Table::read_csv(&path)?;
        assert_eq!(t.headers, vec!["url", "caption", "objects"]);
        assert_eq!(t.num_rows(), 2);
        assert_eq!(t.rows[0][1], "a dog, running");
        assert_eq!(t.rows[1], vec!["http://x/2.jpg", "cat", "[]"]);
        Ok(())
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        match Table::read_csv(&path) {
            Err(LoadError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_read_ragged_records() -> Result<()> {
        let dir = tempdir()?;

        // short records are padded
        let short = dir.path().join("short.csv");
        fs::write(&short, "a,b\n1,2\n3\n")?;
        let t = Table::read_csv(&short)?;
        assert_eq!(t, table(&["a", "b"], &[&["1", "2"], &["3", ""]]));

        // long records are rejected
        let long = dir.path().join("long.csv");
        fs::write(&long, "a,b\n1,2\n3,4,5\n")?;
        assert!(matches!(Table::read_csv(&long), Err(LoadError::Other(_))));
        Ok(())
    }

    #[test]
    fn test_read_renames_duplicate_headers() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("dup.csv");
        fs::write(&path, "x,x,x.1,x\np,q,r,s\n")?;
        let t = Table::read_csv(&path)?;
        assert_eq!(t.headers, vec!["x", "x.2", "x.1", "x.3"]);

        // appending keeps every cell of the repeated columns
        let mut acc = table(&["a"], &[&["1"]]);
        acc.append(t);
        assert_eq!(
            acc,
            table(
                &["a", "x", "x.2", "x.1", "x.3"],
                &[&["1", "", "", "", ""], &["", "p", "q", "r", "s"]]
            )
        );
        Ok(())
    }

    #[test]
    fn test_read_empty_is_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.csv");
        fs::write(&path, "")?;
        assert!(matches!(Table::read_csv(&path), Err(LoadError::Other(_))));
        Ok(())
    }

    #[test]
    fn test_append_same_columns() {
        let mut t = Table::default();
        t.append(table(&["a", "b"], &[&["1", "2"]]));
        t.append(table(&["a", "b"], &[&["3", "4"], &["5", "6"]]));
        assert_eq!(t, table(&["a", "b"], &[&["1", "2"], &["3", "4"], &["5", "6"]]));
    }

    #[test]
    fn test_append_unions_columns() {
        let mut t = table(&["a", "b"], &[&["1", "2"]]);
        t.append(table(&["b", "c"], &[&["3", "4"]]));
        assert_eq!(
            t,
            table(&["a", "b", "c"], &[&["1", "2", ""], &["", "3", "4"]])
        );
    }

    #[test]
    fn test_write_then_read_back() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.csv");
        let t = table(&["a", "b"], &[&["x, y", "2"], &["", "q\"uote"]]);
        t.write_csv(&path)?;

        assert_eq!(
            fs::read_to_string(&path)?,
            "a,b\n\"x, y\",2\n,\"q\"\"uote\"\n"
        );
        assert_eq!(Table::read_csv(&path)?, t);
        Ok(())
    }

    #[test]
    fn test_write_does_not_create_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        assert!(table(&["a"], &[&["1"]]).write_csv(&path).is_err());
        assert!(!path.exists());
    }
}
