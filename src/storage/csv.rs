//! Append-only CSV observation log
//!
//! The header is written once when the file is created. Every append opens
//! the file in append mode, writes one row, and syncs it to disk before
//! returning.

use super::record::{ObservationRecord, COLUMNS};
use super::PersistenceSink;
use crate::error::WriteError;
use async_trait::async_trait;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// CSV file sink for observation records
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Open the sink, creating the file with its header if missing
    ///
    /// Existing files are left untouched so new rows append after old ones.
    pub async fn initialize<P: AsRef<Path>>(path: P) -> Result<Self, WriteError> {
        let path = path.as_ref().to_path_buf();
        let header_path = path.clone();

        tokio::task::spawn_blocking(move || -> Result<(), WriteError> {
            let file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&header_path);

            match file {
                Ok(mut file) => {
                    write_row(&mut file, &COLUMNS[..])
                        .and_then(|_| file.sync_all())
                        .map_err(|source| io_error(&header_path, source))?;
                    tracing::info!(path = %header_path.display(), "Created observation log");
                    Ok(())
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    tracing::info!(path = %header_path.display(), "Appending to existing observation log");
                    Ok(())
                }
                Err(source) => Err(io_error(&header_path, source)),
            }
        })
        .await??;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PersistenceSink for CsvSink {
    async fn append(&self, record: &ObservationRecord) -> Result<(), WriteError> {
        let path = self.path.clone();
        let fields = record.fields();

        tokio::task::spawn_blocking(move || -> Result<(), WriteError> {
            let mut file = OpenOptions::new()
                .append(true)
                .open(&path)
                .map_err(|source| io_error(&path, source))?;

            write_row(&mut file, &fields[..])
                .and_then(|_| file.flush())
                .and_then(|_| file.sync_data())
                .map_err(|source| io_error(&path, source))
        })
        .await?
    }
}

fn io_error(path: &Path, source: std::io::Error) -> WriteError {
    WriteError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn write_row<W: Write, S: AsRef<str>>(writer: &mut W, fields: &[S]) -> std::io::Result<()> {
    let line = fields
        .iter()
        .map(|field| escape_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{}", line)
}

/// Quote a field when it holds a delimiter, quote or line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::sentiment::SentimentLabel;
    use crate::orderbook::types::{Analysis, PriceLevel};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn record(alert_text: &str) -> ObservationRecord {
        let analysis = Analysis {
            total_bid_volume: dec!(15),
            total_ask_volume: dec!(3),
            best_bid: dec!(50000),
            best_ask: dec!(50010),
            largest_buy_wall: PriceLevel::new(dec!(50000), dec!(12)),
            largest_sell_wall: PriceLevel::new(dec!(50010), dec!(2)),
            spread: dec!(10),
            candidates: vec![],
        };
        ObservationRecord::new(
            Utc.with_ymd_and_hms(2025, 1, 18, 9, 30, 0).unwrap(),
            dec!(50005),
            &analysis,
            SentimentLabel::Bullish,
            alert_text.to_string(),
        )
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[tokio::test]
    async fn test_initialize_writes_header_once() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("observations.csv");

        let sink = CsvSink::initialize(&path).await?;
        sink.append(&record("")).await?;

        // Re-opening must not rewrite the header or truncate rows
        let sink = CsvSink::initialize(&path).await?;
        sink.append(&record("")).await?;

        let content = std::fs::read_to_string(&path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], COLUMNS.join(","));
        assert_eq!(
            lines[1],
            "2025-01-18 09:30:00,50005,15,3,50000,12,50010,2,10,Bullish,"
        );
        assert_eq!(lines[1], lines[2]);

        Ok(())
    }

    #[tokio::test]
    async fn test_multiline_alert_is_quoted() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("observations.csv");
        let sink = CsvSink::initialize(&path).await?;

        sink.append(&record("💰 *Volume:* `12 BTC`\n🟢")).await?;

        let content = std::fs::read_to_string(&path)?;
        assert!(content.ends_with(",Bullish,\"💰 *Volume:* `12 BTC`\n🟢\"\n"));

        Ok(())
    }

    #[tokio::test]
    async fn test_append_to_missing_directory_fails() {
        let sink = CsvSink {
            path: PathBuf::from("/nonexistent-dir/observations.csv"),
        };

        let result = sink.append(&record("")).await;
        assert!(matches!(result, Err(WriteError::Io { .. })));
    }
}
