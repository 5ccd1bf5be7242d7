//! CSV/JSON 내보내기
//!
//! CSV는 타입마다 명시한 헤더/행을 사용하고, JSON은 serde로 직렬화합니다.
//! JSON 파일은 `from_json_file`로 다시 읽을 수 있습니다.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ExportError;

/// CSV 한 행으로 표현 가능한 타입
pub trait Tabular {
    fn header() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

pub fn write_csv<T: Tabular, W: Write>(entries: &[T], writer: W) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(T::header())?;
    for entry in entries {
        csv.write_record(entry.row())?;
    }
    csv.flush()?;
    Ok(())
}

pub fn to_csv<T: Tabular, P: AsRef<Path>>(entries: &[T], path: P) -> Result<(), ExportError> {
    let file = File::create(path.as_ref())?;
    write_csv(entries, BufWriter::new(file))?;
    tracing::debug!("wrote {} rows to {}", entries.len(), path.as_ref().display());
    Ok(())
}

pub fn to_json_file<T: Serialize, P: AsRef<Path>>(entries: &[T], path: P) -> Result<(), ExportError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, entries)?;
    writer.flush()?;
    tracing::debug!("wrote {} objects to {}", entries.len(), path.as_ref().display());
    Ok(())
}

pub fn from_json_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>, ExportError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
