/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::debug;

use crate::report::LoadTestResult;

use super::{OutputError, ResultEmitter};

const INDENT: &[u8] = b"    ";

/// Writes result as indented JSON into any writer
#[derive(Debug)]
pub struct JsonEmitter<W> {
    writer: W,
}

impl<W> JsonEmitter<W>
where
    W: Write,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> ResultEmitter for JsonEmitter<W>
where
    W: Write,
{
    fn emit(&mut self, result: &LoadTestResult) -> Result<(), OutputError> {
        let mut serializer =
            Serializer::with_formatter(&mut self.writer, PrettyFormatter::with_indent(INDENT));
        result.serialize(&mut serializer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes result as indented JSON into a file
///
/// File is created when output is opened, so an unwritable path fails
/// the run before any sample is collected.
#[derive(Debug)]
pub struct JsonFileEmitter {
    path: PathBuf,
    inner: Option<JsonEmitter<BufWriter<File>>>,
}

impl JsonFileEmitter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            inner: None,
        }
    }

    /// Creates emitter from host output argument, which is the result file path
    pub fn from_argument(argument: &str) -> Result<Self, OutputError> {
        match argument.trim() {
            "" => Err(OutputError::MissingPath),
            path => Ok(Self::new(path)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn create(&self) -> Result<JsonEmitter<BufWriter<File>>, OutputError> {
        debug!(path = %self.path.display(), "Creating result file");
        Ok(JsonEmitter::new(BufWriter::new(File::create(&self.path)?)))
    }
}

impl ResultEmitter for JsonFileEmitter {
    fn open(&mut self) -> Result<(), OutputError> {
        self.inner = Some(self.create()?);
        Ok(())
    }

    fn emit(&mut self, result: &LoadTestResult) -> Result<(), OutputError> {
        let mut emitter = match self.inner.take() {
            Some(emitter) => emitter,
            None => self.create()?,
        };

        emitter.emit(result)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::fs;

    use crate::report::{BucketMetric, Summary};

    use super::*;

    fn result() -> LoadTestResult {
        LoadTestResult::new(
            BTreeMap::from([
                (1000, BucketMetric::new(10.0, 2.0, 300.0)),
                (1001, BucketMetric::new(5.0, 0.0, 50.0)),
            ]),
            Summary::new(15, 2, 15.0, 300.0).unwrap(),
        )
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("compacted-json-{}-{name}", std::process::id()))
    }

    const EXPECTED_JSON: &str = r#"{
    "points": {
        "1000": {
            "requestRate": 10.0,
            "errorRate": 2.0,
            "requestDuration": 300.0
        },
        "1001": {
            "requestRate": 5.0,
            "errorRate": 0.0,
            "requestDuration": 50.0
        }
    },
    "summary": {
        "totalRequest": 15,
        "totalSuccess": 13,
        "totalError": 2,
        "requestRatePerSecond": 15.0,
        "requestDuration": 300.0
    }
}"#;

    #[test]
    fn writes_indented_json() {
        let mut emitter = JsonEmitter::new(Vec::new());

        emitter.emit(&result()).unwrap();

        assert_eq!(String::from_utf8(emitter.into_inner()).unwrap(), EXPECTED_JSON);
    }

    #[test]
    fn creates_file_on_open_and_writes_result_on_emit() {
        let path = temp_path("open.json");
        let mut emitter = JsonFileEmitter::new(&path);

        emitter.open().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        emitter.emit(&result()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), EXPECTED_JSON);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn creates_file_on_emit_when_not_opened() {
        let path = temp_path("emit.json");
        let mut emitter = JsonFileEmitter::new(&path);

        emitter.emit(&result()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["summary"]["totalSuccess"], 13);
        assert_eq!(value["points"]["1001"]["requestDuration"], 50.0);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn fails_to_open_file_in_missing_directory() {
        let mut emitter = JsonFileEmitter::new(temp_path("missing").join("result.json"));

        assert!(matches!(emitter.open(), Err(OutputError::Io(_))));
    }

    #[test]
    fn takes_path_from_argument() {
        let emitter = JsonFileEmitter::from_argument(" result.json ").unwrap();

        assert_eq!(emitter.path(), Path::new("result.json"));
        assert!(matches!(
            JsonFileEmitter::from_argument("  "),
            Err(OutputError::MissingPath)
        ));
    }
}
