use crate::common::error::{ReadingFile, Result, ValuesNotAMapping, YamlParseFromFile};
use serde::Serialize;
use serde_yaml::Value;
use snafu::{ensure, ResultExt};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// A values overlay which is handed to helm with '-f'. Only the path is carried around, the
/// contents are read by helm at render time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub(crate) struct ValuesFile {
    path: PathBuf,
}

impl ValuesFile {
    /// Creates a values file reference, the file is not read.
    pub(crate) fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { path: path.into() }
    }

    /// This is a getter for the values filepath.
    pub(crate) fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Reads and parses the file, so that a broken overlay is reported with its path before
    /// helm is run. An empty file is a valid, empty overlay.
    pub(crate) fn load(&self) -> Result<Value> {
        let buf = fs::read(self.path()).context(ReadingFile {
            filepath: self.path.clone(),
        })?;
        if buf.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        let values: Value = serde_yaml::from_slice(buf.as_slice()).context(YamlParseFromFile {
            filepath: self.path.clone(),
        })?;

        ensure!(
            values.is_mapping() || values.is_null(),
            ValuesNotAMapping {
                filepath: self.path.clone()
            }
        );

        Ok(values)
    }
}
