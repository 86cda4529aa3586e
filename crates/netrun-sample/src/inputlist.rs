use crate::{SampleError, loader::split_whitespace};
use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::{Path, PathBuf},
};

/// One non-blank entry of an input list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputLine {
    /// 1-based line number in the list file.
    pub line_number: usize,
    text: String,
}

impl InputLine {
    pub fn new(line_number: usize, text: impl Into<String>) -> Self {
        Self {
            line_number,
            text: text.into(),
        }
    }

    /// The line with surrounding whitespace removed.
    pub fn as_str(&self) -> &str {
        self.text.trim()
    }

    pub fn paths(&self) -> Vec<&str> {
        split_whitespace(&self.text)
    }
}

/// Lines that carry no input: empty, whitespace-only, or `#` comments.
pub fn is_skippable(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Iterator over the entries of an input list.
///
/// Skippable lines are counted but never yielded.
pub struct InputList<R> {
    path: PathBuf,
    lines: Lines<R>,
    line_number: usize,
    skipped: usize,
}

impl InputList<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SampleError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SampleError::io(path, e))?;
        Ok(Self::new(BufReader::new(file)).with_path(path))
    }
}

impl<R: BufRead> InputList<R> {
    pub fn new(reader: R) -> Self {
        Self {
            path: PathBuf::from("<input list>"),
            lines: reader.lines(),
            line_number: 0,
            skipped: 0,
        }
    }

    /// Name the source in read errors.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Lines skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> Iterator for InputList<R> {
    type Item = Result<InputLine, SampleError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => {
                    return Some(Err(SampleError::Io {
                        path: self.path.clone(),
                        source: e,
                    }));
                }
            };
            self.line_number += 1;

            if is_skippable(&text) {
                log::debug!("skipping input list line {}", self.line_number);
                self.skipped += 1;
                continue;
            }
            return Some(Ok(InputLine::new(self.line_number, text)));
        }
    }
}
