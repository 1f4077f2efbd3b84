//! Where result sets and status lines go.

use std::io::{self, Write};

use mongodb::bson::{Bson, Document};

/// One item of session output.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEntry {
    /// Heading for the result set that follows.
    Section(String),
    Documents(Vec<Document>),
    Message(String),
    Error(String),
}

pub trait Report {
    fn emit(&mut self, entry: ReportEntry);

    fn section(&mut self, title: impl Into<String>)
    where
        Self: Sized,
    {
        self.emit(ReportEntry::Section(title.into()));
    }

    fn documents(&mut self, documents: Vec<Document>)
    where
        Self: Sized,
    {
        self.emit(ReportEntry::Documents(documents));
    }

    fn message(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.emit(ReportEntry::Message(message.into()));
    }

    fn error(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.emit(ReportEntry::Error(message.into()));
    }
}

/// Render documents as a pretty relaxed Extended JSON array.
pub fn documents_to_pretty_json(documents: &[Document]) -> String {
    let values: Vec<serde_json::Value> =
        documents.iter().map(|doc| Bson::Document(doc.clone()).into_relaxed_extjson()).collect();
    serde_json::to_string_pretty(&values).unwrap_or_else(|_| format!("{values:?}"))
}

/// Writes entries as plain text; results to `out`, errors to `err`.
pub struct ConsoleReport<W: Write = io::Stdout, E: Write = io::Stderr> {
    out: W,
    err: E,
}

impl ConsoleReport {
    pub fn stdout() -> Self {
        Self { out: io::stdout(), err: io::stderr() }
    }
}

impl<W: Write, E: Write> ConsoleReport<W, E> {
    pub fn with_writers(out: W, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_writers(self) -> (W, E) {
        (self.out, self.err)
    }

    fn write_entry(&mut self, entry: &ReportEntry) -> io::Result<()> {
        match entry {
            ReportEntry::Section(title) => writeln!(self.out, "\n{title}:"),
            ReportEntry::Documents(documents) => {
                writeln!(self.out, "{}", documents_to_pretty_json(documents))
            }
            ReportEntry::Message(message) => writeln!(self.out, "{message}"),
            ReportEntry::Error(message) => writeln!(self.err, "Error: {message}"),
        }
    }
}

impl<W: Write, E: Write> Report for ConsoleReport<W, E> {
    fn emit(&mut self, entry: ReportEntry) {
        if let Err(err) = self.write_entry(&entry) {
            log::warn!("Failed to write report output: {err}");
        }
    }
}

/// Keeps every entry in memory.
#[derive(Debug, Default)]
pub struct RecordingReport {
    pub entries: Vec<ReportEntry>,
}

impl RecordingReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first document set emitted under the section titled `title`,
    /// before the next section starts.
    pub fn documents_for(&self, title: &str) -> Option<&[Document]> {
        let start = self
            .entries
            .iter()
            .position(|entry| matches!(entry, ReportEntry::Section(t) if t == title))?;
        self.entries[start + 1..]
            .iter()
            .take_while(|entry| !matches!(entry, ReportEntry::Section(_)))
            .find_map(|entry| match entry {
                ReportEntry::Documents(documents) => Some(documents.as_slice()),
                _ => None,
            })
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match entry {
            ReportEntry::Message(message) => Some(message.as_str()),
            _ => None,
        })
    }

    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match entry {
            ReportEntry::Error(message) => Some(message.as_str()),
            _ => None,
        })
    }
}

impl Report for RecordingReport {
    fn emit(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }
}
