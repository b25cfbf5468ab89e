use std::path::{Path, PathBuf};

use crate::view_model::AppViewModel;
use crate::{word_count, CsvRow};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Text,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlight {
    request_id: RequestId,
    /// Number of CSV rows in the submitted batch, if it came from a CSV file.
    csv_rows: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    tab: Tab,
    input: String,
    csv_rows: Option<Vec<CsvRow>>,
    upload: Option<PathBuf>,
    output: String,
    output_rows: Option<usize>,
    output_failed: bool,
    parsing: bool,
    in_flight: Option<InFlight>,
    next_request_id: RequestId,
    status: Option<String>,
    api_online: Option<bool>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            tab: self.tab,
            input: self.input.clone(),
            input_words: word_count(&self.input),
            clear_visible: !self.input.is_empty(),
            csv_row_count: self.csv_rows.as_ref().map(Vec::len),
            upload_file: self.upload.clone(),
            output: self.output.clone(),
            output_words: word_count(&self.output),
            output_rows: self.output_rows,
            output_failed: self.output_failed,
            loading: self.is_loading(),
            status: self.status.clone(),
            api_online: self.api_online,
            dirty: self.dirty,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn csv_rows(&self) -> Option<&[CsvRow]> {
        self.csv_rows.as_deref()
    }

    pub fn upload(&self) -> Option<&Path> {
        self.upload.as_deref()
    }

    /// True while a file parse or summarization request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.parsing || self.in_flight.is_some()
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn select_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
        self.csv_rows = None;
        self.mark_dirty();
    }

    pub(crate) fn set_csv_rows(&mut self, text: String, rows: Vec<CsvRow>) {
        self.input = text;
        self.csv_rows = Some(rows);
        self.mark_dirty();
    }

    pub(crate) fn set_upload(&mut self, path: PathBuf) {
        self.upload = Some(path);
        self.mark_dirty();
    }

    pub(crate) fn set_parsing(&mut self, parsing: bool) {
        if self.parsing != parsing {
            self.parsing = parsing;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_request(&mut self, csv_rows: Option<usize>) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.in_flight = Some(InFlight {
            request_id,
            csv_rows,
        });
        self.status = None;
        self.mark_dirty();
        request_id
    }

    /// Close the in-flight request if it matches, returning its CSV row count.
    pub(crate) fn finish_request(&mut self, request_id: RequestId) -> Option<Option<usize>> {
        match &self.in_flight {
            Some(in_flight) if in_flight.request_id == request_id => {
                let rows = in_flight.csv_rows;
                self.in_flight = None;
                self.mark_dirty();
                Some(rows)
            }
            _ => None,
        }
    }

    pub(crate) fn has_request_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub(crate) fn set_output(&mut self, text: String, rows: Option<usize>, failed: bool) {
        self.output = text;
        self.output_rows = rows;
        self.output_failed = failed;
        self.mark_dirty();
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
        self.mark_dirty();
    }

    pub(crate) fn set_api_online(&mut self, online: bool) {
        self.api_online = Some(online);
        self.mark_dirty();
    }
}
