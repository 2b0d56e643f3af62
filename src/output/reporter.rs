//! Result reporter
//!
//! Writes API responses and run summaries to any `io::Write`.

use crate::error::Result;
use crate::types::{JsonObject, JsonValue, PageResult};
use std::io::Write;

/// Format a page for display.
///
/// `pretty` sorts object keys recursively and indents by two spaces. A
/// body that is not JSON is always returned unchanged.
pub fn format(page: &PageResult, pretty: bool) -> String {
    match (&page.json, pretty) {
        (Some(json), true) => to_pretty_json(json),
        _ => page.body.clone(),
    }
}

/// Pretty-print with sorted keys and two-space indentation
pub fn to_pretty_json(value: &JsonValue) -> String {
    let sorted = sort_keys(value);
    serde_json::to_string_pretty(&sorted).unwrap_or_else(|_| sorted.to_string())
}

/// Copy of `value` with every object's keys in ascending order
pub fn sort_keys(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = JsonObject::new();
            for key in keys {
                sorted.insert(key.clone(), sort_keys(&map[key]));
            }
            JsonValue::Object(sorted)
        }
        JsonValue::Array(items) => JsonValue::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// Writes responses and summaries
#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
    pretty: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, pretty: bool) -> Self {
        Self { out, pretty }
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// `Status: <code>`
    pub fn status(&mut self, status: u16) -> Result<()> {
        writeln!(self.out, "Status: {status}")?;
        Ok(())
    }

    /// One page, formatted, followed by a blank line
    pub fn page(&mut self, page: &PageResult) -> Result<()> {
        writeln!(self.out, "{}\n", format(page, self.pretty))?;
        Ok(())
    }

    /// Status line then the page
    pub fn response(&mut self, page: &PageResult) -> Result<()> {
        self.status(page.status)?;
        self.page(page)
    }

    /// A JSON value built locally, such as a projection of results
    pub fn json(&mut self, value: &JsonValue) -> Result<()> {
        let text = if self.pretty {
            to_pretty_json(value)
        } else {
            value.to_string()
        };
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    /// A plain line of text
    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    /// Summary for a run that fetched a single page
    pub fn request_complete(&mut self) -> Result<()> {
        self.line("Request complete.")
    }

    /// Summary for a paginated run; counts runs also report the summed total
    pub fn done_paginating(&mut self, requests: u32, total_count: Option<u64>) -> Result<()> {
        writeln!(self.out, "Done paginating.")?;
        writeln!(self.out, "Total requests made: {requests}")?;
        if let Some(total) = total_count {
            writeln!(self.out, "Total count: {total}")?;
        }
        Ok(())
    }

    /// Pick the summary matching the number of pages fetched
    pub fn summary(&mut self, pages: u32, total_count: Option<u64>) -> Result<()> {
        if pages > 1 {
            self.done_paginating(pages, total_count)
        } else {
            self.request_complete()
        }
    }

    /// Closing line for a run that ended on an error response, printed
    /// instead of the summary
    pub fn incomplete(&mut self, pages: u32, status: u16) -> Result<()> {
        writeln!(
            self.out,
            "Stopped after HTTP {status} on request {pages}; results are incomplete."
        )?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
