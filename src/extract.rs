//! Table extraction driven by a small declarative schema.
//!
//! Each scraped page layout is described once as a [`TableSchema`]: where the
//! table is, which rows count, and for every named field the selector (relative
//! to the row) plus how to read and clean its value. When the remote markup
//! changes only the schema constants need to follow.

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html, Selector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Text,
    Attr(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clean {
    Trim,
    /// Drops every whitespace character ("10 - 2" -> "10-2").
    StripWhitespace,
    /// Skips a fixed-width label, then "17,00" -> "17:00".
    ClockTime { skip: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    /// `None` reads from the row element itself.
    pub selector: Option<&'static str>,
    pub source: Source,
    pub clean: Clean,
    pub required: bool,
}

impl Field {
    pub const fn text(name: &'static str, selector: &'static str) -> Self {
        Self {
            name,
            selector: Some(selector),
            source: Source::Text,
            clean: Clean::Trim,
            required: true,
        }
    }

    pub const fn row_attr(name: &'static str, attr: &'static str) -> Self {
        Self {
            name,
            selector: None,
            source: Source::Attr(attr),
            clean: Clean::Trim,
            required: true,
        }
    }

    pub const fn cleaned(mut self, clean: Clean) -> Self {
        self.clean = clean;
        self
    }

    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

#[derive(Debug, Clone)]
pub struct TableSchema {
    /// Container that must exist exactly once; `None` searches the whole page.
    pub table: Option<&'static str>,
    pub row: String,
    /// Rows missing this attribute are skipped (headers, spacers).
    pub row_attr: Option<&'static str>,
    pub fields: &'static [Field],
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: HashMap<&'static str, String>,
}

impl Record {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name).ok_or_else(|| anyhow!("missing {name}"))
    }
}

pub fn extract(html: &str, schema: &TableSchema) -> Result<Vec<Record>> {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let scope = match schema.table {
        Some(table) => {
            let sel = parse_selector(table)?;
            let mut found = root.select(&sel);
            let first = found.next().ok_or_else(|| anyhow!("missing table {table}"))?;
            if found.next().is_some() {
                return Err(anyhow!("expected a single {table}"));
            }
            first
        }
        None => root,
    };

    let row_sel = parse_selector(&schema.row)?;
    let field_sels = schema
        .fields
        .iter()
        .map(|f| f.selector.map(parse_selector).transpose())
        .collect::<Result<Vec<_>>>()?;

    let mut out = Vec::new();
    for (idx, row) in scope.select(&row_sel).enumerate() {
        if let Some(attr) = schema.row_attr {
            if row.value().attr(attr).is_none() {
                continue;
            }
        }
        let mut record = Record::default();
        for (field, sel) in schema.fields.iter().zip(&field_sels) {
            match read_field(row, field, sel.as_ref()) {
                Some(value) => {
                    record.values.insert(field.name, value);
                }
                None if field.required => {
                    let row_no = idx + 1;
                    return Err(anyhow!("missing {} in row {row_no} of {}", field.name, schema.row));
                }
                None => {}
            }
        }
        out.push(record);
    }
    log::debug!("{}: {} rows", schema.row, out.len());
    Ok(out)
}

fn read_field(row: ElementRef<'_>, field: &Field, sel: Option<&Selector>) -> Option<String> {
    let el = match sel {
        Some(sel) => row.select(sel).next()?,
        None => row,
    };
    let raw = match field.source {
        Source::Text => el.text().collect::<String>(),
        Source::Attr(attr) => el.value().attr(attr)?.to_string(),
    };
    let value = clean(&raw, field.clean);
    if value.is_empty() { None } else { Some(value) }
}

pub fn clean(raw: &str, how: Clean) -> String {
    match how {
        Clean::Trim => raw.trim().to_string(),
        Clean::StripWhitespace => raw.chars().filter(|c| !c.is_whitespace()).collect(),
        Clean::ClockTime { skip } => raw
            .trim()
            .chars()
            .skip(skip)
            .collect::<String>()
            .trim()
            .replace(',', ":"),
    }
}

fn parse_selector(raw: &str) -> Result<Selector> {
    Selector::parse(raw).map_err(|err| anyhow!("invalid selector {raw}: {err:?}"))
}
