//! Block editor document
//!
//! Mirrors the block editor's saved output: `{ time, blocks: [{ id, type, data }], version }`.
//! Blocks keep their raw `data` so unknown block types survive a load/save cycle;
//! `Block::typed` decodes the kinds the renderer understands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A saved block editor document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditorDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl EditorDocument {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            time: None,
            blocks,
            version: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Plain text of every block, one block per line (used by search)
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::plain_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One block as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

/// A checklist row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub text: String,
    pub checked: bool,
}

/// Decoded block payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockData {
    Header { text: String, level: u8 },
    Paragraph { text: String },
    List { ordered: bool, items: Vec<String> },
    Checklist { items: Vec<ChecklistItem> },
    Quote { text: String, caption: Option<String> },
    Warning { title: String, message: String },
    Delimiter,
    Code { code: String },
    Table { rows: Vec<Vec<String>> },
    Image { url: String, caption: Option<String> },
    Embed { embed: String, caption: Option<String> },
    Unknown { kind: String },
}

impl Block {
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self {
            id: None,
            kind: kind.into(),
            data,
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new("paragraph", serde_json::json!({ "text": text.into() }))
    }

    pub fn header(text: impl Into<String>, level: u8) -> Self {
        Self::new(
            "header",
            serde_json::json!({ "text": text.into(), "level": level }),
        )
    }

    /// Decode `data` according to `kind`; missing fields fall back to empty values.
    pub fn typed(&self) -> BlockData {
        let data = &self.data;
        match self.kind.as_str() {
            "header" => BlockData::Header {
                text: str_field(data, "text"),
                level: data
                    .get("level")
                    .and_then(Value::as_u64)
                    .map(|l| l.clamp(1, 6) as u8)
                    .unwrap_or(2),
            },
            "paragraph" => BlockData::Paragraph {
                text: str_field(data, "text"),
            },
            "list" => BlockData::List {
                ordered: data.get("style").and_then(Value::as_str) == Some("ordered"),
                items: array_field(data, "items")
                    .iter()
                    .map(list_item_text)
                    .collect(),
            },
            "checklist" => BlockData::Checklist {
                items: array_field(data, "items")
                    .iter()
                    .map(|item| ChecklistItem {
                        text: str_field(item, "text"),
                        checked: item
                            .get("checked")
                            .and_then(Value::as_bool)
                            .unwrap_or(false),
                    })
                    .collect(),
            },
            "quote" => BlockData::Quote {
                text: str_field(data, "text"),
                caption: opt_str_field(data, "caption"),
            },
            "warning" => BlockData::Warning {
                title: str_field(data, "title"),
                message: str_field(data, "message"),
            },
            "delimiter" => BlockData::Delimiter,
            "code" => BlockData::Code {
                code: str_field(data, "code"),
            },
            "table" => BlockData::Table {
                rows: array_field(data, "content")
                    .iter()
                    .map(|row| {
                        row.as_array()
                            .map(|cells| cells.iter().map(value_text).collect())
                            .unwrap_or_default()
                    })
                    .collect(),
            },
            "image" => BlockData::Image {
                url: data
                    .get("file")
                    .map(|f| str_field(f, "url"))
                    .filter(|u| !u.is_empty())
                    .unwrap_or_else(|| str_field(data, "url")),
                caption: opt_str_field(data, "caption"),
            },
            "embed" => BlockData::Embed {
                embed: str_field(data, "embed"),
                caption: opt_str_field(data, "caption"),
            },
            other => BlockData::Unknown {
                kind: other.to_string(),
            },
        }
    }

    /// Human-readable text carried by the block
    pub fn plain_text(&self) -> String {
        match self.typed() {
            BlockData::Header { text, .. } | BlockData::Paragraph { text } => text,
            BlockData::List { items, .. } => items.join("\n"),
            BlockData::Checklist { items } => items
                .into_iter()
                .map(|i| i.text)
                .collect::<Vec<_>>()
                .join("\n"),
            BlockData::Quote { text, caption } => match caption {
                Some(c) => format!("{}\n{}", text, c),
                None => text,
            },
            BlockData::Warning { title, message } => format!("{}\n{}", title, message),
            BlockData::Code { code } => code,
            BlockData::Table { rows } => rows
                .into_iter()
                .map(|r| r.join(" "))
                .collect::<Vec<_>>()
                .join("\n"),
            BlockData::Image { caption, .. } | BlockData::Embed { caption, .. } => {
                caption.unwrap_or_default()
            }
            BlockData::Delimiter | BlockData::Unknown { .. } => String::new(),
        }
    }
}

fn str_field(data: &Value, key: &str) -> String {
    data.get(key).map(value_text).unwrap_or_default()
}

fn opt_str_field(data: &Value, key: &str) -> Option<String> {
    Some(str_field(data, key)).filter(|s| !s.is_empty())
}

fn array_field<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// List items are plain strings, or `{ content, items }` objects for nested lists.
fn list_item_text(item: &Value) -> String {
    match item {
        Value::Object(_) => str_field(item, "content"),
        other => value_text(other),
    }
}
