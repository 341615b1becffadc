//! Block document → HTML

use crate::domain::entities::{Block, BlockData, EditorDocument};

use super::render::escape_html;

/// HTML for a single block; unknown block types render as nothing.
pub fn block_to_html(block: &Block) -> String {
    match block.typed() {
        BlockData::Header { text, level } => {
            format!("<h{level}>{}</h{level}>\n", escape_html(&text))
        }
        // Paragraph text is the editor's inline HTML (bold, links) and is kept as is.
        BlockData::Paragraph { text } => format!("<p>{}</p>\n", text),
        BlockData::List { ordered, items } => {
            let tag = if ordered { "ol" } else { "ul" };
            let items = items
                .iter()
                .map(|item| format!("<li>{}</li>", escape_html(item)))
                .collect::<Vec<_>>()
                .join("\n");
            format!("<{tag}>\n{items}\n</{tag}>\n")
        }
        BlockData::Checklist { items } => {
            let items = items
                .iter()
                .map(|item| {
                    let checked = if item.checked { "checked" } else { "" };
                    format!(
                        "<li><input type=\"checkbox\" {} disabled> {}</li>",
                        checked,
                        escape_html(&item.text)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!("<ul class=\"checklist\">\n{items}\n</ul>\n")
        }
        BlockData::Quote { text, caption } => format!(
            "<blockquote>{}\n{}</blockquote>\n",
            escape_html(&text),
            caption
                .map(|c| format!("<cite>{}</cite>", escape_html(&c)))
                .unwrap_or_default()
        ),
        BlockData::Warning { title, message } => format!(
            "<div class=\"warning\">\n<strong>{}</strong>\n<p>{}</p>\n</div>\n",
            escape_html(&title),
            escape_html(&message)
        ),
        BlockData::Delimiter => "<hr>\n".to_string(),
        BlockData::Code { code } => format!("<pre><code>{}</code></pre>\n", escape_html(&code)),
        BlockData::Table { rows } => {
            let rows = rows
                .iter()
                .map(|row| {
                    let cells: String = row
                        .iter()
                        .map(|cell| format!("<td>{}</td>", escape_html(cell)))
                        .collect();
                    format!("<tr>{}</tr>", cells)
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!("<table>\n{rows}\n</table>\n")
        }
        BlockData::Image { url, caption } => {
            let caption = caption.unwrap_or_default();
            let figcaption = if caption.is_empty() {
                String::new()
            } else {
                format!("<figcaption>{}</figcaption>", escape_html(&caption))
            };
            format!(
                "<figure>\n<img src=\"{}\" alt=\"{}\">\n{}\n</figure>\n",
                escape_html(&url),
                escape_html(&caption),
                figcaption
            )
        }
        BlockData::Embed { embed, caption } => format!(
            "<div class=\"embed\">\n{}\n{}\n</div>\n",
            escape_html(&embed),
            caption
                .map(|c| format!("<p>{}</p>", escape_html(&c)))
                .unwrap_or_default()
        ),
        BlockData::Unknown { .. } => String::new(),
    }
}

/// Concatenated HTML of every block in order
pub fn document_to_html(doc: &EditorDocument) -> String {
    doc.blocks.iter().map(block_to_html).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn header_is_escaped() {
        let html = block_to_html(&Block::header("A < B", 3));
        assert_eq!(html, "<h3>A &lt; B</h3>\n");
    }

    #[test]
    fn paragraph_keeps_inline_html() {
        let html = block_to_html(&Block::paragraph("Hi <b>there</b>"));
        assert_eq!(html, "<p>Hi <b>there</b></p>\n");
    }

    #[test]
    fn ordered_list() {
        let block = Block::new("list", json!({ "style": "ordered", "items": ["a", "b"] }));
        assert_eq!(block_to_html(&block), "<ol>\n<li>a</li>\n<li>b</li>\n</ol>\n");
    }

    #[test]
    fn checklist_marks_checked_items() {
        let block = Block::new(
            "checklist",
            json!({ "items": [ { "text": "done", "checked": true }, { "text": "todo", "checked": false } ] }),
        );
        let html = block_to_html(&block);
        assert!(html.starts_with("<ul class=\"checklist\">"));
        assert!(html.contains("<input type=\"checkbox\" checked disabled> done"));
        assert!(html.contains("<input type=\"checkbox\"  disabled> todo"));
    }

    #[test]
    fn table_rows_and_cells() {
        let block = Block::new("table", json!({ "content": [["a", "b"], ["1", "2"]] }));
        assert_eq!(
            block_to_html(&block),
            "<table>\n<tr><td>a</td><td>b</td></tr>\n<tr><td>1</td><td>2</td></tr>\n</table>\n"
        );
    }

    #[test]
    fn image_with_caption() {
        let block = Block::new(
            "image",
            json!({ "file": { "url": "img/a.png" }, "caption": "A \"cat\"" }),
        );
        let html = block_to_html(&block);
        assert!(html.contains("<img src=\"img/a.png\" alt=\"A &quot;cat&quot;\">"));
        assert!(html.contains("<figcaption>A &quot;cat&quot;</figcaption>"));
    }

    #[test]
    fn delimiter_and_code() {
        assert_eq!(block_to_html(&Block::new("delimiter", json!({}))), "<hr>\n");
        assert_eq!(
            block_to_html(&Block::new("code", json!({ "code": "a && b" }))),
            "<pre><code>a &amp;&amp; b</code></pre>\n"
        );
    }

    #[test]
    fn unknown_block_renders_nothing() {
        assert_eq!(block_to_html(&Block::new("raw", json!({ "html": "<x>" }))), "");
    }

    #[test]
    fn document_concatenates_blocks() {
        let doc = EditorDocument::new(vec![Block::header("T", 2), Block::paragraph("p")]);
        assert_eq!(document_to_html(&doc), "<h2>T</h2>\n<p>p</p>\n");
    }
}
