//! Page → static HTML
//!
//! Pure functions: rendering the same page with the same site settings always
//! produces byte-identical output, which the publish ledger relies on.

use pulldown_cmark::{html, Options, Parser};

use crate::domain::entities::Page;

use super::blocks::document_to_html;

/// Site-wide values baked into every rendered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMeta {
    pub title: String,
}

impl SiteMeta {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// CommonMark with the GitHub extensions authors expect (tables, strikethrough, task lists)
pub fn markdown_to_html(markdown: &str) -> String {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Markdown body of a page with its attachment list appended
pub fn page_markdown(page: &Page) -> String {
    let mut markdown = page.content.markdown.clone();
    if !page.attachments.is_empty() {
        markdown.push_str("\n\n## Attachments\n\n");
        for att in &page.attachments {
            markdown.push_str(&format!("- [{}]({})\n", att.name, att.data));
        }
    }
    markdown
}

/// Inner HTML of a page, from whichever editor owns its content
pub fn render_body(page: &Page) -> String {
    if page.uses_blocks() {
        document_to_html(&page.content.editorjs)
    } else {
        markdown_to_html(&page_markdown(page))
    }
}

/// Full standalone HTML document for a page
pub fn render_page(page: &Page, site: &SiteMeta) -> String {
    let title = escape_html(&page.title);
    let site_title = escape_html(&site.title);
    let body = render_body(page);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - {site_title}</title>
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css">
    <link rel="stylesheet" href="style.css">
</head>
<body>
    <header class="site-header">
        <div class="header-container">
            <a href="index.html" class="site-title">{site_title}</a>
            <a href="index.html" class="back-link">
                <i class="fas fa-arrow-left"></i>
                Back to Home
            </a>
        </div>
    </header>

    <main class="container">
        <div class="course-header">
            <h1>{title}</h1>
        </div>

        <div class="course-content">
{body}
        </div>
    </main>
</body>
</html>
"#
    )
}

/// Index document linking every root page
pub fn render_index<'a, I>(pages: I, site: &SiteMeta) -> String
where
    I: IntoIterator<Item = &'a Page>,
{
    let site_title = escape_html(&site.title);
    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{site_title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', sans-serif;
            max-width: 800px;
            margin: 40px auto;
            padding: 20px;
            line-height: 1.6;
            color: #333;
        }}
        h1 {{ color: #2563eb; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ margin: 10px 0; }}
        a {{ color: #2563eb; text-decoration: none; padding: 8px 12px; display: inline-block; }}
        a:hover {{ background: #f0f0f0; border-radius: 4px; }}
    </style>
</head>
<body>
    <h1>{site_title}</h1>
    <h2>Pages</h2>
    <ul>
"#
    );

    for page in pages.into_iter().filter(|p| p.is_root()) {
        html.push_str(&format!(
            "        <li><a href=\"{}\">{}</a></li>\n",
            escape_html(&page.path),
            escape_html(&page.title)
        ));
    }

    html.push_str("    </ul>\n</body>\n</html>\n");
    html
}
