//! Reusable test content.

/// Block document with a header and a list
pub const BLOCK_DOCUMENT: &str = r#"{
  "time": 1700000000000,
  "version": "2.28.0",
  "blocks": [
    { "id": "h1", "type": "header", "data": { "text": "Lecture notes", "level": 2 } },
    { "id": "p1", "type": "paragraph", "data": { "text": "Stacks and queues" } },
    { "id": "l1", "type": "list", "data": { "style": "unordered", "items": ["push", "pop"] } }
  ]
}"#;

/// Browser storage dump holding both legacy editors' data
pub const LEGACY_DUMP: &str = r##"{
  "contentManager": "{\"pages\":[{\"id\":1,\"title\":\"Course\",\"content\":\"# Course\",\"parentId\":null},{\"id\":2,\"title\":\"Week 1\",\"content\":\"intro\",\"parentId\":1}]}",
  "editor_pages": "[{\"id\":\"e1\",\"title\":\"Gallery\",\"path\":\"gallery.html\",\"content\":{\"blocks\":[{\"type\":\"paragraph\",\"data\":{\"text\":\"pics\"}}]}}]",
  "githubConfig": "{\"repo\":\"jane/site\",\"token\":\"t0k\"}",
  "theme": "dark"
}"##;

pub const SITE_CONFIG: &str = r#"
[site]
title = "Jane's Portfolio"
"#;
