//! HTML rendering of a [`Page`]
//!
//! Element ids and classes are the contract with the site stylesheet:
//! `#title`, `#publicationDate`, `#story div.chapters`, and `#prev`/`#next`
//! inside `#navigation`.

use crate::page::{ChapterSection, NavLink, Page};

/// Escape text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_page(page: &Page) -> String {
    let chapters: String = page.chapters.iter().map(render_chapter).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{document_title}</title>
    <link rel="stylesheet" href="/style.css">
</head>
<body>
    <main id="story">
        <h1 id="title">{title}</h1>
        <p id="publicationDate">{publication_date}</p>
        <div class="chapters">{chapters}</div>
    </main>
    <nav id="navigation">
        {prev}
        {next}
    </nav>
</body>
</html>
"#,
        document_title = escape(&page.document_title),
        title = escape(&page.title),
        publication_date = escape(&page.publication_date),
        chapters = chapters,
        prev = render_nav("prev", &page.prev),
        next = render_nav("next", &page.next),
    )
}

fn render_chapter(section: &ChapterSection) -> String {
    let open = if section.open { " open" } else { "" };
    let image = section
        .image_url
        .as_deref()
        .map(|url| format!(r#"<img src="{}" alt="{}">"#, escape(url), escape(&section.title)))
        .unwrap_or_default();

    format!(
        r#"<div class="chapter"><details{open}><summary>{title}</summary><div>{body}</div></details>{image}</div>"#,
        open = open,
        title = escape(&section.title),
        body = section.body_html,
        image = image,
    )
}

fn render_nav(id: &str, link: &NavLink) -> String {
    match (&link.href, link.visible) {
        (Some(href), true) => format!(
            r#"<div id="{id}" style="display: block"><a href="{href}">{text}</a></div>"#,
            id = id,
            href = escape(href),
            text = escape(&link.text),
        ),
        _ => format!(r#"<div id="{id}" hidden style="display: none"><a></a></div>"#, id = id),
    }
}
