//! Export collaborators: the print-friendly HTML rendering of a fact sheet
//! and the canonical PDF export filename.
//!
//! Rasterizing the rendered page into an actual PDF happens client-side;
//! this module produces the document that capture operates on and the
//! filename the download is saved under.

use crate::factsheet::models::FactSheet;
use crate::llm_client::GroundingChunk;

/// Canonical export filename: lower-cased person name with every whitespace
/// character replaced by an underscore, plus the `_fact_sheet.pdf` suffix.
pub fn pdf_file_name(person_name: &str) -> String {
    let slug: String = person_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("{slug}_fact_sheet.pdf")
}

/// Renders a fact sheet plus its sources as a standalone HTML document.
///
/// Sources lacking a URI are skipped here — this is the render-time filter;
/// the generation path passes the full chunk list through untouched.
/// All model-supplied text is HTML-escaped.
pub fn render_html(sheet: &FactSheet, sources: &[GroundingChunk]) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>{} — Fact Sheet</title>\n",
        escape_html(&sheet.person_name)
    ));
    html.push_str(
        "<style>\
         body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; color: #1a1a1a; } \
         h1 { text-align: center; } \
         section { border: 1px solid #ddd; border-radius: 8px; padding: 1rem 1.5rem; margin: 1rem 0; } \
         h2 { border-bottom: 2px solid #eee; padding-bottom: .5rem; } \
         .empty { color: #777; font-style: italic; } \
         .sources a { display: block; margin: .25rem 0; }\
         </style>\n",
    );
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(&sheet.person_name)));

    push_section(&mut html, "10 Things You Need to Know", &sheet.ten_things_to_know);
    push_section(&mut html, "Primary Connections", &sheet.primary_connections);
    push_section(&mut html, "Education", &sheet.education);
    push_section(
        &mut html,
        "Key Memberships &amp; Awards",
        &sheet.key_memberships_awards,
    );

    let links: Vec<(&str, Option<&str>)> = sources
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .filter_map(|web| web.uri.as_deref().map(|uri| (uri, web.title.as_deref())))
        .collect();

    if !links.is_empty() {
        html.push_str("<section class=\"sources\">\n<h2>Sources</h2>\n");
        for (uri, title) in links {
            let label = title.filter(|t| !t.is_empty()).unwrap_or(uri);
            html.push_str(&format!(
                "<a href=\"{}\" rel=\"noopener noreferrer\">{}</a>\n",
                escape_html(uri),
                escape_html(label)
            ));
        }
        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Writes one titled section. The title is trusted (our own constants);
/// items are model output and get escaped.
fn push_section(html: &mut String, title: &str, items: &[String]) {
    html.push_str("<section>\n");
    html.push_str(&format!("<h2>{title}</h2>\n"));
    if items.is_empty() {
        html.push_str("<p class=\"empty\">No information found.</p>\n");
    } else {
        html.push_str("<ul>\n");
        for item in items {
            html.push_str(&format!("<li>{}</li>\n", escape_html(item)));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");
}

fn escape_html(text: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::WebSource;

    fn sample_sheet() -> FactSheet {
        FactSheet {
            person_name: "Ada Lovelace".to_string(),
            primary_connections: vec!["Charles Babbage".to_string()],
            education: vec![],
            key_memberships_awards: vec![],
            ten_things_to_know: vec!["Wrote the first algorithm".to_string()],
        }
    }

    #[test]
    fn test_pdf_file_name_lowercases_and_joins_with_underscores() {
        assert_eq!(pdf_file_name("Ada Lovelace"), "ada_lovelace_fact_sheet.pdf");
    }

    #[test]
    fn test_pdf_file_name_replaces_every_whitespace_char() {
        // Each whitespace character maps to its own underscore.
        assert_eq!(
            pdf_file_name("Jean  Luc Picard"),
            "jean__luc_picard_fact_sheet.pdf"
        );
    }

    #[test]
    fn test_render_includes_all_sections() {
        let html = render_html(&sample_sheet(), &[]);
        assert!(html.contains("10 Things You Need to Know"));
        assert!(html.contains("Primary Connections"));
        assert!(html.contains("Education"));
        assert!(html.contains("Key Memberships &amp; Awards"));
        assert!(html.contains("Charles Babbage"));
    }

    #[test]
    fn test_empty_section_shows_placeholder() {
        let html = render_html(&sample_sheet(), &[]);
        assert!(html.contains("No information found."));
    }

    #[test]
    fn test_sources_without_uri_are_skipped() {
        let sources = vec![
            GroundingChunk {
                web: Some(WebSource {
                    uri: Some("https://example.com/ada".to_string()),
                    title: Some("Ada Lovelace — Biography".to_string()),
                }),
            },
            GroundingChunk { web: None },
            GroundingChunk {
                web: Some(WebSource {
                    uri: None,
                    title: Some("Orphaned title".to_string()),
                }),
            },
        ];
        let html = render_html(&sample_sheet(), &sources);
        assert!(html.contains("https://example.com/ada"));
        assert!(!html.contains("Orphaned title"));
    }

    #[test]
    fn test_source_without_title_falls_back_to_uri_label() {
        let sources = vec![GroundingChunk {
            web: Some(WebSource {
                uri: Some("https://example.com/plain".to_string()),
                title: None,
            }),
        }];
        let html = render_html(&sample_sheet(), &sources);
        assert!(html.contains(">https://example.com/plain</a>"));
    }

    #[test]
    fn test_model_text_is_escaped() {
        let mut sheet = sample_sheet();
        sheet.ten_things_to_know = vec!["<script>alert('x')</script>".to_string()];
        let html = render_html(&sheet, &[]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
