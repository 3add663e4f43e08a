//! Read-only print preview of a document and its sections as HTML.
//!
//! Contains:
//! - `render_html`: standalone A4 page with the request header and one table
//!   per section (spans, per-cell colors, summary row)
//! - `escape_html`

use std::fmt::Write;

use docgrid_engine::{Section, SummaryRow};

use crate::document::Document;

const PAGE_TITLE: &str = "ໃບສະເໜີ";
const LABEL_TO: &str = "ຮຽນ";
const LABEL_REASON: &str = "ເລື່ອງ";
const LABEL_TOTAL: &str = "ລວມເປັນເງິນ";
const DEFAULT_TO: &str = "ທ່ານ ຮອງວານອົງການ";
const DEFAULT_REASON: &str = "ຂໍສະເໜີໃຫ້ອະນຸມັດ";

const STYLE: &str = "\
body { font-family: 'Phetsarath OT', 'Noto Sans Lao', sans-serif; margin: 0; }
.page { max-width: 210mm; margin: 0 auto; padding: 16mm; }
h1 { text-align: center; text-decoration: underline; font-size: 1.25rem; }
h2 { font-size: 0.95rem; margin: 1.5em 0 0.4em; }
table { border-collapse: collapse; width: 100%; font-size: 0.85rem; }
td { border: 1px solid #000; padding: 4px 6px; vertical-align: top; }
tr.summary td { font-weight: bold; }
@media print { .page { padding: 0; } }
";

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
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

/// Render a full HTML page. The document header is omitted when `document`
/// is None.
pub fn render_html(document: Option<&Document>, sections: &[Section]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"lo\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", PAGE_TITLE);
    let _ = writeln!(html, "<style>\n{}</style>\n</head>\n<body>\n<div class=\"page\">", STYLE);

    if let Some(doc) = document {
        render_header(&mut html, doc);
    }
    for section in sections {
        render_section(&mut html, section);
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_header(html: &mut String, doc: &Document) {
    let to = if doc.req_to.trim().is_empty() { DEFAULT_TO } else { doc.req_to.as_str() };
    let reason = if doc.req_reason.trim().is_empty() {
        DEFAULT_REASON
    } else {
        doc.req_reason.as_str()
    };

    let _ = writeln!(html, "<h1>{}</h1>", PAGE_TITLE);
    let _ = writeln!(html, "<p><b>{} : </b>{}</p>", LABEL_TO, escape_html(to));
    let _ = writeln!(html, "<p><b>{} : </b>{}</p>", LABEL_REASON, escape_html(reason));
    if doc.totalmoney > 0 {
        let _ = writeln!(
            html,
            "<p><b>{} : </b>{} ກີບ</p>",
            LABEL_TOTAL,
            group_thousands(doc.totalmoney)
        );
    }
}

fn render_section(html: &mut String, section: &Section) {
    if !section.title.is_empty() {
        let _ = writeln!(html, "<h2>{}</h2>", escape_html(&section.title));
    }
    html.push_str("<table>\n");
    for row in section.rows() {
        html.push_str("<tr>");
        // Covered positions produce no element.
        for cell in row.iter().flatten() {
            html.push_str("<td");
            if cell.colspan > 1 {
                let _ = write!(html, " colspan=\"{}\"", cell.colspan);
            }
            if cell.rowspan > 1 {
                let _ = write!(html, " rowspan=\"{}\"", cell.rowspan);
            }
            let mut style = String::new();
            if let Some(bg) = &cell.bg {
                let _ = write!(style, "background-color: {};", escape_html(bg));
            }
            if let Some(color) = &cell.color {
                if !style.is_empty() {
                    style.push(' ');
                }
                let _ = write!(style, "color: {};", escape_html(color));
            }
            if !style.is_empty() {
                let _ = write!(html, " style=\"{}\"", style);
            }
            let _ = write!(html, ">{}</td>", escape_html(&cell.value));
        }
        html.push_str("</tr>\n");
    }
    if let Some(summary) = section.summary_row() {
        render_summary(html, summary);
    }
    html.push_str("</table>\n");
}

fn render_summary(html: &mut String, summary: &SummaryRow) {
    html.push_str("<tr class=\"summary\">");
    if summary.label_colspan > 1 {
        let _ = write!(
            html,
            "<td colspan=\"{}\">{}</td>",
            summary.label_colspan,
            escape_html(&summary.label)
        );
    } else {
        let _ = write!(html, "<td>{}</td>", escape_html(&summary.label));
    }
    for value in &summary.values {
        let _ = write!(html, "<td>{}</td>", escape_html(value));
    }
    html.push_str("</tr>\n");
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgrid_core::{CellPos, CellRange};
    use docgrid_engine::ColorProperty;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
        assert_eq!(escape_html("ລາຍລະອຽດ"), "ລາຍລະອຽດ");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1500000), "1,500,000");
    }

    #[test]
    fn test_spans_and_colors_rendered() {
        let mut section = Section::default();
        section.title = "Costs <2026>".into();
        let header = CellRange::from_corners(CellPos::new(0, 0), CellPos::new(0, 2));
        section.apply_color(header, ColorProperty::Background, "#0F75BC");
        section.apply_color(header, ColorProperty::Foreground, "#FFFFFF");
        section.merge(CellRange::from_corners(CellPos::new(0, 1), CellPos::new(1, 1)));

        let html = render_html(None, &[section]);
        assert!(html.contains("<h2>Costs &lt;2026&gt;</h2>"));
        assert!(html.contains("<td rowspan=\"2\" style=\"background-color: #0F75BC; color: #FFFFFF;\">"));
        // Row 1 has one covered position, so only two cells.
        let second_row = html.split("<tr>").nth(2).unwrap();
        assert_eq!(second_row.matches("<td").count(), 2);
        assert!(!html.contains("<h1>"));
    }

    #[test]
    fn test_summary_row_rendered() {
        let mut section = Section::default();
        section.add_column_at(3);
        section.toggle_summary_row("Total", 3);
        section.set_summary_value(0, "1,000");
        let html = render_html(None, &[section]);
        assert!(html.contains("<tr class=\"summary\"><td colspan=\"3\">Total</td><td>1,000</td></tr>"));
    }

    #[test]
    fn test_document_header_defaults() {
        let doc = Document { totalmoney: 25000, ..Document::default() };
        let html = render_html(Some(&doc), &[]);
        assert!(html.contains(DEFAULT_TO));
        assert!(html.contains(DEFAULT_REASON));
        assert!(html.contains("25,000 ກີບ"));
    }
}
