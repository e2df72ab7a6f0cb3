//! Fixed-template vector export

use super::{ExportError, ExportedFile, export_filename};

/// Render the SVG document for a brand name
pub fn render_svg(brand_name: &str) -> String {
    format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg width="800" height="400" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <linearGradient id="grad" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:#ffd700;stop-opacity:1" />
      <stop offset="100%" style="stop-color:#ff8c00;stop-opacity:1" />
    </linearGradient>
  </defs>
  <text x="400" y="200" font-family="Arial, sans-serif" font-size="120" font-weight="bold"
        text-anchor="middle" fill="url(#grad)" stroke="#000" stroke-width="2">
    {}
  </text>
</svg>
"##,
        escape_xml(brand_name)
    )
}

/// Build `logo-<brand>.svg`; independent of the live scene
pub fn export_vector(brand_name: &str) -> Result<ExportedFile, ExportError> {
    if brand_name.trim().is_empty() {
        return Err(ExportError::EmptyBrandName);
    }

    let filename = export_filename(brand_name, "svg");
    tracing::info!("Exported {}", filename);
    Ok(ExportedFile {
        filename,
        mime: "image/svg+xml",
        bytes: render_svg(brand_name).into_bytes(),
    })
}

/// Escape text for use in XML or HTML content and attribute values
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_template() {
        let svg = render_svg("Acme");
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"width="800" height="400""#));
        assert!(svg.contains(r#"font-size="120""#));
        assert!(svg.contains("stop-color:#ffd700"));
        assert!(svg.contains("stop-color:#ff8c00"));
        assert!(svg.contains("    Acme\n"));
    }

    #[test]
    fn test_svg_is_deterministic() {
        assert_eq!(render_svg("Acme"), render_svg("Acme"));
    }

    #[test]
    fn test_markup_is_escaped() {
        let svg = render_svg("A&B <Co>");
        assert!(svg.contains("A&amp;B &lt;Co&gt;"));
        assert!(!svg.contains("<Co>"));
    }

    #[test]
    fn test_export_vector() {
        let file = export_vector("Acme").unwrap();
        assert_eq!(file.filename, "logo-acme.svg");
        assert_eq!(file.mime, "image/svg+xml");
        assert_eq!(export_vector("  "), Err(ExportError::EmptyBrandName));
    }
}
