use anyhow::{Context, Result};
use std::io::Cursor;

/// The two upload formats the pipeline accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    Pptx,
}

impl MediaType {
    pub const PDF_MIME: &'static str = "application/pdf";
    pub const PPTX_MIME: &'static str =
        "application/vnd.openxmlformats-officedocument.presentationml.presentation";

    /// Map an upload Content-Type to a supported media type.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            Self::PDF_MIME => Some(Self::Pdf),
            Self::PPTX_MIME => Some(Self::Pptx),
            _ => None,
        }
    }

    /// Placeholder text substituted when extraction fails. The pipeline
    /// continues with this string rather than aborting the upload.
    pub fn extraction_failed_placeholder(self) -> &'static str {
        match self {
            Self::Pdf => "PDF text extraction failed",
            Self::Pptx => "PPTX text extraction failed",
        }
    }
}

/// Extracts raw text from uploaded deck bytes.
pub struct DeckParser;

impl DeckParser {
    pub fn new() -> Self {
        Self
    }

    pub fn extract_text(&self, media_type: MediaType, bytes: &[u8]) -> Result<String> {
        match media_type {
            MediaType::Pdf => self.extract_pdf(bytes),
            MediaType::Pptx => self.extract_pptx(bytes),
        }
    }

    fn extract_pdf(&self, bytes: &[u8]) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .context("Failed to extract text from PDF")?;

        let cleaned = text
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        if cleaned.is_empty() {
            return Err(anyhow::anyhow!(
                "PDF contains no extractable text (scanned/image-based)"
            ));
        }

        Ok(cleaned)
    }

    /// Extract PPTX text from each slide's XML, joined in slide order.
    fn extract_pptx(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .context("Failed to read PPTX as ZIP")?;

        let mut slides: Vec<(usize, String)> = Vec::new();

        for i in 0..archive.len() {
            let mut entry = match archive.by_index(i) {
                Ok(e) => e,
                Err(_) => continue,
            };

            let name = entry.name().to_string();
            // Slide XML files: ppt/slides/slide1.xml, slide2.xml, ...
            if !name.starts_with("ppt/slides/slide") || !name.ends_with(".xml") {
                continue;
            }

            let slide_num = name
                .trim_start_matches("ppt/slides/slide")
                .trim_end_matches(".xml")
                .parse::<usize>()
                .unwrap_or(0);

            let mut xml = String::new();
            use std::io::Read;
            if entry.read_to_string(&mut xml).is_ok() {
                let text = extract_pptx_slide_text(&xml);
                if !text.is_empty() {
                    slides.push((slide_num, text));
                }
            }
        }

        if slides.is_empty() {
            return Err(anyhow::anyhow!("PPTX contains no extractable text"));
        }

        slides.sort_by_key(|(num, _)| *num);

        let text = slides
            .into_iter()
            .map(|(num, text)| format!("--- Slide {} ---\n{}", num, text))
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(text)
    }
}

impl Default for DeckParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract text from PPTX slide XML by parsing <a:t> elements within <a:p> paragraphs.
fn extract_pptx_slide_text(xml: &str) -> String {
    let mut result = String::new();
    let mut pos = 0;

    while pos < xml.len() {
        if let Some(p_start) = xml[pos..].find("<a:p") {
            let abs_p_start = pos + p_start;
            let p_end = xml[abs_p_start..]
                .find("</a:p>")
                .map(|e| abs_p_start + e + 6)
                .unwrap_or(xml.len());

            let paragraph = &xml[abs_p_start..p_end];
            let mut para_text = String::new();
            let mut t_pos = 0;

            while t_pos < paragraph.len() {
                if let Some(t_start) = paragraph[t_pos..].find("<a:t") {
                    let abs_t_start = t_pos + t_start;
                    if let Some(tag_end) = paragraph[abs_t_start..].find('>') {
                        let content_start = abs_t_start + tag_end + 1;
                        if let Some(t_end) = paragraph[content_start..].find("</a:t>") {
                            para_text.push_str(&paragraph[content_start..content_start + t_end]);
                            t_pos = content_start + t_end + 6;
                        } else {
                            t_pos = content_start;
                        }
                    } else {
                        t_pos = abs_t_start + 4;
                    }
                } else {
                    break;
                }
            }

            if !para_text.is_empty() {
                if !result.is_empty() {
                    result.push('\n');
                }
                result.push_str(&para_text);
            }

            pos = p_end;
        } else {
            break;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn pptx_with_slides(slides: &[(usize, &str)]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            let options = SimpleFileOptions::default();
            for (num, body) in slides {
                writer
                    .start_file(format!("ppt/slides/slide{}.xml", num), options)
                    .unwrap();
                writer.write_all(body.as_bytes()).unwrap();
            }
            writer.finish().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_mime_mapping() {
        assert_eq!(MediaType::from_mime(MediaType::PDF_MIME), Some(MediaType::Pdf));
        assert_eq!(MediaType::from_mime(MediaType::PPTX_MIME), Some(MediaType::Pptx));
        assert_eq!(MediaType::from_mime("image/png"), None);
    }

    #[test]
    fn test_slide_text_extraction() {
        let xml = r#"<p:sld><p:txBody><a:p><a:r><a:t>Our platform</a:t></a:r><a:r><a:t> solves churn</a:t></a:r></a:p><a:p><a:r><a:t>Second line</a:t></a:r></a:p></p:txBody></p:sld>"#;
        let text = extract_pptx_slide_text(xml);
        assert_eq!(text, "Our platform solves churn\nSecond line");
    }

    #[test]
    fn test_pptx_slides_ordered_numerically() {
        let bytes = pptx_with_slides(&[
            (10, "<a:p><a:r><a:t>tenth</a:t></a:r></a:p>"),
            (2, "<a:p><a:r><a:t>second</a:t></a:r></a:p>"),
        ]);
        let text = DeckParser::new()
            .extract_text(MediaType::Pptx, &bytes)
            .unwrap();

        let second_pos = text.find("--- Slide 2 ---").unwrap();
        let tenth_pos = text.find("--- Slide 10 ---").unwrap();
        assert!(second_pos < tenth_pos);
        assert!(text.contains("second"));
        assert!(text.contains("tenth"));
    }

    #[test]
    fn test_pptx_without_slide_text_is_an_error() {
        let bytes = pptx_with_slides(&[(1, "<p:sld></p:sld>")]);
        assert!(DeckParser::new().extract_text(MediaType::Pptx, &bytes).is_err());
    }

    #[test]
    fn test_garbage_pdf_is_an_error() {
        let result = DeckParser::new().extract_text(MediaType::Pdf, b"not a pdf");
        assert!(result.is_err());
    }
}
