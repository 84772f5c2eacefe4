//! 排版片段
//!
//! 一个文件对应一个片段，片段由若干块组成，最终序列化成编辑器可接受的 HTML。

const HEADING_STYLE: &str = "font-size: 20px; font-weight: bold; text-align: center;";
const PARAGRAPH_STYLE: &str = "font-size: 16px; text-align: justify;";
const IMAGE_STYLE: &str =
    "max-width: 100%; display: block; margin: 0 auto; box-shadow: 0 2px 10px rgba(0,0,0,0.1);";
const LINE_BREAK: &str = "<br/>";

/// 图片的 data-type 标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Gif,
    Jpeg,
}

impl MediaType {
    /// 只有 `image/gif` 标记为 gif，其余一律 jpeg
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type == "image/gif" {
            MediaType::Gif
        } else {
            MediaType::Jpeg
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Gif => "gif",
            MediaType::Jpeg => "jpeg",
        }
    }
}

/// 片段中的一个块
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// 居中加粗的标题栏（只出现在序号 1 前）
    Banner(String),
    /// 居中加粗的一行（序号或描述）
    Heading(String),
    /// 两端对齐的正文段落，`None` 表示空行
    Paragraph(Option<String>),
    /// 居中图片
    Media { url: String, media_type: MediaType },
    /// 空白段落
    Spacer,
}

impl Block {
    fn write_html(&self, out: &mut String) {
        match self {
            Block::Banner(text) | Block::Heading(text) => {
                out.push_str(&format!(
                    r#"<p style="{}">{}</p>"#,
                    HEADING_STYLE,
                    escape_html(text)
                ));
            }
            Block::Paragraph(line) => {
                let body = match line {
                    Some(text) => escape_html(text),
                    None => LINE_BREAK.to_string(),
                };
                out.push_str(&format!(r#"<p style="{}">{}</p>"#, PARAGRAPH_STYLE, body));
            }
            Block::Media { url, media_type } => {
                let url = escape_html(url);
                out.push_str(&format!(
                    r#"<img src="{url}" data-src="{url}" data-type="{}" style="{}">"#,
                    media_type.as_str(),
                    IMAGE_STYLE
                ));
            }
            Block::Spacer => {
                out.push_str("<p>");
                out.push_str(LINE_BREAK);
                out.push_str("</p>");
            }
        }
    }
}

/// 一个文件生成的完整片段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedFragment {
    blocks: Vec<Block>,
}

impl RenderedFragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// 序列化为 HTML，块的顺序即插入顺序
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            block.write_html(&mut out);
        }
        out
    }
}

/// 转义 HTML 特殊字符
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacer_and_blank_paragraph_html() {
        let mut fragment = RenderedFragment::new();
        fragment.push(Block::Paragraph(None));
        fragment.push(Block::Spacer);
        assert_eq!(
            fragment.to_html(),
            r#"<p style="font-size: 16px; text-align: justify;"><br/></p><p><br/></p>"#
        );
    }

    #[test]
    fn test_media_html() {
        let mut fragment = RenderedFragment::new();
        fragment.push(Block::Media {
            url: "https://mmbiz.qpic.cn/a?b=1&c=2".to_string(),
            media_type: MediaType::Gif,
        });
        let html = fragment.to_html();
        assert!(html.starts_with(r#"<img src="https://mmbiz.qpic.cn/a?b=1&amp;c=2""#));
        assert!(html.contains(r#"data-type="gif""#));
        assert!(html.contains("max-width: 100%"));
    }

    #[test]
    fn test_heading_is_escaped() {
        let mut fragment = RenderedFragment::new();
        fragment.push(Block::Heading("<猫&狗>".to_string()));
        assert!(fragment.to_html().contains("&lt;猫&amp;狗&gt;"));
    }

    #[test]
    fn test_media_type_from_mime() {
        assert_eq!(MediaType::from_mime("image/gif"), MediaType::Gif);
        assert_eq!(MediaType::from_mime("image/png"), MediaType::Jpeg);
        assert_eq!(MediaType::from_mime("application/octet-stream"), MediaType::Jpeg);
    }
}
