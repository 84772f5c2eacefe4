//! 排版服务 - 业务能力层
//!
//! 只负责"把一个文件变成一段排版"，不关心上传和插入

use crate::models::filename::parse_label;
use crate::models::fragment::{Block, MediaType, RenderedFragment};
use crate::models::FileItem;

/// 片段正文
#[derive(Debug, Clone, Copy)]
pub enum Body<'a> {
    /// 文本文件的完整内容
    Text(&'a str),
    /// 已上传图片的 CDN 地址
    Image { cdn_url: &'a str },
}

/// 排版服务
///
/// 固定顺序：
/// 1. 序号为 "1" 时先放标题栏和一个空行
/// 2. 序号
/// 3. 描述
/// 4. 正文（每行一段 / 一张图）
/// 5. 两个空行
pub struct ContentRenderer {
    banner_caption: String,
}

impl ContentRenderer {
    pub fn new(banner_caption: impl Into<String>) -> Self {
        Self {
            banner_caption: banner_caption.into(),
        }
    }

    pub fn render(&self, item: &FileItem, body: Body<'_>) -> RenderedFragment {
        let label = parse_label(&item.name);
        let mut fragment = RenderedFragment::new();

        if label.is_first() {
            fragment.push(Block::Banner(self.banner_caption.clone()));
            fragment.push(Block::Spacer);
        }

        fragment.push(Block::Heading(label.serial_number));
        fragment.push(Block::Heading(label.descriptor));

        match body {
            Body::Text(content) => {
                // 空文件不产生正文
                if !content.is_empty() {
                    for line in content.split('\n') {
                        let line = line.strip_suffix('\r').unwrap_or(line);
                        let paragraph = if line.is_empty() {
                            None
                        } else {
                            Some(line.to_string())
                        };
                        fragment.push(Block::Paragraph(paragraph));
                    }
                }
            }
            Body::Image { cdn_url } => {
                fragment.push(Block::Media {
                    url: cdn_url.to_string(),
                    media_type: MediaType::from_mime(&item.mime_type),
                });
            }
        }

        fragment.push(Block::Spacer);
        fragment.push(Block::Spacer);
        fragment
    }
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self::new("【每日杂图】")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> FileItem {
        FileItem::new(name, name, 0)
    }

    #[test]
    fn test_text_blank_line_is_preserved() {
        let renderer = ContentRenderer::default();
        let fragment = renderer.render(&item("2笔记.txt"), Body::Text("a\n\nb"));

        assert_eq!(
            fragment.blocks(),
            &[
                Block::Heading("2".to_string()),
                Block::Heading("笔记".to_string()),
                Block::Paragraph(Some("a".to_string())),
                Block::Paragraph(None),
                Block::Paragraph(Some("b".to_string())),
                Block::Spacer,
                Block::Spacer,
            ]
        );
    }

    #[test]
    fn test_block_count_formula() {
        let renderer = ContentRenderer::default();
        let content = "一\n二\n三\n四";

        let plain = renderer.render(&item("5x.txt"), Body::Text(content));
        assert_eq!(plain.len(), 1 + 1 + 4 + 2);

        let first = renderer.render(&item("1x.txt"), Body::Text(content));
        assert_eq!(first.len(), 2 + 1 + 1 + 4 + 2);
    }

    #[test]
    fn test_banner_only_for_serial_one() {
        let renderer = ContentRenderer::new("【测试】");

        let first = renderer.render(&item("1封面.png"), Body::Image { cdn_url: "u" });
        assert_eq!(first.blocks()[0], Block::Banner("【测试】".to_string()));
        assert_eq!(first.blocks()[1], Block::Spacer);
        assert!(first.to_html().starts_with(
            r#"<p style="font-size: 20px; font-weight: bold; text-align: center;">【测试】</p><p><br/></p>"#
        ));

        for name in ["2a.png", "10a.png", "cover.png", "01a.png"] {
            let fragment = renderer.render(&item(name), Body::Image { cdn_url: "u" });
            assert!(
                !matches!(fragment.blocks()[0], Block::Banner(_)),
                "{} 不应有标题栏",
                name
            );
        }
    }

    #[test]
    fn test_gif_media_type() {
        let renderer = ContentRenderer::default();

        let gif = renderer.render(&item("3动图.gif"), Body::Image { cdn_url: "https://cdn/x" });
        assert_eq!(
            gif.blocks()[2],
            Block::Media {
                url: "https://cdn/x".to_string(),
                media_type: MediaType::Gif
            }
        );
        assert!(gif.to_html().contains(r#"data-type="gif""#));

        let png = renderer.render(&item("3图.png"), Body::Image { cdn_url: "https://cdn/x" });
        assert!(png.to_html().contains(r#"data-type="jpeg""#));
    }

    #[test]
    fn test_crlf_and_empty_text() {
        let renderer = ContentRenderer::default();

        let crlf = renderer.render(&item("2a.txt"), Body::Text("x\r\ny"));
        assert_eq!(crlf.blocks()[2], Block::Paragraph(Some("x".to_string())));
        assert_eq!(crlf.blocks()[3], Block::Paragraph(Some("y".to_string())));

        let empty = renderer.render(&item("2a.txt"), Body::Text(""));
        assert_eq!(empty.len(), 4);
    }

    #[test]
    fn test_unlabelled_name_uses_full_name() {
        let renderer = ContentRenderer::default();
        let fragment = renderer.render(&item("cover.png"), Body::Image { cdn_url: "u" });
        assert_eq!(fragment.blocks()[0], Block::Heading("0".to_string()));
        assert_eq!(fragment.blocks()[1], Block::Heading("cover.png".to_string()));
    }
}
