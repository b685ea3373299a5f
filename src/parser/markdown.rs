// file: src/parser/markdown.rs
// description: image reference and title discovery with pulldown-cmark
// reference: https://docs.rs/pulldown-cmark

use crate::models::{ImageReference, ImageSyntax};
use lazy_static::lazy_static;
use pulldown_cmark::{Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::ops::Range;
use std::path::Path;
use tracing::debug;

lazy_static! {
    // src attribute of an <img> tag, double or single quoted
    static ref IMG_SRC: Regex = Regex::new(
        r#"(?i)<img\b[^>]*?\ssrc\s*=\s*(?:"([^"]*)"|'([^']*)')"#
    ).expect("IMG_SRC regex is valid");
}

pub struct MarkdownParser {
    options: Options,
}

impl MarkdownParser {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        Self { options }
    }

    /// Locates every inline markdown image and `<img src>` attribute in `content`.
    ///
    /// Works on the token stream, so references inside code blocks and code spans
    /// are not reported. Reference-style images (`![alt][id]`) are skipped because
    /// their destination is not written at the image site.
    pub fn image_references(&self, document: &Path, content: &str) -> Vec<ImageReference> {
        let mut references = Vec::new();
        let mut html_block: Option<Range<usize>> = None;

        for (event, range) in Parser::new_ext(content, self.options).into_offset_iter() {
            match event {
                Event::Start(Tag::Image {
                    link_type: LinkType::Inline,
                    dest_url,
                    ..
                }) => {
                    if dest_url.is_empty() {
                        continue;
                    }

                    match locate_destination(content, &range, &dest_url) {
                        Some(span) => references.push(ImageReference {
                            raw: dest_url.to_string(),
                            document: document.to_path_buf(),
                            line: line_of(content, span.start),
                            syntax: ImageSyntax::Markdown,
                            span,
                        }),
                        None => debug!(
                            "Image destination {} not written literally in {}",
                            dest_url,
                            document.display()
                        ),
                    }
                }
                Event::Start(Tag::HtmlBlock) => html_block = None,
                // one event per line; the tag may span several of them
                Event::Html(_) => {
                    html_block = Some(match html_block.take() {
                        Some(block) => block.start..range.end,
                        None => range,
                    });
                }
                Event::End(TagEnd::HtmlBlock) => {
                    if let Some(block) = html_block.take() {
                        scan_html(document, content, block, &mut references);
                    }
                }
                Event::InlineHtml(_) => scan_html(document, content, range, &mut references),
                _ => {}
            }
        }

        if let Some(block) = html_block {
            scan_html(document, content, block, &mut references);
        }

        references.sort_by_key(|r| r.span.start);
        references
    }

    /// Text of the first level-1 heading, with links reduced to their display text.
    pub fn first_title(&self, content: &str) -> Option<String> {
        let mut title: Option<String> = None;

        for event in Parser::new_ext(content, self.options) {
            match event {
                Event::Start(Tag::Heading {
                    level: HeadingLevel::H1,
                    ..
                }) => {
                    title = Some(String::new());
                }
                Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                    if let Some(text) = title.take() {
                        let text = text.trim().to_string();
                        if !text.is_empty() {
                            return Some(text);
                        }
                    }
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some(ref mut heading) = title {
                        heading.push_str(&text);
                    }
                }
                _ => {}
            }
        }

        None
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies byte-range replacements to `content`. Ranges must not overlap.
pub fn apply_replacements(content: &str, mut replacements: Vec<(Range<usize>, String)>) -> String {
    replacements.sort_by_key(|(range, _)| std::cmp::Reverse(range.start));

    let mut result = content.to_string();
    for (range, replacement) in replacements {
        result.replace_range(range, &replacement);
    }

    result
}

fn scan_html(
    document: &Path,
    content: &str,
    range: Range<usize>,
    references: &mut Vec<ImageReference>,
) {
    let html = &content[range.clone()];

    for captures in IMG_SRC.captures_iter(html) {
        let Some(src) = captures.get(1).or_else(|| captures.get(2)) else {
            continue;
        };

        if src.as_str().is_empty() {
            continue;
        }

        let span = range.start + src.start()..range.start + src.end();
        references.push(ImageReference {
            raw: src.as_str().to_string(),
            document: document.to_path_buf(),
            line: line_of(content, span.start),
            syntax: ImageSyntax::Html,
            span,
        });
    }
}

fn locate_destination(content: &str, image: &Range<usize>, dest: &str) -> Option<Range<usize>> {
    let slice = &content[image.clone()];
    let open = slice.find("](")? + 2;
    let offset = slice[open..].find(dest)?;
    let start = image.start + open + offset;

    Some(start..start + dest.len())
}

fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}
