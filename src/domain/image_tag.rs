//! `<img src="URL"/>` 形式の画像タグを扱うモジュール。
//!
//! 認識するのはこの1つの形だけで、Markdownの `![](...)` 記法や
//! 属性が追加されたHTMLタグは対象外。

use regex::Regex;
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

/// 画像タグのパターン。URLは非貪欲マッチで取り出す。
static IMG_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img src="(.*?)"/>"#).expect("valid image tag pattern"));

/// URLから拡張子が得られなかった場合に使う拡張子。
pub const DEFAULT_EXTENSION: &str = ".jpg";

/// 本文中で見つかった1つの画像タグ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference<'a> {
    /// タグ全体（`<img src="..."/>`）
    pub tag: &'a str,
    /// タグ全体のバイト範囲
    pub span: Range<usize>,
    /// `src` 属性の中身
    pub url: &'a str,
}

impl ImageReference<'_> {
    /// URLがホスト識別文字列を含むかどうか。
    pub fn is_hosted_on(&self, host_marker: &str) -> bool {
        self.url.contains(host_marker)
    }
}

/// 本文中の画像タグを出現順に列挙する。
pub fn find_image_tags(content: &str) -> impl Iterator<Item = ImageReference<'_>> {
    IMG_TAG_PATTERN.captures_iter(content).filter_map(|caps| {
        let whole = caps.get(0)?;
        let url = caps.get(1)?;
        Some(ImageReference {
            tag: whole.as_str(),
            span: whole.range(),
            url: url.as_str(),
        })
    })
}

/// ローカルパスを指す画像タグを組み立てる。
pub fn render_image_tag(src: &Path) -> String {
    format!(r#"<img src="{}"/>"#, src.display())
}

/// URLから保存用の拡張子（先頭の `.` を含む）を求める。
///
/// クエリ文字列（最初の `?` 以降）は無視し、最後の `/` より後ろの部分から
/// 最後の `.` 以降を拡張子とする。`.` が無ければ `.jpg`。
pub fn extension_from_url(url: &str) -> &str {
    let without_query = url.split('?').next().unwrap_or(url);
    let last_segment = without_query
        .rsplit('/')
        .next()
        .unwrap_or(without_query);
    match last_segment.rfind('.') {
        // 末尾が `.` だけの場合も `.` をそのまま拡張子にする
        Some(idx) => &last_segment[idx..],
        None => DEFAULT_EXTENSION,
    }
}

/// 保存先のファイル名 `{base_name}-{occurrence}{extension}` を組み立てる。
pub fn local_file_name(base_name: &str, occurrence: usize, url: &str) -> String {
    format!("{}-{}{}", base_name, occurrence, extension_from_url(url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_find_image_tags_in_order() {
        let content = concat!(
            "# title\n",
            r#"<img src="https://x.noedgeai.com/a.png"/>"#,
            "\ntext\n",
            r#"<img src="https://example.com/b.gif"/>"#,
        );

        let tags: Vec<_> = find_image_tags(content).collect();

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].url, "https://x.noedgeai.com/a.png");
        assert_eq!(tags[0].tag, r#"<img src="https://x.noedgeai.com/a.png"/>"#);
        assert_eq!(&content[tags[0].span.clone()], tags[0].tag);
        assert_eq!(tags[1].url, "https://example.com/b.gif");
    }

    #[test]
    fn test_capture_is_non_greedy() {
        let content = r#"<img src="a.png"/> and <img src="b.png"/>"#;
        let urls: Vec<_> = find_image_tags(content).map(|t| t.url).collect();
        assert_eq!(urls, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_other_image_syntaxes_are_ignored() {
        let content = concat!(
            "![alt](https://x.noedgeai.com/a.png)\n",
            r#"<img src="https://x.noedgeai.com/a.png" />"#,
            "\n",
            r#"<img alt="x" src="https://x.noedgeai.com/a.png"/>"#,
            "\n",
            r#"<img src="https://x.noedgeai.com/a.png">"#,
        );
        assert_eq!(find_image_tags(content).count(), 0);
    }

    #[test]
    fn test_is_hosted_on() {
        let content = r#"<img src="https://cdn.noedgeai.com/1.png"/>"#;
        let tag = find_image_tags(content).next().unwrap();
        assert!(tag.is_hosted_on("noedgeai.com"));
        assert!(!tag.is_hosted_on("example.com"));
    }

    #[test]
    fn test_extension_from_url() {
        assert_eq!(extension_from_url("https://x.noedgeai.com/a.png"), ".png");
        assert_eq!(extension_from_url("https://x.noedgeai.com/a.PNG?x=1"), ".PNG");
        assert_eq!(extension_from_url("https://x.noedgeai.com/b?format=jpg"), ".jpg");
        assert_eq!(extension_from_url("https://x.noedgeai.com/img/b.webp?a=1.png"), ".webp");
        assert_eq!(extension_from_url("https://x.noedgeai.com/archive.tar.gz"), ".gz");
    }

    /// 拡張子がない場合は .jpg になる
    #[test]
    fn test_extension_defaults_to_jpg() {
        assert_eq!(extension_from_url("https://x.noedgeai.com/b"), ".jpg");
        // ドメイン部分のドットは拡張子として扱わない
        assert_eq!(extension_from_url("https://x.noedgeai.com/"), ".jpg");
        assert_eq!(extension_from_url(""), ".jpg");
    }

    #[test]
    fn test_trailing_dot_is_kept_as_extension() {
        assert_eq!(extension_from_url("https://x.noedgeai.com/name."), ".");
        assert_eq!(local_file_name("doc", 4, "https://x.noedgeai.com/name.?v=1"), "doc-4.");
    }

    #[test]
    fn test_local_file_name() {
        assert_eq!(
            local_file_name("doc", 1, "https://x.noedgeai.com/a.png"),
            "doc-1.png"
        );
        assert_eq!(
            local_file_name("doc", 2, "https://x.noedgeai.com/b?format=jpg"),
            "doc-2.jpg"
        );
    }

    #[test]
    fn test_render_image_tag() {
        let path = PathBuf::from("/pics/doc-1.png");
        assert_eq!(render_image_tag(&path), r#"<img src="/pics/doc-1.png"/>"#);
    }
}
