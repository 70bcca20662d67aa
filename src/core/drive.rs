//! Google Drive share links.
//!
//! Drive serves small files directly from `uc?id=...`, but large ones behind
//! an HTML "can't scan this file for viruses" page. The page carries a form
//! (or, on older pages, a link) with a confirm token that yields the file.

use reqwest::Url;

const DRIVE_HOSTS: &[&str] = &[
    "drive.google.com",
    "docs.google.com",
    "drive.usercontent.google.com",
];

/// Extracts the file id from any of the common Drive link shapes:
/// `/file/d/<id>/view`, `/open?id=<id>` and `/uc?id=<id>`.
pub fn file_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    if !DRIVE_HOSTS.contains(&host) {
        return None;
    }

    let segments: Vec<&str> = parsed.path_segments()?.collect();
    if let Some(pos) = segments.iter().position(|s| *s == "d") {
        if segments.get(pos.saturating_sub(1)) == Some(&"file") {
            if let Some(id) = segments.get(pos + 1).filter(|id| !id.is_empty()) {
                return Some(id.to_string());
            }
        }
    }

    parsed
        .query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}

/// Rewrites a Drive share link into a direct download link. Other URLs are
/// returned unchanged.
pub fn direct_url(url: &str) -> String {
    match file_id(url) {
        Some(id) => format!("https://drive.google.com/uc?id={id}&export=download"),
        None => url.to_string(),
    }
}

/// Finds the confirmed download link in a Drive interstitial page.
pub fn confirm_url(html: &str, file_id: &str) -> Option<String> {
    if let Some(url) = download_form_url(html) {
        return Some(url);
    }

    let token = legacy_confirm_token(html)?;
    Some(format!(
        "https://drive.google.com/uc?id={file_id}&export=download&confirm={token}"
    ))
}

fn download_form_url(html: &str) -> Option<String> {
    let form_start = html.find("id=\"download-form\"")?;
    let tag_start = html[..form_start].rfind("<form")?;
    let form_end = html[tag_start..]
        .find("</form>")
        .map(|i| tag_start + i)
        .unwrap_or(html.len());
    let form = &html[tag_start..form_end];

    let tag_end = form.find('>')?;
    let action = attr(&form[..tag_end], "action")?;

    let mut params = Vec::new();
    let mut rest = &form[tag_end..];
    while let Some(start) = rest.find("<input") {
        let input = &rest[start..];
        let end = input.find('>').unwrap_or(input.len());
        let tag = &input[..end];
        if let (Some(name), Some(value)) = (attr(tag, "name"), attr(tag, "value")) {
            params.push((decode_entities(name), decode_entities(value)));
        }
        rest = &input[end..];
    }

    let url = Url::parse_with_params(&decode_entities(action), &params).ok()?;
    Some(url.to_string())
}

fn legacy_confirm_token(html: &str) -> Option<String> {
    let start = html.find("confirm=")? + "confirm=".len();
    let token: String = html[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

fn attr<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!(" {name}=\"");
    let start = tag.find(&needle)? + needle.len();
    let end = tag[start..].find('"')?;
    Some(&tag[start..start + end])
}

fn decode_entities(value: &str) -> String {
    value
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_id_from_link_shapes() {
        assert_eq!(
            file_id("https://drive.google.com/uc?id=1Kh9aYL7hehGDQpy8EuJzvDFxoyOikHeM"),
            Some("1Kh9aYL7hehGDQpy8EuJzvDFxoyOikHeM".to_string())
        );
        assert_eq!(
            file_id("https://drive.google.com/file/d/abc_DEF-123/view?usp=sharing"),
            Some("abc_DEF-123".to_string())
        );
        assert_eq!(
            file_id("https://drive.google.com/open?id=xyz"),
            Some("xyz".to_string())
        );
        assert_eq!(file_id("https://example.com/uc?id=xyz"), None);
        assert_eq!(file_id("not a url"), None);
    }

    #[test]
    fn test_direct_url() {
        assert_eq!(
            direct_url("https://drive.google.com/file/d/abc/view"),
            "https://drive.google.com/uc?id=abc&export=download"
        );
        assert_eq!(
            direct_url("https://example.com/img.zip"),
            "https://example.com/img.zip"
        );
    }

    #[test]
    fn test_confirm_url_from_download_form() {
        let html = r#"<html><body>
<p>Google Drive can't scan this file for viruses.</p>
<form id="download-form" action="https://drive.usercontent.google.com/download" method="get">
<input type="submit" id="uc-download-link" class="goog-inline-block" value="Download anyway"/>
<input type="hidden" name="id" value="abc">
<input type="hidden" name="export" value="download">
<input type="hidden" name="confirm" value="t">
<input type="hidden" name="uuid" value="1234-5678">
</form></body></html>"#;

        assert_eq!(
            confirm_url(html, "abc").as_deref(),
            Some("https://drive.usercontent.google.com/download?id=abc&export=download&confirm=t&uuid=1234-5678")
        );
    }

    #[test]
    fn test_confirm_url_from_legacy_link() {
        let html = r#"<a id="uc-download-link" href="/uc?export=download&amp;confirm=Xy_9&amp;id=abc">Download anyway</a>"#;
        assert_eq!(
            confirm_url(html, "abc").as_deref(),
            Some("https://drive.google.com/uc?id=abc&export=download&confirm=Xy_9")
        );
    }

    #[test]
    fn test_confirm_url_missing() {
        assert_eq!(confirm_url("<html>Quota exceeded</html>", "abc"), None);
    }
}
