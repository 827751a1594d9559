//! Media-kind classification and display thumbnail derivation.
//!
//! The media host stores both images and videos behind the same upload call.
//! A video cannot be used directly as a list thumbnail, so its delivery URL is
//! rewritten to a frame-at-offset-zero still image using the host's URL
//! transform syntax.

use serde::{Deserialize, Serialize};

/// Video file extensions the still-image rewrite recognizes.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "m4v"];

/// The kind of an uploaded media object, stored as text on the media row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Parse the stored text form. Anything other than `video` is an image.
    pub fn from_stored(value: &str) -> MediaKind {
        if value == "video" {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

/// Classify an upload as image or video.
///
/// Video wins if either the source file's declared content type has a
/// `video/` prefix or the upload host reported a `video` resource type.
pub fn classify(content_type: Option<&str>, resource_type: Option<&str>) -> MediaKind {
    let declared_video = content_type.is_some_and(|ct| ct.starts_with("video/"));
    let reported_video = resource_type == Some("video");

    if declared_video || reported_video {
        MediaKind::Video
    } else {
        MediaKind::Image
    }
}

/// Rewrite a video delivery URL into a still-image thumbnail URL.
///
/// Inserts the host's frame-at-offset-zero transform (`so_0/`) after the
/// `/video/upload/` path segment and replaces a recognized video extension
/// with `.jpg`, preserving any query string. Returns `None` for URLs without
/// the `/video/upload/` segment.
pub fn video_still_url(url: &str) -> Option<String> {
    const SEGMENT: &str = "/video/upload/";

    if !url.contains(SEGMENT) {
        return None;
    }

    let rewritten = url.replacen(SEGMENT, "/video/upload/so_0/", 1);

    let (path, query) = match rewritten.find('?') {
        Some(idx) => rewritten.split_at(idx),
        None => (rewritten.as_str(), ""),
    };

    match path.rfind('.') {
        Some(dot) if VIDEO_EXTENSIONS.contains(&path[dot + 1..].to_lowercase().as_str()) => {
            Some(format!("{}.jpg{query}", &path[..dot]))
        }
        // Unrecognized extension: keep the transformed URL as-is.
        _ => Some(rewritten),
    }
}

/// Derive the display thumbnail for an outfit list entry.
///
/// Priority: (1) the legacy cover image, (2) the outfit's first media item
/// (rewritten to a still image when it is a video), (3) no thumbnail.
/// Returns `(thumb_url, thumb_kind)`.
pub fn derive_thumbnail(
    cover_image_url: Option<&str>,
    first_media: Option<(&str, MediaKind)>,
) -> (Option<String>, Option<MediaKind>) {
    if let Some(cover) = cover_image_url {
        return (Some(cover.to_string()), Some(MediaKind::Image));
    }

    match first_media {
        Some((url, MediaKind::Image)) => (Some(url.to_string()), Some(MediaKind::Image)),
        Some((url, MediaKind::Video)) => (video_still_url(url), Some(MediaKind::Video)),
        None => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_prefers_video_signals() {
        assert_eq!(classify(Some("video/mp4"), None), MediaKind::Video);
        assert_eq!(classify(Some("image/png"), Some("video")), MediaKind::Video);
        assert_eq!(classify(Some("image/jpeg"), Some("image")), MediaKind::Image);
        assert_eq!(classify(None, None), MediaKind::Image);
    }

    #[test]
    fn stored_form_round_trips() {
        assert_eq!(MediaKind::from_stored("video"), MediaKind::Video);
        assert_eq!(MediaKind::from_stored("image"), MediaKind::Image);
        assert_eq!(MediaKind::Video.as_str(), "video");
    }

    #[test]
    fn video_url_becomes_jpg_still() {
        let url = "https://res.example.com/demo/video/upload/v1/outfit.mp4";
        assert_eq!(
            video_still_url(url).as_deref(),
            Some("https://res.example.com/demo/video/upload/so_0/v1/outfit.jpg")
        );
    }

    #[test]
    fn query_string_is_preserved() {
        let url = "https://res.example.com/demo/video/upload/outfit.MOV?sig=abc";
        assert_eq!(
            video_still_url(url).as_deref(),
            Some("https://res.example.com/demo/video/upload/so_0/outfit.jpg?sig=abc")
        );
    }

    #[test]
    fn non_video_path_has_no_still() {
        let url = "https://res.example.com/demo/image/upload/outfit.jpg";
        assert_eq!(video_still_url(url), None);
    }

    #[test]
    fn unrecognized_extension_keeps_transform_only() {
        let url = "https://res.example.com/demo/video/upload/outfit.avi";
        assert_eq!(
            video_still_url(url).as_deref(),
            Some("https://res.example.com/demo/video/upload/so_0/outfit.avi")
        );
    }

    #[test]
    fn thumbnail_prefers_legacy_cover() {
        let (url, kind) = derive_thumbnail(
            Some("https://cdn.example.com/cover.jpg"),
            Some(("https://cdn.example.com/first.mp4", MediaKind::Video)),
        );
        assert_eq!(url.as_deref(), Some("https://cdn.example.com/cover.jpg"));
        assert_eq!(kind, Some(MediaKind::Image));
    }

    #[test]
    fn thumbnail_falls_back_to_first_media() {
        let (url, kind) = derive_thumbnail(
            None,
            Some(("https://cdn.example.com/first.png", MediaKind::Image)),
        );
        assert_eq!(url.as_deref(), Some("https://cdn.example.com/first.png"));
        assert_eq!(kind, Some(MediaKind::Image));

        let (url, kind) = derive_thumbnail(None, None);
        assert_eq!(url, None);
        assert_eq!(kind, None);
    }

    #[test]
    fn video_first_media_is_rewritten() {
        let (url, kind) = derive_thumbnail(
            None,
            Some((
                "https://res.example.com/demo/video/upload/fit.webm",
                MediaKind::Video,
            )),
        );
        assert_eq!(
            url.as_deref(),
            Some("https://res.example.com/demo/video/upload/so_0/fit.jpg")
        );
        assert_eq!(kind, Some(MediaKind::Video));
    }
}
