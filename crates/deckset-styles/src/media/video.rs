//! Background videos.

use tracing::debug;

use super::{MediaElement, MediaKind, MediaOutput, strip_elements};

/// Promote an inline video to the slide background.
///
/// A single video with an empty `alt` becomes the `background-video` data
/// attribute, sized to fit. Unless the first video is marked `inline`, every
/// recognized video is removed from the content.
///
/// `videos` must be the non-empty result of [`MediaKind::Video`]`.find(content)`.
#[must_use]
pub fn process_videos(content: &str, videos: &[MediaElement]) -> MediaOutput {
    debug_assert!(!videos.is_empty(), "process_videos called without videos");
    let mut output = MediaOutput::unchanged(content);
    let Some(first) = videos.first() else {
        debug!("No videos to process");
        return output;
    };

    if let [video] = videos
        && video.alt.is_empty()
    {
        output.set_data("background-video", &video.src);
        output.set_data("background-size", "contain");
    }

    if first.alt != "inline" {
        output.content = strip_elements(&output.content, MediaKind::Video);
    }

    output
}
