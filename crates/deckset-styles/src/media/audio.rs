//! Inline audio players.

use deckset_config::AudioConfig;
use tracing::debug;

use super::MediaElement;
use crate::html::{find_attribute, parse_attributes};
use crate::splice::Splices;

/// Playback flags that can be requested through the `alt` text.
const PLAYBACK_FLAGS: [&str; 3] = ["autoplay", "loop", "muted"];

/// Inject playback attributes into inline audio tags.
///
/// `autoplay`, `loop` and `muted` listed in an audio tag's `alt` become
/// boolean attributes, placed right after `controls`. Every tag gets a
/// `controlsList` attribute. Attributes already present are not repeated,
/// so running this twice changes nothing.
///
/// `audios` must be the non-empty result of [`MediaKind::Audio`](super::MediaKind)`.find(content)`.
///
/// # Example
///
/// ```
/// use deckset_config::AudioConfig;
/// use deckset_styles::{MediaKind, process_audio};
///
/// let content = r#"<audio controls alt="autoplay loop" src="a.mp3"></audio>"#;
/// let audios = MediaKind::Audio.find(content);
///
/// assert_eq!(
///     process_audio(content, &audios, &AudioConfig::default()),
///     r#"<audio controls autoplay loop controlsList="nodownload" alt="autoplay loop" src="a.mp3"></audio>"#
/// );
/// ```
#[must_use]
pub fn process_audio(content: &str, audios: &[MediaElement], config: &AudioConfig) -> String {
    debug_assert!(!audios.is_empty(), "process_audio called without audio");
    if audios.is_empty() {
        debug!("No audio to process");
        return content.to_owned();
    }

    let mut splices = Splices::new();
    for audio in audios {
        if let Some((at, attributes)) = injection(content, audio, config) {
            splices.insert(at, attributes);
        }
    }
    splices.apply(content)
}

/// Offset and text of the attributes to add to one audio tag.
fn injection(content: &str, audio: &MediaElement, config: &AudioConfig) -> Option<(usize, String)> {
    // Attribute text sits between `<audio` and the closing `>`.
    let attrs_start = audio.open_tag.start + "<audio".len();
    let attrs_text = &content[attrs_start..audio.open_tag.end - 1];
    let attrs = parse_attributes(attrs_text);

    let requested: Vec<&str> = audio
        .alt
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .collect();

    let mut added = String::new();
    for flag in PLAYBACK_FLAGS {
        if requested.contains(&flag) && find_attribute(&attrs, flag).is_none() {
            added.push(' ');
            added.push_str(flag);
        }
    }
    if find_attribute(&attrs, "controlsList").is_none() {
        added.push_str(" controlsList=\"");
        added.push_str(&config.controls_list);
        added.push('"');
    }

    if added.is_empty() {
        return None;
    }

    let offset = match find_attribute(&attrs, "controls") {
        Some(controls) => controls.span.end,
        None => attrs_text.trim_end().len(),
    };
    Some((attrs_start + offset, added))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaKind;
    use pretty_assertions::assert_eq;

    fn process(content: &str) -> String {
        let audios = MediaKind::Audio.find(content);
        process_audio(content, &audios, &AudioConfig::default())
    }

    #[test]
    fn test_autoplay_and_loop_injected_once() {
        let output = process(r#"<audio controls alt="autoplay loop" src="a.mp3"></audio>"#);
        assert_eq!(
            output,
            r#"<audio controls autoplay loop controlsList="nodownload" alt="autoplay loop" src="a.mp3"></audio>"#
        );
        assert_eq!(output.matches(" autoplay").count(), 1);
        assert_eq!(output.matches("controlsList").count(), 1);
    }

    #[test]
    fn test_no_flags_only_controls_list() {
        let output = process(r#"<audio controls alt="" src="a.mp3"></audio>"#);
        assert_eq!(
            output,
            r#"<audio controls controlsList="nodownload" alt="" src="a.mp3"></audio>"#
        );
    }

    #[test]
    fn test_without_controls_appends_at_end() {
        let output = process(r#"<audio alt="muted" src="a.mp3" ></audio>"#);
        assert_eq!(
            output,
            r#"<audio alt="muted" src="a.mp3" muted controlsList="nodownload" ></audio>"#
        );
    }

    #[test]
    fn test_reprocessing_is_idempotent() {
        let once = process(r#"<audio controls alt="autoplay, muted" src="a.mp3"></audio>"#);
        let twice = process(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_every_audio_tag_processed() {
        let output = process(
            "<audio controls alt=\"loop\" src=\"a.mp3\"></audio>\n<audio controls src=\"b.mp3\"></audio>",
        );
        assert_eq!(
            output,
            "<audio controls loop controlsList=\"nodownload\" alt=\"loop\" src=\"a.mp3\"></audio>\n\
             <audio controls controlsList=\"nodownload\" src=\"b.mp3\"></audio>"
        );
    }

    #[test]
    fn test_custom_controls_list() {
        let content = r#"<audio controls src="a.mp3"></audio>"#;
        let audios = MediaKind::Audio.find(content);
        let config = AudioConfig {
            controls_list: "nodownload noplaybackrate".to_owned(),
        };
        assert_eq!(
            process_audio(content, &audios, &config),
            r#"<audio controls controlsList="nodownload noplaybackrate" src="a.mp3"></audio>"#
        );
    }
}
