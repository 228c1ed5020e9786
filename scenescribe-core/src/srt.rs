//! SRT subtitle export and import
//!
//! Entries are blank-line separated: an index line, a
//! `HH:MM:SS,mmm --> HH:MM:SS,mmm` range line, then one or more text
//! lines. Import is tolerant: a malformed entry (bad timestamps,
//! non-positive duration, empty text) is dropped with a warning and
//! parsing continues with the next entry.

use log::warn;

use crate::scene::Scene;
use crate::timecode::{format_srt_timestamp, parse_srt_timestamp};

const RANGE_SEPARATOR: &str = "-->";

/// Render scenes as an SRT body, in timestamp order.
pub fn export(scenes: &[Scene]) -> String {
    let mut sorted: Vec<&Scene> = scenes.iter().collect();
    sorted.sort_by_key(|s| s.start_ms);

    let mut out = String::new();
    for (i, scene) in sorted.iter().enumerate() {
        out.push_str(&format!(
            "{}\n{} {} {}\n{}\n\n",
            i + 1,
            format_srt_timestamp(scene.start_ms),
            RANGE_SEPARATOR,
            format_srt_timestamp(scene.end_ms),
            scene.description,
        ));
    }
    out
}

/// Parse an SRT body into scenes, all marked `is_edited`.
pub fn import(body: &str) -> Vec<Scene> {
    let normalized = body.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .filter_map(parse_entry)
        .collect()
}

fn parse_entry(entry: &str) -> Option<Scene> {
    let mut lines = entry.lines().filter(|l| !l.trim().is_empty());
    let index_line = lines.next()?;
    if index_line.trim().parse::<usize>().is_err() {
        warn!("skipping SRT entry with bad index line: {index_line:?}");
        return None;
    }
    let range_line = lines.next()?;
    let Some((start_text, end_text)) = range_line.split_once(RANGE_SEPARATOR) else {
        warn!("skipping SRT entry with bad range line: {range_line:?}");
        return None;
    };
    let (Some(start_ms), Some(end_ms)) =
        (parse_srt_timestamp(start_text), parse_srt_timestamp(end_text))
    else {
        warn!("skipping SRT entry with unparsable timestamps: {range_line:?}");
        return None;
    };
    if end_ms <= start_ms {
        warn!("skipping SRT entry with non-positive duration: {range_line:?}");
        return None;
    }
    let text = lines.collect::<Vec<_>>().join("\n");
    if text.trim().is_empty() {
        warn!("skipping SRT entry with empty text at {start_ms} ms");
        return None;
    }

    let mut scene = Scene::new(start_ms, end_ms, text);
    scene.is_edited = true;
    Some(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_then_import_preserves_times_and_text() {
        let mut scenes = vec![
            Scene::new(0, 1_500, "first scene"),
            Scene::new(2_000, 3_250, "second scene\nwith a second line"),
        ];
        scenes.iter_mut().for_each(|s| s.is_edited = true);

        let round_tripped = import(&export(&scenes));
        assert_eq!(round_tripped.len(), scenes.len());
        for (original, imported) in scenes.iter().zip(&round_tripped) {
            assert_eq!(imported.start_ms, original.start_ms);
            assert_eq!(imported.end_ms, original.end_ms);
            assert_eq!(imported.description, original.description);
            assert!(imported.is_edited);
        }
    }

    #[test]
    fn malformed_entries_are_dropped_silently() {
        let body = "\
1
00:00:00,000 --> 00:00:01,000
good entry

2
00:00:05,000 --> 00:00:04,000
negative duration

not-an-index
00:00:06,000 --> 00:00:07,000
bad index

3
00:00:08,000 --> 00:00:09,000

";
        let scenes = import(body);
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].description, "good entry");
    }

    #[test]
    fn windows_line_endings_are_accepted() {
        let body = "1\r\n00:00:00,000 --> 00:00:01,000\r\nhello\r\n\r\n";
        let scenes = import(body);
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].description, "hello");
    }
}
