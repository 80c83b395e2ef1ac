//! Song tile — pure renderer for a single recommended song.
//!
//! A song missing its name or artist produces no output at all: no
//! placeholder, no error, nothing.

use melody_proto::song::Song;
use ratatui::{
    style::Modifier,
    text::{Line, Span},
};

use crate::theme::{style_default, style_secondary, style_selected_focused, C_SELECTION_BG};

/// The text content of a tile: `(name, artist)`, or `None` for a song that
/// must not be rendered.
pub fn tile_text(song: &Song) -> Option<(&str, &str)> {
    song.is_renderable()
        .then(|| (song.name.as_str(), song.artist.as_str()))
}

/// The two rendered lines of a tile: name above, artist below.
pub fn tile_lines(song: &Song, selected: bool, focused: bool) -> Option<[Line<'_>; 2]> {
    let (name, artist) = tile_text(song)?;

    let marker = if selected { "▌ " } else { "  " };
    let mut name_style = style_default().add_modifier(Modifier::BOLD);
    let mut artist_style = style_secondary();
    if selected && focused {
        name_style = style_selected_focused();
        artist_style = artist_style.bg(C_SELECTION_BG);
    }

    Some([
        Line::from(vec![
            Span::styled(marker, name_style),
            Span::styled(name, name_style),
        ]),
        Line::from(vec![
            Span::styled(marker, artist_style),
            Span::styled(artist, artist_style),
        ]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(name: &str, artist: &str) -> Song {
        Song {
            id: "1".to_string(),
            name: name.to_string(),
            artist: artist.to_string(),
        }
    }

    #[test]
    fn complete_song_renders_name_and_artist() {
        let s = song("Song A", "Artist X");
        assert_eq!(tile_text(&s), Some(("Song A", "Artist X")));

        let lines = tile_lines(&s, false, false).unwrap();
        assert_eq!(lines[0].spans[1].content.as_ref(), "Song A");
        assert_eq!(lines[1].spans[1].content.as_ref(), "Artist X");
    }

    #[test]
    fn incomplete_song_renders_nothing() {
        assert_eq!(tile_text(&song("", "Artist X")), None);
        assert_eq!(tile_text(&song("Song A", "")), None);
        assert!(tile_lines(&song("", ""), false, false).is_none());
    }
}
