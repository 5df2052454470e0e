//! Track model

use super::artist::{Artist, Role};
use serde::{Deserialize, Serialize};

/// One audio track of an album
///
/// `(disc, number)` is unique within the owning album. `path` is relative to
/// the album folder and always uses `/` separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default = "default_disc")]
    pub disc: u32,
    pub number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub path: Option<String>,
}

fn default_disc() -> u32 {
    1
}

impl Track {
    pub fn new(disc: u32, number: u32, title: impl Into<String>) -> Self {
        Self {
            disc,
            number,
            title: title.into(),
            artists: Vec::new(),
            path: None,
        }
    }

    pub fn with_artist(mut self, artist: Artist) -> Self {
        self.artists.push(artist);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Pairing key used to align actual and reference tracks
    pub fn key(&self) -> (u32, u32) {
        (self.disc, self.number)
    }

    pub fn artists_with_role(&self, role: Role) -> impl Iterator<Item = &Artist> {
        self.artists.iter().filter(move |a| a.role == role)
    }

    pub fn composers(&self) -> impl Iterator<Item = &Artist> {
        self.artists_with_role(Role::Composer)
    }

    pub fn performers(&self) -> impl Iterator<Item = &Artist> {
        self.artists.iter().filter(|a| a.is_performer())
    }

    pub fn has_performer(&self) -> bool {
        self.performers().next().is_some()
    }

    /// Final path segment, if the track has a path
    pub fn file_name(&self) -> Option<&str> {
        self.path
            .as_deref()
            .map(|p| p.rsplit('/').next().unwrap_or(p))
    }

    /// Directory segments of the path, excluding the file name
    pub fn directories(&self) -> Vec<&str> {
        match self.path.as_deref() {
            Some(p) => {
                let mut segments: Vec<&str> = p.split('/').filter(|s| !s.is_empty()).collect();
                segments.pop();
                segments
            }
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_and_directories() {
        let track = Track::new(2, 3, "Adagio").with_path("CD2/03 - Adagio.flac");
        assert_eq!(track.file_name(), Some("03 - Adagio.flac"));
        assert_eq!(track.directories(), vec!["CD2"]);
        assert_eq!(track.key(), (2, 3));

        let flat = Track::new(1, 1, "Allegro").with_path("01 - Allegro.flac");
        assert_eq!(flat.file_name(), Some("01 - Allegro.flac"));
        assert!(flat.directories().is_empty());
    }

    #[test]
    fn test_performers_exclude_composer_and_arranger() {
        let track = Track::new(1, 1, "Chaconne")
            .with_artist(Artist::composer("Johann Sebastian Bach"))
            .with_artist(Artist::arranger("Ferruccio Busoni"))
            .with_artist(Artist::soloist("Hélène Grimaud"));
        let names: Vec<_> = track.performers().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Hélène Grimaud"]);
        assert_eq!(track.composers().count(), 1);
    }

    #[test]
    fn test_disc_defaults_to_one() {
        let track: Track = serde_json::from_str(r#"{"number": 4, "title": "Rondo"}"#).unwrap();
        assert_eq!(track.disc, 1);
        assert!(track.artists.is_empty());
    }
}
