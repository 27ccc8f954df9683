//! Applies the reorder engine to a playlists document

use super::config::{ShuffleConfig, ShuffleMode};
use super::display::display_playlist;
use crate::model::{Location, Playlist, PlaylistDocument};
use crate::reorder::reorder;
use crate::rhythmbox::save_playlists;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rand::Rng;
use std::io::Write;
use std::path::Path;

/// Upper bound (exclusive) of the random number in a copy's name
const NAME_SUFFIX_RANGE: u32 = 1 << 24;

/// Main shuffle pipeline
pub struct ShufflePipeline {
    config: ShuffleConfig,
}

/// What a run changed
#[derive(Debug, Clone, Default)]
pub struct ShuffleSummary {
    pub playlists: Vec<ShuffledPlaylist>,
}

/// One playlist produced or modified by a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffledPlaylist {
    pub name: String,
    pub tracks: usize,

    /// True for a newly appended copy, false for an in-place reorder
    pub created: bool,
}

impl ShuffleSummary {
    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }
}

impl ShufflePipeline {
    pub fn new(config: ShuffleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ShuffleConfig {
        &self.config
    }

    /// Run against a document, dated today
    ///
    /// `out` receives the display report, if enabled.
    pub fn run<R: Rng + ?Sized, W: Write>(
        &self,
        document: &mut PlaylistDocument,
        rng: &mut R,
        out: &mut W,
    ) -> Result<ShuffleSummary> {
        let today = chrono::Local::now().date_naive();
        self.run_on(document, today, rng, out)
    }

    /// Run against a document, then save it to `output` if given
    ///
    /// The file is only written once the run has succeeded.
    pub fn run_and_save<R: Rng + ?Sized, W: Write>(
        &self,
        document: &mut PlaylistDocument,
        rng: &mut R,
        out: &mut W,
        output: Option<&Path>,
    ) -> Result<ShuffleSummary> {
        let summary = self.run(document, rng, out)?;
        match output {
            Some(path) => save_playlists(document, path)?,
            None => log::info!("No output path given, nothing written"),
        }
        Ok(summary)
    }

    /// Run against a document with an explicit date for copy names
    pub fn run_on<R: Rng + ?Sized, W: Write>(
        &self,
        document: &mut PlaylistDocument,
        date: NaiveDate,
        rng: &mut R,
        out: &mut W,
    ) -> Result<ShuffleSummary> {
        log::info!(
            "Reordering ({:?}): shuffle folders={}, shuffle within folder={}",
            self.config.mode,
            self.config.options.shuffle_groups,
            self.config.options.shuffle_within_group
        );

        let summary = match self.config.mode {
            ShuffleMode::Copy => self.shuffle_copy(document, date, rng, out)?,
            ShuffleMode::InPlace => self.shuffle_in_place(document, rng, out)?,
        };

        if summary.is_empty() {
            log::warn!("No static playlist found, document left unchanged");
        }
        Ok(summary)
    }

    /// Append a reordered copy of the first static playlist
    fn shuffle_copy<R: Rng + ?Sized, W: Write>(
        &self,
        document: &mut PlaylistDocument,
        date: NaiveDate,
        rng: &mut R,
        out: &mut W,
    ) -> Result<ShuffleSummary> {
        let mut summary = ShuffleSummary::default();

        let Some(source) = document.first_static() else {
            return Ok(summary);
        };
        display_playlist(source, self.config.display, out)?;

        let mut copy = source.clone();
        copy.set_locations(self.reordered_locations(source, rng)?);
        copy.set_name(shuffled_name(source.name(), date, rng));

        log::info!(
            "Created '{}' from '{}' ({} tracks)",
            copy.name(),
            source.name(),
            copy.len()
        );
        summary.playlists.push(ShuffledPlaylist {
            name: copy.name().to_string(),
            tracks: copy.len(),
            created: true,
        });
        document.add_playlist(copy);

        Ok(summary)
    }

    /// Reorder every static playlist where it stands
    ///
    /// Nothing is written back into the document unless every playlist
    /// reorders successfully.
    fn shuffle_in_place<R: Rng + ?Sized, W: Write>(
        &self,
        document: &mut PlaylistDocument,
        rng: &mut R,
        out: &mut W,
    ) -> Result<ShuffleSummary> {
        let mut reordered: Vec<Vec<Location>> = Vec::new();
        for playlist in document.playlists().iter().filter(|p| p.is_static()) {
            display_playlist(playlist, self.config.display, out)?;
            reordered.push(self.reordered_locations(playlist, rng)?);
        }

        let mut summary = ShuffleSummary::default();
        for (playlist, locations) in document.static_playlists_mut().zip(reordered) {
            playlist.set_locations(locations);

            log::info!("Reordered '{}' ({} tracks)", playlist.name(), playlist.len());
            summary.playlists.push(ShuffledPlaylist {
                name: playlist.name().to_string(),
                tracks: playlist.len(),
                created: false,
            });
        }

        Ok(summary)
    }

    fn reordered_locations<R: Rng + ?Sized>(
        &self,
        playlist: &Playlist,
        rng: &mut R,
    ) -> Result<Vec<Location>> {
        reorder(playlist.locations(), self.config.options, rng)
            .with_context(|| format!("Failed to reorder playlist '{}'", playlist.name()))
    }
}

/// Name for a reordered copy: `<base>_SHUFFLED_<YYYY-MM-DD>_<n>`, with `n`
/// random in `[0, 2^24)`
pub fn shuffled_name<R: Rng + ?Sized>(base: &str, date: NaiveDate, rng: &mut R) -> String {
    let suffix = rng.random_range(0..NAME_SUFFIX_RANGE);
    format!("{}_SHUFFLED_{}_{}", base, date.format("%Y-%m-%d"), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reorder::ReorderOptions;
    use crate::shuffle::DisplayLevel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io;

    fn document() -> PlaylistDocument {
        let mut doc = PlaylistDocument::new();
        doc.add_playlist(Playlist::from_attributes(vec![
            ("name".into(), "Smart".into()),
            ("type".into(), "automatic".into()),
        ]));

        let mut first = Playlist::new("First");
        for raw in ["/m/B/2.mp3", "/m/A/1.mp3", "/m/B/1.mp3"] {
            first.add_location(Location::new(raw));
        }
        doc.add_playlist(first);

        let mut second = Playlist::new("Second");
        for raw in ["/x/z.mp3", "/x/a.mp3"] {
            second.add_location(Location::new(raw));
        }
        doc.add_playlist(second);
        doc
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_copy_mode_appends_renamed_copy() {
        let mut doc = document();
        let pipeline = ShufflePipeline::new(ShuffleConfig::new(ReorderOptions::sorted()));
        let mut rng = StdRng::seed_from_u64(11);

        let summary = pipeline.run_on(&mut doc, date(), &mut rng, &mut io::sink()).unwrap();

        assert_eq!(doc.playlist_count(), 4);
        let copy = &doc.playlists()[3];
        assert!(copy.name().starts_with("First_SHUFFLED_2024-03-09_"));
        assert_eq!(
            copy.locations(),
            &[
                Location::new("/m/A/1.mp3"),
                Location::new("/m/B/1.mp3"),
                Location::new("/m/B/2.mp3"),
            ]
        );
        // The source playlist is untouched
        assert_eq!(doc.playlists()[1].locations()[0], Location::new("/m/B/2.mp3"));

        assert_eq!(summary.playlists.len(), 1);
        assert!(summary.playlists[0].created);
        assert_eq!(summary.playlists[0].tracks, 3);
    }

    #[test]
    fn test_in_place_mode_reorders_every_static_playlist() {
        let mut doc = document();
        let config = ShuffleConfig::new(ReorderOptions::sorted()).with_mode(ShuffleMode::InPlace);
        let pipeline = ShufflePipeline::new(config);
        let mut rng = StdRng::seed_from_u64(12);

        let summary = pipeline.run_on(&mut doc, date(), &mut rng, &mut io::sink()).unwrap();

        assert_eq!(doc.playlist_count(), 3);
        assert_eq!(doc.playlists()[1].locations()[0], Location::new("/m/A/1.mp3"));
        assert_eq!(doc.playlists()[2].locations()[0], Location::new("/x/a.mp3"));
        let names: Vec<&str> = summary.playlists.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_no_static_playlist_leaves_document_alone() {
        let mut doc = PlaylistDocument::new();
        doc.add_playlist(Playlist::from_attributes(vec![("type".into(), "queue".into())]));
        let pipeline = ShufflePipeline::new(ShuffleConfig::default());
        let mut rng = StdRng::seed_from_u64(13);

        let summary = pipeline.run(&mut doc, &mut rng, &mut io::sink()).unwrap();

        assert!(summary.is_empty());
        assert_eq!(doc.playlist_count(), 1);
    }

    #[test]
    fn test_decode_failure_fails_the_run() {
        let mut doc = PlaylistDocument::new();
        let mut bad = Playlist::new("Bad");
        bad.add_location(Location::new("file:///m/%zz.mp3"));
        doc.add_playlist(bad);
        let pipeline = ShufflePipeline::new(ShuffleConfig::default());
        let mut rng = StdRng::seed_from_u64(14);

        let err = pipeline.run(&mut doc, &mut rng, &mut io::sink()).unwrap_err();

        assert!(format!("{:#}", err).contains("Bad"));
        assert_eq!(doc.playlist_count(), 1);
    }

    #[test]
    fn test_display_only_for_visited_playlist() {
        let mut doc = document();
        let config = ShuffleConfig::new(ReorderOptions::shuffled())
            .with_display(DisplayLevel::Summary);
        let mut out = Vec::new();
        let mut rng = StdRng::seed_from_u64(15);

        ShufflePipeline::new(config)
            .run_on(&mut doc, date(), &mut rng, &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("===").count(), 1);
        assert!(text.contains("Name: First\n"));
    }

    #[test]
    fn test_failed_in_place_run_leaves_document_unchanged() {
        let mut doc = PlaylistDocument::new();
        let mut good = Playlist::new("Good");
        good.add_location(Location::new("/b/1.mp3"));
        good.add_location(Location::new("/a/1.mp3"));
        doc.add_playlist(good);
        let mut bad = Playlist::new("Bad");
        bad.add_location(Location::new("/m/%zz.mp3"));
        doc.add_playlist(bad);

        let config = ShuffleConfig::new(ReorderOptions::sorted()).with_mode(ShuffleMode::InPlace);
        let mut rng = StdRng::seed_from_u64(17);
        let result = ShufflePipeline::new(config).run_on(&mut doc, date(), &mut rng, &mut io::sink());

        assert!(result.is_err());
        assert_eq!(
            doc.playlists()[0].locations(),
            &[Location::new("/b/1.mp3"), Location::new("/a/1.mp3")]
        );
    }

    #[test]
    fn test_copy_mode_skips_untyped_playlist() {
        let mut doc = PlaylistDocument::new();
        let mut untyped = Playlist::from_attributes(vec![("name".into(), "NoType".into())]);
        untyped.add_location(Location::new("/m/a.mp3"));
        doc.add_playlist(untyped);
        let mut real = Playlist::new("Real");
        real.add_location(Location::new("/m/b.mp3"));
        doc.add_playlist(real);

        let mut rng = StdRng::seed_from_u64(18);
        let summary = ShufflePipeline::new(ShuffleConfig::default())
            .run_on(&mut doc, date(), &mut rng, &mut io::sink())
            .unwrap();

        assert!(summary.playlists[0].name.starts_with("Real_SHUFFLED_"));
        assert_eq!(doc.playlist_count(), 3);
    }

    #[test]
    fn test_shuffled_name_format() {
        let mut rng = StdRng::seed_from_u64(16);
        let name = shuffled_name("Mix", date(), &mut rng);

        let suffix = name.strip_prefix("Mix_SHUFFLED_2024-03-09_").unwrap();
        let n: u32 = suffix.parse().unwrap();
        assert!(n < NAME_SUFFIX_RANGE);
    }
}
