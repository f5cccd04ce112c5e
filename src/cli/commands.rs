//! CLI command definitions and handlers.
//!
//! Each subcommand is implemented as a function that takes the parsed arguments
//! and returns an `anyhow::Result<()>`.

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::config;
use crate::error::Error;
use crate::model::{AlbumRecord, ArtistRecord, SourceTag, TrackRecord, format_duration};
use crate::search::SearchAggregator;

/// SoundSeek CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Search for tracks across all configured providers
    Search {
        /// Search term
        term: String,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Search for tracks by tag/genre
    Tag {
        /// Tag name (e.g. "jazz", "lofi")
        tag: String,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Search for artists
    Artists {
        /// Search term
        term: String,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Search for albums
    Albums {
        /// Search term
        term: String,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List an artist's top tracks
    ArtistTracks {
        /// Artist record id (e.g. "j_12345")
        artist_id: String,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List an artist's albums
    ArtistAlbums {
        /// Artist record id
        artist_id: String,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List the tracks of an album in play order
    AlbumTracks {
        /// Album record id (e.g. "ja_6789")
        album_id: String,
    },
    /// Resolve a track's stream reference into a playable URL
    Resolve {
        /// Source provider name (youtube, jamendo, workers, itunes)
        source: String,
        /// Provider-native track id
        id: String,
        /// Mirror base URL to try first
        #[arg(short, long)]
        mirror: Option<String>,
    },
    /// Fetch lyrics for a track
    Lyrics {
        /// Artist name
        artist: String,
        /// Track title
        title: String,
    },
    /// Write a default config file to the OS config directory
    InitConfig,
}

/// Run the parsed CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    if let Commands::InitConfig = cli.command {
        return cmd_init_config();
    }

    let rt = Runtime::new()?;
    let config = config::load();
    let default_limit = config.search.default_limit;
    let aggregator = SearchAggregator::from_config(&config);

    match &cli.command {
        Commands::Search { term, limit } => rt.block_on(async {
            let tracks = aggregator.search(term, limit.unwrap_or(default_limit)).await;
            print_tracks(&tracks);
        }),
        Commands::Tag { tag, limit } => rt.block_on(async {
            let tracks = aggregator
                .search_by_tag(tag, limit.unwrap_or(default_limit))
                .await;
            print_tracks(&tracks);
        }),
        Commands::Artists { term, limit } => rt.block_on(async {
            let artists = aggregator
                .search_artists(term, limit.unwrap_or(default_limit))
                .await;
            print_artists(&artists);
        }),
        Commands::Albums { term, limit } => rt.block_on(async {
            let albums = aggregator
                .search_albums(term, limit.unwrap_or(default_limit))
                .await;
            print_albums(&albums);
        }),
        Commands::ArtistTracks { artist_id, limit } => rt.block_on(async {
            let tracks = aggregator
                .artist_top_tracks(artist_id, limit.unwrap_or(default_limit))
                .await;
            print_tracks(&tracks);
        }),
        Commands::ArtistAlbums { artist_id, limit } => rt.block_on(async {
            let albums = aggregator
                .artist_albums(artist_id, limit.unwrap_or(default_limit))
                .await;
            print_albums(&albums);
        }),
        Commands::AlbumTracks { album_id } => rt.block_on(async {
            let tracks = aggregator.album_tracks(album_id).await;
            print_tracks(&tracks);
        }),
        Commands::Resolve { source, id, mirror } => {
            let tag: SourceTag = source.parse().map_err(Error::InvalidInput)?;
            let url = rt
                .block_on(aggregator.resolve_stream(tag, id, mirror.as_deref()))
                .map_err(Error::Provider)?;
            println!("{url}");
        }
        Commands::Lyrics { artist, title } => rt.block_on(async {
            match aggregator.get_lyrics(artist, title).await {
                Some(lyrics) => println!("{lyrics}"),
                None => println!("No lyrics found for {artist} - {title}"),
            }
        }),
        Commands::InitConfig => unreachable!("handled above"),
    }

    Ok(())
}

fn cmd_init_config() -> anyhow::Result<()> {
    let config = config::Config::default();
    config::save(&config).map_err(Error::Config)?;
    match config::config_path() {
        Some(path) => println!("Wrote default config to {}", path.display()),
        None => println!("Wrote default config"),
    }
    Ok(())
}

// ============================================================================
// Output formatting
// ============================================================================

fn print_tracks(tracks: &[TrackRecord]) {
    if tracks.is_empty() {
        println!("No results.");
        return;
    }
    for track in tracks {
        let duration = format_duration(track.duration_seconds);
        let album = if track.album_name.is_empty() {
            String::new()
        } else {
            format!(" [{}]", track.album_name)
        };
        println!(
            "{:<14} {:>6}  {} - {}{}",
            track.id, duration, track.artist_name, track.title, album
        );
    }
}

fn print_artists(artists: &[ArtistRecord]) {
    if artists.is_empty() {
        println!("No results.");
        return;
    }
    for artist in artists {
        println!("{:<14} {}", artist.id, artist.name);
    }
}

fn print_albums(albums: &[AlbumRecord]) {
    if albums.is_empty() {
        println!("No results.");
        return;
    }
    for album in albums {
        let year = if album.release_date.is_empty() {
            String::new()
        } else {
            format!(" ({})", album.release_date)
        };
        println!("{:<14} {} - {}{}", album.id, album.artist_name, album.name, year);
    }
}
