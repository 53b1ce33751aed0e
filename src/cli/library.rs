use std::str::FromStr;

use tabled::Table;

use crate::{
    info,
    types::{AlbumTableRow, ArtistTableRow, PlaylistTableRow, TopItemType, TopItems, TrackTableRow},
    utils, warning,
};

use super::{Context, catalog::artist_row, present, spinner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryKind {
    Songs,
    Albums,
    Artists,
    Playlists,
}

impl FromStr for LibraryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "songs" | "tracks" => Ok(LibraryKind::Songs),
            "albums" => Ok(LibraryKind::Albums),
            "artists" => Ok(LibraryKind::Artists),
            "playlists" => Ok(LibraryKind::Playlists),
            other => Err(format!(
                "invalid library section '{}'. Allowed: songs, albums, artists, playlists",
                other
            )),
        }
    }
}

pub async fn recent(ctx: &Context, limit: u32) {
    let pb = spinner("Fetching recently played tracks...");
    let history = present(
        ctx.client.recently_played(ctx.session(), limit).await,
        "recently played tracks",
    );
    pb.finish_and_clear();

    if let Some(history) = history {
        let rows: Vec<TrackTableRow> = history
            .items
            .iter()
            .map(|h| utils::track_row(&h.track))
            .collect();
        println!("{}", Table::new(rows));
    }
}

pub async fn top(ctx: &Context, item_type: TopItemType, time_range: String, limit: u32) {
    let pb = spinner(&format!("Fetching top {}...", item_type));
    let items = present(
        ctx.client
            .top_items(ctx.session(), item_type, &time_range, limit)
            .await,
        "top items",
    );
    pb.finish_and_clear();

    match items {
        Some(TopItems::Artists(page)) => {
            let rows: Vec<ArtistTableRow> = page.items.iter().map(artist_row).collect();
            println!("{}", Table::new(rows));
        }
        Some(TopItems::Tracks(page)) => {
            let rows: Vec<TrackTableRow> = page.items.iter().map(utils::track_row).collect();
            println!("{}", Table::new(rows));
        }
        None => {}
    }
}

pub async fn library(ctx: &Context, kind: LibraryKind) {
    let pb = spinner("Fetching your library...");

    match kind {
        LibraryKind::Songs => {
            let songs = present(ctx.client.liked_songs(ctx.session()).await, "liked songs");
            pb.finish_and_clear();

            if let Some(songs) = songs {
                info!("{} liked songs", songs.total);
                if !songs.is_complete() {
                    warning!(
                        "Only {} of {} liked songs could be loaded.",
                        songs.items.len(),
                        songs.total
                    );
                }
                let rows: Vec<TrackTableRow> = songs.items.iter().map(utils::track_row).collect();
                println!("{}", Table::new(rows));
            }
        }
        LibraryKind::Albums => {
            let albums = present(ctx.client.liked_albums(ctx.session()).await, "liked albums");
            pb.finish_and_clear();

            if let Some(albums) = albums {
                let rows: Vec<AlbumTableRow> = albums
                    .into_iter()
                    .map(|a| AlbumTableRow {
                        date: a.release_date,
                        name: a.name,
                        artists: utils::artist_names(&a.artists),
                    })
                    .collect();
                println!("{}", Table::new(rows));
            }
        }
        LibraryKind::Artists => {
            let artists = present(
                ctx.client.liked_artists(ctx.session()).await,
                "followed artists",
            );
            pb.finish_and_clear();

            if let Some(mut artists) = artists {
                artists.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
                let rows: Vec<ArtistTableRow> = artists.iter().map(artist_row).collect();
                println!("{}", Table::new(rows));
            }
        }
        LibraryKind::Playlists => {
            let playlists = present(ctx.client.liked_playlists(ctx.session()).await, "playlists");
            pb.finish_and_clear();

            if let Some(playlists) = playlists {
                let rows: Vec<PlaylistTableRow> = playlists
                    .into_iter()
                    .map(|p| PlaylistTableRow {
                        id: p.id,
                        name: p.name,
                        owner: p.owner.display_name.unwrap_or(p.owner.id),
                        tracks: p.tracks.total,
                    })
                    .collect();
                println!("{}", Table::new(rows));
            }
        }
    }
}
