use tabled::Table;

use crate::{
    info,
    types::{AlbumTableRow, ArtistTableRow, PlaylistTableRow, SearchType, TrackTableRow},
    utils,
};

use super::{Context, present, spinner};

pub async fn search(ctx: &Context, query: String, search_type: SearchType, limit: u32) {
    ctx.store.set_search_query(query);

    let query = ctx.store.search_query();
    if query.trim().is_empty() {
        info!("Nothing to search for.");
        return;
    }

    let pb = spinner(&format!(
        "Searching {} for '{}'...",
        utils::search_filter_label(search_type),
        query
    ));
    let results = present(
        ctx.client
            .search(ctx.session(), search_type, &query, limit)
            .await,
        "search results",
    );
    pb.finish_and_clear();

    let Some(results) = results else { return };

    if let Some(tracks) = results.tracks.filter(|p| !p.items.is_empty()) {
        info!("Songs");
        let rows: Vec<TrackTableRow> = tracks.items.iter().map(utils::track_row).collect();
        println!("{}", Table::new(rows));
    }

    if let Some(albums) = results.albums.filter(|p| !p.items.is_empty()) {
        info!("Albums");
        let rows: Vec<AlbumTableRow> = albums
            .items
            .into_iter()
            .map(|a| AlbumTableRow {
                date: a.release_date,
                name: a.name,
                artists: utils::artist_names(&a.artists),
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    if let Some(artists) = results.artists.filter(|p| !p.items.is_empty()) {
        info!("Artists");
        let rows: Vec<ArtistTableRow> = artists.items.iter().map(super::catalog::artist_row).collect();
        println!("{}", Table::new(rows));
    }

    if let Some(playlists) = results.playlists {
        let rows: Vec<PlaylistTableRow> = playlists
            .items
            .into_iter()
            .flatten()
            .map(|p| PlaylistTableRow {
                id: p.id,
                name: p.name,
                owner: p.owner.display_name.unwrap_or(p.owner.id),
                tracks: p.tracks.total,
            })
            .collect();
        if !rows.is_empty() {
            info!("Playlists");
            println!("{}", Table::new(rows));
        }
    }
}
