use tabled::Table;

use crate::{
    info,
    types::{Album, AlbumTableRow, Artist, ArtistTableRow, Page, TrackTableRow},
    utils,
};

use super::{Context, present, spinner};

pub(crate) fn artist_row(artist: &Artist) -> ArtistTableRow {
    ArtistTableRow {
        name: artist.name.clone(),
        genres: artist
            .genres
            .iter()
            .flatten()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(","),
        followers: artist
            .followers
            .as_ref()
            .map(|f| f.total.to_string())
            .unwrap_or_default(),
    }
}

fn print_albums(title: &str, albums: Option<Page<Album>>) {
    let Some(albums) = albums.filter(|p| !p.items.is_empty()) else {
        return;
    };

    info!("{}", title);
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

pub async fn album(ctx: &Context, album_id: String) {
    let pb = spinner("Fetching album...");
    let album = present(ctx.client.album_by_id(ctx.session(), &album_id).await, "album");
    pb.finish_and_clear();

    let Some(album) = album else { return };

    info!(
        "{} by {} ({})",
        album.name,
        utils::artist_names(&album.artists),
        album.release_date
    );
    if let Some(tracks) = album.tracks {
        let rows: Vec<TrackTableRow> = tracks.items.iter().map(utils::track_row).collect();
        println!("{}", Table::new(rows));
    }
}

pub async fn artist(ctx: &Context, artist_id: String) {
    let pb = spinner("Fetching discography...");
    let discography = ctx
        .client
        .artist_discography(ctx.session(), &artist_id)
        .await;
    pb.finish_and_clear();

    match &discography.artist {
        Some(artist) => println!("{}", Table::new(vec![artist_row(artist)])),
        None => info!("Artist details unavailable."),
    }

    if let Some(tracks) = discography.top_tracks.filter(|t| !t.is_empty()) {
        info!("Popular");
        let rows: Vec<TrackTableRow> = tracks.iter().map(utils::track_row).collect();
        println!("{}", Table::new(rows));
    }

    print_albums("Albums", discography.albums);
    print_albums("Singles", discography.singles);
    print_albums("Appears On", discography.appears_on);
    print_albums("Compilations", discography.compilations);

    if let Some(related) = discography.related_artists.filter(|a| !a.is_empty()) {
        info!("Fans also like");
        let rows: Vec<ArtistTableRow> = related.iter().map(artist_row).collect();
        println!("{}", Table::new(rows));
    }
}

/// Shows a track and makes it the current one; optionally lists similar tracks.
pub async fn track(ctx: &Context, track_id: String, recommend: bool) {
    let pb = spinner("Fetching track...");
    let track = present(ctx.client.track_by_id(ctx.session(), &track_id).await, "track");
    pb.finish_and_clear();

    let Some(track) = track else { return };
    ctx.store.set_current_track(track);

    let Some(current) = ctx.store.current_track() else {
        return;
    };
    println!("{}", Table::new(vec![utils::track_row(&current)]));
    if let Some(preview) = current.preview_url.as_deref() {
        info!("Preview: {}", preview);
    }

    if !recommend {
        return;
    }

    let pb = spinner("Fetching recommendations...");
    let tracks = present(
        ctx.client
            .track_recommendations(ctx.session(), &current.id)
            .await,
        "recommendations",
    );
    pb.finish_and_clear();

    if let Some(tracks) = tracks {
        info!("Recommended");
        let rows: Vec<TrackTableRow> = tracks.iter().map(utils::track_row).collect();
        println!("{}", Table::new(rows));
    }
}
