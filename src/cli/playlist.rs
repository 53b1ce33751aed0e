use tabled::Table;

use crate::{info, types::TrackTableRow, utils, warning};

use super::{Context, present, spinner};

pub async fn playlist(ctx: &Context, playlist_id: String) {
    let pb = spinner("Fetching playlist...");
    let playlist = present(
        ctx.client.playlist_by_id(ctx.session(), &playlist_id).await,
        "playlist",
    );
    pb.finish_and_clear();

    let Some(playlist) = playlist else { return };

    info!(
        "{} by {} ({} tracks)",
        playlist.name,
        playlist
            .owner
            .display_name
            .as_deref()
            .unwrap_or(&playlist.owner.id),
        playlist.tracks.total
    );
    if let Some(description) = playlist.description.as_deref().filter(|d| !d.is_empty()) {
        info!("{}", description);
    }
    if playlist.tracks.next.is_some() {
        warning!(
            "Only {} of {} tracks could be loaded.",
            playlist.tracks.items.len(),
            playlist.tracks.total
        );
    }

    let rows: Vec<TrackTableRow> = playlist
        .tracks
        .items
        .iter()
        .filter_map(|item| item.track.as_ref())
        .map(utils::track_row)
        .collect();
    println!("{}", Table::new(rows));
}
