use tabled::Table;

use crate::{
    info,
    types::{AlbumTableRow, CategoryTableRow, PlaylistTableRow},
    utils,
};

use super::{Context, present, spinner};

pub async fn releases(ctx: &Context) {
    let pb = spinner("Fetching new releases...");
    let albums = present(ctx.client.new_releases(ctx.session()).await, "new releases");
    pb.finish_and_clear();

    let Some(albums) = albums else { return };
    if albums.is_empty() {
        info!("No new releases.");
        return;
    }

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

/// Lists all categories, or the playlists of one category.
pub async fn categories(ctx: &Context, category_id: Option<String>) {
    let pb = spinner("Fetching categories...");

    match category_id {
        Some(id) => {
            let category = present(
                ctx.client.category_by_id(ctx.session(), &id).await,
                "category",
            );
            let playlists = present(
                ctx.client.playlists_by_category(ctx.session(), &id).await,
                "category playlists",
            );
            pb.finish_and_clear();

            if let Some(category) = category {
                info!("{}", category.name);
            }
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
        None => {
            let categories = present(ctx.client.categories(ctx.session()).await, "categories");
            pb.finish_and_clear();

            if let Some(categories) = categories {
                let rows: Vec<CategoryTableRow> = categories
                    .into_iter()
                    .map(|c| CategoryTableRow {
                        id: c.id,
                        name: c.name,
                    })
                    .collect();
                println!("{}", Table::new(rows));
            }
        }
    }
}
