use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use spotdeck::{
    cli::{self, Context, LibraryKind},
    config, error,
    types::{SearchType, TopItemType},
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in with Spotify
    Auth,

    /// Show the signed-in user
    Whoami,

    /// List new album releases
    Releases,

    /// List browse categories, or the playlists of one category
    Categories(CategoriesOptions),

    /// Search the catalog
    Search(SearchOptions),

    /// Show a playlist with all of its tracks
    Playlist(IdOption),

    /// Show an album and its tracks
    Album(IdOption),

    /// Show an artist's discography
    Artist(IdOption),

    /// Show a track
    Track(TrackOptions),

    /// Recently played tracks
    Recent(LimitOption),

    /// Your top artists or tracks
    Top(TopOptions),

    /// Your liked songs, albums, followed artists or playlists
    Library(LibraryOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CategoriesOptions {
    /// Category to list playlists for
    #[clap(long)]
    pub id: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Search terms
    pub query: String,

    /// What to search for: all, artist, album, track or playlist
    #[clap(long = "type", default_value = "all")]
    pub search_type: SearchType,

    /// Results per type
    #[clap(long, default_value_t = 5)]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct IdOption {
    /// Spotify ID
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct TrackOptions {
    /// Spotify track ID
    pub id: String,

    /// Also list similar tracks
    #[clap(long)]
    pub recommend: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct LimitOption {
    #[clap(long, default_value_t = 50)]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct TopOptions {
    /// artists or tracks
    pub item_type: TopItemType,

    /// short_term, medium_term or long_term
    #[clap(long, default_value = "short_term")]
    pub time_range: String,

    #[clap(long, default_value_t = 50)]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct LibraryOptions {
    /// songs, albums, artists or playlists
    pub kind: LibraryKind,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }
    init_tracing();

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let ctx = Context::load().await;

    match cli.command {
        Command::Auth => cli::auth(&ctx).await,
        Command::Whoami => cli::whoami(&ctx).await,
        Command::Releases => cli::releases(&ctx).await,
        Command::Categories(opt) => cli::categories(&ctx, opt.id).await,
        Command::Search(opt) => cli::search(&ctx, opt.query, opt.search_type, opt.limit).await,
        Command::Playlist(opt) => cli::playlist(&ctx, opt.id).await,
        Command::Album(opt) => cli::album(&ctx, opt.id).await,
        Command::Artist(opt) => cli::artist(&ctx, opt.id).await,
        Command::Track(opt) => cli::track(&ctx, opt.id, opt.recommend).await,
        Command::Recent(opt) => cli::recent(&ctx, opt.limit).await,
        Command::Top(opt) => cli::top(&ctx, opt.item_type, opt.time_range, opt.limit).await,
        Command::Library(opt) => cli::library(&ctx, opt.kind).await,
        Command::Completions(_) => {}
    }
}
