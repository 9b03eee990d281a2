//! cinephilix - movie, TV and people catalog CLI and terminal browser.

/// Application configuration (TOML).
mod config;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_dir, resolve_config_path};
use cinephilix_api::catalog::{
    API_URL_ENV, CatalogApi, CatalogClient, PageRequest, PeopleSearchParams, PeopleSortField,
    Person, RangeFilter, SearchPage, SortOrder, Title, TitleSearchParams, TitleSortField,
    TitleType,
};
use cinephilix_tui::PageKind;
use cinephilix_tui::detail::{TabResult, load_title_details};
use cinephilix_tui::format;

/// Log file written while the browser owns the terminal.
const BROWSE_LOG_FILE: &str = "cinephilix.log";

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "cinephilix", about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Query titles (movies, series, episodes).
    Titles(TitlesCommand),
    /// Query people.
    People(PeopleCommand),
    /// Browse the catalog interactively.
    Browse(BrowseArgs),
    /// Print shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the `titles` subcommand.
#[derive(clap::Args)]
struct TitlesCommand {
    /// Titles subcommand to run.
    #[command(subcommand)]
    command: TitlesSubcommands,
}

/// Available titles subcommands.
#[derive(Subcommand)]
enum TitlesSubcommands {
    /// List titles page by page.
    List(TitlesListArgs),
    /// Get a single title by id or IMDb id.
    Get(TitlesGetArgs),
    /// Search titles with filters.
    Search(TitlesSearchArgs),
    /// List the cast of a title.
    Cast(IdArgs),
    /// List the crew of a title.
    Crew(IdArgs),
    /// List the reviews of a title.
    Reviews(IdArgs),
    /// Load cast, crew and reviews of a title at once.
    Details(IdArgs),
}

/// Arguments for the `people` subcommand.
#[derive(clap::Args)]
struct PeopleCommand {
    /// People subcommand to run.
    #[command(subcommand)]
    command: PeopleSubcommands,
}

/// Available people subcommands.
#[derive(Subcommand)]
enum PeopleSubcommands {
    /// Search people with filters.
    Search(PeopleSearchArgs),
    /// Get a single person by id.
    Get(IdArgs),
}

/// Arguments for subcommands taking a backend id.
#[derive(clap::Args)]
struct IdArgs {
    /// Backend id.
    id: String,
}

/// Arguments for the `titles list` subcommand.
#[derive(clap::Args)]
struct TitlesListArgs {
    /// Page number (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Titles per page (default: config or 20).
    #[arg(long)]
    page_size: Option<u32>,
}

/// Arguments for the `titles get` subcommand.
#[derive(clap::Args)]
struct TitlesGetArgs {
    /// Backend id.
    #[arg(required_unless_present = "imdb_id", conflicts_with = "imdb_id")]
    id: Option<String>,
    /// IMDb identifier (e.g. "tt1375666").
    #[arg(long)]
    imdb_id: Option<String>,
}

/// Arguments for the `titles search` subcommand.
#[derive(clap::Args)]
struct TitlesSearchArgs {
    /// Free-text query.
    #[arg(short, long)]
    query: Option<String>,
    /// Title type (movie, tvSeries, tvEpisode, tvMiniSeries, tvSpecial, short, documentary).
    #[arg(long = "type")]
    title_type: Option<TitleType>,
    /// Genres, comma-separated (e.g. "Drama,Crime").
    #[arg(long, value_delimiter = ',')]
    genres: Vec<String>,
    /// Earliest start year.
    #[arg(long)]
    start_year: Option<u32>,
    /// Latest start year.
    #[arg(long)]
    end_year: Option<u32>,
    /// Average rating range, "MIN..MAX" on a 0-10 scale (e.g. "7..10").
    #[arg(long)]
    rating: Option<RangeFilter<f64>>,
    /// Adult content filter.
    #[arg(long)]
    adult: Option<bool>,
    /// Runtime range in minutes, "MIN..MAX".
    #[arg(long)]
    runtime: Option<RangeFilter<u32>>,
    /// Original language code.
    #[arg(long)]
    language: Option<String>,
    /// Sort field (weighted, rating, votes, title, year, runtime).
    #[arg(long)]
    sort: Option<TitleSortField>,
    /// Sort order (asc, desc).
    #[arg(long, default_value_t = SortOrder::Desc)]
    order: SortOrder,
    /// Page number (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Results per page (default: config or 20).
    #[arg(long)]
    limit: Option<u32>,
}

impl TitlesSearchArgs {
    /// Builds the backend filter record.
    fn to_params(&self, default_limit: u32) -> TitleSearchParams {
        TitleSearchParams {
            search: self.query.clone(),
            title_type: self.title_type,
            genres: self.genres.iter().cloned().collect(),
            start_year: self.start_year,
            end_year: self.end_year,
            rating_range: self.rating,
            is_adult: self.adult,
            runtime_range: self.runtime,
            language: self.language.clone(),
            sort_by: self.sort,
            sort_order: self.order,
            page: self.page,
            limit: self.limit.unwrap_or(default_limit),
        }
    }
}

/// Arguments for the `people search` subcommand.
#[derive(clap::Args)]
struct PeopleSearchArgs {
    /// Free-text query.
    #[arg(short, long)]
    query: Option<String>,
    /// Profession (actor, actress, director, writer, producer).
    #[arg(long)]
    profession: Option<String>,
    /// Birth year range, "MIN..MAX".
    #[arg(long)]
    birth_year: Option<RangeFilter<u32>>,
    /// Sort field (popularity, name, birth-year).
    #[arg(long)]
    sort: Option<PeopleSortField>,
    /// Sort order (asc, desc).
    #[arg(long, default_value_t = SortOrder::Desc)]
    order: SortOrder,
    /// Page number (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Results per page (default: config or 20).
    #[arg(long)]
    limit: Option<u32>,
}

impl PeopleSearchArgs {
    /// Builds the backend filter record.
    fn to_params(&self, default_limit: u32) -> PeopleSearchParams {
        PeopleSearchParams {
            search: self.query.clone(),
            profession: self.profession.clone(),
            birth_year_range: self.birth_year,
            sort_by: self.sort,
            sort_order: self.order,
            page: self.page,
            limit: self.limit.unwrap_or(default_limit),
        }
    }
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Page to open first (explore, movies, tv, people).
    #[arg(default_value_t = PageKind::Explore)]
    page: PageKind,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    shell: Shell,
}

/// Loads the config file for `dir`.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    AppConfig::load(&path)
}

/// Builds a `CatalogClient` from config and the `CINEPHILIX_API_URL` environment variable.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_client(config: &AppConfig) -> Result<CatalogClient> {
    let env_url = std::env::var(API_URL_ENV).ok();
    let base_url = config.base_url(env_url.as_deref())?;
    tracing::debug!(%base_url, "using catalog API");

    let mut builder = CatalogClient::builder()
        .base_url(base_url)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().context("failed to build API client")
}

/// Renders an optional value, `-` when absent.
fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| String::from("-"), |v| v.to_string())
}

/// Logs one title as a tab-separated row.
fn log_title_row(title: &Title) {
    tracing::info!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        title.id,
        title.title_type,
        or_dash(title.start_year),
        title
            .rating
            .map_or_else(|| String::from("-"), |r| format::rating(r.average_rating)),
        title.primary_title,
        title.genres.join(","),
    );
}

/// Logs one person as a tab-separated row.
fn log_person_row(person: &Person) {
    tracing::info!(
        "{}\t{}\t{}\t{}",
        person.id,
        person.primary_name,
        format::life_span(person.birth_year, person.death_year),
        person.primary_profession.join(","),
    );
}

/// Logs the paging footer of a search response.
fn log_page_footer<T>(page: &SearchPage<T>) {
    tracing::info!(
        "Page {}/{} ({} results)",
        page.page,
        page.last_page(),
        format::thousands(page.total)
    );
}

/// Runs the `titles list` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_titles_list(args: &TitlesListArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_client(&config)?;
    let page = PageRequest::new(args.page, args.page_size.unwrap_or_else(|| config.page_size()));

    let result = client
        .list_titles(&page)
        .await
        .context("failed to list titles")?;

    tracing::info!("ID\tType\tYear\tRating\tTitle\tGenres");
    for title in &result.items {
        log_title_row(title);
    }
    log_page_footer(&result);

    Ok(())
}

/// Runs the `titles get` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_titles_get(args: &TitlesGetArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_client(&config)?;

    let title = match (&args.imdb_id, &args.id) {
        (Some(tconst), _) => client
            .title_by_imdb_id(tconst)
            .await
            .with_context(|| format!("failed to fetch title {tconst}"))?,
        (None, Some(id)) => client
            .title(id)
            .await
            .with_context(|| format!("failed to fetch title {id}"))?,
        (None, None) => anyhow::bail!("either <ID> or --imdb-id is required"),
    };

    tracing::info!("ID: {}", title.id);
    tracing::info!("IMDb: {}", title.tconst.as_deref().unwrap_or("-"));
    tracing::info!("Title: {}", title.primary_title);
    if let Some(ref original) = title.original_title
        && *original != title.primary_title
    {
        tracing::info!("Original Title: {original}");
    }
    tracing::info!("Type: {}", title.title_type.label());
    tracing::info!(
        "Years: {}",
        format::year_span(title.start_year, title.end_year)
    );
    if let Some(minutes) = title.runtime_minutes {
        tracing::info!("Runtime: {}", format::runtime(minutes));
    }
    tracing::info!("Genres: {}", title.genres.join(", "));
    match title.rating {
        Some(r) => tracing::info!(
            "Rating: {} {} ({} votes)",
            format::stars(r.average_rating),
            format::rating(r.average_rating),
            format::thousands(r.num_votes)
        ),
        None => tracing::info!("Rating: -"),
    }
    if !title.principals.is_empty() {
        let names: Vec<&str> = title.principals.iter().map(|p| p.name.as_str()).collect();
        tracing::info!("Starring: {}", names.join(", "));
    }
    if let Some(ref plot) = title.plot {
        tracing::info!("Plot: {plot}");
    }
    if let Some(ref poster) = title.poster_url {
        tracing::info!("Poster: {poster}");
    }

    Ok(())
}

/// Runs the `titles search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_titles_search(args: &TitlesSearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_client(&config)?;
    let params = args.to_params(config.page_size());

    let page = client
        .search_titles(&params)
        .await
        .context("title search request failed")?;

    tracing::info!("ID\tType\tYear\tRating\tTitle\tGenres");
    for title in &page.items {
        log_title_row(title);
    }
    log_page_footer(&page);

    Ok(())
}

/// Logs a cast tab.
fn log_cast(cast: &TabResult<cinephilix_api::catalog::CastMember>) {
    match cast {
        Ok(members) if members.is_empty() => tracing::info!("  (no cast information)"),
        Ok(members) => {
            for m in members {
                tracing::info!(
                    "  {}\t{}",
                    m.name,
                    m.character.as_deref().unwrap_or("-")
                );
            }
        }
        Err(message) => tracing::warn!("  cast unavailable: {message}"),
    }
}

/// Logs a crew tab.
fn log_crew(crew: &TabResult<cinephilix_api::catalog::CrewMember>) {
    match crew {
        Ok(members) if members.is_empty() => tracing::info!("  (no crew information)"),
        Ok(members) => {
            for m in members {
                tracing::info!("  {}\t{}\t{}", m.name, m.job, m.department);
            }
        }
        Err(message) => tracing::warn!("  crew unavailable: {message}"),
    }
}

/// Logs a reviews tab.
fn log_reviews(reviews: &TabResult<cinephilix_api::catalog::Review>) {
    match reviews {
        Ok(items) if items.is_empty() => tracing::info!("  No reviews yet."),
        Ok(items) => {
            for r in items {
                tracing::info!(
                    "  {}\t{:.1}/5\t{}\t{}",
                    r.author,
                    r.rating,
                    format::review_date(&r.created_at),
                    r.content
                );
            }
        }
        Err(message) => tracing::warn!("  reviews unavailable: {message}"),
    }
}

/// Which single detail list `titles cast|crew|reviews` prints.
#[derive(Clone, Copy)]
enum DetailList {
    Cast,
    Crew,
    Reviews,
}

/// Runs the `titles cast`, `titles crew` and `titles reviews` subcommands.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_titles_detail_list(
    args: &IdArgs,
    list: DetailList,
    dir: Option<&PathBuf>,
) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_client(&config)?;
    let id = args.id.as_str();

    match list {
        DetailList::Cast => {
            let cast = client
                .title_cast(id)
                .await
                .with_context(|| format!("failed to fetch cast of {id}"))?;
            tracing::info!("Cast ({}):", cast.len());
            log_cast(&Ok(cast));
        }
        DetailList::Crew => {
            let crew = client
                .title_crew(id)
                .await
                .with_context(|| format!("failed to fetch crew of {id}"))?;
            tracing::info!("Crew ({}):", crew.len());
            log_crew(&Ok(crew));
        }
        DetailList::Reviews => {
            let reviews = client
                .title_reviews(id)
                .await
                .with_context(|| format!("failed to fetch reviews of {id}"))?;
            tracing::info!("Reviews ({}):", reviews.len());
            log_reviews(&Ok(reviews));
        }
    }

    Ok(())
}

/// Runs the `titles details` subcommand.
///
/// A failing sub-request is reported in its own section; the others still print.
///
/// # Errors
///
/// Returns an error if the client fails to build.
#[instrument(skip_all)]
async fn run_titles_details(args: &IdArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_client(&config)?;

    let details = load_title_details(&client, &args.id).await;

    tracing::info!("Cast:");
    log_cast(&details.cast);
    tracing::info!("Crew:");
    log_crew(&details.crew);
    tracing::info!("Reviews:");
    log_reviews(&details.reviews);

    Ok(())
}

/// Runs the `people search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_people_search(args: &PeopleSearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_client(&config)?;
    let params = args.to_params(config.page_size());

    let page = client
        .search_people(&params)
        .await
        .context("people search request failed")?;

    tracing::info!("ID\tName\tYears\tProfessions");
    for person in &page.items {
        log_person_row(person);
    }
    log_page_footer(&page);

    Ok(())
}

/// Runs the `people get` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_people_get(args: &IdArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_client(&config)?;

    let person = client
        .person(&args.id)
        .await
        .with_context(|| format!("failed to fetch person {}", args.id))?;

    tracing::info!("ID: {}", person.id);
    tracing::info!("Name: {}", person.primary_name);
    tracing::info!(
        "Years: {}",
        format::life_span(person.birth_year, person.death_year)
    );
    tracing::info!("Professions: {}", person.primary_profession.join(", "));
    if let Some(ref profile) = person.profile_url {
        tracing::info!("Profile: {profile}");
    }
    tracing::info!("Known for:");
    for known in &person.known_for_titles {
        tracing::info!("  {}\t{}", or_dash(known.start_year), known.primary_title);
    }

    Ok(())
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(args: &BrowseArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_client(&config)?;
    let options = config.browser_options(args.page);

    tracing::info!(page = %args.page, "launching browser");
    cinephilix_tui::run_browser(Arc::new(client), options)
        .await
        .context("catalog browser TUI failed")
}

/// Writes shell completions to stdout.
fn run_completions(args: &CompletionsArgs) {
    let mut command = Cli::command();
    clap_complete::generate(args.shell, &mut command, "cinephilix", &mut std::io::stdout());
}

/// Chooses where log output goes.
///
/// The browser owns the terminal, so its logs go to a file in the config
/// directory. Everything else logs to stdout.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
fn log_writer(cli: &Cli) -> Result<(BoxMakeWriter, bool)> {
    if !matches!(cli.command, Commands::Browse(_)) {
        return Ok((BoxMakeWriter::new(std::io::stdout), true));
    }
    let log_dir = resolve_config_dir(cli.dir.as_ref())?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create directory {}", log_dir.display()))?;
    let path = log_dir.join(BROWSE_LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    Ok((BoxMakeWriter::new(Mutex::new(file)), false))
}

/// Initializes the tracing subscriber.
///
/// # Errors
///
/// Returns an error if the log writer cannot be set up.
fn init_tracing(cli: &Cli) -> Result<()> {
    let (writer, ansi) = log_writer(cli)?;

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions(ref args) = cli.command {
        run_completions(args);
        return Ok(());
    }

    init_tracing(&cli)?;

    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Titles(cmd) => match cmd.command {
            TitlesSubcommands::List(args) => run_titles_list(&args, dir).await,
            TitlesSubcommands::Get(args) => run_titles_get(&args, dir).await,
            TitlesSubcommands::Search(args) => run_titles_search(&args, dir).await,
            TitlesSubcommands::Cast(args) => {
                run_titles_detail_list(&args, DetailList::Cast, dir).await
            }
            TitlesSubcommands::Crew(args) => {
                run_titles_detail_list(&args, DetailList::Crew, dir).await
            }
            TitlesSubcommands::Reviews(args) => {
                run_titles_detail_list(&args, DetailList::Reviews, dir).await
            }
            TitlesSubcommands::Details(args) => run_titles_details(&args, dir).await,
        },
        Commands::People(cmd) => match cmd.command {
            PeopleSubcommands::Search(args) => run_people_search(&args, dir).await,
            PeopleSubcommands::Get(args) => run_people_get(&args, dir).await,
        },
        Commands::Browse(args) => run_browse(&args, dir).await,
        Commands::Completions(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        // Arrange & Act & Assert
        Cli::command().debug_assert();
    }

    #[test]
    fn test_titles_search_args_to_params() {
        // Arrange
        let cli = Cli::try_parse_from([
            "cinephilix",
            "titles",
            "search",
            "--type",
            "movie",
            "--rating",
            "7..10",
            "--sort",
            "weighted",
            "--genres",
            "Drama,Crime",
            "--limit",
            "8",
        ])
        .unwrap();
        let Commands::Titles(TitlesCommand {
            command: TitlesSubcommands::Search(args),
        }) = cli.command
        else {
            panic!("expected titles search");
        };

        // Act
        let params = args.to_params(20);

        // Assert
        let expected = TitleSearchParams::default()
            .title_type(TitleType::Movie)
            .genre("Drama")
            .genre("Crime")
            .rating_range(7.0, 10.0)
            .sort(TitleSortField::WeightedRating, SortOrder::Desc)
            .page(1, 8);
        assert_eq!(params, expected);
    }

    #[test]
    fn test_people_search_args_default_limit() {
        // Arrange
        let cli = Cli::try_parse_from([
            "cinephilix",
            "people",
            "search",
            "-q",
            "nolan",
            "--sort",
            "name",
            "--order",
            "asc",
        ])
        .unwrap();
        let Commands::People(PeopleCommand {
            command: PeopleSubcommands::Search(args),
        }) = cli.command
        else {
            panic!("expected people search");
        };

        // Act
        let params = args.to_params(12);

        // Assert
        assert_eq!(
            params,
            PeopleSearchParams::new("nolan")
                .sort(PeopleSortField::Name, SortOrder::Asc)
                .page(1, 12)
        );
    }

    #[test]
    fn test_browse_page_argument() {
        // Arrange & Act
        let cli = Cli::try_parse_from(["cinephilix", "browse", "tv"]).unwrap();

        // Assert
        let Commands::Browse(args) = cli.command else {
            panic!("expected browse");
        };
        assert_eq!(args.page, PageKind::TvShows);
    }

    #[test]
    fn test_titles_get_requires_id_or_imdb_id() {
        // Arrange & Act
        let result = Cli::try_parse_from(["cinephilix", "titles", "get"]);

        // Assert
        assert!(result.is_err());
    }
}
