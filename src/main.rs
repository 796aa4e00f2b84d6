mod error;
mod loader;
mod render;

use chronicle_types::{
    AuthorColumn, Catalog, Category, EndPolicy, EventColumn, SortOrder, Toggles, sorted_rows,
    visible_items,
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use loader::Resource;

#[derive(Parser)]
#[command(
    name = "chronicle",
    about = "Timeline, tables and detail views over the patristic authors/events data set"
)]
struct Cli {
    /// Authors collection: a file path or an http(s) URL
    #[arg(long, global = true, env = "CHRONICLE_AUTHORS", default_value = "data/auteurs.json")]
    authors: Resource,

    /// Events collection: a file path or an http(s) URL
    #[arg(long, global = true, env = "CHRONICLE_EVENTS", default_value = "data/evenements.json")]
    events: Resource,

    /// What to draw for a record with a start date but no end date
    #[arg(
        long,
        global = true,
        env = "CHRONICLE_END_POLICY",
        value_enum,
        default_value_t = EndPolicyArg::Point
    )]
    end_policy: EndPolicyArg,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print dated authors and events in chronological order
    Timeline {
        /// Show only these categories (greek, latin, other-language,
        /// council, heresy, political, other)
        #[arg(long, value_delimiter = ',')]
        only: Vec<Category>,
        /// Hide these categories
        #[arg(long, value_delimiter = ',')]
        hide: Vec<Category>,
        /// Emit the visible items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the author table (all authors, dated or not)
    Authors {
        #[arg(long, value_enum, default_value_t = AuthorSort::Name)]
        sort: AuthorSort,
        #[arg(long)]
        desc: bool,
    },
    /// Print the event table (all events, dated or not)
    Events {
        #[arg(long, value_enum, default_value_t = EventSort::Start)]
        sort: EventSort,
        #[arg(long)]
        desc: bool,
    },
    /// Show the detail view of an author or event id
    Show { id: String },
    /// Print collection counts
    Stats,
}

#[derive(Clone, Copy, ValueEnum)]
enum EndPolicyArg {
    Point,
    NextYear,
}

impl From<EndPolicyArg> for EndPolicy {
    fn from(p: EndPolicyArg) -> Self {
        match p {
            EndPolicyArg::Point => EndPolicy::Point,
            EndPolicyArg::NextYear => EndPolicy::NextYear,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum AuthorSort {
    Name,
    Birth,
    Death,
    Language,
}

impl From<AuthorSort> for AuthorColumn {
    fn from(s: AuthorSort) -> Self {
        match s {
            AuthorSort::Name => AuthorColumn::Name,
            AuthorSort::Birth => AuthorColumn::Birth,
            AuthorSort::Death => AuthorColumn::Death,
            AuthorSort::Language => AuthorColumn::Language,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum EventSort {
    Name,
    Type,
    Start,
    End,
    City,
}

impl From<EventSort> for EventColumn {
    fn from(s: EventSort) -> Self {
        match s {
            EventSort::Name => EventColumn::Name,
            EventSort::Type => EventColumn::Type,
            EventSort::Start => EventColumn::Start,
            EventSort::End => EventColumn::End,
            EventSort::City => EventColumn::City,
        }
    }
}

fn sort_order(desc: bool) -> SortOrder {
    if desc { SortOrder::Descending } else { SortOrder::Ascending }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so `--json` output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let catalog = loader::load_catalog(&cli.authors, &cli.events).await;
    let policy = EndPolicy::from(cli.end_policy);

    match cli.command {
        Some(Command::Timeline { only, hide, json }) => run_timeline(&catalog, policy, &only, &hide, json)?,
        Some(Command::Authors { sort, desc }) => run_authors(&catalog, sort.into(), sort_order(desc)),
        Some(Command::Events { sort, desc }) => run_events(&catalog, sort.into(), sort_order(desc)),
        Some(Command::Show { id }) => run_show(&catalog, &id),
        Some(Command::Stats) => run_stats(&catalog),
        None => run_timeline(&catalog, policy, &[], &[], false)?,
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
//  TIMELINE MODE
// ═══════════════════════════════════════════════════════════════════════

fn toggles_from_args(only: &[Category], hide: &[Category]) -> Toggles {
    let mut toggles = if only.is_empty() {
        Toggles::all()
    } else {
        only.iter().fold(Toggles::none(), |t, c| t.with(*c, true))
    };
    for c in hide {
        toggles.set(*c, false);
    }
    toggles
}

fn run_timeline(
    catalog: &Catalog,
    policy: EndPolicy,
    only: &[Category],
    hide: &[Category],
    json: bool,
) -> Result<(), serde_json::Error> {
    let items = catalog.timeline(policy);
    let toggles = toggles_from_args(only, hide);

    let mut visible: Vec<_> = visible_items(&items, &toggles).collect();
    visible.sort_by_key(|it| it.start);

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    print!("{}", render::timeline_lines(visible.iter().copied()));
    eprintln!(
        "\n{} of {} dated item(s) shown ({} record(s) without a usable date)",
        visible.len(),
        items.len(),
        catalog.authors().len() + catalog.events().len() - items.len()
    );
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
//  TABLE MODES
// ═══════════════════════════════════════════════════════════════════════

fn run_authors(catalog: &Catalog, column: AuthorColumn, order: SortOrder) {
    let rows = sorted_rows(catalog.authors(), column, order);
    print!("{}", render::table(&rows, &AuthorColumn::ALL));
}

fn run_events(catalog: &Catalog, column: EventColumn, order: SortOrder) {
    let rows = sorted_rows(catalog.events(), column, order);
    print!("{}", render::table(&rows, &EventColumn::ALL));
}

// ═══════════════════════════════════════════════════════════════════════
//  DETAIL MODE
// ═══════════════════════════════════════════════════════════════════════

/// Unknown ids print nothing.
fn run_show(catalog: &Catalog, id: &str) {
    if let Some(detail) = catalog.detail(id) {
        print!("{}", render::detail(&detail));
    }
}

fn run_stats(catalog: &Catalog) {
    let s = catalog.stats();
    println!("authors: {} ({} dated)", s.authors, s.dated_authors);
    println!("events:  {} ({} dated)", s.events, s.dated_events);
    if s.dangling_author_refs > 0 {
        println!("author ids referenced by events but missing: {}", s.dangling_author_refs);
    }
}
