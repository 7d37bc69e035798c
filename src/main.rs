//! issuefmt CLI entry point.
//!
//! Reads issues as API-shaped JSON and renders them for the terminal.

use clap::{Args, Parser, Subcommand};
use issuefmt::color::{strip_ansi, ColorAnnotator, ColorMode};
use issuefmt::config::{load_config, Config};
use issuefmt::error::{IssuefmtError, Result};
use issuefmt::format::{format_issue, format_issues, format_issues_header, RenderContext};
use issuefmt::model::{
    read_issues, AssigneeFilter, Issue, IssueFilter, IssueState, QueryParams, SortDirection,
};
use issuefmt::output::{print_error, print_lines, print_warning};
use issuefmt::signal::install_interrupt_handler;
use issuefmt::terminal::{LiveTerminal, TerminalMetrics};
use issuefmt::throbber::Throbber;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "issuefmt")]
#[command(
    version,
    about = "Render issue-tracker data for the terminal",
    after_help = "EXAMPLES:
    # List issues in one repository
    gh api repos/acme/widgets/issues | issuefmt list - --repo widgets

    # Cross-repository listing of issues assigned to you
    issuefmt list issues.json --user octocat

    # Show a single issue
    issuefmt show issues.json --number 42"
)]
struct Cli {
    /// Login of the current user (overrides `user` in the config file)
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// When to use colors: auto, always or never
    #[arg(long, global = true)]
    color: Option<ColorMode>,

    /// Do not animate a spinner while loading
    #[arg(long, global = true)]
    no_spinner: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a header and one aligned line per issue
    List(ListArgs),

    /// Print the detail view of one issue
    Show {
        /// JSON file with an array of issues, or `-` for stdin
        file: PathBuf,

        /// Issue number to show (defaults to the first issue)
        #[arg(short, long)]
        number: Option<u64>,
    },
}

#[derive(Args)]
struct ListArgs {
    /// JSON file with an array of issues, or `-` for stdin
    file: PathBuf,

    /// Repository the issues were listed from; omit for a cross-repo listing
    #[arg(short, long)]
    repo: Option<String>,

    /// Issue state: open or closed
    #[arg(short, long)]
    state: Option<IssueState>,

    /// Assignee: a login, `*` for any, `none` for unassigned
    #[arg(short, long)]
    assignee: Option<String>,

    /// Login mentioned in the issues
    #[arg(short, long)]
    mentioned: Option<String>,

    /// Predefined listing for cross-repo views: created, mentioned, subscribed, assigned
    #[arg(short, long)]
    filter: Option<IssueFilter>,

    /// Comma-separated label names
    #[arg(short = 'L', long)]
    labels: Option<String>,

    /// Sort field
    #[arg(long)]
    sort: Option<String>,

    /// Sort ascending instead of descending
    #[arg(long)]
    reverse: bool,
}

impl ListArgs {
    fn query_params(&self) -> QueryParams {
        QueryParams {
            repo: self.repo.clone(),
            state: self.state,
            assignee: self
                .assignee
                .as_deref()
                .map(|a| a.parse::<AssigneeFilter>().unwrap_or_else(|never| match never {})),
            mentioned: self.mentioned.clone(),
            filter: self.filter,
            labels: self.labels.clone(),
            sort: self.sort.clone(),
            direction: if self.reverse {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            },
        }
    }
}

/// Settings resolved from the config file and command-line flags.
struct Session {
    colors: ColorAnnotator,
    columns: usize,
    user: String,
    spinner: bool,
}

impl Session {
    fn new(cli: &Cli, config: &Config) -> Self {
        let colors = ColorAnnotator::from_mode(cli.color.unwrap_or(config.color));
        let columns = LiveTerminal::with_fallback(config.default_columns).columns();
        let user = cli
            .user
            .clone()
            .or_else(|| config.user.clone())
            .unwrap_or_default();
        let spinner = config.spinner && !cli.no_spinner && io::stdout().is_terminal();
        Self {
            colors,
            columns,
            user,
            spinner,
        }
    }

    fn context(&self) -> RenderContext<'_> {
        RenderContext::new(self.colors, self.columns, &self.user)
    }
}

fn open_issues(path: &Path) -> Result<Vec<Issue>> {
    tracing::debug!(path = %path.display(), "loading issues");
    if path == Path::new("-") {
        read_issues(io::stdin().lock())
    } else {
        read_issues(File::open(path)?)
    }
}

fn list_command(args: &ListArgs, session: &Session) -> Result<()> {
    let params = args.query_params();
    let header = format_issues_header(&params, &session.user, &session.colors);

    // The spinner sits just past the header and is blanked out when done.
    let mut stdout = io::stdout();
    write!(stdout, "{}", header)?;
    stdout.flush()?;
    let position = strip_ansi(&header).chars().count() + 2;
    let issues = Throbber::stdout()
        .position(position)
        .redraw(" ")
        .enabled(session.spinner)
        .throb(|| open_issues(&args.file));
    if !session.spinner {
        writeln!(stdout)?;
    }
    let issues = issues?;

    let lines = format_issues(&issues, params.repo.is_none(), &session.context());
    print_lines(&lines, &session.colors, &session.user)?;
    Ok(())
}

fn show_command(file: &Path, number: Option<u64>, session: &Session) -> Result<()> {
    let issues = Throbber::stdout()
        .enabled(session.spinner)
        .throb(|| open_issues(file))?;

    let issue = match number {
        Some(n) => issues
            .iter()
            .find(|issue| issue.number == n)
            .ok_or(IssuefmtError::IssueNotFound(n))?,
        None => issues.first().ok_or(IssuefmtError::NoIssues)?,
    };

    let detail = format_issue(issue, &session.context());
    print_lines(&[detail], &session.colors, &session.user)?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("issuefmt=warn")),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            print_warning(&format!("{}; using defaults", e));
            Config::default()
        }
    };

    if let Err(e) = install_interrupt_handler() {
        tracing::warn!(error = %e, "interrupt handler not installed");
    }

    let session = Session::new(&cli, &config);
    let result = match &cli.command {
        Commands::List(args) => list_command(args, &session),
        Commands::Show { file, number } => show_command(file, *number, &session),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
