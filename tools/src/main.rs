//! dash-runner: headless runner for the Dragon Dash dashboard core.
//!
//! Usage:
//!   dash-runner --seed 42 --payout-status Pending --export-dir ./out
//!   dash-runner --date 2026-10-01 --date 2026-10-07 --json
//!   dash-runner --ipc-mode < commands.jsonl
//!
//! In IPC mode, `set_query` takes a partial query. Its fields are laid over
//! the dashboard's opening selections, so omitted fields keep their defaults.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use dragondash_core::{
    client_registry::{PayoutStatus, Verification},
    clock::DashClock,
    config::DashConfig,
    dashboard::{DashboardQuery, DashboardView},
    filter::{BalanceRange, Selection},
    format::{format_currency, format_optional_currency, format_rate},
    payout_journal::ConfirmationStatus,
    rng::DatasetSlot,
    session::{DashSession, ReportAck},
    style::confirmation_style,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dash-runner", version, about = "Dragon Dash dashboard runner")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    seed: Option<u64>,

    /// Number of clients to generate
    #[arg(long)]
    clients: Option<usize>,

    /// Number of ledger days to generate, ending today
    #[arg(long)]
    days: Option<usize>,

    /// Number of payout confirmations to generate
    #[arg(long)]
    payouts: Option<usize>,

    /// All | Verified | Unverified
    #[arg(long, default_value = "All")]
    verification: Selection<Verification>,

    /// All | Confirmed | Pending | Processing
    #[arg(long, default_value = "All")]
    payout_status: Selection<PayoutStatus>,

    #[arg(long)]
    min_balance: Option<i64>,

    #[arg(long)]
    max_balance: Option<i64>,

    /// Ledger date bound; pass twice for a range. Without it, the last week is shown.
    #[arg(long = "date")]
    dates: Vec<NaiveDate>,

    /// Case-insensitive name or email search
    #[arg(long, default_value = "")]
    search: String,

    /// Payout journal status: All | Completed | Processing | Failed
    #[arg(long, default_value = "All")]
    journal_status: Selection<ConfirmationStatus>,

    /// Write the filtered client CSV into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Print the full view as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Read JSON-line commands from stdin
    #[arg(long)]
    ipc_mode: bool,
}

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    SetQuery { query: serde_json::Value },
    Refresh { dataset: RefreshTarget },
    Export { dir: PathBuf },
    Report,
    Quit,
}

#[derive(serde::Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum RefreshTarget {
    Clients,
    Ledger,
    Payouts,
    All,
}

#[derive(serde::Serialize)]
struct UiState<'a> {
    seed: u64,
    epochs: Epochs,
    events: usize,
    query: &'a DashboardQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    export_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<ReportAck>,
    view: DashboardView<'a>,
}

#[derive(serde::Serialize)]
struct Epochs {
    clients: u64,
    ledger: u64,
    payouts: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    let mut session = DashSession::new(config, DashClock::System)?;

    if cli.ipc_mode {
        return run_ipc_loop(&mut session);
    }

    let query = build_query(&cli, &mut session)?;

    let mut export_path = None;
    if let Some(dir) = &cli.export_dir {
        let path = session.export_clients(&query.clients, dir)?;
        export_path = Some(path.display().to_string());
    }

    if cli.json {
        let state = build_ui_state(&mut session, &query, export_path, None)?;
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        if let Some(path) = export_path {
            println!("Exported filtered clients to {path}");
            println!();
        }
        print_summary(&mut session, &query)?;
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<DashConfig> {
    let mut config = match &cli.config {
        Some(path) => DashConfig::load(path)?,
        None => DashConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(clients) = cli.clients {
        config.client_count = clients;
    }
    if let Some(days) = cli.days {
        config.ledger_days = days;
    }
    if let Some(payouts) = cli.payouts {
        config.payout_count = payouts;
    }
    Ok(config)
}

/// Start from the dashboard's opening selections and apply the flags.
fn build_query(cli: &Cli, session: &mut DashSession) -> Result<DashboardQuery> {
    let mut query = session.initial_query()?;
    query.clients.verification = cli.verification;
    query.clients.payout_status = cli.payout_status;
    query.clients.search = cli.search.clone();
    if cli.min_balance.is_some() || cli.max_balance.is_some() {
        let widest = query.clients.balance.unwrap_or(BalanceRange::new(0, i64::MAX));
        query.clients.balance = Some(BalanceRange::new(
            cli.min_balance.unwrap_or(widest.min),
            cli.max_balance.unwrap_or(widest.max),
        ));
    }
    if !cli.dates.is_empty() {
        query.ledger.date_range = cli.dates.clone();
    }
    query.payouts.status = cli.journal_status;
    Ok(query)
}

fn run_ipc_loop(session: &mut DashSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();
    let mut query = session.initial_query()?;

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Malformed command: {}", e);
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        let mut export_path = None;
        let mut report = None;
        let outcome: Result<()> = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => Ok(()),
            IpcCommand::SetQuery { query: overrides } => session
                .initial_query()
                .and_then(|opening| opening.with_overrides(overrides))
                .map(|next| query = next)
                .map_err(Into::into),
            IpcCommand::Refresh { dataset } => refresh(session, dataset),
            IpcCommand::Export { dir } => session
                .export_clients(&query.clients, &dir)
                .map(|path| export_path = Some(path.display().to_string()))
                .map_err(Into::into),
            IpcCommand::Report => {
                report = Some(session.request_report());
                Ok(())
            }
        };

        match outcome {
            Ok(()) => {
                let state = build_ui_state(session, &query, export_path, report)?;
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            }
            Err(e) => write_error(&mut stdout, &e.to_string())?,
        }
        stdout.flush()?;
    }
    Ok(())
}

fn refresh(session: &mut DashSession, target: RefreshTarget) -> Result<()> {
    match target {
        RefreshTarget::Clients => session.refresh(DatasetSlot::Clients).map(drop)?,
        RefreshTarget::Ledger => session.refresh(DatasetSlot::Ledger).map(drop)?,
        RefreshTarget::Payouts => session.refresh(DatasetSlot::Payouts).map(drop)?,
        RefreshTarget::All => session.refresh_all()?,
    }
    Ok(())
}

fn write_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(stdout, "{}", err_json)?;
    stdout.flush()?;
    Ok(())
}

fn build_ui_state<'a>(
    session: &'a mut DashSession,
    query: &'a DashboardQuery,
    export_path: Option<String>,
    report: Option<ReportAck>,
) -> Result<UiState<'a>> {
    let seed = session.config().seed;
    let epochs = Epochs {
        clients: session.epoch(DatasetSlot::Clients),
        ledger: session.epoch(DatasetSlot::Ledger),
        payouts: session.epoch(DatasetSlot::Payouts),
    };
    let events = session.events().len();
    let view = session.view(query)?;

    Ok(UiState {
        seed,
        epochs,
        events,
        query,
        export_path,
        report,
        view,
    })
}

fn print_summary(session: &mut DashSession, query: &DashboardQuery) -> Result<()> {
    let seed = session.config().seed;
    let today = session.clock().today();
    let view = session.view(query)?;
    let c = &view.client_summary;
    let l = &view.ledger_summary;
    let p = &view.payout_summary;

    println!("Dragon Dash dashboard summary");
    println!("  seed:            {seed}");
    println!("  date:            {today}");
    println!();
    println!("=== CLIENTS ===");
    println!("  clients:         {} ({} hidden by filters)", c.client_count, c.hidden_count);
    println!(
        "  total sent:      {} (avg {})",
        format_currency(c.total_sent),
        format_optional_currency(c.average_sent)
    );
    println!(
        "  total balance:   {} (avg {})",
        format_currency(c.total_balance),
        format_optional_currency(c.average_balance)
    );
    println!(
        "  verified rate:   {} ({}/{})",
        format_rate(c.verification_rate),
        c.verified_count,
        c.client_count
    );

    println!();
    println!("=== DAILY LEDGER ===");
    println!("  days tracked:    {}", l.days_tracked);
    println!("  avg daily:       {}", format_optional_currency(l.average_daily));
    println!("  period total:    {}", format_currency(l.period_total));
    for slice in &view.channel_breakdown {
        let share = slice.share.map(|s| s * 100.0);
        println!(
            "  {:<16} {} ({})",
            format!("{}:", slice.channel),
            format_currency(slice.total),
            format_rate(share)
        );
    }

    println!();
    println!("=== PAYOUTS ===");
    println!(
        "  completed:       {} ({})",
        p.completed_count,
        format_currency(p.completed_amount)
    );
    println!("  processing:      {}", p.processing_count);
    println!("  failed:          {}", p.failed_count);
    if view.payouts.is_empty() {
        println!("  (No payouts match the current filter)");
    } else {
        for payout in &view.payouts {
            let style = confirmation_style(payout.status);
            println!(
                "  {} {:>12} {:<14} {:<10} {} [{}]",
                payout.confirmation_id,
                format_currency(payout.amount),
                payout.method.label(),
                payout.status.label(),
                payout.timestamp.format("%Y-%m-%d %H:%M"),
                style.background
            );
        }
    }
    Ok(())
}
