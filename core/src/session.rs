//! The session, owner of one user's datasets.
//!
//! RULES:
//!   - First access generates all three datasets (epoch 0).
//!   - A refresh builds a complete replacement before swapping it in,
//!     so no reader ever sees a partially replaced dataset.
//!   - Each refresh advances only its own dataset's epoch.
//!   - Every user action is appended to the in-memory event log.

use crate::{
    client_registry::{generate_clients, Client},
    clock::DashClock,
    config::DashConfig,
    daily_ledger::{generate_ledger, LedgerEntry},
    dashboard::{DashboardQuery, DashboardView, Datasets},
    error::DashResult,
    event::{EventLogEntry, SessionEvent},
    export::write_export_file,
    filter::{ClientFilter, RowFilter},
    payout_journal::{generate_payouts, PayoutConfirmation},
    rng::{DatasetSlot, RngBank},
};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const REPORT_UNAVAILABLE: &str = "Report generation is not available yet";

/// Acknowledgement of a "Generate Report" request. Nothing else happens.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportAck {
    pub requested_at: NaiveDateTime,
    pub message: &'static str,
}

pub struct DashSession {
    config: DashConfig,
    clock: DashClock,
    rng_bank: RngBank,
    /// Indexed by `DatasetSlot as usize`.
    epochs: [u64; 3],
    datasets: Option<Datasets>,
    events: Vec<EventLogEntry>,
}

impl DashSession {
    /// Validates the config up front; bad counts never reach a generator.
    pub fn new(config: DashConfig, clock: DashClock) -> DashResult<Self> {
        config.validate()?;
        Ok(Self {
            rng_bank: RngBank::new(config.seed),
            config,
            clock,
            epochs: [0; 3],
            datasets: None,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &DashConfig {
        &self.config
    }

    pub fn clock(&self) -> DashClock {
        self.clock
    }

    pub fn epoch(&self, slot: DatasetSlot) -> u64 {
        self.epochs[slot as usize]
    }

    pub fn events(&self) -> &[EventLogEntry] {
        &self.events
    }

    /// The datasets, if any access has generated them yet.
    pub fn loaded(&self) -> Option<&Datasets> {
        self.datasets.as_ref()
    }

    /// The datasets, generating them on first access.
    pub fn load(&mut self) -> DashResult<&Datasets> {
        Ok(self.ensure_loaded()?)
    }

    /// Selections a freshly opened dashboard would show.
    pub fn initial_query(&mut self) -> DashResult<DashboardQuery> {
        let today = self.clock.today();
        let window = self.config.date_window_days;
        let datasets = self.ensure_loaded()?;
        Ok(DashboardQuery::initial(datasets, today, window))
    }

    pub fn view(&mut self, query: &DashboardQuery) -> DashResult<DashboardView<'_>> {
        let datasets: &Datasets = self.ensure_loaded()?;
        Ok(DashboardView::build(datasets, query))
    }

    pub fn refresh_clients(&mut self) -> DashResult<usize> {
        self.refresh(DatasetSlot::Clients)
    }

    pub fn refresh_ledger(&mut self) -> DashResult<usize> {
        self.refresh(DatasetSlot::Ledger)
    }

    pub fn refresh_payouts(&mut self) -> DashResult<usize> {
        self.refresh(DatasetSlot::Payouts)
    }

    /// Regenerate one dataset at the next epoch. Returns its new row count.
    pub fn refresh(&mut self, slot: DatasetSlot) -> DashResult<usize> {
        self.ensure_loaded()?;
        let epoch = self.epoch(slot) + 1;

        let rows = match slot {
            DatasetSlot::Clients => {
                let fresh = self.build_clients(epoch)?;
                let rows = fresh.len();
                self.ensure_loaded()?.clients = fresh;
                rows
            }
            DatasetSlot::Ledger => {
                let fresh = self.build_ledger(epoch)?;
                let rows = fresh.len();
                self.ensure_loaded()?.ledger = fresh;
                rows
            }
            DatasetSlot::Payouts => {
                let fresh = self.build_payouts(epoch)?;
                let rows = fresh.len();
                self.ensure_loaded()?.payouts = fresh;
                rows
            }
        };

        self.epochs[slot as usize] = epoch;
        self.record_refresh(slot, epoch, rows);
        Ok(rows)
    }

    /// Regenerate all three datasets; all are built before any is replaced.
    pub fn refresh_all(&mut self) -> DashResult<()> {
        self.ensure_loaded()?;
        let next = |slot: DatasetSlot| self.epoch(slot) + 1;
        let (clients_epoch, ledger_epoch, payouts_epoch) =
            (next(DatasetSlot::Clients), next(DatasetSlot::Ledger), next(DatasetSlot::Payouts));

        let replacement = Datasets {
            clients: self.build_clients(clients_epoch)?,
            ledger: self.build_ledger(ledger_epoch)?,
            payouts: self.build_payouts(payouts_epoch)?,
        };
        let rows = [
            replacement.clients.len(),
            replacement.ledger.len(),
            replacement.payouts.len(),
        ];
        self.datasets = Some(replacement);

        for (slot, epoch) in DatasetSlot::ALL
            .into_iter()
            .zip([clients_epoch, ledger_epoch, payouts_epoch])
        {
            self.epochs[slot as usize] = epoch;
            self.record_refresh(slot, epoch, rows[slot as usize]);
        }
        Ok(())
    }

    /// Write the filtered client view as CSV into `dir`.
    pub fn export_clients(&mut self, filter: &ClientFilter, dir: &Path) -> DashResult<PathBuf> {
        let now = self.clock.now();
        let prefix = self.config.export_prefix.clone();
        let datasets = self.ensure_loaded()?;

        let view = filter.apply(&datasets.clients);
        let rows = view.len();
        let path = write_export_file(dir, &prefix, now.date(), &view)?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.record(SessionEvent::ClientsExported { at: now, file_name, rows });
        Ok(path)
    }

    /// Acknowledge a report request. Report generation itself is not defined.
    pub fn request_report(&mut self) -> ReportAck {
        let at = self.clock.now();
        log::info!("report requested at {at}");
        self.record(SessionEvent::ReportRequested { at });
        ReportAck { requested_at: at, message: REPORT_UNAVAILABLE }
    }

    fn ensure_loaded(&mut self) -> DashResult<&mut Datasets> {
        let datasets = match self.datasets.take() {
            Some(datasets) => datasets,
            None => self.generate_initial()?,
        };
        Ok(self.datasets.insert(datasets))
    }

    fn generate_initial(&mut self) -> DashResult<Datasets> {
        let datasets = Datasets {
            clients: self.build_clients(0)?,
            ledger: self.build_ledger(0)?,
            payouts: self.build_payouts(0)?,
        };
        log::info!(
            "session initialized: seed={} clients={} ledger_days={} payouts={}",
            self.config.seed,
            datasets.clients.len(),
            datasets.ledger.len(),
            datasets.payouts.len()
        );
        self.record(SessionEvent::SessionInitialized {
            at: self.clock.now(),
            seed: self.config.seed,
            clients: datasets.clients.len(),
            ledger_days: datasets.ledger.len(),
            payouts: datasets.payouts.len(),
        });
        Ok(datasets)
    }

    fn build_clients(&self, epoch: u64) -> DashResult<Vec<Client>> {
        let mut rng = self.rng_bank.for_dataset(DatasetSlot::Clients, epoch);
        generate_clients(self.config.client_count, self.clock.today(), &mut rng)
    }

    fn build_ledger(&self, epoch: u64) -> DashResult<Vec<LedgerEntry>> {
        let mut rng = self.rng_bank.for_dataset(DatasetSlot::Ledger, epoch);
        generate_ledger(self.config.ledger_days, self.clock.today(), &mut rng)
    }

    fn build_payouts(&self, epoch: u64) -> DashResult<Vec<PayoutConfirmation>> {
        let mut rng = self.rng_bank.for_dataset(DatasetSlot::Payouts, epoch);
        generate_payouts(
            self.config.payout_count,
            self.config.client_count,
            self.clock.now_minute(),
            &mut rng,
        )
    }

    fn record_refresh(&mut self, slot: DatasetSlot, epoch: u64, rows: usize) {
        log::info!("refresh: {} regenerated at epoch {epoch} ({rows} rows)", slot.name());
        self.record(SessionEvent::DatasetRefreshed {
            at: self.clock.now(),
            dataset: slot,
            epoch,
            rows,
        });
    }

    fn record(&mut self, event: SessionEvent) {
        let seq = self.events.len() as u64;
        self.events.push(EventLogEntry { seq, event });
    }
}
