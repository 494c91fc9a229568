//! CSV export of the filtered Client Registry.
//! Header:
//! Client ID,Name,Email,Verified,Max Balance,Current Balance,Cash App Sent,Zelle Sent,PayPal Sent,Bank Transfer,Total Sent,Payout Status,Last Activity,Join Date
//!
//! Values are raw (unformatted) so the file stays machine-readable.

use crate::{
    channel::ChannelAmounts,
    client_registry::{Client, PayoutStatus},
    error::DashResult,
    types::Money,
};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{Read, Write},
    path::{Path, PathBuf},
};

/// Column names, in file order.
pub const CLIENT_CSV_HEADER: [&str; 14] = [
    "Client ID",
    "Name",
    "Email",
    "Verified",
    "Max Balance",
    "Current Balance",
    "Cash App Sent",
    "Zelle Sent",
    "PayPal Sent",
    "Bank Transfer",
    "Total Sent",
    "Payout Status",
    "Last Activity",
    "Join Date",
];

#[derive(Serialize)]
struct CsvOutRow<'a> {
    #[serde(rename = "Client ID")]
    client_id: &'a str,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Verified")]
    verified: bool,
    #[serde(rename = "Max Balance")]
    max_balance: Money,
    #[serde(rename = "Current Balance")]
    current_balance: Money,
    #[serde(rename = "Cash App Sent")]
    cash_app_sent: Money,
    #[serde(rename = "Zelle Sent")]
    zelle_sent: Money,
    #[serde(rename = "PayPal Sent")]
    paypal_sent: Money,
    #[serde(rename = "Bank Transfer")]
    bank_transfer_sent: Money,
    #[serde(rename = "Total Sent")]
    total_sent: Money,
    #[serde(rename = "Payout Status")]
    payout_status: PayoutStatus,
    #[serde(rename = "Last Activity")]
    last_activity: NaiveDate,
    #[serde(rename = "Join Date")]
    join_date: NaiveDate,
}

impl<'a> From<&'a Client> for CsvOutRow<'a> {
    fn from(c: &'a Client) -> Self {
        Self {
            client_id: &c.client_id,
            name: &c.name,
            email: &c.email,
            verified: c.verified,
            max_balance: c.max_balance,
            current_balance: c.current_balance,
            cash_app_sent: c.sent.cash_app,
            zelle_sent: c.sent.zelle,
            paypal_sent: c.sent.paypal,
            bank_transfer_sent: c.sent.bank_transfer,
            total_sent: c.total_sent,
            payout_status: c.payout_status,
            last_activity: c.last_activity,
            join_date: c.join_date,
        }
    }
}

#[derive(Deserialize)]
struct CsvRow {
    #[serde(rename = "Client ID")]
    client_id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Verified")]
    verified: bool,
    #[serde(rename = "Max Balance")]
    max_balance: Money,
    #[serde(rename = "Current Balance")]
    current_balance: Money,
    #[serde(rename = "Cash App Sent")]
    cash_app_sent: Money,
    #[serde(rename = "Zelle Sent")]
    zelle_sent: Money,
    #[serde(rename = "PayPal Sent")]
    paypal_sent: Money,
    #[serde(rename = "Bank Transfer")]
    bank_transfer_sent: Money,
    #[serde(rename = "Total Sent")]
    total_sent: Money,
    #[serde(rename = "Payout Status")]
    payout_status: PayoutStatus,
    #[serde(rename = "Last Activity")]
    last_activity: NaiveDate,
    #[serde(rename = "Join Date")]
    join_date: NaiveDate,
}

impl From<CsvRow> for Client {
    fn from(row: CsvRow) -> Self {
        Self {
            client_id: row.client_id,
            name: row.name,
            email: row.email,
            verified: row.verified,
            max_balance: row.max_balance,
            current_balance: row.current_balance,
            sent: ChannelAmounts {
                cash_app: row.cash_app_sent,
                zelle: row.zelle_sent,
                paypal: row.paypal_sent,
                bank_transfer: row.bank_transfer_sent,
            },
            total_sent: row.total_sent,
            payout_status: row.payout_status,
            last_activity: row.last_activity,
            join_date: row.join_date,
        }
    }
}

/// Write the view as CSV with a header row. Returns the number of data rows.
/// An empty view still produces the header.
pub fn write_clients_csv<W: Write>(writer: W, clients: &[&Client]) -> DashResult<usize> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(CLIENT_CSV_HEADER)?;
    for client in clients {
        wtr.serialize(CsvOutRow::from(*client))?;
    }
    wtr.flush()?;
    Ok(clients.len())
}

/// Parse an export back into client records.
pub fn read_clients_csv<R: Read>(reader: R) -> DashResult<Vec<Client>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut clients = Vec::new();
    for row in rdr.deserialize::<CsvRow>() {
        clients.push(Client::from(row?));
    }
    Ok(clients)
}

/// `{prefix}_{YYYYMMDD}.csv`
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}_{}.csv", date.format("%Y%m%d"))
}

/// Write the export into `dir`, returning the path of the new file.
pub fn write_export_file(
    dir: &Path,
    prefix: &str,
    date: NaiveDate,
    clients: &[&Client],
) -> DashResult<PathBuf> {
    let path = dir.join(export_file_name(prefix, date));
    let file = File::create(&path)?;
    let rows = write_clients_csv(file, clients)?;
    log::info!("export: wrote {rows} clients to {}", path.display());
    Ok(path)
}
