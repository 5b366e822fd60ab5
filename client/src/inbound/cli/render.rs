//! Text and JSON rendering of user records.

use std::io::Write;

use crate::domain::UserRecord;

use super::CliError;

/// Output style selected by the global `--json` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Cards,
    Json,
}

/// Write `records` to `out` in `format`.
pub fn records(
    records: &[UserRecord],
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)?;
        }
        OutputFormat::Cards if records.is_empty() => writeln!(out, "No user found")?,
        OutputFormat::Cards => {
            for (index, record) in records.iter().enumerate() {
                if index > 0 {
                    writeln!(out)?;
                }
                card(record, out)?;
            }
        }
    }
    Ok(())
}

fn card(record: &UserRecord, out: &mut impl Write) -> std::io::Result<()> {
    let employment = if record.is_employed {
        "Employed"
    } else {
        "Unemployed"
    };
    let founder = if record.is_founder {
        "Founder"
    } else {
        "Not a founder"
    };
    writeln!(out, "{}", record.full_name())?;
    writeln!(out, "  Username: {}", record.username)?;
    writeln!(out, "  Age: {}", record.age)?;
    writeln!(out, "  Marital Status: {}", record.marital_status)?;
    writeln!(out, "  Employment Status: {employment}")?;
    writeln!(out, "  Founder Status: {founder}")
}
