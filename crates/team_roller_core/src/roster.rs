//! Roster loading and set derivation.
//!
//! A roster is a table whose first row holds the column headers. Spreadsheets
//! (`.xlsx`, `.xlsm`, `.xls`, `.xlsb`, `.ods`) are read with `calamine`, using the
//! first worksheet; `.csv` files are read with `csv`. All cells are normalised to
//! trimmed strings before any column lookup happens.

use calamine::{open_workbook_auto, Data, Range, Reader};
use config_manager::Settings;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::errors::RosterError;
use crate::naming::repository_name;

#[cfg(test)]
#[path = "roster_tests.rs"]
mod tests;

/// A roster held in memory as rows of trimmed cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RosterTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = headers.into_iter().map(|h| h.trim().to_string()).collect();
        Self { headers, rows }
    }

    /// Loads a roster file, picking the reader from the file extension.
    ///
    /// # Errors
    ///
    /// * [`RosterError::FileNotFound`] when the path does not exist.
    /// * [`RosterError::Read`] when the file cannot be opened or parsed.
    /// * [`RosterError::NoWorksheet`] when a workbook has no sheets.
    pub fn load(path: &Path) -> Result<Self, RosterError> {
        if !path.exists() {
            return Err(RosterError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        let table = if is_csv {
            Self::load_csv(path)?
        } else {
            Self::load_workbook(path)?
        };

        info!(
            path = %path.display(),
            rows = table.len(),
            "Loaded roster"
        );
        Ok(table)
    }

    fn load_csv(path: &Path) -> Result<Self, RosterError> {
        let read_error = |reason: String| RosterError::Read {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path).map_err(|e| read_error(e.to_string()))?;
        Self::from_csv_reader(file).map_err(|e| read_error(e.to_string()))
    }

    fn load_workbook(path: &Path) -> Result<Self, RosterError> {
        let read_error = |reason: String| RosterError::Read {
            path: path.to_path_buf(),
            reason,
        };

        let mut workbook = open_workbook_auto(path).map_err(|e| read_error(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| RosterError::NoWorksheet {
                path: path.to_path_buf(),
            })?
            .map_err(|e| read_error(e.to_string()))?;

        Ok(Self::from_range(&range))
    }

    /// Reads a CSV roster. The first record is the header row; short rows are allowed.
    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
        }

        Ok(Self::new(headers, rows))
    }

    /// Converts a worksheet range. The first row of the range is the header row.
    pub fn from_range(range: &Range<Data>) -> Self {
        let mut rows = range.rows();
        let headers = rows
            .next()
            .map(|row| row.iter().map(cell_text).collect())
            .unwrap_or_default();
        let rows = rows
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        Self::new(headers, rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column. Header matching is exact after trimming.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name.trim())
    }
}

fn cell_text(cell: &Data) -> String {
    cell.to_string().trim().to_string()
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or_default()
}

/// How a team leader is identified in the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderIdentifier {
    Username(String),
    Email(String),
}

impl LeaderIdentifier {
    /// Classifies a roster cell: anything containing `@` is an email address.
    /// Returns `None` for a blank cell.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            None
        } else if value.contains('@') {
            Some(Self::Email(value.to_string()))
        } else {
            Some(Self::Username(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Username(value) | Self::Email(value) => value,
        }
    }
}

impl fmt::Display for LeaderIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One team taken from the roster, with its derived repository name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub team_name: String,
    pub repository_name: String,
    /// `None` when neither the username nor the leader cell is filled in.
    pub leader: Option<LeaderIdentifier>,
}

/// Derives the create-flow entries from a roster.
///
/// The team-name column is required, as is at least one of the leader and
/// username columns. Rows without a team name are skipped with a warning and
/// teams whose repository name equals the template repository are skipped.
///
/// # Errors
///
/// Returns [`RosterError::MissingColumns`] when required columns are absent.
pub fn derive_entries(
    table: &RosterTable,
    settings: &Settings,
) -> Result<Vec<RosterEntry>, RosterError> {
    let columns = &settings.roster;
    let team_index = table.column_index(&columns.team_name_column);
    let leader_index = table.column_index(&columns.leader_column);
    let username_index = table.column_index(&columns.username_column);

    let mut missing = Vec::new();
    if team_index.is_none() {
        missing.push(columns.team_name_column.clone());
    }
    if leader_index.is_none() && username_index.is_none() {
        missing.push(columns.leader_column.clone());
    }
    let Some(team_index) = team_index.filter(|_| missing.is_empty()) else {
        return Err(RosterError::MissingColumns {
            missing,
            available: table.headers().to_vec(),
        });
    };

    if username_index.is_none() {
        debug!(
            column = %columns.username_column,
            "No username column in roster, using the leader column"
        );
    }

    let mut entries = Vec::with_capacity(table.len());
    for (position, row) in table.rows().iter().enumerate() {
        let team_name = cell(row, team_index);
        if team_name.is_empty() {
            // +2: one for the header row, one for 1-based numbering.
            warn!(row = position + 2, "Skipping roster row without a team name");
            continue;
        }

        let repository_name = repository_name(&settings.repository.prefix, team_name);
        if repository_name == settings.template_repository {
            info!(
                team = team_name,
                repository = %repository_name,
                "Skipping team whose repository would be the template repository"
            );
            continue;
        }

        let leader = username_index
            .map(|index| cell(row, index))
            .filter(|value| !value.is_empty())
            .map(|value| LeaderIdentifier::Username(value.to_string()))
            .or_else(|| leader_index.and_then(|index| LeaderIdentifier::parse(cell(row, index))));

        entries.push(RosterEntry {
            team_name: team_name.to_string(),
            repository_name,
            leader,
        });
    }

    Ok(entries)
}

/// Derives repository names from a roster, reading only the team-name column.
///
/// Used by the archive and delete flows, which have no use for leaders.
pub fn derive_repository_names(
    table: &RosterTable,
    settings: &Settings,
) -> Result<Vec<String>, RosterError> {
    let column = &settings.roster.team_name_column;
    let team_index = table
        .column_index(column)
        .ok_or_else(|| RosterError::MissingColumns {
            missing: vec![column.clone()],
            available: table.headers().to_vec(),
        })?;

    Ok(table
        .rows()
        .iter()
        .map(|row| cell(row, team_index))
        .filter(|team_name| !team_name.is_empty())
        .map(|team_name| repository_name(&settings.repository.prefix, team_name))
        .collect())
}

/// Loads the configured roster and derives the create-flow entries.
pub fn load_entries(settings: &Settings) -> Result<Vec<RosterEntry>, RosterError> {
    let table = RosterTable::load(&settings.roster.path)?;
    derive_entries(&table, settings)
}

/// Loads the configured roster and derives repository names.
pub fn load_repository_names(settings: &Settings) -> Result<Vec<String>, RosterError> {
    let table = RosterTable::load(&settings.roster.path)?;
    derive_repository_names(&table, settings)
}
