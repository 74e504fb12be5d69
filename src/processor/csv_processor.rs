use crate::errors::{AppError, AppResult};
use crate::types::{normalize_dimension_name, Record};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Counters collected while loading a CSV
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadStats {
    pub total_rows: usize,
    /// Rows kept with no usable date
    pub undated_rows: usize,
    /// Numeric fields that failed to parse and were read as 0
    pub invalid_numeric_fields: usize,
}

impl LoadStats {
    pub fn dated_rows(&self) -> usize {
        self.total_rows - self.undated_rows
    }
}

/// Records plus what the loader learnt about the file
#[derive(Debug, Clone)]
pub struct LoadedRecords {
    pub records: Vec<Record>,
    pub stats: LoadStats,
    /// Normalised names of the columns that became group keys
    pub dimension_columns: Vec<String>,
}

/// Role of a CSV column
#[derive(Debug, Clone, PartialEq)]
enum Column {
    Date,
    Amount,
    MemberId,
    Email,
    Units,
    DiscountAmount,
    DiscountPercentage,
    Vat,
    SessionsUsed,
    Dimension(String),
}

impl Column {
    fn from_header(header: &str) -> Self {
        let name = normalize_dimension_name(header);
        match name.as_str() {
            "payment_date" | "date" | "paymentdate" => Column::Date,
            "amount" | "payment_value" | "paymentvalue" => Column::Amount,
            "member_id" | "memberid" => Column::MemberId,
            "email" | "customer_email" | "customeremail" => Column::Email,
            "units" | "quantity" => Column::Units,
            "discount_amount" | "discountamount" => Column::DiscountAmount,
            "discount_percentage" | "discountpercentage" => Column::DiscountPercentage,
            "vat" => Column::Vat,
            "sessions_used" | "sessionsused" => Column::SessionsUsed,
            _ => Column::Dimension(name),
        }
    }
}

/// Loads flat sale records from a CSV export
///
/// Lines starting with `#` are skipped and the first remaining line is the
/// header. Reserved columns map onto [`Record`] fields; every other column is
/// kept as a group key under its normalised name.
pub struct CsvRecordLoader {
    path: PathBuf,
}

impl CsvRecordLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> AppResult<LoadedRecords> {
        info!("Loading records from {}", self.path.display());
        let started = Instant::now();

        let file = File::open(&self.path).map_err(AppError::Io)?;
        let mut csv_reader = ReaderBuilder::new()
            .comment(Some(b'#')) // Skip lines starting with #
            .has_headers(true) // First non-comment line is the header
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let headers = csv_reader.headers().map_err(AppError::Csv)?.clone();
        let columns: Vec<Column> = headers.iter().map(Column::from_header).collect();

        if !columns.contains(&Column::Amount) {
            warn!("No amount column found; every amount will be 0");
        }
        if !columns.contains(&Column::Date) {
            warn!("No date column found; every record will be undated");
        }

        let dimension_columns: Vec<String> = columns
            .iter()
            .filter_map(|c| match c {
                Column::Dimension(name) => Some(name.clone()),
                _ => None,
            })
            .collect();
        debug!("Dimension columns: {:?}", dimension_columns);

        let mut stats = LoadStats::default();
        let mut records = Vec::new();

        for result in csv_reader.records() {
            let row = result.map_err(AppError::Csv)?;
            let line = row.position().map(|p| p.line() as usize).unwrap_or(0);

            if row.len() != columns.len() {
                return Err(AppError::InvalidRecord {
                    line,
                    reason: format!(
                        "expected {} fields, found {}",
                        columns.len(),
                        row.len()
                    ),
                });
            }

            let record = build_record(&columns, &row, line, &mut stats);
            if !record.is_dated() {
                debug!("Line {}: unparseable date '{}'", line, record.raw_date);
                stats.undated_rows += 1;
            }
            stats.total_rows += 1;
            records.push(record);
        }

        info!("CSV loading completed");
        info!("  Total rows: {}", stats.total_rows);
        info!("  Undated rows: {}", stats.undated_rows);
        info!("  Invalid numeric fields: {}", stats.invalid_numeric_fields);
        info!("  Time elapsed: {:.2}s", started.elapsed().as_secs_f64());

        Ok(LoadedRecords {
            records,
            stats,
            dimension_columns,
        })
    }
}

fn build_record(columns: &[Column], row: &StringRecord, line: usize, stats: &mut LoadStats) -> Record {
    let mut raw_date = "";
    let mut member_id = None;
    let mut email = None;
    let mut amount = 0.0;
    let mut units = 1.0;
    let mut discount_amount = 0.0;
    let mut discount_percentage = 0.0;
    let mut vat = 0.0;
    let mut sessions_used = 0.0;
    let mut keys: Vec<(&str, &str)> = Vec::new();

    for (column, value) in columns.iter().zip(row.iter()) {
        match column {
            Column::Date => raw_date = value,
            Column::MemberId => member_id = Some(value),
            Column::Email => email = Some(value),
            Column::Amount => amount = parse_number(value, 0.0, line, "amount", stats),
            Column::Units => units = parse_number(value, 1.0, line, "units", stats),
            Column::DiscountAmount => {
                discount_amount = parse_number(value, 0.0, line, "discount_amount", stats)
            }
            Column::DiscountPercentage => {
                discount_percentage =
                    parse_number(value, 0.0, line, "discount_percentage", stats)
            }
            Column::Vat => vat = parse_number(value, 0.0, line, "vat", stats),
            Column::SessionsUsed => {
                sessions_used = parse_number(value, 0.0, line, "sessions_used", stats)
            }
            Column::Dimension(name) => keys.push((name.as_str(), value)),
        }
    }

    let mut record = Record::new(raw_date, amount)
        .with_member(member_id, email)
        .with_units(units)
        .with_discount(discount_amount, discount_percentage)
        .with_vat(vat)
        .with_sessions_used(sessions_used);
    for (name, value) in keys {
        record = record.with_key(name, value);
    }
    record
}

/// Parse a numeric cell, tolerating currency symbols, thousand separators and
/// a trailing `%`. Blank cells take `default`; garbage reads as 0 and is counted.
fn parse_number(value: &str, default: f64, line: usize, field: &str, stats: &mut LoadStats) -> f64 {
    let cleaned: String = value
        .trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| !matches!(c, ',' | '£' | '$' | '€' | ' '))
        .collect();

    if cleaned.is_empty() {
        return default;
    }

    match cleaned.parse::<f64>() {
        Ok(number) if number.is_finite() => number,
        _ => {
            warn!("Line {}: invalid {} value '{}', using 0", line, field, value);
            stats.invalid_numeric_fields += 1;
            0.0
        }
    }
}
