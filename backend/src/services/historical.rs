//! Per-day ET0 over an uploaded station CSV export

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use shared::{
    estimate_et0, extract_parameters, DateRange, Et0Result, MeteorologicalReading, StationInfo,
};

use crate::error::{AppError, AppResult};

/// Largest accepted upload, in bytes
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
/// Most distinct days accepted in one upload
pub const MAX_HISTORICAL_DAYS: usize = 366;

const DATE_COLUMNS: &[&str] = &["data", "date", "datetime", "timestamp", "data_hora"];
const TEMPERATURE_COLUMNS: &[&str] = &["temp", "temperatura", "temp_out", "temperature"];
const HUMIDITY_COLUMNS: &[&str] = &["umidade", "hum", "humidity"];
const RADIATION_COLUMNS: &[&str] = &["radiacao", "solar_rad", "solar_radiation"];
const WIND_COLUMNS: &[&str] = &["vento", "wind_speed", "velocidade_vento"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Readings grouped by calendar day
#[derive(Debug, Default)]
pub struct ParsedExport {
    pub days: BTreeMap<NaiveDate, Vec<MeteorologicalReading>>,
    pub skipped_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyEt0 {
    pub date: NaiveDate,
    pub readings: usize,
    pub et0: Et0Result,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoricalEt0Response {
    pub station_id: String,
    pub station_name: String,
    pub range: DateRange,
    pub days: Vec<DailyEt0>,
    pub skipped_rows: usize,
}

#[derive(Debug, Default)]
struct ColumnMap {
    date: Option<usize>,
    temperature: Option<usize>,
    humidity: Option<usize>,
    radiation: Option<usize>,
    wind: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let positions: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(index, name)| (normalize_header(name), index))
            .collect();
        let find = |aliases: &[&str]| aliases.iter().find_map(|alias| positions.get(*alias).copied());

        Self {
            date: find(DATE_COLUMNS),
            temperature: find(TEMPERATURE_COLUMNS),
            humidity: find(HUMIDITY_COLUMNS),
            radiation: find(RADIATION_COLUMNS),
            wind: find(WIND_COLUMNS),
        }
    }
}

/// Lowercase, drop a trailing unit in parentheses, fold Portuguese accents
fn normalize_header(name: &str) -> String {
    let name = name.split('(').next().unwrap_or_default().trim().to_lowercase();
    name.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            ' ' | '-' => '_',
            other => other,
        })
        .collect()
}

fn detect_delimiter(body: &str) -> u8 {
    let header = body.lines().next().unwrap_or_default();
    if header.contains(';') {
        b';'
    } else {
        b','
    }
}

/// Parse a number, accepting a decimal comma
fn parse_number(field: &str) -> Option<f64> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    let value = if field.contains(',') && !field.contains('.') {
        field.replace(',', ".").parse::<f64>().ok()
    } else {
        field.parse::<f64>().ok()
    }?;
    value.is_finite().then_some(value)
}

fn parse_date(field: &str) -> Option<NaiveDate> {
    let field = field.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(field, format).ok())
        .map(|datetime| datetime.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(field, format).ok())
        })
}

/// Parse a CSV export into per-day readings
pub fn parse_export(body: &str) -> AppResult<ParsedExport> {
    if body.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation {
            field: "body".to_string(),
            message: "CSV export must be at most 5 MiB".to_string(),
            message_pt: "O arquivo CSV deve ter no máximo 5 MiB".to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(body))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::ValidationError(format!("Unreadable CSV header: {}", e)))?
        .clone();
    let columns = ColumnMap::from_headers(&headers);
    let Some(date_column) = columns.date else {
        return Err(AppError::Validation {
            field: "body".to_string(),
            message: "CSV export has no date column".to_string(),
            message_pt: "O arquivo CSV não possui coluna de data".to_string(),
        });
    };

    let mut export = ParsedExport::default();
    for record in reader.records() {
        let Ok(record) = record else {
            export.skipped_rows += 1;
            continue;
        };
        let Some(date) = record.get(date_column).and_then(parse_date) else {
            export.skipped_rows += 1;
            continue;
        };

        let value = |column: Option<usize>| {
            column
                .and_then(|index| record.get(index))
                .and_then(parse_number)
        };
        let reading = MeteorologicalReading {
            timestamp: None,
            temperature_celsius: value(columns.temperature),
            humidity_percent: value(columns.humidity),
            solar_radiation: value(columns.radiation),
            wind_speed_mps: value(columns.wind),
            station_et0_mm: None,
        };
        export.days.entry(date).or_default().push(reading);
    }

    if export.days.is_empty() {
        return Err(AppError::Validation {
            field: "body".to_string(),
            message: "CSV export has no valid rows".to_string(),
            message_pt: "O arquivo CSV não possui linhas válidas".to_string(),
        });
    }
    if export.days.len() > MAX_HISTORICAL_DAYS {
        return Err(AppError::Validation {
            field: "body".to_string(),
            message: format!("CSV export covers more than {} days", MAX_HISTORICAL_DAYS),
            message_pt: format!("O arquivo CSV abrange mais de {} dias", MAX_HISTORICAL_DAYS),
        });
    }

    Ok(export)
}

/// One independent estimate per day, ordered by date
pub fn estimate_days(export: &ParsedExport, station: &StationInfo) -> Vec<DailyEt0> {
    export
        .days
        .iter()
        .map(|(date, readings)| DailyEt0 {
            date: *date,
            readings: readings.len(),
            et0: estimate_et0(&extract_parameters(readings), &station.site(date.ordinal())),
        })
        .collect()
}

/// Parse and estimate an export for the given station
pub fn historical_et0(
    body: &str,
    station_id: &str,
    station: &StationInfo,
) -> AppResult<HistoricalEt0Response> {
    let export = parse_export(body)?;
    let days = estimate_days(&export, station);

    let (Some(first), Some(last)) = (days.first(), days.last()) else {
        return Err(AppError::Internal("historical export produced no days".to_string()));
    };
    let range = DateRange {
        start: first.date,
        end: last.date,
    };

    tracing::info!(
        station_id = %station_id,
        days = days.len(),
        skipped_rows = export.skipped_rows,
        "Historical ET0 computed"
    );

    Ok(HistoricalEt0Response {
        station_id: station_id.to_string(),
        station_name: station.name.clone(),
        range,
        days,
        skipped_rows: export.skipped_rows,
    })
}
