//! readers that turn delimited text inputs into the in-memory tables of the
//! disaggregation model.
use super::{AppError, HouseholdColumns, TripColumns, TripFilter, ZoneColumns};
use csv::{Reader, StringRecord};
use indexmap::IndexMap;
use itertools::Itertools;
use kdam::tqdm;
use std::{
    collections::{HashMap, HashSet},
    fs::File,
    path::Path,
    str::FromStr,
};
use taz2maz_core::model::{
    segment::SegmentCoefficientRecord,
    trip::Trip,
    zone::{AttributeDefinition, CoarseZoneId, FineZone, FineZoneId, ZoneAttributeTable},
};

const PURPOSE_COLUMN: &str = "purpose";
const SEGMENT_COLUMN: &str = "segment";

/// trips read from the trip file with the header of that file, which names the
/// fields of each trip's pass-through values.
pub struct TripTable {
    pub header: Vec<String>,
    pub trips: Vec<Trip>,
}

pub fn open_reader(path: &Path) -> Result<Reader<File>, AppError> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| read_error(path, format!("failed to open file: {e}")))
}

pub fn build_header_lookup(
    reader: &mut Reader<File>,
    path: &Path,
) -> Result<HashMap<String, usize>, AppError> {
    let headers = reader
        .headers()
        .map_err(|e| read_error(path, format!("failure retrieving headers: {e}")))?;
    let lookup: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, col)| (String::from(col), idx))
        .collect::<HashMap<_, _>>();

    Ok(lookup)
}

/// size coefficients: `purpose`, `segment`, then one weight column per attribute.
/// empty weights are zero.
pub fn read_size_coefficients(path: &Path) -> Result<Vec<SegmentCoefficientRecord>, AppError> {
    let mut reader = open_reader(path)?;
    let header = reader
        .headers()
        .map_err(|e| read_error(path, format!("failure retrieving headers: {e}")))?
        .clone();
    let lookup = header_lookup_of(&header);
    let purpose_idx = column(&lookup, PURPOSE_COLUMN, path)?;
    let segment_idx = column(&lookup, SEGMENT_COLUMN, path)?;
    let weight_columns = header
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != purpose_idx && *idx != segment_idx)
        .map(|(idx, name)| (idx, name.to_string()))
        .collect_vec();

    let mut result = vec![];
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| read_error(path, format!("row {row}: {e}")))?;
        let mut weights = IndexMap::with_capacity(weight_columns.len());
        for (idx, name) in weight_columns.iter() {
            let raw = record.get(*idx).unwrap_or_default().trim();
            let weight = if raw.is_empty() {
                0.0
            } else {
                parse_value::<f64>(raw, name, row, path)?
            };
            weights.insert(name.clone(), weight);
        }
        result.push(SegmentCoefficientRecord {
            purpose: field(&record, purpose_idx).to_string(),
            segment: field(&record, segment_idx).to_string(),
            weights,
        });
    }
    log::info!(
        "read {} size coefficient rows over {} attributes from {}",
        result.len(),
        weight_columns.len(),
        path.display()
    );
    Ok(result)
}

/// how the rows of the zone data are identified and placed in coarse zones. both maps
/// are keyed by the zone data key column (see [`ZoneColumns::key_column`]).
#[derive(Clone, Debug, Default)]
pub struct ZoneLookup {
    /// output fine zone id by zone data key. absent when the key is the fine zone id.
    pub fine_zones: Option<HashMap<u64, FineZoneId>>,
    /// coarse zone by zone data key. absent when the zone data carries the coarse zone.
    pub coarse_zones: Option<HashMap<u64, CoarseZoneId>>,
}

/// builds the zone lookup from the optional coarse zone crosswalk and the optional zone
/// id crosswalk. a coarse zone crosswalk takes precedence over coarse zones found in the
/// zone id crosswalk.
pub fn read_zone_lookup(
    crosswalk: Option<&Path>,
    zone_id_crosswalk: Option<&Path>,
    columns: &ZoneColumns,
) -> Result<ZoneLookup, AppError> {
    if zone_id_crosswalk.is_some() && columns.source_zone.is_none() {
        return Err(AppError::InvalidUserInput(String::from(
            "a zone id crosswalk requires zone_columns.source_zone naming the join key column",
        )));
    }
    let (fine_zones, id_coarse_zones) = match zone_id_crosswalk {
        Some(path) => {
            let (fine, coarse) = read_zone_id_crosswalk(path, columns)?;
            (Some(fine), coarse)
        }
        None => (None, None),
    };
    let coarse_zones = match crosswalk {
        Some(path) => Some(read_crosswalk(path, columns)?),
        None => id_coarse_zones,
    };
    Ok(ZoneLookup {
        fine_zones,
        coarse_zones,
    })
}

/// zone key to coarse zone lookup. rows with an empty coarse zone are dropped.
pub fn read_crosswalk(
    path: &Path,
    columns: &ZoneColumns,
) -> Result<HashMap<u64, CoarseZoneId>, AppError> {
    let mut reader = open_reader(path)?;
    let header = build_header_lookup(&mut reader, path)?;
    let key_idx = column(&header, columns.key_column(), path)?;
    let coarse_idx = column(&header, &columns.coarse_zone, path)?;

    let mut result = HashMap::new();
    let mut dropped = 0;
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| read_error(path, format!("row {row}: {e}")))?;
        let coarse = field(&record, coarse_idx);
        if coarse.is_empty() {
            dropped += 1;
            continue;
        }
        let key = parse_zone(field(&record, key_idx), columns.key_column(), row, path)?;
        let coarse = CoarseZoneId(parse_zone(coarse, &columns.coarse_zone, row, path)?);
        if result.insert(key, coarse).is_some() {
            return Err(read_error(
                path,
                format!("zone {key} appears more than once in the crosswalk"),
            ));
        }
    }
    if dropped > 0 {
        log::info!("dropped {dropped} crosswalk rows with no coarse zone");
    }
    Ok(result)
}

/// renumbering of zone data keys into output fine zone ids, read from the
/// `source_zone` and `fine_zone` columns. when the file also has the `coarse_zone`
/// column, the coarse zone of each key is returned as well.
pub fn read_zone_id_crosswalk(
    path: &Path,
    columns: &ZoneColumns,
) -> Result<(HashMap<u64, FineZoneId>, Option<HashMap<u64, CoarseZoneId>>), AppError> {
    let mut reader = open_reader(path)?;
    let header = build_header_lookup(&mut reader, path)?;
    let key_idx = column(&header, columns.key_column(), path)?;
    let fine_idx = column(&header, &columns.fine_zone, path)?;
    let coarse_idx = header.get(&columns.coarse_zone).copied();

    let mut fine_zones = HashMap::new();
    let mut coarse_zones = HashMap::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| read_error(path, format!("row {row}: {e}")))?;
        let key = parse_zone(field(&record, key_idx), columns.key_column(), row, path)?;
        let fine = FineZoneId(parse_zone(field(&record, fine_idx), &columns.fine_zone, row, path)?);
        if fine_zones.insert(key, fine).is_some() {
            return Err(read_error(
                path,
                format!("zone {key} appears more than once in the zone id crosswalk"),
            ));
        }
        if let Some(idx) = coarse_idx {
            let coarse = field(&record, idx);
            if !coarse.is_empty() {
                let coarse = CoarseZoneId(parse_zone(coarse, &columns.coarse_zone, row, path)?);
                coarse_zones.insert(key, coarse);
            }
        }
    }
    log::info!(
        "read {} zone id renumberings from {}",
        fine_zones.len(),
        path.display()
    );
    let coarse_zones = coarse_idx.map(|_| coarse_zones);
    Ok((fine_zones, coarse_zones))
}

/// zone land-use rows, evaluated into the configured size-term attributes. rows are
/// identified by the key column; zones the lookup cannot renumber or place in a coarse
/// zone are dropped.
pub fn read_zone_table(
    path: &Path,
    columns: &ZoneColumns,
    attributes: &[AttributeDefinition],
    lookup: &ZoneLookup,
) -> Result<ZoneAttributeTable, AppError> {
    let mut reader = open_reader(path)?;
    let header = build_header_lookup(&mut reader, path)?;
    let key_idx = column(&header, columns.key_column(), path)?;
    let coarse_idx = match lookup.coarse_zones {
        Some(_) => None,
        None => Some(column(&header, &columns.coarse_zone, path)?),
    };
    let resolved = attributes
        .iter()
        .map(|a| a.column_indices(&header))
        .collect::<Result<Vec<_>, _>>()?;
    let numeric_columns = resolved.iter().flatten().copied().collect::<HashSet<_>>();
    let index_to_name = header
        .iter()
        .map(|(name, idx)| (*idx, name.as_str()))
        .collect::<HashMap<_, _>>();

    let mut zones = vec![];
    let mut not_renumbered = 0;
    let mut not_placed = 0;
    let mut values = vec![0.0; header.len()];
    for (row, record) in tqdm!(reader.records().enumerate(), desc = "read zone data") {
        let record = record.map_err(|e| read_error(path, format!("row {row}: {e}")))?;
        let key = parse_zone(field(&record, key_idx), columns.key_column(), row, path)?;
        let fine_zone = match &lookup.fine_zones {
            Some(ids) => match ids.get(&key) {
                Some(id) => *id,
                None => {
                    not_renumbered += 1;
                    continue;
                }
            },
            None => FineZoneId(key),
        };
        let coarse_zone = match (&lookup.coarse_zones, coarse_idx) {
            (Some(xwalk), _) => match xwalk.get(&key) {
                Some(c) => *c,
                None => {
                    not_placed += 1;
                    continue;
                }
            },
            (None, Some(idx)) => CoarseZoneId(parse_zone(
                field(&record, idx),
                &columns.coarse_zone,
                row,
                path,
            )?),
            (None, None) => {
                return Err(AppError::InvalidUserInput(String::from(
                    "no source of coarse zone ids for the zone data",
                )))
            }
        };
        for idx in numeric_columns.iter() {
            let name = index_to_name.get(idx).copied().unwrap_or_default();
            values[*idx] = parse_value::<f64>(field(&record, *idx), name, row, path)?;
        }
        let attribute_values = resolved
            .iter()
            .map(|indices| AttributeDefinition::evaluate(indices, &values))
            .collect_vec();
        zones.push(FineZone::new(fine_zone, coarse_zone, attribute_values));
    }
    eprintln!();
    if not_renumbered > 0 {
        log::info!("dropped {not_renumbered} zones that are not in the zone id crosswalk");
    }
    if not_placed > 0 {
        log::info!("dropped {not_placed} zones that are not in the coarse zone crosswalk");
    }

    let names = attributes.iter().map(|a| a.name.clone()).collect_vec();
    let table = ZoneAttributeTable::new(names, zones)?;
    log::info!(
        "read {} fine zones in {} coarse zones from {}",
        table.len(),
        table.coarse_zones().len(),
        path.display()
    );
    Ok(table)
}

/// household income by household id.
pub fn read_households(
    path: &Path,
    columns: &HouseholdColumns,
) -> Result<HashMap<String, f64>, AppError> {
    let mut reader = open_reader(path)?;
    let header = build_header_lookup(&mut reader, path)?;
    let id_idx = column(&header, &columns.household_id, path)?;
    let income_idx = column(&header, &columns.income, path)?;

    let mut result = HashMap::new();
    for (row, record) in tqdm!(reader.records().enumerate(), desc = "read households") {
        let record = record.map_err(|e| read_error(path, format!("row {row}: {e}")))?;
        let income = parse_value::<f64>(field(&record, income_idx), &columns.income, row, path)?;
        if !income.is_finite() {
            return Err(read_error(
                path,
                format!("row {row}: column '{}' value {income} is not a finite income", columns.income),
            ));
        }
        result.insert(field(&record, id_idx).to_string(), income);
    }
    eprintln!();
    log::info!("read {} households from {}", result.len(), path.display());
    Ok(result)
}

/// trip rows that pass every filter, joined to household income.
pub fn read_trips(
    path: &Path,
    columns: &TripColumns,
    filters: &[TripFilter],
    households: &HashMap<String, f64>,
) -> Result<TripTable, AppError> {
    let mut reader = open_reader(path)?;
    let header_lookup = build_header_lookup(&mut reader, path)?;
    let header = reader
        .headers()
        .map_err(|e| read_error(path, format!("failure retrieving headers: {e}")))?
        .iter()
        .map(String::from)
        .collect_vec();
    let hh_idx = column(&header_lookup, &columns.household_id, path)?;
    let o_idx = column(&header_lookup, &columns.origin_zone, path)?;
    let d_idx = column(&header_lookup, &columns.destination_zone, path)?;
    let o_purp_idx = column(&header_lookup, &columns.origin_purpose, path)?;
    let d_purp_idx = column(&header_lookup, &columns.destination_purpose, path)?;
    let filter_indices = filters
        .iter()
        .map(|f| f.column_index(&header_lookup))
        .collect::<Result<Vec<_>, _>>()?;

    let mut trips = vec![];
    let mut filtered = 0;
    'rows: for (row, record) in tqdm!(reader.records().enumerate(), desc = "read trips") {
        let record = record.map_err(|e| read_error(path, format!("row {row}: {e}")))?;
        for (filter, idx) in filters.iter().zip(filter_indices.iter()) {
            if !filter.keep(*idx, &record)? {
                filtered += 1;
                continue 'rows;
            }
        }
        let household_id = field(&record, hh_idx).to_string();
        let income = match households.get(&household_id) {
            Some(income) => *income,
            None => {
                return Err(AppError::MissingHousehold {
                    household_id,
                    trip_index: trips.len(),
                })
            }
        };
        trips.push(Trip {
            origin_zone: CoarseZoneId(parse_zone(
                field(&record, o_idx),
                &columns.origin_zone,
                row,
                path,
            )?),
            destination_zone: CoarseZoneId(parse_zone(
                field(&record, d_idx),
                &columns.destination_zone,
                row,
                path,
            )?),
            origin_purpose: field(&record, o_purp_idx).to_string(),
            destination_purpose: field(&record, d_purp_idx).to_string(),
            income,
            household_id,
            pass_through: record.iter().map(String::from).collect(),
        });
    }
    eprintln!();
    log::info!(
        "read {} trips from {} ({filtered} removed by filters)",
        trips.len(),
        path.display()
    );
    Ok(TripTable { header, trips })
}

fn header_lookup_of(header: &StringRecord) -> HashMap<String, usize> {
    header
        .iter()
        .enumerate()
        .map(|(idx, col)| (String::from(col), idx))
        .collect()
}

fn column(header: &HashMap<String, usize>, name: &str, path: &Path) -> Result<usize, AppError> {
    header
        .get(name)
        .copied()
        .ok_or_else(|| read_error(path, format!("missing expected column '{name}'")))
}

fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or_default().trim()
}

/// zone ids may be written as floats (e.g. `1454.0`) by upstream tools.
fn parse_zone(value: &str, col: &str, row: usize, path: &Path) -> Result<u64, AppError> {
    match value.parse::<u64>() {
        Ok(id) => Ok(id),
        Err(_) => {
            let as_float = parse_value::<f64>(value, col, row, path)?;
            if as_float.fract() == 0.0 && as_float >= 0.0 && as_float < u64::MAX as f64 {
                Ok(as_float as u64)
            } else {
                Err(read_error(
                    path,
                    format!("row {row}: column '{col}' value '{value}' is not a zone id"),
                ))
            }
        }
    }
}

fn parse_value<T>(value: &str, col: &str, row: usize, path: &Path) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| {
        read_error(
            path,
            format!("row {row}: column '{col}' value '{value}' could not be parsed: {e}"),
        )
    })
}

fn read_error(path: &Path, message: String) -> AppError {
    AppError::ReadError {
        path: path.to_path_buf(),
        message,
    }
}
