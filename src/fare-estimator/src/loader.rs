use chrono::DateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use fare_core::{
    FieldError, Point, RawBatch, Result, Trip, TripId, TripLoader,
    error::{
        error::MalformedRecordSnafu,
        field_error::{CsvSnafu, FieldCountSnafu, FloatSnafu, IntegerSnafu, TimestampRangeSnafu},
    },
};
use snafu::{OptionExt, ResultExt, ensure};

static NUM_FIELDS: usize = 4;

/// Reads batches of `trip_id,latitude,longitude,unix_timestamp` records.
#[derive(Debug, Default, Clone)]
pub struct CsvLoader;

impl TripLoader for CsvLoader {
    fn load(&self, trip: &mut Trip, batch: &RawBatch) -> Result<()> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(batch.as_str().as_bytes());

        let mut record = StringRecord::new();
        let mut line_number = 1;

        loop {
            let read = reader
                .read_record(&mut record)
                .context(CsvSnafu)
                .context(MalformedRecordSnafu {
                    line_number,
                    line: "",
                })?;
            if !read {
                break;
            }

            if let Some(position) = record.position() {
                line_number = position.line();
            }

            // Lines holding nothing but whitespace
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }

            let (id, point) = parse_record(&record).context(MalformedRecordSnafu {
                line_number,
                line: record.iter().collect::<Vec<_>>().join(","),
            })?;

            trip.set_id(id);
            trip.push_point(point);
        }

        Ok(())
    }
}

fn parse_record(record: &StringRecord) -> std::result::Result<(TripId, Point), FieldError> {
    ensure!(
        record.len() == NUM_FIELDS,
        FieldCountSnafu {
            expected: NUM_FIELDS,
            found: record.len(),
        }
    );

    let id: TripId = record[0].parse().context(IntegerSnafu { value: &record[0] })?;
    let latitude: f64 = record[1].parse().context(FloatSnafu { value: &record[1] })?;
    let longitude: f64 = record[2].parse().context(FloatSnafu { value: &record[2] })?;
    let timestamp: i64 = record[3].parse().context(IntegerSnafu { value: &record[3] })?;

    let timestamp =
        DateTime::from_timestamp(timestamp, 0).context(TimestampRangeSnafu { value: timestamp })?;

    Ok((id, Point::new(latitude, longitude, timestamp)))
}
