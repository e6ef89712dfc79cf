use std::io::Read;

use scene::Row;
use tracing::debug;

use crate::columns::{ColumnIndex, ColumnMap};
use crate::error::LoadError;

/// Parse headed CSV into rows.
///
/// Cells are trimmed; empty cells and unparsable numbers become `None` and are
/// left for the aggregator to drop. Short records are tolerated.
pub fn read_rows<R: Read>(reader: R, columns: &ColumnMap) -> Result<Vec<Row>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    let index = columns.resolve(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(to_row(&record?, &index));
    }
    debug!(rows = rows.len(), "parsed csv");
    Ok(rows)
}

fn to_row(record: &csv::StringRecord, index: &ColumnIndex) -> Row {
    let text = |at: Option<usize>| {
        at.and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    let number = |at: Option<usize>| text(at).and_then(|s| s.parse::<f64>().ok());

    Row {
        department: text(Some(index.department)),
        emission: number(Some(index.emission)),
        trip_id: text(index.trip_id),
        purpose: text(index.purpose),
        transport_mode: text(index.transport_mode),
        origin_city: text(index.origin_city),
        destination_city: text(index.destination_city),
        net_cost: number(index.net_cost),
    }
}

#[cfg(test)]
mod tests {
    use super::read_rows;
    use crate::columns::ColumnMap;
    use crate::error::LoadError;
    use pretty_assertions::assert_eq;
    use scene::Row;

    #[test]
    fn reads_full_rows() {
        let csv = "\
trip_id,department,emission_kg,purpose,transport_mode,origin_city,destination_city,net_cost
T1,Sales,120.5,Client,Flight,NYC,SF,800
";
        let rows = read_rows(csv.as_bytes(), &ColumnMap::default()).expect("rows");
        assert_eq!(
            rows,
            vec![Row {
                net_cost: Some(800.0),
                ..Row::new("Sales", 120.5)
                    .trip_id("T1")
                    .purpose("Client")
                    .transport_mode("Flight")
                    .route("NYC", "SF")
            }]
        );
    }

    #[test]
    fn blank_and_bad_cells_become_none() {
        let csv = "department,emission_kg,purpose\n  ,abc,  \nLegal,5\n";
        let rows = read_rows(csv.as_bytes(), &ColumnMap::default()).expect("rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].department, None);
        assert_eq!(rows[0].emission, None);
        assert_eq!(rows[0].purpose, None);
        assert_eq!(rows[1], Row::new("Legal", 5.0));
    }

    #[test]
    fn custom_headers_are_honored() {
        let columns = ColumnMap {
            department: "team".into(),
            emission: "co2".into(),
            ..ColumnMap::default()
        };
        let rows = read_rows("team,co2\nOps,7\n".as_bytes(), &columns).expect("rows");
        assert_eq!(rows, vec![Row::new("Ops", 7.0)]);
    }

    #[test]
    fn missing_emission_column_fails() {
        let err = read_rows("department\nSales\n".as_bytes(), &ColumnMap::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { .. }));
    }

    #[test]
    fn header_only_input_has_no_rows() {
        let rows = read_rows("department,emission_kg\n".as_bytes(), &ColumnMap::default())
            .expect("rows");
        assert!(rows.is_empty());
    }
}
