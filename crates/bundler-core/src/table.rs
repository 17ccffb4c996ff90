//! The table feed: one record per row of the effective subset.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::dataset::{Dataset, Row, COLOR_COLUMN, ID_COLUMN, PROJECT_COLUMN};
use crate::mapping::{ColorMapping, Rgb};
use crate::thumbnail::ImagePayload;

/// A rendered table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRecord {
    /// Dataset row index
    pub index: usize,
    /// Marker color from the active mapping
    pub fill: Rgb,
    /// `<img>` tag for image datasets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Visible columns in header order, nested so that dataset columns
    /// named like the keys above cannot shadow them
    pub fields: Map<String, Value>,
}

impl TableRecord {
    pub fn from_row(
        dataset: &Dataset,
        mapping: &ColorMapping,
        row: &Row,
        image: Option<&ImagePayload>,
    ) -> Self {
        let fields = dataset
            .table_columns()
            .into_iter()
            .map(|column| (column.to_string(), cell_value(dataset, row, column)))
            .collect();

        Self {
            index: row.index,
            fill: mapping.color_for(row.color.as_ref()),
            image: image.map(ImagePayload::to_html),
            fields,
        }
    }
}

/// Records for `rows` without image payloads.
pub fn table_records(dataset: &Dataset, mapping: &ColorMapping, rows: &[&Row]) -> Vec<TableRecord> {
    rows.iter()
        .map(|row| TableRecord::from_row(dataset, mapping, row, None))
        .collect()
}

fn cell_value(dataset: &Dataset, row: &Row, column: &str) -> Value {
    match column {
        ID_COLUMN => Value::from(row.id),
        PROJECT_COLUMN => Value::from(row.project),
        COLOR_COLUMN => row
            .color
            .as_ref()
            .and_then(|label| serde_json::to_value(label).ok())
            .unwrap_or(Value::Null),
        _ => dataset
            .value(row, column)
            .map(|v| Value::String(v.to_string()))
            .unwrap_or(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{compute_mapping, NO_DATA_COLOR};

    fn dataset() -> Dataset {
        let csv = "Unnamed: 0,id,project,x,y,color,path,caption\n\
                   0,10,1,0.5,0.5,cat,a.jpg,first\n\
                   1,11,1,0.1,0.9,,b.jpg,second\n";
        Dataset::from_reader(csv.as_bytes(), "t.csv").unwrap()
    }

    #[test]
    fn test_hidden_columns_are_excluded() {
        let ds = dataset();
        let mapping = compute_mapping(&ds).unwrap();
        let rows: Vec<&Row> = ds.rows().iter().collect();
        let records = table_records(&ds, &mapping, &rows);

        let keys: Vec<&str> = records[0].fields.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 4);
        for key in ["id", "project", "color", "caption"] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(records[0].fields["id"], 10);
        assert_eq!(records[0].fields["color"], "cat");
        assert_eq!(records[0].fields["caption"], "first");
    }

    #[test]
    fn test_missing_label_is_null_and_grey() {
        let ds = dataset();
        let mapping = compute_mapping(&ds).unwrap();
        let record = TableRecord::from_row(&ds, &mapping, &ds.rows()[1], None);
        assert_eq!(record.fields["color"], Value::Null);
        assert_eq!(record.fill, NO_DATA_COLOR);
    }

    #[test]
    fn test_serialized_shape() {
        let ds = dataset();
        let mapping = compute_mapping(&ds).unwrap();
        let record = TableRecord::from_row(
            &ds,
            &mapping,
            &ds.rows()[0],
            Some(&ImagePayload::Url("http://x/a.jpg".into())),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["index"], 0);
        assert!(json["fill"].as_str().unwrap().starts_with('#'));
        assert!(json["image"].as_str().unwrap().contains("http://x/a.jpg"));
        assert_eq!(json["fields"]["caption"], "first");
        assert!(json["fields"].get("path").is_none());
    }

    #[test]
    fn test_columns_named_like_record_keys_do_not_clash() {
        let csv = "id,project,x,y,index,fill,image\n10,1,0,0,row-a,red,pic\n";
        let ds = Dataset::from_reader(csv.as_bytes(), "clash.csv").unwrap();
        let mapping = compute_mapping(&ds).unwrap();
        let record = TableRecord::from_row(&ds, &mapping, &ds.rows()[0], None);

        let out = serde_json::to_string(&record).unwrap();
        assert_eq!(out.matches("\"index\"").count(), 2);
        let json: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["index"], 0);
        assert_eq!(json["fill"], mapping.color_for(None).hex());
        assert!(json.get("image").is_none());
        assert_eq!(json["fields"]["index"], "row-a");
        assert_eq!(json["fields"]["fill"], "red");
        assert_eq!(json["fields"]["image"], "pic");
    }
}
