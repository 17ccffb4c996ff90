//! The create-view API seam and its request body.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::ExportError;

/// Columns hidden in the data manager's explore pane of a new view.
const HIDDEN_EXPLORE_COLUMNS: &[&str] = &[
    "tasks:inner_id",
    "tasks:annotations_results",
    "tasks:annotations_ids",
    "tasks:predictions_score",
    "tasks:predictions_model_versions",
    "tasks:predictions_results",
    "tasks:file_upload",
    "tasks:created_at",
    "tasks:updated_at",
    "tasks:updated_by",
    "tasks:avg_lead_time",
];

/// Columns hidden in the labeling pane of a new view.
const HIDDEN_LABELING_COLUMNS: &[&str] = &[
    "tasks:id",
    "tasks:inner_id",
    "tasks:completed_at",
    "tasks:cancelled_annotations",
    "tasks:total_predictions",
    "tasks:annotators",
    "tasks:annotations_results",
    "tasks:annotations_ids",
    "tasks:predictions_score",
    "tasks:predictions_model_versions",
    "tasks:predictions_results",
    "tasks:file_upload",
    "tasks:created_at",
    "tasks:updated_at",
    "tasks:updated_by",
    "tasks:avg_lead_time",
];

/// Body of `POST /api/dm/views/`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateViewRequest {
    pub project: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<u64>,
    pub data: ViewData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewData {
    #[serde(rename = "type")]
    pub view_type: String,
    pub target: String,
    pub title: String,
    #[serde(rename = "gridWidth")]
    pub grid_width: u32,
    #[serde(rename = "columnsWidth")]
    pub columns_width: Map<String, Value>,
    #[serde(rename = "hiddenColumns")]
    pub hidden_columns: Value,
    #[serde(rename = "columnsDisplayType")]
    pub columns_display_type: Map<String, Value>,
    pub filters: ViewFilters,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewFilters {
    pub conjunction: String,
    pub items: Vec<FilterItem>,
}

/// A single `tasks:id == value` clause.
#[derive(Debug, Clone, Serialize)]
pub struct FilterItem {
    pub filter: String,
    pub operator: String,
    #[serde(rename = "type")]
    pub value_type: String,
    pub value: i64,
}

impl CreateViewRequest {
    /// A list view over `ids` in `project`, OR-ing one id clause per task.
    pub fn for_ids(project: i64, title: &str, ids: &[i64], user: Option<u64>) -> Self {
        Self {
            project,
            user,
            data: ViewData {
                view_type: "list".to_string(),
                target: "tasks".to_string(),
                title: title.to_string(),
                grid_width: 4,
                columns_width: Map::new(),
                hidden_columns: json!({
                    "explore": HIDDEN_EXPLORE_COLUMNS,
                    "labeling": HIDDEN_LABELING_COLUMNS,
                }),
                columns_display_type: Map::new(),
                filters: ViewFilters {
                    conjunction: "or".to_string(),
                    items: ids
                        .iter()
                        .map(|&id| FilterItem {
                            filter: "filter:tasks:id".to_string(),
                            operator: "equal".to_string(),
                            value_type: "Number".to_string(),
                            value: id,
                        })
                        .collect(),
                },
            },
        }
    }

    pub fn title(&self) -> &str {
        &self.data.title
    }

    pub fn id_count(&self) -> usize {
        self.data.filters.items.len()
    }
}

/// Remote system that can create views.
///
/// Uses `async_trait` so the exporter can hold a `Box<dyn ViewApi>` and tests
/// can swap in a scripted implementation.
#[async_trait]
pub trait ViewApi: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Create one view. `Ok` only when the server reports it as created.
    async fn create_view(&self, request: &CreateViewRequest) -> Result<(), ExportError>;
}
