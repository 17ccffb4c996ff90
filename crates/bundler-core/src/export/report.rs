//! Per-chunk outcome of an export.

use serde::Serialize;

/// Outcome of one create-view call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum ChunkOutcome {
    Success,
    Failure(String),
}

/// Report line for one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkReport {
    pub project: i64,
    pub chunk_index: usize,
    pub title: String,
    pub id_count: usize,
    pub outcome: ChunkOutcome,
}

impl ChunkReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ChunkOutcome::Success)
    }
}

/// Ordered record of every call an export issued.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExportReport {
    chunks: Vec<ChunkReport>,
}

impl ExportReport {
    pub fn push(&mut self, chunk: ChunkReport) {
        self.chunks.push(chunk);
    }

    pub fn chunks(&self) -> &[ChunkReport] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.chunks.iter().filter(|c| c.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.chunks.len() - self.succeeded()
    }

    /// Failed chunks, for operator display.
    pub fn failures(&self) -> impl Iterator<Item = &ChunkReport> {
        self.chunks.iter().filter(|c| !c.is_success())
    }

    /// Ids that ended up in a created view.
    pub fn exported_ids(&self) -> usize {
        self.chunks
            .iter()
            .filter(|c| c.is_success())
            .map(|c| c.id_count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(project: i64, outcome: ChunkOutcome) -> ChunkReport {
        ChunkReport {
            project,
            chunk_index: 0,
            title: "t".to_string(),
            id_count: 10,
            outcome,
        }
    }

    #[test]
    fn test_counts() {
        let mut report = ExportReport::default();
        report.push(chunk(1, ChunkOutcome::Success));
        report.push(chunk(2, ChunkOutcome::Failure("HTTP 400".into())));
        report.push(chunk(3, ChunkOutcome::Success));

        assert_eq!(report.len(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.exported_ids(), 20);
        assert_eq!(report.failures().next().unwrap().project, 2);
    }

    #[test]
    fn test_serializes_as_array() {
        let mut report = ExportReport::default();
        report.push(chunk(1, ChunkOutcome::Failure("HTTP 500: boom".into())));
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"status\":\"failure\""));
        assert!(json.contains("\"detail\":\"HTTP 500: boom\""));

        let ok = serde_json::to_string(&ChunkOutcome::Success).unwrap();
        assert_eq!(ok, "{\"status\":\"success\"}");
    }
}
