//! Grouping of selected rows into per-project pages of ids.

use crate::dataset::Row;

/// Maximum number of task ids a single create-view call may reference.
pub const MAX_IDS_PER_VIEW: usize = 100;

/// Ids of one project, in selection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIds {
    pub project: i64,
    pub ids: Vec<i64>,
}

/// One page of ids destined for a single create-view call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewChunk<'a> {
    pub project: i64,
    pub chunk_index: usize,
    pub title: String,
    pub ids: &'a [i64],
}

/// Row ids grouped by project, in first-seen project order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportBatch {
    projects: Vec<ProjectIds>,
}

impl ExportBatch {
    /// Group rows by project, keeping the given row order within each project.
    pub fn from_rows<'r, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'r Row>,
    {
        let mut projects: Vec<ProjectIds> = Vec::new();
        for row in rows {
            match projects.iter_mut().find(|p| p.project == row.project) {
                Some(group) => group.ids.push(row.id),
                None => projects.push(ProjectIds {
                    project: row.project,
                    ids: vec![row.id],
                }),
            }
        }
        Self { projects }
    }

    pub fn projects(&self) -> &[ProjectIds] {
        &self.projects
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Total number of ids across all projects.
    pub fn total_ids(&self) -> usize {
        self.projects.iter().map(|p| p.ids.len()).sum()
    }

    /// Split every project into pages and title them.
    ///
    /// A project that fits in one page gets `name` as its title; larger
    /// projects get `"{name} - {i}"` for each zero-based page `i`.
    pub fn chunks(&self, name: &str) -> Vec<ViewChunk<'_>> {
        let mut chunks = Vec::new();
        for group in &self.projects {
            if group.ids.len() <= MAX_IDS_PER_VIEW {
                chunks.push(ViewChunk {
                    project: group.project,
                    chunk_index: 0,
                    title: name.to_string(),
                    ids: &group.ids,
                });
                continue;
            }
            for (i, page) in group.ids.chunks(MAX_IDS_PER_VIEW).enumerate() {
                chunks.push(ViewChunk {
                    project: group.project,
                    chunk_index: i,
                    title: format!("{name} - {i}"),
                    ids: page,
                });
            }
        }
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, project: i64) -> Row {
        Row {
            index: id as usize,
            id,
            project,
            x: 0.0,
            y: 0.0,
            color: None,
            extra: vec![],
        }
    }

    #[test]
    fn test_groups_by_project_in_first_seen_order() {
        let rows = vec![row(5, 2), row(1, 1), row(3, 2), row(2, 1)];
        let batch = ExportBatch::from_rows(&rows);
        assert_eq!(
            batch.projects(),
            &[
                ProjectIds {
                    project: 2,
                    ids: vec![5, 3]
                },
                ProjectIds {
                    project: 1,
                    ids: vec![1, 2]
                },
            ]
        );
        assert_eq!(batch.total_ids(), 4);
    }

    #[test]
    fn test_empty_rows_give_no_chunks() {
        let batch = ExportBatch::from_rows(std::iter::empty::<&Row>());
        assert!(batch.is_empty());
        assert!(batch.chunks("anything").is_empty());
    }

    #[test]
    fn test_single_page_uses_plain_title() {
        let rows: Vec<Row> = (0..100).map(|i| row(i, 1)).collect();
        let batch = ExportBatch::from_rows(&rows);
        let chunks = batch.chunks("Batch1");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].title, "Batch1");
        assert_eq!(chunks[0].ids.len(), 100);
    }

    #[test]
    fn test_250_ids_split_into_three_titled_pages() {
        let rows: Vec<Row> = (0..250).map(|i| row(i, 1)).collect();
        let batch = ExportBatch::from_rows(&rows);
        let chunks = batch.chunks("Batch1");

        let titles: Vec<&str> = chunks.iter().map(|c| c.title.as_str()).collect();
        let sizes: Vec<usize> = chunks.iter().map(|c| c.ids.len()).collect();
        assert_eq!(titles, vec!["Batch1 - 0", "Batch1 - 1", "Batch1 - 2"]);
        assert_eq!(sizes, vec![100, 100, 50]);
        assert_eq!(chunks[2].ids.first(), Some(&200));
        assert_eq!(chunks[2].chunk_index, 2);
    }

    #[test]
    fn test_chunks_cover_every_id_once() {
        let rows: Vec<Row> = (0..537).map(|i| row(i, i % 3)).collect();
        let batch = ExportBatch::from_rows(&rows);
        let chunks = batch.chunks("n");

        for project in batch.projects() {
            let total: usize = chunks
                .iter()
                .filter(|c| c.project == project.project)
                .map(|c| c.ids.len())
                .sum();
            assert_eq!(total, project.ids.len());
        }
        assert!(chunks.iter().all(|c| c.ids.len() <= MAX_IDS_PER_VIEW));
        assert_eq!(chunks.iter().map(|c| c.ids.len()).sum::<usize>(), 537);
    }
}
