use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{info, warn};

use randjson_core::{Node, NodeKind};

use crate::errors::GenerationError;
use crate::generator::Generator;
use crate::model::{GenerateOptions, GenerationReport};
use crate::output::write_json_file;
use crate::progress::{CancelToken, ProgressObserver};

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub report: GenerationReport,
}

/// Entry point for generating a document and writing it to disk.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generate the document, then stream it to the output path.
    ///
    /// Both phases report to `observer` and stop early once `cancel` fires.
    pub fn run<O>(
        &self,
        observer: &mut O,
        cancel: &CancelToken,
    ) -> Result<GenerationResult, GenerationError>
    where
        O: ProgressObserver + ?Sized,
    {
        let run_id = uuid::Uuid::new_v4().to_string();
        let started_at = chrono::Utc::now().to_rfc3339();

        match self.run_inner(&run_id, started_at, observer, cancel) {
            Ok(report) => {
                info!(
                    run_id = %run_id,
                    writes = report.writes,
                    bytes_written = report.bytes_written,
                    duration_ms = report.duration_ms,
                    "generation completed"
                );
                Ok(GenerationResult { report })
            }
            Err(err) => {
                warn!(run_id = %run_id, error = %err, "generation failed");
                Err(err)
            }
        }
    }

    fn run_inner<O>(
        &self,
        run_id: &str,
        started_at: String,
        observer: &mut O,
        cancel: &CancelToken,
    ) -> Result<GenerationReport, GenerationError>
    where
        O: ProgressObserver + ?Sized,
    {
        let start = Instant::now();
        let config = &self.options.config;
        let output_path = &self.options.output_path;

        info!(
            run_id = %run_id,
            data_count = config.data_count,
            seed = config.seed,
            output = %output_path.display(),
            "generation started"
        );

        let mut generator = Generator::new(config.clone())?;
        let root = generator.generate(&mut *observer, cancel)?;
        let tally = Tally::of(&root);

        info!(
            containers = tally.containers,
            max_depth = tally.max_depth,
            duration_ms = start.elapsed().as_millis() as u64,
            "tree generated"
        );

        let summary = write_json_file(
            output_path,
            &root,
            config.formatting,
            &mut *observer,
            cancel,
        )?;

        info!(
            path = %output_path.display(),
            writes = summary.writes,
            bytes_written = summary.bytes_written,
            "document written"
        );

        Ok(GenerationReport {
            run_id: run_id.to_string(),
            started_at,
            output_path: output_path.clone(),
            seed: config.seed,
            data_count: config.data_count,
            values_by_kind: tally.values_by_kind,
            containers: tally.containers,
            max_depth: tally.max_depth,
            writes: summary.writes,
            bytes_written: summary.bytes_written,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

/// Shape statistics for a generated tree.
struct Tally {
    values_by_kind: BTreeMap<String, u64>,
    containers: u64,
    max_depth: usize,
}

impl Tally {
    fn of(root: &Node) -> Self {
        let mut values_by_kind: BTreeMap<String, u64> = NodeKind::ALL
            .iter()
            .map(|kind| (kind.as_str().to_string(), 0))
            .collect();
        let mut containers = 1_u64;

        let mut stack: Vec<&Node> = root.children().collect();
        while let Some(node) = stack.pop() {
            *values_by_kind
                .entry(node.kind().as_str().to_string())
                .or_insert(0) += 1;
            if node.is_container() {
                containers += 1;
                stack.extend(node.children());
            }
        }

        Self {
            values_by_kind,
            containers,
            max_depth: root.depth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_kinds_and_containers() {
        let root = Node::Object(vec![
            ("a".to_string(), Node::Array(vec![Node::Null, Node::Null])),
            ("b".to_string(), Node::Boolean(true)),
        ]);
        let tally = Tally::of(&root);
        assert_eq!(tally.containers, 2);
        assert_eq!(tally.max_depth, 2);
        assert_eq!(tally.values_by_kind.get("null"), Some(&2));
        assert_eq!(tally.values_by_kind.get("array"), Some(&1));
        assert_eq!(tally.values_by_kind.get("boolean"), Some(&1));
        assert_eq!(tally.values_by_kind.get("string"), Some(&0));
    }
}
