//! Per-stage record accounting for one pipeline run.

use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

pub struct StageTracker {
    run_id: String,
    stages: Vec<StageMetric>,
}

struct StageMetric {
    stage: String,
    records_in: usize,
    records_out: usize,
}

impl StageTracker {
    pub fn new(run_id: String) -> Self {
        StageTracker {
            run_id,
            stages: Vec::new(),
        }
    }

    pub fn record(&mut self, stage: &str, records_in: usize, records_out: usize) {
        println!("  {}: {} rows in, {} records out", stage, records_in, records_out);
        debug!(
            run_id = %self.run_id,
            stage,
            records_in,
            records_out,
            "stage complete"
        );
        self.stages.push(StageMetric {
            stage: stage.to_string(),
            records_in,
            records_out,
        });
    }

    pub fn report(&self) {
        println!("\nRun {} stage summary:", self.run_id);
        for metric in &self.stages {
            println!(
                "  {:<24} {:>6} in {:>6} out",
                metric.stage, metric.records_in, metric.records_out
            );
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }
}

pub fn new_run_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("run-{}", now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_accumulate_in_order() {
        let mut tracker = StageTracker::new("run-0".to_string());
        tracker.record("first", 10, 12);
        tracker.record("second", 12, 3);
        assert_eq!(tracker.stages.len(), 2);
        assert_eq!(tracker.stages[0].stage, "first");
        assert_eq!(tracker.stages[1].records_out, 3);
        assert_eq!(tracker.run_id(), "run-0");
    }

    #[test]
    fn run_ids_carry_the_prefix() {
        assert!(new_run_id().starts_with("run-"));
    }
}
