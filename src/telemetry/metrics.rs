use std::collections::VecDeque;
use super::event::{SubmissionTarget, TelemetryEvent};

#[derive(Debug, Clone, Default)]
pub struct TelemetrySnapshot {
    pub generation_stats: GenerationStats,
    pub selection_stats: SelectionStats,
    pub submission_stats: SubmissionStats,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationStats {
    pub started: u64,
    pub committed: u64,
    pub discarded: u64,
    pub failed: u64,
    pub fallbacks: u64,
    pub total_options: u64,
    pub avg_options: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionStats {
    pub selections: u64,
    pub missing_selection: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionStats {
    pub primary_ok: u64,
    pub primary_failed: u64,
    pub secondary_ok: u64,
    pub secondary_failed: u64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::GenerationStarted { .. } => snap.generation_stats.started += 1,
            TelemetryEvent::GenerationCommitted { option_count, fallback, .. } => {
                snap.generation_stats.committed += 1;
                snap.generation_stats.total_options += *option_count as u64;
                if *fallback {
                    snap.generation_stats.fallbacks += 1;
                }
            }
            TelemetryEvent::GenerationDiscarded { .. } => snap.generation_stats.discarded += 1,
            TelemetryEvent::GenerationFailed { .. } => snap.generation_stats.failed += 1,
            TelemetryEvent::OptionSelected { .. } => snap.selection_stats.selections += 1,
            TelemetryEvent::SelectionMissing => snap.selection_stats.missing_selection += 1,
            TelemetryEvent::SubmissionWrite { target, ok, .. } => {
                let stats = &mut snap.submission_stats;
                match (target, ok) {
                    (SubmissionTarget::Primary, true) => stats.primary_ok += 1,
                    (SubmissionTarget::Primary, false) => stats.primary_failed += 1,
                    (SubmissionTarget::Secondary, true) => stats.secondary_ok += 1,
                    (SubmissionTarget::Secondary, false) => stats.secondary_failed += 1,
                }
            }
        }
    }

    if snap.generation_stats.committed > 0 {
        snap.generation_stats.avg_options =
            snap.generation_stats.total_options as f64 / snap.generation_stats.committed as f64;
    }

    snap
}
