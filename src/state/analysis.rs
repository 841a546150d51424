use domino_api::Analysis;
use log::debug;

/// Identifies one analysis request. Only the latest ticket may resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket(u64);

impl AnalysisTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum AnalysisStatus {
    #[default]
    Absent,
    Pending,
    Ready(Analysis),
}

/// Transient commentary state. Never part of the game record.
#[derive(Debug, Default)]
pub struct AnalysisState {
    pub status: AnalysisStatus,
    /// Why the last request produced nothing, for the panel footer.
    pub last_failure: Option<String>,
    generation: u64,
}

impl AnalysisState {
    pub fn begin(&mut self) -> AnalysisTicket {
        self.generation += 1;
        self.status = AnalysisStatus::Pending;
        self.last_failure = None;
        AnalysisTicket(self.generation)
    }

    /// Apply a finished request. Responses for superseded tickets, or tickets
    /// issued before the last `clear`, are dropped and `false` is returned.
    pub fn resolve(&mut self, ticket: AnalysisTicket, result: Result<Analysis, String>) -> bool {
        if ticket.0 != self.generation || self.status != AnalysisStatus::Pending {
            debug!(
                "discarding stale analysis response {} (current {})",
                ticket.0, self.generation
            );
            return false;
        }
        match result {
            Ok(analysis) => self.status = AnalysisStatus::Ready(analysis),
            Err(message) => {
                self.status = AnalysisStatus::Absent;
                self.last_failure = Some(message);
            }
        }
        true
    }

    pub fn clear(&mut self) {
        self.generation += 1;
        self.status = AnalysisStatus::Absent;
        self.last_failure = None;
    }

    pub fn is_pending(&self) -> bool {
        self.status == AnalysisStatus::Pending
    }

    pub fn result(&self) -> Option<&Analysis> {
        match &self.status {
            AnalysisStatus::Ready(analysis) => Some(analysis),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(summary: &str) -> Analysis {
        Analysis {
            summary: summary.to_string(),
            prediction: "A takes it".to_string(),
            tips: vec!["one".into(), "two".into(), "three".into()],
        }
    }

    #[test]
    fn success_replaces_pending() {
        let mut state = AnalysisState::default();
        let ticket = state.begin();
        assert!(state.is_pending());
        assert!(state.resolve(ticket, Ok(sample("first"))));
        assert_eq!(state.result().map(|a| a.summary.as_str()), Some("first"));
    }

    #[test]
    fn failure_leaves_nothing_pending_and_allows_retry() {
        let mut state = AnalysisState::default();
        let ticket = state.begin();
        assert!(state.resolve(ticket, Err("timeout".into())));
        assert_eq!(state.status, AnalysisStatus::Absent);
        assert_eq!(state.last_failure.as_deref(), Some("timeout"));

        let retry = state.begin();
        assert!(state.last_failure.is_none());
        assert!(state.resolve(retry, Ok(sample("second"))));
        assert!(state.result().is_some());
    }

    #[test]
    fn new_result_overwrites_the_old_one() {
        let mut state = AnalysisState::default();
        let first = state.begin();
        state.resolve(first, Ok(sample("first")));
        let second = state.begin();
        state.resolve(second, Ok(sample("second")));
        assert_eq!(state.result().map(|a| a.summary.as_str()), Some("second"));
    }

    #[test]
    fn superseded_response_is_discarded() {
        let mut state = AnalysisState::default();
        let old = state.begin();
        let new = state.begin();
        assert!(!state.resolve(old, Ok(sample("old"))));
        assert!(state.is_pending());
        assert!(state.resolve(new, Ok(sample("new"))));
        assert_eq!(state.result().map(|a| a.summary.as_str()), Some("new"));
    }

    #[test]
    fn response_after_clear_is_discarded() {
        let mut state = AnalysisState::default();
        let ticket = state.begin();
        state.clear();
        assert!(!state.resolve(ticket, Ok(sample("late"))));
        assert_eq!(state.status, AnalysisStatus::Absent);
    }

    #[test]
    fn duplicate_resolution_is_ignored() {
        let mut state = AnalysisState::default();
        let ticket = state.begin();
        assert!(state.resolve(ticket, Ok(sample("first"))));
        assert!(!state.resolve(ticket, Err("late failure".into())));
        assert!(state.result().is_some());
    }
}
