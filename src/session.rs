//! Per-session state — the one record every pipeline stage reads and writes.
//!
//! The UI owns a single `Session`. Submitting a filter builds the prompt from
//! it, each completion that comes back is folded into it in arrival order,
//! and applying a candidate swaps its displayed rows and columns.

use crate::grid::{self, ColumnDef, Record};
use crate::llm::{self, prompts, FetchError};
use serde_json::Value;

/// Where the most recent request cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingRemote,
    CandidateReady,
    Failed,
    Applied,
}

#[derive(Debug)]
pub struct Session {
    original: Vec<Record>,
    filter_input: String,
    raw_completion: Option<String>,
    candidate: Vec<Value>,
    rows: Vec<Value>,
    columns: Vec<ColumnDef>,
    alert: Option<String>,
    phase: Phase,
    in_flight: usize,
}

impl Session {
    /// Start with the displayed dataset equal to `original`.
    pub fn new(original: Vec<Record>, columns: Vec<ColumnDef>) -> Self {
        let rows = grid::rows_from_records(&original);
        Self {
            original,
            filter_input: String::new(),
            raw_completion: None,
            candidate: Vec::new(),
            rows,
            columns,
            alert: None,
            phase: Phase::Idle,
            in_flight: 0,
        }
    }

    /// Session over the built-in seed dataset.
    pub fn seeded() -> Self {
        Self::new(grid::seed_records(), grid::seed_columns())
    }

    pub fn original(&self) -> &[Record] {
        &self.original
    }

    pub fn filter_input(&self) -> &str {
        &self.filter_input
    }

    pub fn set_filter_input(&mut self, text: &str) {
        self.filter_input.clear();
        self.filter_input.push_str(text);
    }

    pub fn raw_completion(&self) -> Option<&str> {
        self.raw_completion.as_deref()
    }

    pub fn candidate(&self) -> &[Value] {
        &self.candidate
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Requests submitted whose completion has not arrived yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Open a new request cycle and return its prompt.
    ///
    /// Discards the previous raw completion and any unapplied candidate.
    /// The displayed dataset is untouched.
    pub fn begin_request(&mut self) -> String {
        self.raw_completion = None;
        self.candidate.clear();
        self.in_flight += 1;
        self.phase = Phase::AwaitingRemote;
        prompts::build_filter_prompt(&self.original, &self.filter_input)
    }

    /// Fold one completion outcome into the session.
    ///
    /// Outcomes are applied in the order they arrive; a later arrival
    /// overwrites the raw completion and candidate of an earlier one.
    /// Never touches the displayed dataset or schema.
    pub fn receive_completion(&mut self, outcome: Result<String, FetchError>) {
        self.in_flight = self.in_flight.saturating_sub(1);

        let completion = match outcome {
            Ok(text) => text,
            Err(e) => {
                log::error!("[PIPELINE] {}", e);
                self.fail(e.to_string());
                return;
            }
        };

        let parsed = llm::candidate_from_completion(&completion);
        self.raw_completion = Some(completion);

        match parsed {
            Ok(rows) => {
                log::info!("[PIPELINE] Candidate ready with {} rows", rows.len());
                self.candidate = rows;
                self.phase = Phase::CandidateReady;
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    /// Replace the displayed dataset with the candidate and narrow the
    /// schema to the candidate's fields.
    ///
    /// An empty candidate leaves everything displayed as it was and raises
    /// an alert.
    pub fn apply_candidate(&mut self) -> Result<(), grid::ApplyError> {
        match grid::reconcile(&self.candidate, &self.columns) {
            Ok(reconciled) => {
                self.columns = reconciled.columns;
                self.rows = reconciled.rows;
                self.phase = Phase::Applied;
                Ok(())
            }
            Err(e) => {
                self.raise(e.to_string());
                Err(e)
            }
        }
    }

    fn fail(&mut self, message: String) {
        self.phase = Phase::Failed;
        self.raise(message);
    }

    fn raise(&mut self, message: String) {
        log::warn!("[PIPELINE] Alert: {}", message);
        self.alert = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ApplyError;
    use serde_json::json;

    fn fields(session: &Session) -> Vec<&str> {
        session.columns().iter().map(|c| c.field.as_str()).collect()
    }

    fn fenced(payload: &str) -> Result<String, FetchError> {
        Ok(format!("Here you go:\n```json\n{payload}\n```"))
    }

    #[test]
    fn starts_with_original_dataset_displayed() {
        let session = Session::seeded();
        assert_eq!(session.rows().len(), 11);
        assert_eq!(fields(&session), ["name", "language", "country", "game"]);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.raw_completion().is_none());
        assert!(session.candidate().is_empty());
    }

    #[test]
    fn begin_request_builds_prompt_from_filter_text() {
        let mut session = Session::seeded();
        session.set_filter_input("people who play chess");
        let prompt = session.begin_request();
        assert!(prompt.contains("filter by people who play chess."));
        assert!(prompt.contains("\"name\":\"Takeshi\""));
        assert_eq!(session.phase(), Phase::AwaitingRemote);
        assert_eq!(session.in_flight(), 1);
    }

    #[test]
    fn prompt_uses_original_even_after_apply() {
        let mut session = Session::seeded();
        session.begin_request();
        session.receive_completion(fenced(r#"[{"name":"Ana"}]"#));
        session.apply_candidate().unwrap();
        let prompt = session.begin_request();
        assert!(prompt.contains("\"name\":\"Giuseppe\""));
    }

    #[test]
    fn successful_completion_stages_candidate_without_applying() {
        let mut session = Session::seeded();
        session.begin_request();
        session.receive_completion(fenced(r#"[{"name":"X"}]"#));

        assert_eq!(session.phase(), Phase::CandidateReady);
        assert_eq!(session.candidate(), [json!({"name": "X"})]);
        assert!(session.raw_completion().unwrap().contains("```json"));
        assert_eq!(session.rows().len(), 11);
        assert_eq!(session.in_flight(), 0);
        assert!(session.alert().is_none());
    }

    #[test]
    fn object_payload_raises_format_alert_and_keeps_raw_text() {
        let mut session = Session::seeded();
        session.begin_request();
        session.receive_completion(fenced(r#"{"name":"X"}"#));

        assert_eq!(session.phase(), Phase::Failed);
        assert_eq!(
            session.alert(),
            Some("Invalid response format. Please try again.")
        );
        assert!(session.raw_completion().is_some());
        assert!(session.candidate().is_empty());
    }

    #[test]
    fn malformed_payload_raises_parse_alert() {
        let mut session = Session::seeded();
        session.begin_request();
        session.receive_completion(fenced("not json"));
        assert_eq!(session.alert(), Some("Error parsing JSON. Please try again."));
    }

    #[test]
    fn unfenced_completion_raises_missing_block_alert() {
        let mut session = Session::seeded();
        session.begin_request();
        session.receive_completion(Ok("[{\"name\":\"X\"}]".to_string()));
        assert_eq!(
            session.alert(),
            Some("No JSON code block found in the response. Please try again.")
        );
        assert!(session.candidate().is_empty());
    }

    #[test]
    fn fetch_failure_is_surfaced_and_changes_nothing_else() {
        let mut session = Session::seeded();
        session.begin_request();
        session.receive_completion(Err(FetchError::new("service returned 500")));

        assert_eq!(session.phase(), Phase::Failed);
        assert_eq!(
            session.alert(),
            Some("Error fetching response: service returned 500")
        );
        assert!(session.raw_completion().is_none());
        assert_eq!(session.rows().len(), 11);
        assert_eq!(session.in_flight(), 0);
    }

    #[test]
    fn apply_narrows_schema_and_replaces_rows() {
        let mut session = Session::seeded();
        session.begin_request();
        session.receive_completion(fenced(r#"[{"name":"Ana","game":"Chess"}]"#));
        session.apply_candidate().unwrap();

        assert_eq!(fields(&session), ["name", "game"]);
        assert_eq!(session.rows(), [json!({"name": "Ana", "game": "Chess"})]);
        assert_eq!(session.phase(), Phase::Applied);
    }

    #[test]
    fn applying_empty_candidate_is_refused() {
        let mut session = Session::seeded();
        session.begin_request();
        session.receive_completion(fenced("[]"));
        assert_eq!(session.phase(), Phase::CandidateReady);

        let result = session.apply_candidate();
        assert_eq!(result, Err(ApplyError::NoVisualizationData));
        assert_eq!(session.alert(), Some("No visualization data available."));
        assert_eq!(session.rows().len(), 11);
        assert_eq!(fields(&session), ["name", "language", "country", "game"]);
    }

    #[test]
    fn new_request_discards_unapplied_candidate() {
        let mut session = Session::seeded();
        session.begin_request();
        session.receive_completion(fenced(r#"[{"name":"X"}]"#));
        session.begin_request();

        assert!(session.candidate().is_empty());
        assert!(session.raw_completion().is_none());
        assert_eq!(session.phase(), Phase::AwaitingRemote);
    }

    #[test]
    fn later_arrival_wins_regardless_of_submission_order() {
        let mut session = Session::seeded();
        session.set_filter_input("first");
        session.begin_request();
        session.set_filter_input("second");
        session.begin_request();
        assert_eq!(session.in_flight(), 2);

        // The second request answers first, the first one last.
        session.receive_completion(fenced(r#"[{"name":"second"}]"#));
        session.receive_completion(fenced(r#"[{"name":"first"}]"#));

        assert_eq!(session.candidate(), [json!({"name": "first"})]);
        assert!(session.raw_completion().unwrap().contains("first"));
        assert_eq!(session.in_flight(), 0);
    }

    #[test]
    fn dismiss_alert_clears_it() {
        let mut session = Session::seeded();
        let _ = session.apply_candidate();
        assert!(session.alert().is_some());
        session.dismiss_alert();
        assert!(session.alert().is_none());
    }
}
