use crate::state::analysis::AnalysisTicket;
use crate::state::messages::{NetworkRequest, NetworkResponse};
use domino_api::GameState;
use domino_api::client::GeminiClient;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

pub struct NetworkWorker {
    client: GeminiClient,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: GeminiClient,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        if client.has_credential() {
            info!("analysis enabled with model {}", client.model());
        } else {
            warn!("no GEMINI_API_KEY set, match analysis is unavailable");
        }
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let response = match request {
                NetworkRequest::Analyze { ticket, snapshot } => {
                    self.handle_analyze(ticket, snapshot).await
                }
            };

            let is_ok = matches!(
                &response,
                NetworkResponse::AnalysisFinished { result: Ok(_), .. }
            );
            debug!("network request complete");
            self.stop_loading_animation(is_ok).await;

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_analyze(&self, ticket: AnalysisTicket, snapshot: GameState) -> NetworkResponse {
        debug!(
            "requesting analysis #{} over {} rounds",
            ticket.generation(),
            snapshot.rounds.len()
        );
        let result = self.client.analyze(&snapshot).await.map_err(|err| {
            error!("Analysis error: {err}");
            err.to_string()
        });
        NetworkResponse::AnalysisFinished { ticket, result }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(80));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::analysis::AnalysisState;
    use domino_api::{Round, Team};

    #[tokio::test]
    async fn missing_credential_comes_back_as_a_failed_analysis() {
        let (req_tx, req_rx) = mpsc::channel(4);
        let (resp_tx, mut resp_rx) = mpsc::channel(64);
        let worker = NetworkWorker::new(GeminiClient::new(None), req_rx, resp_tx);
        let task = tokio::spawn(worker.run());

        let mut analysis = AnalysisState::default();
        let ticket = analysis.begin();
        let mut snapshot = GameState::default();
        snapshot.rounds.push(Round::credit(Team::A, 25));
        req_tx
            .send(NetworkRequest::Analyze { ticket, snapshot })
            .await
            .expect("worker should accept requests");

        let mut saw_error_spinner = false;
        let finished = loop {
            match resp_rx.recv().await.expect("worker should reply") {
                NetworkResponse::LoadingStateChanged { loading_state } => {
                    if !loading_state.is_loading && loading_state.spinner_char == ERROR_CHAR {
                        saw_error_spinner = true;
                    }
                }
                NetworkResponse::AnalysisFinished { ticket: t, result } => break (t, result),
            }
        };

        assert_eq!(finished.0, ticket);
        assert!(finished.1.is_err());
        assert!(saw_error_spinner);
        task.abort();
    }
}
