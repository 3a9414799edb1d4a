use super::api::LogClient;
use crate::shared::error::ApiError;
use crate::shared::http::{GlooTransport, Transport};
use crate::shared::lifecycle::{Lifecycle, LoadingPhase};
use contracts::domain::a002_log_entry::aggregate::{CreateLogRequest, LogEntry, LogRange};
use leptos::prelude::*;
use std::rc::Rc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogPanelState {
    pub entries: Vec<LogEntry>,
    pub new_entry: CreateLogRequest,
    /// `datetime-local` input values, empty when unset
    pub start_time: String,
    pub end_time: String,
}

impl LogPanelState {
    /// Range to filter by: `None` for the full log, an error when only one
    /// bound is set or the bounds are malformed
    pub fn range(&self) -> Result<Option<LogRange>, ApiError> {
        let (start, end) = (self.start_time.trim(), self.end_time.trim());
        match (start.is_empty(), end.is_empty()) {
            (true, true) => Ok(None),
            (false, false) => LogRange::parse(start, end)
                .map(Some)
                .map_err(|e| ApiError::validation(e.to_string())),
            _ => Err(ApiError::validation(
                "Set both start and end time, or neither",
            )),
        }
    }
}

pub struct LogSession<T: 'static = GlooTransport> {
    pub lifecycle: Lifecycle,
    state: RwSignal<LogPanelState>,
    client: StoredValue<Rc<LogClient<T>>, LocalStorage>,
}

impl<T: 'static> Clone for LogSession<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for LogSession<T> {}

impl LogSession<GlooTransport> {
    pub fn new() -> Self {
        Self::with_client(LogClient::from_config(), Lifecycle::new())
    }
}

impl<T: Transport + 'static> LogSession<T> {
    pub fn with_client(client: LogClient<T>, lifecycle: Lifecycle) -> Self {
        Self {
            lifecycle,
            state: RwSignal::new(LogPanelState::default()),
            client: StoredValue::new_local(Rc::new(client)),
        }
    }

    /// `None` once the panel has been unmounted
    fn client(&self) -> Option<Rc<LogClient<T>>> {
        self.client.try_get_value()
    }

    pub fn state(&self) -> RwSignal<LogPanelState> {
        self.state
    }

    pub fn can_create(&self) -> bool {
        self.state.with(|s| s.new_entry.is_complete())
    }

    pub fn set_action(&self, value: String) {
        self.state.update(|s| s.new_entry.action = value);
    }

    pub fn set_description(&self, value: String) {
        self.state.update(|s| s.new_entry.description = value);
    }

    pub fn set_start_time(&self, value: String) {
        self.state.update(|s| s.start_time = value);
    }

    pub fn set_end_time(&self, value: String) {
        self.state.update(|s| s.end_time = value);
    }

    /// Fetch the full log, or the filtered window when both bounds are set
    pub async fn refresh(&self) {
        let Some(client) = self.client() else {
            return;
        };
        let Some(range) = self.state.try_with_untracked(|s| s.range()) else {
            return;
        };
        let fetched = self
            .lifecycle
            .run(LoadingPhase::ListLoading, async move {
                match range? {
                    Some(range) => client.list_logs_filtered(range).await,
                    None => client.list_logs().await,
                }
            })
            .await;

        if let Some(entries) = fetched {
            self.state.try_update(|s| s.entries = entries);
        }
    }

    /// Post the drafted entry; on success clear the draft and re-fetch
    pub async fn create(&self) {
        let Some(client) = self.client() else {
            return;
        };
        let entry = self.state.with_untracked(|s| s.new_entry.clone());
        let created = self
            .lifecycle
            .run(LoadingPhase::OperationBusy, async move {
                client.create_log(&entry).await
            })
            .await;
        if created.is_none() {
            return;
        }
        self.state.try_update(|s| s.new_entry = CreateLogRequest::default());
        self.refresh().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::testing::{poll_once, ScriptedTransport};
    use crate::shared::spinner::testing::ManualTicker;
    use std::pin::pin;

    fn session() -> (LogSession<ScriptedTransport>, ScriptedTransport) {
        let transport = ScriptedTransport::new();
        let session = LogSession::with_client(
            LogClient::new(transport.clone()),
            Lifecycle::with_ticker(Rc::new(ManualTicker::new())),
        );
        (session, transport)
    }

    #[tokio::test]
    async fn test_refresh_without_range_lists_all() {
        let (session, transport) = session();
        transport.reply(200, "[]");
        session.refresh().await;
        assert_eq!(transport.urls(), vec!["GET /logs/"]);
        assert_eq!(session.lifecycle.phase_untracked(), LoadingPhase::Idle);
    }

    #[tokio::test]
    async fn test_half_set_range_is_rejected_without_request() {
        let (session, transport) = session();
        session.set_start_time("2024-01-01T00:00".to_string());
        session.refresh().await;
        assert!(transport.sent().is_empty());
        assert_eq!(
            session.lifecycle.error_untracked().as_deref(),
            Some("Set both start and end time, or neither")
        );
        assert_eq!(session.lifecycle.phase_untracked(), LoadingPhase::Idle);
    }

    #[tokio::test]
    async fn test_create_clears_draft_and_refetches() {
        let (session, transport) = session();
        session.set_action("reboot".to_string());
        session.set_description("weekly".to_string());
        transport.reply(200, "{}").reply(200, "[]");
        session.create().await;
        assert_eq!(
            transport.urls(),
            vec!["POST /logs/?action=reboot&description=weekly", "GET /logs/"]
        );
        assert_eq!(
            session.state().get_untracked().new_entry,
            CreateLogRequest::default()
        );
    }

    #[test]
    fn test_create_finishing_after_unmount_is_ignored() {
        let owner = Owner::new();
        owner.set();
        let (session, transport) = session();
        session.set_action("reboot".to_string());
        session.set_description("weekly".to_string());

        transport.hold().reply(200, "{}");
        let mut create = pin!(session.create());
        assert!(poll_once(create.as_mut()).is_pending());

        owner.cleanup();
        transport.release();
        assert!(poll_once(create.as_mut()).is_ready());
        assert_eq!(
            transport.urls(),
            vec!["POST /logs/?action=reboot&description=weekly"]
        );
    }

    #[test]
    fn test_range_from_inputs() {
        let mut state = LogPanelState::default();
        assert_eq!(state.range(), Ok(None));
        state.start_time = "2024-01-02T00:00".into();
        state.end_time = "2024-01-01T00:00".into();
        assert!(matches!(state.range(), Err(ApiError::Validation(_))));
        state.end_time = "2024-01-03T00:00".into();
        assert!(state.range().unwrap().is_some());
    }
}
