use crate::shared::error::{ApiError, ApiResult};
use crate::shared::http::{ApiRequest, GlooTransport, Transport};
use contracts::domain::a002_log_entry::aggregate::{CreateLogRequest, LogEntry, LogRange};

/// Client for the `/logs` REST surface
pub struct LogClient<T = GlooTransport> {
    transport: T,
}

impl LogClient<GlooTransport> {
    pub fn from_config() -> Self {
        Self::new(GlooTransport::from_config())
    }
}

impl<T: Transport> LogClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Fetch all log entries
    pub async fn list_logs(&self) -> ApiResult<Vec<LogEntry>> {
        self.transport
            .send(ApiRequest::get("/logs/"))
            .await?
            .error_for_status()?
            .json()
    }

    /// Fetch entries inside `[start, end)`
    pub async fn list_logs_filtered(&self, range: LogRange) -> ApiResult<Vec<LogEntry>> {
        let request = ApiRequest::get("/logs/filtered")
            .param("start_time", range.start_param())
            .param("end_time", range.end_param());
        let entries: Vec<LogEntry> = self
            .transport
            .send(request)
            .await?
            .error_for_status()?
            .json()?;
        Ok(entries
            .into_iter()
            .filter(|e| range.contains(e.timestamp))
            .collect())
    }

    /// Append a log entry
    pub async fn create_log(&self, entry: &CreateLogRequest) -> ApiResult<()> {
        if !entry.is_complete() {
            return Err(ApiError::validation("Action and description are required"));
        }
        let mut request = ApiRequest::post("/logs/")
            .param("action", entry.action.trim())
            .param("description", entry.description.trim());
        if let Some(device_uuid) = entry.device_uuid.as_deref().map(str::trim) {
            if !device_uuid.is_empty() {
                request = request.param("device_uuid", device_uuid);
            }
        }
        self.transport.send(request).await?.error_for_status()?;
        Ok(())
    }
}
