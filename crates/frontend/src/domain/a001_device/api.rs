use crate::shared::error::{ApiError, ApiResult};
use crate::shared::http::{ApiRequest, GlooTransport, Transport};
use contracts::domain::a001_device::aggregate::{DeviceFilter, DeviceRecord};
use contracts::enums::{DeviceType, MotorDirection};

/// Client for the `/devices` REST surface.
///
/// Every call is a single request; gating overlapping calls is the job of
/// the panel lifecycle.
pub struct DeviceClient<T = GlooTransport> {
    transport: T,
}

impl DeviceClient<GlooTransport> {
    pub fn from_config() -> Self {
        Self::new(GlooTransport::from_config())
    }
}

fn device_uuid(uuid: &str) -> ApiResult<&str> {
    let uuid = uuid.trim();
    if uuid.is_empty() {
        return Err(ApiError::validation("No device selected"));
    }
    Ok(uuid)
}

impl<T: Transport> DeviceClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    async fn send(&self, request: ApiRequest) -> ApiResult<crate::shared::http::ApiResponse> {
        self.transport.send(request).await?.error_for_status()
    }

    /// Fetch devices, either all of them or one type
    pub async fn list_devices(&self, filter: DeviceFilter) -> ApiResult<Vec<DeviceRecord>> {
        let path = match filter {
            DeviceFilter::All => "/devices/".to_string(),
            DeviceFilter::Type(t) => format!("/devices/type/{}", t.code()),
        };
        self.send(ApiRequest::get(path)).await?.json()
    }

    pub async fn create_device(&self, record: &DeviceRecord) -> ApiResult<()> {
        let record = record.trimmed();
        if !record.is_complete() {
            return Err(ApiError::validation("All device fields are required"));
        }
        self.send(ApiRequest::post("/devices/").json(&record)?)
            .await?;
        Ok(())
    }

    pub async fn delete_device(&self, uuid: &str) -> ApiResult<()> {
        let uuid = device_uuid(uuid)?;
        self.send(ApiRequest::delete(format!("/devices/{}", uuid)))
            .await?;
        Ok(())
    }

    pub async fn update_name(&self, uuid: &str, new_name: &str) -> ApiResult<()> {
        let uuid = device_uuid(uuid)?;
        let request = ApiRequest::put(format!("/devices/update_name/{}", uuid))
            .param("new_name", new_name.trim());
        self.send(request).await?;
        Ok(())
    }

    pub async fn update_description(&self, uuid: &str, new_description: &str) -> ApiResult<()> {
        let uuid = device_uuid(uuid)?;
        let request = ApiRequest::put(format!("/devices/update_description/{}", uuid))
            .param("new_description", new_description.trim());
        self.send(request).await?;
        Ok(())
    }

    pub async fn get_status(&self, uuid: &str) -> ApiResult<String> {
        self.get_text("/devices/get_status".to_string(), uuid).await
    }

    pub async fn get_version(&self, uuid: &str) -> ApiResult<String> {
        self.get_text("/devices/get_version".to_string(), uuid).await
    }

    async fn get_text(&self, path: String, uuid: &str) -> ApiResult<String> {
        let uuid = device_uuid(uuid)?;
        let response = self
            .send(ApiRequest::get(path).param("device_uuid", uuid))
            .await?;
        Ok(response.text().trim().to_string())
    }

    /// `GET /devices/{type}/{operation}` returning plain text
    pub async fn read_text(
        &self,
        device_type: DeviceType,
        operation: &str,
        uuid: &str,
    ) -> ApiResult<String> {
        self.get_text(format!("/devices/{}/{}", device_type.code(), operation), uuid)
            .await
    }

    /// Like `read_text`, but the body must be a number
    pub async fn read_number(
        &self,
        device_type: DeviceType,
        operation: &str,
        uuid: &str,
        quantity: &str,
    ) -> ApiResult<f64> {
        let text = self.read_text(device_type, operation, uuid).await?;
        parse_number(&text, quantity)
    }

    /// `PUT /devices/{type}/{operation}?device_uuid=..&{param}=..`
    pub async fn write_value(
        &self,
        device_type: DeviceType,
        operation: &str,
        uuid: &str,
        param: &str,
        value: &str,
    ) -> ApiResult<()> {
        let uuid = device_uuid(uuid)?;
        let value = value.trim();
        if value.is_empty() {
            return Err(ApiError::validation(format!("A value for {} is required", param)));
        }
        let request = ApiRequest::put(format!("/devices/{}/{}", device_type.code(), operation))
            .param("device_uuid", uuid)
            .param(param, value);
        self.send(request).await?;
        Ok(())
    }

    pub async fn read_temperature(&self, uuid: &str) -> ApiResult<f64> {
        self.read_number(DeviceType::TemperatureSensor, "read_temperature", uuid, "temperature")
            .await
    }

    pub async fn set_speed(&self, device_type: DeviceType, uuid: &str, speed: f64) -> ApiResult<()> {
        self.write_value(device_type, "set_speed", uuid, "speed", &speed.to_string())
            .await
    }

    pub async fn set_direction(&self, uuid: &str, direction: MotorDirection) -> ApiResult<()> {
        self.write_value(
            DeviceType::StepperMotor,
            "set_direction",
            uuid,
            "direction",
            direction.code(),
        )
        .await
    }

    pub async fn set_acceleration(&self, uuid: &str, acceleration: f64) -> ApiResult<()> {
        self.write_value(
            DeviceType::StepperMotor,
            "set_acceleration",
            uuid,
            "acceleration",
            &acceleration.to_string(),
        )
        .await
    }

    pub async fn set_absolute_location(&self, uuid: &str, location: f64) -> ApiResult<()> {
        self.write_value(
            DeviceType::StepperMotor,
            "set_absolute_location",
            uuid,
            "absolute_location",
            &location.to_string(),
        )
        .await
    }

    pub async fn set_relative_location(&self, uuid: &str, offset: f64) -> ApiResult<()> {
        self.write_value(
            DeviceType::StepperMotor,
            "set_relative_location",
            uuid,
            "relative_location",
            &offset.to_string(),
        )
        .await
    }
}

/// Parse a numeric reading. Non-numeric text and NaN are a `Parse` error.
pub fn parse_number(text: &str, quantity: &str) -> ApiResult<f64> {
    match text.trim().parse::<f64>() {
        Ok(value) if !value.is_nan() => Ok(value),
        _ => Err(ApiError::parse(quantity)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::testing::ScriptedTransport;
    use crate::shared::http::Method;

    fn client() -> (DeviceClient<ScriptedTransport>, ScriptedTransport) {
        let transport = ScriptedTransport::new();
        (DeviceClient::new(transport.clone()), transport)
    }

    #[tokio::test]
    async fn test_list_by_type_maps_records() {
        let (client, transport) = client();
        transport.reply(
            200,
            r#"[{"uuid":"u1","name":"T1","status":"ok","description":"d","type":"temperature_sensor","version":"1"}]"#,
        );
        let devices = client
            .list_devices(DeviceType::TemperatureSensor.into())
            .await
            .unwrap();
        assert_eq!(transport.urls(), vec!["GET /devices/type/temperature_sensor"]);
        assert_eq!(
            devices,
            vec![DeviceRecord {
                uuid: "u1".into(),
                device_type: DeviceType::TemperatureSensor,
                name: "T1".into(),
                description: "d".into(),
                version: "1".into(),
                status: "ok".into(),
            }]
        );
    }

    #[tokio::test]
    async fn test_list_all_and_http_error_detail() {
        let (client, transport) = client();
        transport.reply(503, r#"{"detail":"database offline"}"#);
        let err = client.list_devices(DeviceFilter::All).await.unwrap_err();
        assert_eq!(transport.urls(), vec!["GET /devices/"]);
        assert_eq!(
            err,
            ApiError::Http {
                status: 503,
                detail: Some("database offline".into())
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_device_type_is_decode_error() {
        let (client, transport) = client();
        transport.reply(200, r#"[{"uuid":"x","name":"p","type":"digital_port"}]"#);
        let err = client.list_devices(DeviceFilter::All).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_create_trims_every_field() {
        let (client, transport) = client();
        transport.reply(200, "{}");
        let record = DeviceRecord {
            uuid: " m1 ".into(),
            device_type: DeviceType::DcMotor,
            name: " Fan ".into(),
            description: " roof fan".into(),
            version: "2 ".into(),
            status: " idle ".into(),
        };
        client.create_device(&record).await.unwrap();
        let sent = transport.sent();
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].path, "/devices/");
        let body: serde_json::Value =
            serde_json::from_str(sent[0].json_body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "uuid": "m1", "type": "dc_motor", "name": "Fan",
                "description": "roof fan", "version": "2", "status": "idle"
            })
        );
    }

    #[tokio::test]
    async fn test_incomplete_create_sends_nothing() {
        let (client, transport) = client();
        let record = DeviceRecord::draft(DeviceType::DcMotor);
        assert!(matches!(
            client.create_device(&record).await,
            Err(ApiError::Validation(_))
        ));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_paths() {
        let (client, transport) = client();
        transport.reply(200, "").reply(200, "").reply(204, "");
        client.update_name(" u1 ", "  Boiler room ").await.unwrap();
        client.update_description("u1", "main hall").await.unwrap();
        client.delete_device("u1").await.unwrap();
        assert_eq!(
            transport.urls(),
            vec![
                "PUT /devices/update_name/u1?new_name=Boiler%20room",
                "PUT /devices/update_description/u1?new_description=main%20hall",
                "DELETE /devices/u1",
            ]
        );
    }

    #[tokio::test]
    async fn test_status_and_version_are_text() {
        let (client, transport) = client();
        transport.reply(200, "running\n").reply(200, "1.4.2");
        assert_eq!(client.get_status(" u1").await.unwrap(), "running");
        assert_eq!(client.get_version("u1").await.unwrap(), "1.4.2");
        assert_eq!(
            transport.urls(),
            vec![
                "GET /devices/get_status?device_uuid=u1",
                "GET /devices/get_version?device_uuid=u1",
            ]
        );
    }

    #[tokio::test]
    async fn test_non_numeric_reading_fails() {
        let (client, transport) = client();
        transport.reply(200, "abc").reply(200, "21.5");
        let err = client.read_temperature("t1").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid temperature value");
        assert_eq!(client.read_temperature("t1").await.unwrap(), 21.5);
        assert_eq!(
            transport.urls()[0],
            "GET /devices/temperature_sensor/read_temperature?device_uuid=t1"
        );
    }

    #[tokio::test]
    async fn test_motor_writes() {
        let (client, transport) = client();
        transport
            .reply(200, "")
            .reply(200, "")
            .reply(200, "")
            .reply(200, "")
            .reply(200, "");
        client.set_speed(DeviceType::DcMotor, "m1", 40.0).await.unwrap();
        client
            .set_direction("s1", MotorDirection::Backward)
            .await
            .unwrap();
        client.set_acceleration("s1", 2.5).await.unwrap();
        client.set_absolute_location("s1", 100.0).await.unwrap();
        client.set_relative_location("s1", -20.0).await.unwrap();
        assert_eq!(
            transport.urls(),
            vec![
                "PUT /devices/dc_motor/set_speed?device_uuid=m1&speed=40",
                "PUT /devices/stepper_motor/set_direction?device_uuid=s1&direction=backward",
                "PUT /devices/stepper_motor/set_acceleration?device_uuid=s1&acceleration=2.5",
                "PUT /devices/stepper_motor/set_absolute_location?device_uuid=s1&absolute_location=100",
                "PUT /devices/stepper_motor/set_relative_location?device_uuid=s1&relative_location=-20",
            ]
        );
    }

    #[tokio::test]
    async fn test_blank_uuid_is_validation_error() {
        let (client, transport) = client();
        assert!(matches!(
            client.get_status("  ").await,
            Err(ApiError::Validation(_))
        ));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_propagates() {
        let (client, transport) = client();
        transport.fail("connection refused");
        assert_eq!(
            client.delete_device("u1").await.unwrap_err(),
            ApiError::Network("connection refused".into())
        );
    }

    #[test]
    fn test_parse_number_rejects_nan() {
        assert!(parse_number("NaN", "pressure").is_err());
        assert_eq!(parse_number(" 1013.25 ", "pressure").unwrap(), 1013.25);
    }
}
