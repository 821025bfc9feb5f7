use crate::codec::{ParamCodec, PathValueMap};
use crate::error::CodecError;
use crate::value::CollectedParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Transport scheme used to reach the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Http,
    Https,
}

impl Transport {
    pub fn scheme(&self) -> &'static str {
        match self {
            Transport::Http => "http",
            Transport::Https => "https",
        }
    }
}

/// Where and as whom an operation is invoked.
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(default)]
    pub transport: Transport,
}

impl ConnectionParams {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password: password.into(),
            transport: Transport::default(),
        }
    }

    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    /// Base address of the device, e.g. `http://192.168.1.10:80`.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.transport.scheme(), self.host, self.port)
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("transport", &self.transport)
            .finish()
    }
}

/// Identifies the operation to invoke: the service description it comes from, the
/// protocol binding, and the operation name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRef {
    pub service_url: String,
    pub binding: String,
    pub operation: String,
}

impl OperationRef {
    pub fn new(
        service_url: impl Into<String>,
        binding: impl Into<String>,
        operation: impl Into<String>,
    ) -> Self {
        Self {
            service_url: service_url.into(),
            binding: binding.into(),
            operation: operation.into(),
        }
    }
}

/// The outcome of one remote invocation, as reported by a sink.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InvocationResult {
    pub success: bool,
    #[serde(default)]
    pub result_data: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub request_trace: Option<String>,
    #[serde(default)]
    pub response_trace: Option<String>,
    #[serde(default)]
    pub elapsed_ms: Option<f64>,
}

impl InvocationResult {
    pub fn succeeded(result_data: serde_json::Value) -> Self {
        Self {
            success: true,
            result_data: Some(result_data),
            ..Self::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn with_traces(mut self, request: impl Into<String>, response: impl Into<String>) -> Self {
        self.request_trace = Some(request.into());
        self.response_trace = Some(response.into());
        self
    }

    pub fn with_elapsed_ms(mut self, elapsed_ms: f64) -> Self {
        self.elapsed_ms = Some(elapsed_ms);
        self
    }
}

/// Performs the remote call for a collected parameter object.
///
/// Implementations own transport, envelope encoding and authentication; the codec only
/// guarantees that `params` mirrors the operation's schema shape.
pub trait InvocationSink: Send + Sync {
    fn invoke(
        &self,
        operation: &OperationRef,
        connection: &ConnectionParams,
        params: &CollectedParams,
    ) -> InvocationResult;
}

/// Collects `values` and, only if that succeeds, hands the result to `sink`.
pub fn submit(
    sink: &dyn InvocationSink,
    operation: &OperationRef,
    connection: &ConnectionParams,
    values: &PathValueMap,
) -> Result<InvocationResult, CodecError> {
    let params = ParamCodec::collect(values)?;
    debug!(
        operation = %operation.operation,
        binding = %operation.binding,
        params = %params,
        "submitting collected parameters"
    );
    let result = sink.invoke(operation, connection, &params);
    info!(
        operation = %operation.operation,
        target = %connection.base_url(),
        success = result.success,
        "operation invoked"
    );
    Ok(result)
}
