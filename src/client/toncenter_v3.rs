use crate::config::ClientParams;
use crate::models::toncenter_v3::{ApiErrorBody, RunGetMethodResult, V2RunGetMethodRequest, V2StackEntity};
use crate::provider::{ContractProvider, ProviderError};
use crate::tvm::{Address, StackEntry};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// toncenter v3 API client. Requests are sent once; failures are returned
/// to the caller as they are.
#[derive(Debug, Clone)]
pub struct ToncenterClient {
    params: ClientParams,
    client: Client,
}

impl ToncenterClient {
    pub fn new(params: Option<ClientParams>) -> Result<Self, ProviderError> {
        let params = params.unwrap_or_default();
        let client = Client::builder().timeout(params.timeout()).build()?;
        Ok(Self { params, client })
    }

    pub fn params(&self) -> &ClientParams {
        &self.params
    }

    fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.params.base_url(),
            endpoint.trim_start_matches('/')
        )
    }

    async fn post<T: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<R, ProviderError> {
        let url = self.url(endpoint);
        let mut request = self.client.post(&url).json(body);
        if let Some(api_key) = &self.params.api_key {
            request = request.header("X-API-Key", api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!("POST {} -> {}", url, status);

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }
        serde_json::from_str(&text)
            .map_err(|e| ProviderError::InvalidResponse(format!("{e}: {text}")))
    }
}

fn api_error(status: u16, text: &str) -> ProviderError {
    let message = serde_json::from_str::<ApiErrorBody>(text)
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_else(|| text.to_string());
    ProviderError::Api { status, message }
}

/// Converts a decoded `runGetMethod` body into result stack entries
pub(crate) fn stack_from_result(
    method: &str,
    result: RunGetMethodResult,
) -> Result<Vec<StackEntry>, ProviderError> {
    let exit_code = result
        .exit_code
        .ok_or_else(|| ProviderError::InvalidResponse("missing exit_code".to_string()))?;
    if exit_code != 0 && exit_code != 1 {
        return Err(ProviderError::ExitCode {
            method: method.to_string(),
            exit_code,
        });
    }
    result
        .stack
        .unwrap_or_default()
        .into_iter()
        .map(StackEntry::try_from)
        .collect()
}

#[async_trait]
impl ContractProvider for ToncenterClient {
    async fn run_get_method(
        &self,
        address: &Address,
        method: &str,
        stack: Vec<StackEntry>,
    ) -> Result<Vec<StackEntry>, ProviderError> {
        let stack = stack
            .iter()
            .map(V2StackEntity::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let request = V2RunGetMethodRequest {
            address: Some(address.to_raw()),
            method: Some(method.to_string()),
            stack: Some(stack),
        };

        let result: RunGetMethodResult = self.post("runGetMethod", &request).await?;
        info!(
            "{} on {}: exit code {:?}, gas used {:?}",
            method,
            address.to_raw(),
            result.exit_code,
            result.gas_used
        );
        stack_from_result(method, result)
    }
}
