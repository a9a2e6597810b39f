use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::mpsc::{Receiver, Sender};
use tracing::{debug, info};

use crate::stream_engine::{return_json_array, ExecutionItem, NodeParameters, StreamNode};

use super::credentials::PerfectMindCredentials;
use super::description::node_description;

pub const DEFAULT_API_HOST: &str = "perfectmind.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Contact,
    Appointment,
}

impl FromStr for Resource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "contact" => Ok(Resource::Contact),
            "appointment" => Ok(Resource::Appointment),
            other => Err(anyhow!("Unknown PerfectMind resource: {}", other)),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Contact => write!(f, "contact"),
            Resource::Appointment => write!(f, "appointment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Get,
}

impl FromStr for Operation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create" => Ok(Operation::Create),
            "update" => Ok(Operation::Update),
            "get" => Ok(Operation::Get),
            other => Err(anyhow!("Unknown PerfectMind operation: {}", other)),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Update => write!(f, "update"),
            Operation::Get => write!(f, "get"),
        }
    }
}

/// Scheme and base host; the account subdomain is prefixed per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    pub scheme: String,
    pub host: String,
}

impl Default for ApiEndpoint {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            host: DEFAULT_API_HOST.to_string(),
        }
    }
}

/// One page of the appointments listing. Values go into the query string as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentQuery {
    pub start_time: String,
    pub end_time: String,
    pub page: String,
    pub page_size: String,
}

pub struct PerfectMindNode {
    client: Client,
    endpoint: ApiEndpoint,
    credentials: PerfectMindCredentials,
    parameters: NodeParameters,
}

impl PerfectMindNode {
    pub fn new(credentials: PerfectMindCredentials, parameters: NodeParameters) -> Self {
        Self {
            client: Client::new(),
            endpoint: ApiEndpoint::default(),
            credentials,
            parameters,
        }
    }

    pub fn from_config(config: Value, secrets: &HashMap<String, String>) -> Result<Self> {
        let parameters = NodeParameters::new(config, &node_description())?;
        Ok(Self::new(PerfectMindCredentials::from_secrets(secrets), parameters))
    }

    pub fn with_endpoint(mut self, endpoint: ApiEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn appointments_url(&self, query: &AppointmentQuery) -> String {
        format!(
            "{}://{}.{}/api/{}/Organizations/{}/Appointments?startTime={}&endTime={}&page={}&pageSize={}",
            self.endpoint.scheme,
            self.credentials.sub_domain,
            self.endpoint.host,
            self.credentials.api_version,
            self.credentials.client_number,
            query.start_time,
            query.end_time,
            query.page,
            query.page_size,
        )
    }

    pub fn build_appointments_request(&self, query: &AppointmentQuery) -> Result<reqwest::Request> {
        let url = self.appointments_url(query);
        self.client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header("X-Client-Number", self.credentials.client_number.as_str())
            .header("X-Username", self.credentials.username.as_str())
            .header("X-Password", self.credentials.password())
            .header("X-Access-Key", self.credentials.api_key())
            .build()
            .with_context(|| format!("Invalid PerfectMind request for {}", url))
    }

    async fn get_appointments(&self, query: &AppointmentQuery) -> Result<Value> {
        let request = self.build_appointments_request(query)?;
        let url = request.url().clone();

        let response = self.client
            .execute(request)
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("PerfectMind rejected request to {}", url))?;

        let body: Value = response
            .json()
            .await
            .with_context(|| format!("Response from {} was not valid JSON", url))?;

        // A body without `Result` still produces an output record.
        Ok(body.get("Result").cloned().unwrap_or(Value::Null))
    }

    /// Runs the node over one batch of input items.
    ///
    /// Parameters are read at item index 0, so every iteration issues the same
    /// request. Declared but unimplemented resource/operation pairs contribute no
    /// output and send nothing.
    pub async fn execute(&self, items: &[ExecutionItem]) -> Result<Vec<ExecutionItem>> {
        let resource: Resource = self.parameters.get_string("resource", 0, items)?.parse()?;
        let operation: Operation = self.parameters.get_string("operation", 0, items)?.parse()?;
        let query = AppointmentQuery {
            page_size: self.parameters.get_string("recordsPerPage", 0, items)?,
            page: self.parameters.get_string("page", 0, items)?,
            start_time: self.parameters.get_string("startTime", 0, items)?,
            end_time: self.parameters.get_string("endTime", 0, items)?,
        };

        let mut return_data = Vec::new();
        for index in 0..items.len() {
            if resource == Resource::Appointment && operation == Operation::Get {
                debug!(index, page = %query.page, page_size = %query.page_size, "fetching PerfectMind appointments");
                return_data.push(self.get_appointments(&query).await?);
            }
        }

        info!(%resource, %operation, inputs = items.len(), outputs = return_data.len(), "PerfectMind node finished");
        Ok(return_json_array(return_data))
    }
}

#[async_trait]
impl StreamNode for PerfectMindNode {
    async fn run(&self, mut inputs: Vec<Receiver<Value>>, outputs: Vec<Sender<Value>>) -> Result<()> {
        // The whole input stream forms one batch.
        let mut items = Vec::new();
        if let Some(rx) = inputs.get_mut(0) {
            while let Some(data) = rx.recv().await {
                items.push(ExecutionItem::new(data));
            }
        }

        let results = self.execute(&items).await?;
        if let Some(tx) = outputs.first() {
            for item in results {
                tx.send(item.json).await?;
            }
        }
        Ok(())
    }
}
