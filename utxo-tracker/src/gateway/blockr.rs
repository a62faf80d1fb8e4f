use super::IndexGateway;
use crate::error::TrackerError;
use crate::types::UnspentOutput;
use bitcoin::Txid;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;
use utxo_util::GatewayConfig;

const SUCCESS_STATUS: &str = "success";

// {"status": "...", "data": ..., "code": 200, "message": "..."}
// data is only decoded once the status says success, failures carry arbitrary data
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,

    #[serde(default)]
    data: Value,

    #[serde(default)]
    code: i64,

    #[serde(default)]
    message: String,
}

impl Envelope {
    fn parse(body: &str) -> Result<Self, TrackerError> {
        serde_json::from_str(body).map_err(|e| {
            let msg = format!("Failed to parse gateway response: {}", e);
            error!("{}", msg);
            TrackerError::Transport(msg)
        })
    }

    fn into_data<T: DeserializeOwned>(self) -> Result<T, TrackerError> {
        if self.status != SUCCESS_STATUS {
            let msg = format!("{} (status {}, code {})", self.message, self.status, self.code);
            error!("Gateway rejected request: {}", msg);
            return Err(TrackerError::Rejected(msg));
        }

        serde_json::from_value(self.data).map_err(|e| {
            let msg = format!("Failed to parse response data: {}", e);
            error!("{}", msg);
            TrackerError::Transport(msg)
        })
    }
}

#[derive(Debug, Deserialize)]
struct UnspentData {
    #[serde(default)]
    address: String,

    #[serde(default)]
    unspent: Vec<UnspentOutput>,
}

pub fn parse_unspent_response(body: &str) -> Result<Vec<UnspentOutput>, TrackerError> {
    let data: UnspentData = Envelope::parse(body)?.into_data()?;
    debug!(
        "Got {} unspent outputs for address {}",
        data.unspent.len(),
        data.address
    );

    Ok(data.unspent)
}

pub fn parse_push_response(body: &str) -> Result<Txid, TrackerError> {
    let data: String = Envelope::parse(body)?.into_data()?;
    Txid::from_str(&data).map_err(|e| {
        let msg = format!("Invalid txid {} in push response: {}", data, e);
        error!("{}", msg);
        TrackerError::Transport(msg)
    })
}

pub struct BlockrGateway {
    network: String,
    url: String,
    client: Client,
}

impl BlockrGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, TrackerError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(|e| {
            let msg = format!("Failed to build HTTP client: {}", e);
            error!("{}", msg);
            TrackerError::Transport(msg)
        })?;

        Ok(Self {
            network: config.network_id().to_string(),
            url: config.blockr_url(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn read_body(resp: reqwest::Response) -> Result<String, TrackerError> {
        resp.text().await.map_err(|e| {
            let msg = format!("Failed to read response body: {}", e);
            error!("{}", msg);
            TrackerError::Transport(msg)
        })
    }
}

#[async_trait::async_trait]
impl IndexGateway for BlockrGateway {
    fn network_name(&self) -> &str {
        &self.network
    }

    async fn query_unspent(&self, address: &str) -> Result<Vec<UnspentOutput>, TrackerError> {
        let url = format!("{}/api/v1/address/unspent/{}", self.url, address);
        debug!("Querying unspent outputs: {}", url);

        let resp = self.client.get(&url).send().await.map_err(|e| {
            let msg = format!("Failed to query unspent for address {}: {}", address, e);
            error!("{}", msg);
            TrackerError::Transport(msg)
        })?;

        let body = Self::read_body(resp).await?;
        parse_unspent_response(&body)
    }

    async fn broadcast(&self, raw_tx: &[u8]) -> Result<Txid, TrackerError> {
        let url = format!("{}/api/v1/tx/push", self.url);
        let raw_hex = hex::encode(raw_tx);

        let resp = self
            .client
            .post(&url)
            .form(&[("hex", raw_hex.as_str())])
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Failed to push transaction: {}", e);
                error!("{}", msg);
                TrackerError::Transport(msg)
            })?;

        let body = Self::read_body(resp).await?;
        parse_push_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TXID: &str = "3dae1de0ab840ebc5f1b27ddc275acf52e7c86117218157986504ac8eaac98e1";

    #[test]
    fn test_parse_unspent_success() {
        let body = format!(
            r#"{{
                "status": "success",
                "data": {{
                    "address": "n3Bp1hbgtmwDtjQTpa6BnPPCA8fTymsiZy",
                    "unspent": [
                        {{"tx": "{TXID}", "amount": "0.00050000", "n": 0, "confirmations": 3, "script": "51"}},
                        {{"tx": "{TXID}", "amount": "0.01000000", "n": 1, "confirmations": 0, "script": "52"}}
                    ]
                }},
                "code": 200,
                "message": ""
            }}"#
        );

        let outputs = parse_unspent_response(&body).unwrap();
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].tx, TXID);
        assert_eq!(outputs[0].confirmations, 3);
        assert_eq!(outputs[1].n, 1);
        assert_eq!(outputs[1].amount, "0.01000000");
    }

    #[test]
    fn test_parse_unspent_empty() {
        let body = r#"{"status": "success", "data": {"address": "x", "unspent": []}, "code": 200, "message": ""}"#;
        assert_eq!(parse_unspent_response(body).unwrap(), vec![]);
    }

    #[test]
    fn test_parse_unspent_rejected() {
        let body = r#"{"status": "error", "data": null, "code": 404, "message": "Invalid address"}"#;

        match parse_unspent_response(body) {
            Err(TrackerError::Rejected(msg)) => assert!(msg.contains("Invalid address")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_unspent_garbage() {
        assert!(matches!(
            parse_unspent_response("<html>502 Bad Gateway</html>"),
            Err(TrackerError::Transport(_))
        ));
    }

    #[test]
    fn test_parse_rejected_with_string_data() {
        let body = r#"{"status": "fail", "data": "tx rejected", "code": 500, "message": "Bad tx"}"#;
        assert!(matches!(
            parse_unspent_response(body),
            Err(TrackerError::Rejected(_))
        ));
    }

    #[test]
    fn test_parse_push() {
        let body = format!(r#"{{"status": "success", "data": "{TXID}", "code": 200, "message": ""}}"#);
        let txid = parse_push_response(&body).unwrap();
        assert_eq!(txid.to_string(), TXID);

        let body = r#"{"status": "fail", "data": "", "code": 500, "message": "Did not pass validation"}"#;
        assert!(matches!(
            parse_push_response(body),
            Err(TrackerError::Rejected(_))
        ));

        let body = r#"{"status": "success", "data": "zz", "code": 200, "message": ""}"#;
        assert!(matches!(
            parse_push_response(body),
            Err(TrackerError::Transport(_))
        ));
    }

    #[test]
    fn test_gateway_url_from_config() {
        let config = GatewayConfig {
            testnet: true,
            ..Default::default()
        };
        let gateway = BlockrGateway::new(&config).unwrap();
        assert_eq!(gateway.url(), "http://tbtc.blockr.io");
        assert_eq!(gateway.network_name(), "tbtc");
    }
}
