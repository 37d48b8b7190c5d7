use super::*;
use axum::{routing::post, Json, Router};
use rives_types::{EthAddress, RivesError};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

fn app() -> EthAddress {
    EthAddress::from_hex(rives_types::DEFAULT_APPLICATION_ADDRESS).unwrap()
}

fn sample_outputs(count: u64) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "epoch_index": "0x0",
                "input_index": format!("0x{:x}", i),
                "index": format!("0x{:x}", i),
                "raw_data": "0xc258d6e5",
                "decoded_data": { "type": NOTICE_SELECTOR, "payload": "0x" }
            })
        })
        .collect()
}

fn respond(outputs: &[Value], request: &Value) -> Value {
    let id = request["id"].clone();
    let params = &request["params"];
    let result = match request["method"].as_str() {
        Some("cartesi_listOutputs") => {
            if params["output_type"].is_string() && params["output_type"] != NOTICE_SELECTOR {
                return json!({ "jsonrpc": "2.0", "id": id, "error": { "code": -32602, "message": "bad output type" } });
            }
            let offset = params["offset"].as_u64().unwrap_or(0) as usize;
            let limit = params["limit"].as_u64().unwrap_or(outputs.len() as u64) as usize;
            let data: Vec<Value> = outputs.iter().skip(offset).take(limit).cloned().collect();
            json!({
                "data": data,
                "pagination": { "total_count": outputs.len(), "limit": limit, "offset": offset }
            })
        }
        Some("cartesi_getInput") => json!({
            "data": {
                "epoch_index": "0x1",
                "index": params["input_index"],
                "status": "ACCEPTED",
                "decoded_data": {
                    "msg_sender": "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
                    "payload": "0xdeadbeef"
                }
            }
        }),
        Some("cartesi_listReports") => json!({
            "data": [{ "input_index": params["input_index"], "index": "0x0", "raw_data": "0x7b7d" }],
            "pagination": { "total_count": 1, "limit": 50, "offset": 0 }
        }),
        Some("broken") => json!({ "unexpected": true }),
        _ => {
            return json!({ "jsonrpc": "2.0", "id": id, "error": { "code": -32601, "message": "Method not found" } });
        }
    };
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

async fn spawn_node(outputs: Vec<Value>) -> String {
    let outputs = Arc::new(outputs);
    let router = Router::new().route(
        "/rpc",
        post(move |Json(request): Json<Value>| {
            let outputs = outputs.clone();
            async move { Json(respond(&outputs, &request)) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[test]
fn test_output_type_discriminator() {
    assert_eq!(OutputType::from_discriminator("notice"), OutputType::Notice);
    assert_eq!(OutputType::from_discriminator("Notice"), OutputType::Notice);
    assert_eq!(OutputType::from_discriminator("NOTICE"), OutputType::Notice);
    assert_eq!(OutputType::from_discriminator(" Voucher "), OutputType::Voucher);
    assert_eq!(OutputType::from_discriminator("0xC258D6E5"), OutputType::Notice);
    assert_eq!(OutputType::from_discriminator(VOUCHER_SELECTOR), OutputType::Voucher);
    assert_eq!(
        OutputType::from_discriminator(DELEGATE_CALL_VOUCHER_SELECTOR),
        OutputType::DelegateCallVoucher
    );
    assert_eq!(OutputType::from_discriminator("report"), OutputType::Unknown);
}

#[test]
fn test_capitalized_notice_type_still_decodes() {
    let notice = crate::VerificationNotice {
        user: Some(EthAddress([3u8; 20])),
        timestamp: ethers::types::U256::from(10u64),
        score: ethers::types::I256::from(1),
        input_index: ethers::types::U256::from(2u64),
    };
    for name in ["Notice", "NOTICE"] {
        let output: RawOutput = serde_json::from_value(json!({
            "input_index": 2,
            "index": 0,
            "decoded_data": {
                "type": name,
                "payload": rives_types::encoding::encode_hex(notice.encode()),
            },
        }))
        .unwrap();
        assert_eq!(output.output_type(), OutputType::Notice);
        assert_eq!(crate::VerificationNotice::try_decode(&output), Some(notice.clone()));
    }
}

#[test]
fn test_raw_output_accepts_hex_and_numeric_indices() {
    let hex: RawOutput = serde_json::from_value(json!({ "input_index": "0x1f", "index": 2 })).unwrap();
    assert_eq!(hex.input_index, 31);
    assert_eq!(hex.index, 2);
    assert_eq!(hex.output_type(), OutputType::Unknown);
    assert!(hex.payload().is_none());

    let bad = serde_json::from_value::<RawOutput>(json!({ "input_index": "0xzz" }));
    assert!(bad.is_err());
}

#[test]
fn test_filter_params() {
    let params = OutputFilter::notices().for_input(10).to_params(&app());
    assert_eq!(params["output_type"], NOTICE_SELECTOR);
    assert_eq!(params["input_index"], "0xa");
    assert_eq!(params["application"], app().to_hex());
    assert!(params.get("limit").is_none());
}

#[tokio::test]
async fn test_empty_node_url_yields_no_outputs() {
    let client = NodeClient::new("", Duration::from_secs(1)).unwrap();
    let outputs = fetch_outputs(&client, &app(), None).await.unwrap();
    assert!(outputs.is_empty());
}

#[tokio::test]
async fn test_fetch_follows_pagination() {
    let url = spawn_node(sample_outputs(5)).await;
    let client = NodeClient::new(&url, Duration::from_secs(5))
        .unwrap()
        .with_page_size(2);

    let outputs = fetch_outputs(&client, &app(), Some(OutputFilter::notices())).await.unwrap();
    let indices: Vec<u64> = outputs.iter().map(|o| o.input_index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    assert!(outputs.iter().all(|o| o.output_type() == OutputType::Notice));
}

#[tokio::test]
async fn test_explicit_limit_returns_single_page() {
    let url = spawn_node(sample_outputs(5)).await;
    let client = NodeClient::new(&format!("{}/", url), Duration::from_secs(5)).unwrap();

    let filter = OutputFilter {
        limit: Some(3),
        offset: Some(1),
        ..Default::default()
    };
    let outputs = fetch_outputs(&client, &app(), Some(filter)).await.unwrap();
    assert_eq!(outputs.len(), 3);
    assert_eq!(outputs[0].input_index, 1);
}

#[tokio::test]
async fn test_rpc_error_is_reported() {
    let url = spawn_node(sample_outputs(1)).await;
    let client = NodeClient::new(&url, Duration::from_secs(5)).unwrap();

    let filter = OutputFilter {
        output_type: Some(OutputType::Voucher),
        ..Default::default()
    };
    let result = fetch_outputs(&client, &app(), Some(filter)).await;
    assert!(matches!(result, Err(RivesError::Rpc(_))));
}

#[tokio::test]
async fn test_get_input_and_reports() {
    let url = spawn_node(Vec::new()).await;
    let client = NodeClient::new(&url, Duration::from_secs(5)).unwrap();

    let input = client.get_input(&app(), 7).await.unwrap();
    assert_eq!(input.index, 7);
    assert!(input.is_accepted());
    assert_eq!(input.payload(), Some("0xdeadbeef"));
    assert!(input.sender().is_some());

    let reports = fetch_reports(&client, &app(), 7).await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].input_index, 7);
    assert_eq!(reports[0].raw_data, "0x7b7d");
}

#[tokio::test]
async fn test_malformed_result_shape() {
    let url = spawn_node(Vec::new()).await;
    let rpc = crate::http_client::RpcClient::new(format!("{}/rpc", url), Duration::from_secs(5)).unwrap();
    let result: rives_types::RivesResult<Page<RawOutput>> = rpc.call("broken", json!({})).await;
    assert!(matches!(result, Err(RivesError::Rpc(_))));
}
