// Copyright (c) 2022 MASSA LABS <info@massa.net>

use serde_json::Value;

/// Position of the transaction object in the params of the private send methods
fn tx_param_index(method: &str) -> Option<usize> {
    match method {
        "eth_sendTransaction" => Some(0),
        "eth_sendRawPrivateTransaction" => Some(1),
        _ => None,
    }
}

fn collect_from_call(call: &Value, keys: &mut Vec<String>) {
    let Some(index) = call.get("method").and_then(Value::as_str).and_then(tx_param_index) else {
        return;
    };
    let Some(private_for) = call
        .get("params")
        .and_then(|params| params.get(index))
        .and_then(|tx| tx.get("privateFor"))
        .and_then(Value::as_array)
    else {
        return;
    };
    for key in private_for.iter().filter_map(Value::as_str) {
        if !keys.iter().any(|known| known == key) {
            keys.push(key.to_string());
        }
    }
}

/// Privacy manager keys of the participants of the private transactions
/// carried by a JSON-RPC payload, single call or batch.
///
/// Anything that is not JSON-RPC yields no key.
/// ```
/// # use dormant_proxy::private_for_keys;
/// let body = br#"{"jsonrpc":"2.0","id":1,"method":"eth_sendTransaction",
///     "params":[{"from":"0xed9d","privateFor":["BULeR8JyUWhiuuCMU/HLA0Q5pzkYT+cHII3ZKBey3Bo="]}]}"#;
/// assert_eq!(private_for_keys(body), vec!["BULeR8JyUWhiuuCMU/HLA0Q5pzkYT+cHII3ZKBey3Bo="]);
/// assert!(private_for_keys(b"not json").is_empty());
/// ```
pub fn private_for_keys(body: &[u8]) -> Vec<String> {
    let mut keys = Vec::new();
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Array(calls)) => {
            for call in &calls {
                collect_from_call(call, &mut keys);
            }
        }
        Ok(call) => collect_from_call(&call, &mut keys),
        Err(_) => {}
    }
    keys
}
