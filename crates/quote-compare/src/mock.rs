//! Scripted contract caller used by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use num_bigint::BigUint;

use crate::abi::{self, WORD};
use crate::contracts::{
    ContractCaller, DOES_POOL_EXIST, ESTIMATE_MAX_SWAP, ESTIMATE_MIN_SWAP,
    QUOTE_EXACT_INPUT_SINGLE, QUOTE_EXACT_OUTPUT_SINGLE,
};
use crate::error::CallError;

const KNOWN: [&str; 5] = [
    DOES_POOL_EXIST,
    ESTIMATE_MAX_SWAP,
    ESTIMATE_MIN_SWAP,
    QUOTE_EXACT_INPUT_SINGLE,
    QUOTE_EXACT_OUTPUT_SINGLE,
];

pub(crate) fn word_uint(value: u128) -> Vec<u8> {
    let mut word = vec![0u8; WORD];
    word[WORD - 16..].copy_from_slice(&value.to_be_bytes());
    word
}

pub(crate) fn word_bool(value: bool) -> Vec<u8> {
    word_uint(value as u128)
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub to: String,
    pub signature: &'static str,
    pub calldata: Vec<u8>,
}

impl RecordedCall {
    fn arg_word(&self, index: usize) -> &[u8] {
        let start = 4 + index * WORD;
        &self.calldata[start..start + WORD]
    }

    pub fn address_arg(&self, index: usize) -> String {
        format!("0x{}", hex::encode(&self.arg_word(index)[12..]))
    }

    pub fn uint_arg(&self, index: usize) -> BigUint {
        BigUint::from_bytes_be(self.arg_word(index))
    }
}

struct Scripted {
    result: Result<Vec<u8>, String>,
    delay: Duration,
}

#[derive(Default)]
pub(crate) struct MockCaller {
    responses: Mutex<HashMap<[u8; 4], Scripted>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockCaller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, signature: &str, result: Result<Vec<u8>, String>) {
        self.respond_after(signature, Duration::ZERO, result);
    }

    pub fn respond_after(&self, signature: &str, delay: Duration, result: Result<Vec<u8>, String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(abi::selector_from_signature(signature), Scripted { result, delay });
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn signatures(&self) -> Vec<&'static str> {
        self.calls().iter().map(|c| c.signature).collect()
    }
}

impl ContractCaller for MockCaller {
    async fn call(&self, to: &str, calldata: Vec<u8>) -> Result<Vec<u8>, CallError> {
        let selector: [u8; 4] = calldata[..4].try_into().unwrap();
        let signature = KNOWN
            .into_iter()
            .find(|sig| abi::selector_from_signature(sig) == selector)
            .unwrap_or("unknown");

        self.calls.lock().unwrap().push(RecordedCall {
            to: to.to_string(),
            signature,
            calldata,
        });

        let scripted = self
            .responses
            .lock()
            .unwrap()
            .get(&selector)
            .map(|s| (s.result.clone(), s.delay));

        let Some((result, delay)) = scripted else {
            return Err(CallError::Transport(format!("unscripted call: {signature}")));
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result.map_err(CallError::Transport)
    }
}
