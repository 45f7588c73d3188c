// ABOUTME: Shared test helpers: scripted transport and envelope builders
// ABOUTME: Scripts server behavior without a network, exercising the real cipher
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(dead_code)] // Each integration test binary uses a subset of these helpers

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use renpho_health::api::{ApiEnvelope, EncryptedRequest, RenphoTransport};
use renpho_health::auth::SessionToken;
use renpho_health::crypto;
use renpho_health::errors::Result;
use serde_json::{json, Value};

/// What the scripted transport saw for one call
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub endpoint: String,
    /// Request payload after decrypting `encryptData`
    pub payload: Value,
    /// Token header attached to the call, if any
    pub token: Option<String>,
}

/// Transport that replays a fixed sequence of envelopes and records every
/// call it receives, decrypting request bodies with the real codec so the
/// encryption path is exercised end to end.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<ApiEnvelope>>,
    calls: Mutex<Vec<CallRecord>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<ApiEnvelope>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.lock().unwrap().clone()
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.endpoint).collect()
    }
}

#[async_trait]
impl RenphoTransport for ScriptedTransport {
    async fn post(
        &self,
        endpoint: &str,
        body: &EncryptedRequest,
        session: Option<&SessionToken>,
    ) -> Result<ApiEnvelope> {
        let plaintext = crypto::decrypt(&body.encrypt_data)
            .expect("request body must be valid vendor ciphertext");
        let payload: Value = serde_json::from_str(&plaintext).expect("request payload is JSON");

        self.calls.lock().unwrap().push(CallRecord {
            endpoint: endpoint.to_owned(),
            payload,
            token: session.map(|s| s.token.clone()),
        });

        let envelope = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport called more times than scripted");
        Ok(envelope)
    }
}

/// Success envelope carrying an encrypted response document
pub fn success_envelope(document: &Value) -> ApiEnvelope {
    ApiEnvelope {
        code: 101,
        msg: None,
        data: Some(crypto::encrypt(&document.to_string())),
    }
}

/// Success envelope with no response document at all
pub fn empty_success_envelope() -> ApiEnvelope {
    ApiEnvelope {
        code: 101,
        msg: None,
        data: None,
    }
}

/// Failure envelope with the given code and message
pub fn error_envelope(code: i64, msg: &str) -> ApiEnvelope {
    ApiEnvelope {
        code,
        msg: Some(msg.to_owned()),
        data: None,
    }
}

/// Login success for `token` / `user_id`
pub fn login_envelope(token: &str, user_id: i64) -> ApiEnvelope {
    success_envelope(&json!({
        "login": { "token": token, "id": user_id }
    }))
}

/// Daily report carrying one four-electrode weigh-in record
pub fn measurement_envelope(record: Value) -> ApiEnvelope {
    success_envelope(&json!({ "fourElectrodeWeight": record }))
}

/// A stored-session JSON string as the credential manager would persist it
pub fn stored_session(token: &str, user_id: i64) -> String {
    serde_json::to_string(&SessionToken {
        token: token.to_owned(),
        user_id,
        acquired_at: chrono::Utc::now(),
    })
    .unwrap()
}
