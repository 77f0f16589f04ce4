#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::{pending, Future};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use auth_api::{await_or_cancel, AuthApiError, CancellationSignal, StatusCode};
use session_auth::{
    AuthTransport, AuthorizationRequest, AuthorizationResponse, IdentityProvider,
};
use token_store::{KeyValueStore, MemoryStore, StoreError};

/// Canned reply for one transport call.
#[derive(Debug, Clone)]
pub enum Reply {
    Token(&'static str),
    Healthy,
    Status(u16, &'static str),
    /// Never completes; only useful together with a cancellation signal.
    Hang,
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

async fn settle(
    reply: Reply,
    cancellation: Option<CancellationSignal>,
) -> Result<String, AuthApiError> {
    match reply {
        Reply::Token(token) => Ok(token.to_owned()),
        Reply::Healthy => Ok(String::new()),
        Reply::Status(code, message) => Err(AuthApiError::Status(
            StatusCode::from_u16(code).expect("valid status code"),
            message.to_owned(),
        )),
        Reply::Hang => {
            await_or_cancel(pending::<()>(), cancellation.as_ref()).await?;
            Ok(String::new())
        }
    }
}

#[derive(Default)]
pub struct MockTransport {
    exchange_replies: Mutex<VecDeque<Reply>>,
    health_replies: Mutex<VecDeque<Reply>>,
    exchanged_codes: Mutex<Vec<String>>,
    checked_tokens: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_exchange(self, reply: Reply) -> Self {
        lock(&self.exchange_replies).push_back(reply);
        self
    }

    pub fn on_health(self, reply: Reply) -> Self {
        lock(&self.health_replies).push_back(reply);
        self
    }

    pub fn exchanged_codes(&self) -> Vec<String> {
        lock(&self.exchanged_codes).clone()
    }

    pub fn checked_tokens(&self) -> Vec<String> {
        lock(&self.checked_tokens).clone()
    }
}

impl AuthTransport for MockTransport {
    fn exchange_code(
        &self,
        code: &str,
        cancellation: Option<&CancellationSignal>,
    ) -> impl Future<Output = Result<String, AuthApiError>> + Send {
        lock(&self.exchanged_codes).push(code.to_owned());
        let reply = lock(&self.exchange_replies)
            .pop_front()
            .unwrap_or(Reply::Status(500, "unscripted exchange"));
        settle(reply, cancellation.cloned())
    }

    fn check_health(
        &self,
        token: &str,
        cancellation: Option<&CancellationSignal>,
    ) -> impl Future<Output = Result<(), AuthApiError>> + Send {
        lock(&self.checked_tokens).push(token.to_owned());
        let reply = lock(&self.health_replies)
            .pop_front()
            .unwrap_or(Reply::Status(500, "unscripted health check"));
        let settled = settle(reply, cancellation.cloned());
        async move { settled.await.map(|_| ()) }
    }
}

/// Store whose writes always fail; reads report an empty store.
pub struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(read_only_error("writing"))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
        Err(read_only_error("removing"))
    }
}

/// Store that accepts writes but refuses to delete keys.
pub struct UndeletableStore(pub MemoryStore);

impl KeyValueStore for UndeletableStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.0.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0.set(key, value)
    }

    fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
        Err(read_only_error("removing"))
    }
}

fn read_only_error(operation: &'static str) -> StoreError {
    StoreError::io(
        operation,
        "read-only",
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only store"),
    )
}

#[derive(Debug, Clone)]
pub enum ScriptLoad {
    Ready(Duration),
    Fails(&'static str),
    Hangs,
}

/// Scripted identity SDK.
pub struct MockProvider {
    present: bool,
    load: ScriptLoad,
    ready_after_checks: usize,
    answers: Mutex<VecDeque<Result<&'static str, &'static str>>>,
    load_calls: AtomicUsize,
    readiness_checks: AtomicUsize,
    requests: Mutex<Vec<AuthorizationRequest>>,
}

impl MockProvider {
    /// SDK already injected and its auth module available.
    pub fn ready() -> Self {
        Self {
            present: true,
            load: ScriptLoad::Ready(Duration::ZERO),
            ready_after_checks: 0,
            answers: Mutex::new(VecDeque::new()),
            load_calls: AtomicUsize::new(0),
            readiness_checks: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// SDK not yet injected; loading behaves as `load`.
    pub fn absent(load: ScriptLoad) -> Self {
        Self {
            present: false,
            load,
            ..Self::ready()
        }
    }

    /// Auth module shows up only after `checks` readiness checks have failed.
    pub fn module_ready_after(mut self, checks: usize) -> Self {
        self.ready_after_checks = checks;
        self
    }

    pub fn answer(self, answer: Result<&'static str, &'static str>) -> Self {
        lock(&self.answers).push_back(answer);
        self
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::Acquire)
    }

    pub fn readiness_checks(&self) -> usize {
        self.readiness_checks.load(Ordering::Acquire)
    }

    pub fn requests(&self) -> Vec<AuthorizationRequest> {
        lock(&self.requests).clone()
    }
}

impl IdentityProvider for MockProvider {
    fn script_present(&self) -> bool {
        self.present
    }

    fn load_script(&self) -> impl Future<Output = Result<(), String>> + Send {
        self.load_calls.fetch_add(1, Ordering::AcqRel);
        let load = self.load.clone();
        async move {
            match load {
                ScriptLoad::Ready(delay) => {
                    tokio::time::sleep(delay).await;
                    Ok(())
                }
                ScriptLoad::Fails(reason) => Err(reason.to_owned()),
                ScriptLoad::Hangs => pending().await,
            }
        }
    }

    fn auth_module_ready(&self) -> bool {
        self.readiness_checks.fetch_add(1, Ordering::AcqRel) >= self.ready_after_checks
    }

    fn authorize(
        &self,
        request: &AuthorizationRequest,
    ) -> impl Future<Output = Result<AuthorizationResponse, String>> + Send {
        lock(&self.requests).push(request.clone());
        let answer = lock(&self.answers)
            .pop_front()
            .unwrap_or(Err("unscripted authorization"));
        async move {
            answer
                .map(AuthorizationResponse::new)
                .map_err(str::to_owned)
        }
    }
}
