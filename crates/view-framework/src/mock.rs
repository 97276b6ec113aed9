//! # Mock Endpoints & Testing Guide
//!
//! [`MockEndpoint`] implements [`Endpoint`] entirely in memory. Tests queue the
//! replies they want, hand a clone of the mock to a view, and call
//! [`MockEndpoint::verify`] at the end. [`MockMethod`] does the same for
//! [`RemoteMethod`] and records every `(id, kind)` it was called with.
//!
//! ## When to use Mocks vs the In-Memory API
//!
//! | Feature | MockEndpoint | In-memory admin API |
//! |---------|--------------|---------------------|
//! | **Determinism** | Exact reply order, gated replies | Real state changes |
//! | **Error Injection** | `return_err` per call | `fail_next` per operation |
//! | **Use Case** | A single view, ordering races | Full console flows |
//!
//! ## Ordering Tests
//!
//! [`EndpointExpectationBuilder::return_ok_after`] holds a reply until the
//! test fires a oneshot. That is how a test makes the first of two fetches
//! complete last:
//!
//! ```rust
//! use view_framework::mock::MockEndpoint;
//! use view_framework::{AsyncPhase, EndpointData, Settled};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockEndpoint::<&'static str, u32>::new("items.count");
//!     let (release_first, gate) = tokio::sync::oneshot::channel();
//!     mock.expect("a").return_ok_after(1, gate);
//!     mock.expect("ab").return_ok(2);
//!
//!     let mut source = EndpointData::new(mock.clone());
//!     source.fetch("a");
//!     source.fetch("ab");
//!
//!     assert_eq!(source.next_completion().await, Some(Settled::Applied(AsyncPhase::Resolved)));
//!     release_first.send(()).unwrap();
//!     assert_eq!(source.next_completion().await, Some(Settled::Stale { ticket: 1, current: 2 }));
//!     assert_eq!(source.value(), Some(&2));
//!     mock.verify();
//! }
//! ```

use crate::endpoint::{Endpoint, RemoteMethod};
use crate::error::EndpointError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

// =============================================================================
// ENDPOINT MOCK
// =============================================================================

/// An expected fetch. `params == None` matches any parameters.
///
/// A fetch consumes the first queued expectation its parameters match.
struct Expectation<P, T> {
    params: Option<P>,
    response: Result<T, EndpointError>,
    gate: Option<oneshot::Receiver<()>>,
}

/// A mock endpoint with an expectation queue.
///
/// Clones share the queue and the call log, so a test keeps one clone for
/// setup and verification while the view owns another.
pub struct MockEndpoint<P, T> {
    name: &'static str,
    expectations: Arc<Mutex<VecDeque<Expectation<P, T>>>>,
    calls: Arc<Mutex<Vec<P>>>,
    unexpected: Arc<Mutex<Vec<P>>>,
}

impl<P, T> Clone for MockEndpoint<P, T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            expectations: Arc::clone(&self.expectations),
            calls: Arc::clone(&self.calls),
            unexpected: Arc::clone(&self.unexpected),
        }
    }
}

impl<P, T> MockEndpoint<P, T>
where
    P: Clone + PartialEq + Debug + Send + Sync + 'static,
    T: Clone + Debug + Send + Sync + 'static,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            unexpected: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Expects a fetch with exactly `params`.
    pub fn expect(&self, params: P) -> EndpointExpectationBuilder<P, T> {
        EndpointExpectationBuilder {
            params: Some(params),
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a fetch with any parameters.
    pub fn expect_any(&self) -> EndpointExpectationBuilder<P, T> {
        EndpointExpectationBuilder {
            params: None,
            expectations: self.expectations.clone(),
        }
    }

    /// Parameters of every fetch received so far, in order.
    pub fn calls(&self) -> Vec<P> {
        self.calls.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let unexpected = self.unexpected.lock().unwrap();
        if !unexpected.is_empty() {
            panic!("{}: unexpected requests {:?}", self.name, *unexpected);
        }
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!(
                "{}: not all expectations were met. {} remaining",
                self.name,
                exps.len()
            );
        }
    }
}

#[async_trait]
impl<P, T> Endpoint for MockEndpoint<P, T>
where
    P: Clone + PartialEq + Debug + Send + Sync + 'static,
    T: Clone + Debug + Send + Sync + 'static,
{
    type Params = P;
    type Output = T;

    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, params: P) -> Result<T, EndpointError> {
        self.calls.lock().unwrap().push(params.clone());

        let expectation = {
            let mut exps = self.expectations.lock().unwrap();
            // Spawned fetches may reach the mock out of order
            exps.iter()
                .position(|e| e.params.as_ref().map_or(true, |p| *p == params))
                .and_then(|index| exps.remove(index))
        }; // Release lock before awaiting the gate

        match expectation {
            Some(Expectation { response, gate, .. }) => {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                response
            }
            None => {
                self.unexpected.lock().unwrap().push(params.clone());
                Err(EndpointError::Transport(format!(
                    "{}: unexpected request {:?}",
                    self.name, params
                )))
            }
        }
    }
}

/// Builder for fetch expectations.
pub struct EndpointExpectationBuilder<P, T> {
    params: Option<P>,
    expectations: Arc<Mutex<VecDeque<Expectation<P, T>>>>,
}

impl<P, T> EndpointExpectationBuilder<P, T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.push(Ok(value), None);
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: EndpointError) {
        self.push(Err(error), None);
    }

    /// Returns `value` only after `gate` fires (or its sender is dropped).
    pub fn return_ok_after(self, value: T, gate: oneshot::Receiver<()>) {
        self.push(Ok(value), Some(gate));
    }

    /// Returns `error` only after `gate` fires (or its sender is dropped).
    pub fn return_err_after(self, error: EndpointError, gate: oneshot::Receiver<()>) {
        self.push(Err(error), Some(gate));
    }

    fn push(self, response: Result<T, EndpointError>, gate: Option<oneshot::Receiver<()>>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            params: self.params,
            response,
            gate,
        });
    }
}

// =============================================================================
// REMOTE METHOD MOCK
// =============================================================================

/// A mock remote method with a queue of results and a call log.
#[derive(Clone)]
pub struct MockMethod {
    name: &'static str,
    results: Arc<Mutex<VecDeque<Result<(), EndpointError>>>>,
    calls: Arc<Mutex<Vec<(String, Option<String>)>>>,
    unexpected: Arc<Mutex<usize>>,
}

impl MockMethod {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            results: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            unexpected: Arc::new(Mutex::new(0)),
        }
    }

    /// Expects one more call.
    pub fn expect_call(&self) -> MethodExpectationBuilder {
        MethodExpectationBuilder {
            results: self.results.clone(),
        }
    }

    /// Every `(id, kind)` received so far, in order.
    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn verify(&self) {
        let unexpected = *self.unexpected.lock().unwrap();
        if unexpected > 0 {
            panic!("{}: {} unexpected calls", self.name, unexpected);
        }
        let results = self.results.lock().unwrap();
        if !results.is_empty() {
            panic!(
                "{}: not all expectations were met. {} remaining",
                self.name,
                results.len()
            );
        }
    }
}

#[async_trait]
impl RemoteMethod for MockMethod {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn call(&self, id: &str, kind: Option<&str>) -> Result<(), EndpointError> {
        self.calls
            .lock()
            .unwrap()
            .push((id.to_string(), kind.map(str::to_string)));
        let result = self.results.lock().unwrap().pop_front();
        match result {
            Some(result) => result,
            None => {
                *self.unexpected.lock().unwrap() += 1;
                Err(EndpointError::Transport(format!(
                    "{}: unexpected call for {}",
                    self.name, id
                )))
            }
        }
    }
}

/// Builder for remote method expectations.
pub struct MethodExpectationBuilder {
    results: Arc<Mutex<VecDeque<Result<(), EndpointError>>>>,
}

impl MethodExpectationBuilder {
    pub fn return_ok(self) {
        self.results.lock().unwrap().push_back(Ok(()));
    }

    pub fn return_err(self, error: EndpointError) {
        self.results.lock().unwrap().push_back(Err(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_endpoint_flags_unexpected_params() {
        let mock = MockEndpoint::<u32, u32>::new("numbers.get");
        mock.expect(1).return_ok(10);

        assert!(mock.fetch(2).await.is_err());
        assert_eq!(mock.fetch(1).await, Ok(10));
        assert_eq!(mock.calls(), vec![2, 1]);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mock.verify()));
        assert!(outcome.is_err());
    }

    #[tokio::test]
    async fn test_mock_method_records_calls() {
        let method = MockMethod::new("livechat:removeBusinessHour");
        method.expect_call().return_ok();
        method
            .expect_call()
            .return_err(EndpointError::Remote("denied".into()));

        assert!(method.call("bh-1", Some("custom")).await.is_ok());
        assert!(method.call("bh-2", None).await.is_err());
        assert_eq!(
            method.calls(),
            vec![
                ("bh-1".to_string(), Some("custom".to_string())),
                ("bh-2".to_string(), None),
            ]
        );
        method.verify();
    }
}
