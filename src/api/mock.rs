//! # Scripted Mock Backend
//!
//! [`MockStoreApi`] implements the same [`StoreApi`] surface as the HTTP
//! client but answers from scripted expectations, enabling fast and
//! deterministic tests of the view core without any network.
//!
//! ## Usage
//!
//! ```ignore
//! let api = Arc::new(MockStoreApi::new());
//! api.expect_product("prod-123").return_ok(product);
//! api.expect_reviews("prod-123").return_ok(summary);
//! api.expect_inventory("prod-123").delay(Duration::from_millis(50)).return_ok(status);
//!
//! // ... drive the view against `api` ...
//!
//! api.verify(); // panics if any expectation was never consumed
//! ```
//!
//! Expectations are consumed FIFO per endpoint, and a request for an id the
//! script did not anticipate panics immediately (mock misuse is a test bug,
//! not a runtime condition). Every request is also recorded so tests can
//! assert exactly which calls were issued; see [`MockStoreApi::calls`].
//!
//! The optional per-response `delay` suspends on tokio time, so tests running
//! under `#[tokio::test(start_paused = true)]` can interleave slow and fast
//! activations deterministically.

use crate::api::{ApiError, StoreApi};
use crate::model::{InventoryStatus, OrderReceipt, OrderRequest, Product, ProductId, ReviewSummary};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One request observed by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Product(ProductId),
    Reviews(ProductId),
    Inventory(ProductId),
    Order(OrderRequest),
}

struct Scripted<T> {
    response: Result<T, ApiError>,
    delay: Option<Duration>,
}

#[derive(Default)]
struct Script {
    product: VecDeque<(ProductId, Scripted<Product>)>,
    reviews: VecDeque<(ProductId, Scripted<ReviewSummary>)>,
    inventory: VecDeque<(ProductId, Scripted<InventoryStatus>)>,
    orders: VecDeque<Scripted<OrderReceipt>>,
    calls: Vec<RecordedCall>,
}

/// Scripted [`StoreApi`] double with expectation tracking.
#[derive(Default)]
pub struct MockStoreApi {
    script: Arc<Mutex<Script>>,
}

impl MockStoreApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects one `product` read for `id`.
    pub fn expect_product(&self, id: impl Into<ProductId>) -> Expectation<'_, Product> {
        Expectation::new(&self.script, Some(id.into()))
    }

    /// Expects one `reviews` read for `id`.
    pub fn expect_reviews(&self, id: impl Into<ProductId>) -> Expectation<'_, ReviewSummary> {
        Expectation::new(&self.script, Some(id.into()))
    }

    /// Expects one `inventory` read for `id`.
    pub fn expect_inventory(&self, id: impl Into<ProductId>) -> Expectation<'_, InventoryStatus> {
        Expectation::new(&self.script, Some(id.into()))
    }

    /// Expects one order submission. The request payload is recorded rather
    /// than matched; assert on it via [`MockStoreApi::calls`].
    pub fn expect_order(&self) -> Expectation<'_, OrderReceipt> {
        Expectation::new(&self.script, None)
    }

    /// Every request the mock has served, in arrival order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.script.lock().unwrap().calls.clone()
    }

    /// Panics if any scripted expectation was never consumed.
    pub fn verify(&self) {
        let script = self.script.lock().unwrap();
        let remaining = script.product.len()
            + script.reviews.len()
            + script.inventory.len()
            + script.orders.len();
        if remaining > 0 {
            panic!("not all expectations were met, {remaining} remaining");
        }
    }
}

/// Builder returned by the `expect_*` methods. Finish it with
/// [`Expectation::return_ok`] or [`Expectation::return_err`].
pub struct Expectation<'a, T> {
    script: &'a Arc<Mutex<Script>>,
    id: Option<ProductId>,
    delay: Option<Duration>,
    _marker: std::marker::PhantomData<T>,
}

impl<'a, T> Expectation<'a, T> {
    fn new(script: &'a Arc<Mutex<Script>>, id: Option<ProductId>) -> Self {
        Self {
            script,
            id,
            delay: None,
            _marker: std::marker::PhantomData,
        }
    }

    /// Suspends on tokio time before answering, to simulate upstream latency.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

macro_rules! finish_expectation {
    ($ty:ty, $queue:ident) => {
        impl Expectation<'_, $ty> {
            pub fn return_ok(self, value: $ty) {
                self.push(Ok(value));
            }

            pub fn return_err(self, error: ApiError) {
                self.push(Err(error));
            }

            fn push(self, response: Result<$ty, ApiError>) {
                let id = self.id.expect("expectation requires a product id");
                let mut script = self.script.lock().unwrap();
                script.$queue.push_back((
                    id,
                    Scripted {
                        response,
                        delay: self.delay,
                    },
                ));
            }
        }
    };
}

finish_expectation!(Product, product);
finish_expectation!(ReviewSummary, reviews);
finish_expectation!(InventoryStatus, inventory);

// The order queue is unkeyed, so it does not fit the macro above.
impl Expectation<'_, OrderReceipt> {
    pub fn return_ok(self, value: OrderReceipt) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<OrderReceipt, ApiError>) {
        let mut script = self.script.lock().unwrap();
        script.orders.push_back(Scripted {
            response,
            delay: self.delay,
        });
    }
}

impl MockStoreApi {
    fn take<T>(
        queue: &mut VecDeque<(ProductId, Scripted<T>)>,
        endpoint: &str,
        id: &ProductId,
    ) -> Scripted<T> {
        let (expected_id, scripted) = queue
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected {endpoint} request for {id}"));
        assert_eq!(
            &expected_id, id,
            "{endpoint} request for {id}, script expected {expected_id}"
        );
        scripted
    }

    async fn settle<T>(scripted: Scripted<T>) -> Result<T, ApiError> {
        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        scripted.response
    }
}

#[async_trait]
impl StoreApi for MockStoreApi {
    async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let scripted = {
            let mut script = self.script.lock().unwrap();
            script.calls.push(RecordedCall::Product(id.clone()));
            Self::take(&mut script.product, "product", id)
        };
        Self::settle(scripted).await
    }

    async fn reviews(&self, id: &ProductId) -> Result<ReviewSummary, ApiError> {
        let scripted = {
            let mut script = self.script.lock().unwrap();
            script.calls.push(RecordedCall::Reviews(id.clone()));
            Self::take(&mut script.reviews, "reviews", id)
        };
        Self::settle(scripted).await
    }

    async fn inventory(&self, id: &ProductId) -> Result<InventoryStatus, ApiError> {
        let scripted = {
            let mut script = self.script.lock().unwrap();
            script.calls.push(RecordedCall::Inventory(id.clone()));
            Self::take(&mut script.inventory, "inventory", id)
        };
        Self::settle(scripted).await
    }

    async fn place_order(&self, request: &OrderRequest) -> Result<OrderReceipt, ApiError> {
        let scripted = {
            let mut script = self.script.lock().unwrap();
            script.calls.push(RecordedCall::Order(request.clone()));
            script
                .orders
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected order request for {}", request.product_id))
        };
        Self::settle(scripted).await
    }
}
