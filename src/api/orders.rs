//! Orders service for order placement and management.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::client::ClientInner;
use crate::models::{
    AccountNumber, DryRunResponse, NewComplexOrder, NewOrder, Order, OrderId, OrderStatus,
    PlacedComplexOrderResponse, PlacedOrderResponse,
};
use crate::Result;

/// Service for order operations.
///
/// Orders are checked locally with [`NewOrder::validate`] before any
/// request is sent; a rule violation comes back as
/// [`Error::Validation`](crate::Error::Validation) and nothing reaches the
/// server.
///
/// # Example
///
/// ```no_run
/// use tastytrade_oms::AccountNumber;
/// use tastytrade_oms::models::{
///     NewOrderBuilder, OrderType, TimeInForce, OrderLeg, PriceEffect,
/// };
/// use rust_decimal_macros::dec;
///
/// # async fn example(client: tastytrade_oms::TastytradeClient) -> tastytrade_oms::Result<()> {
/// let account = AccountNumber::new("5WV12345");
///
/// let order = NewOrderBuilder::new()
///     .time_in_force(TimeInForce::Day)
///     .order_type(OrderType::Limit)
///     .price(dec!(150.00))
///     .price_effect(PriceEffect::Debit)
///     .add_leg(OrderLeg::buy_equity("AAPL", dec!(10)))
///     .build()?;
///
/// // Dry run to see fees and buying power impact
/// let dry_run = client.orders().dry_run(&account, order.clone()).await?;
/// println!("Fees: {:?}", dry_run.fee_calculation);
///
/// let result = client.orders().place(&account, order).await?;
/// println!("Order ID: {}", result.order.id);
/// # Ok(())
/// # }
/// ```
pub struct OrdersService {
    inner: Arc<ClientInner>,
}

/// Result of a cancel-replace.
///
/// The replace endpoint does not reliably report the replacement order,
/// so the client looks for it among the live orders afterwards. Both
/// outcomes mean the replace itself succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplaceOutcome {
    /// The replacement order was found among the live orders.
    Matched(Order),
    /// No live order matched within the polling budget; carries the
    /// order from the replace response unchanged.
    Unmatched(Order),
}

impl ReplaceOutcome {
    /// The matched replacement, or the replace response.
    pub fn order(&self) -> &Order {
        match self {
            ReplaceOutcome::Matched(order) | ReplaceOutcome::Unmatched(order) => order,
        }
    }

    /// Consume the outcome, returning its order.
    pub fn into_order(self) -> Order {
        match self {
            ReplaceOutcome::Matched(order) | ReplaceOutcome::Unmatched(order) => order,
        }
    }

    /// Returns `true` if the replacement order was identified.
    pub fn is_matched(&self) -> bool {
        matches!(self, ReplaceOutcome::Matched(_))
    }
}

impl OrdersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get live (working) orders for an account.
    pub async fn live(&self, account_number: &AccountNumber) -> Result<Vec<Order>> {
        #[derive(serde::Deserialize)]
        struct Response {
            items: Vec<Order>,
        }

        let response: Response = self
            .inner
            .get(&format!("/accounts/{}/orders/live", account_number))
            .await?;
        Ok(response.items)
    }

    /// Get a specific order by ID.
    pub async fn get(&self, account_number: &AccountNumber, order_id: &OrderId) -> Result<Order> {
        self.inner
            .get(&format!("/accounts/{}/orders/{}", account_number, order_id))
            .await
    }

    /// Place a new order.
    ///
    /// # Arguments
    ///
    /// * `account_number` - The account to place the order in
    /// * `order` - The order to place
    ///
    /// # Returns
    ///
    /// Returns the placed order along with buying power effects and fee calculations.
    pub async fn place(
        &self,
        account_number: &AccountNumber,
        order: NewOrder,
    ) -> Result<PlacedOrderResponse> {
        let order = prepare(account_number, order)?;
        let response: PlacedOrderResponse = self
            .inner
            .post(&format!("/accounts/{}/orders", account_number), &order)
            .await?;
        tracing::info!(
            account = %account_number,
            order_id = %response.order.id,
            status = ?response.order.status,
            "Order placed"
        );
        Ok(response)
    }

    /// Dry-run an order to validate and see effects without placing it.
    ///
    /// Use this for order confirmation screens to show the user
    /// the expected fees and buying power impact. The order is still
    /// checked locally first.
    pub async fn dry_run(
        &self,
        account_number: &AccountNumber,
        order: NewOrder,
    ) -> Result<DryRunResponse> {
        let order = prepare(account_number, order)?;
        self.inner
            .post(
                &format!("/accounts/{}/orders/dry-run", account_number),
                &order,
            )
            .await
    }

    /// Cancel an order.
    ///
    /// The order must be in a cancellable state.
    pub async fn cancel(&self, account_number: &AccountNumber, order_id: &OrderId) -> Result<()> {
        self.inner
            .delete(&format!("/accounts/{}/orders/{}", account_number, order_id))
            .await?;
        tracing::info!(account = %account_number, %order_id, "Order cancelled");
        Ok(())
    }

    /// Replace (modify) an existing order and locate the replacement.
    ///
    /// After the replace succeeds, the live orders are polled according to
    /// [`ReconcileConfig`](crate::ReconcileConfig) for an order that:
    ///
    /// - is not `order_id`
    /// - is `Received` or `Live`
    /// - carries the new order's price
    /// - has the same (symbol, quantity) legs as the new order
    ///
    /// When several qualify, one echoing the new order's
    /// `external_identifier` wins, then the most recently received.
    /// Failed polls are logged and skipped. Once the replace has succeeded
    /// this never fails; see [`ReplaceOutcome`].
    pub async fn cancel_replace(
        &self,
        account_number: &AccountNumber,
        order_id: &OrderId,
        order: NewOrder,
    ) -> Result<ReplaceOutcome> {
        let order = prepare(account_number, order)?;
        let replaced: Order = self
            .inner
            .put(
                &format!("/accounts/{}/orders/{}", account_number, order_id),
                &order,
            )
            .await?;

        let policy = &self.inner.config.reconcile;
        for attempt in 1..=policy.max_attempts {
            tokio::time::sleep(policy.delay_for_attempt(attempt)).await;

            let live = match self.live(account_number).await {
                Ok(live) => live,
                Err(err) => {
                    tracing::warn!(
                        attempt,
                        error = %err,
                        "Live order poll failed during reconciliation"
                    );
                    continue;
                }
            };
            tracing::debug!(attempt, candidates = live.len(), "Reconciliation poll");

            if let Some(found) = find_replacement(&live, order_id, &order) {
                tracing::info!(
                    original = %order_id,
                    replacement = %found.id,
                    attempt,
                    "Replacement order matched"
                );
                return Ok(ReplaceOutcome::Matched(found.clone()));
            }
        }

        tracing::info!(
            original = %order_id,
            attempts = policy.max_attempts,
            "Replacement order not found; returning replace response"
        );
        Ok(ReplaceOutcome::Unmatched(replaced))
    }

    /// Place a complex order (OCO/OTO/OTOCO).
    ///
    /// The trigger/member structure and every member order are checked
    /// locally before submission.
    pub async fn place_complex(
        &self,
        account_number: &AccountNumber,
        order: NewComplexOrder,
    ) -> Result<PlacedComplexOrderResponse> {
        order.validate()?;
        let response: PlacedComplexOrderResponse = self
            .inner
            .post(
                &format!("/accounts/{}/complex-orders", account_number),
                &order,
            )
            .await?;
        tracing::info!(
            account = %account_number,
            complex_order_id = %response.complex_order.id,
            "Complex order placed"
        );
        Ok(response)
    }
}

/// Stamp the account onto `order` and run the local checks.
fn prepare(account_number: &AccountNumber, mut order: NewOrder) -> Result<NewOrder> {
    order.account_number = Some(account_number.clone());
    order.validate()?;
    Ok(order)
}

/// Sorted (symbol, quantity) pairs of a leg list.
fn leg_signature<'a>(
    legs: impl Iterator<Item = (&'a str, Option<Decimal>)>,
) -> Vec<(&'a str, Option<Decimal>)> {
    let mut signature: Vec<_> = legs.collect();
    signature.sort();
    signature
}

/// Pick the live order most likely to be the replacement for `original`.
fn find_replacement<'a>(
    candidates: &'a [Order],
    original: &OrderId,
    request: &NewOrder,
) -> Option<&'a Order> {
    let wanted_price = request.kind.price();
    let wanted_legs = leg_signature(
        request
            .legs
            .iter()
            .map(|leg| (leg.symbol.as_str(), leg.quantity)),
    );

    let mut matches = candidates.iter().filter(|candidate| {
        &candidate.id != original
            && matches!(candidate.status, OrderStatus::Received | OrderStatus::Live)
            && candidate.price == wanted_price
            && leg_signature(
                candidate
                    .legs
                    .iter()
                    .map(|leg| (leg.symbol.as_str(), leg.quantity)),
            ) == wanted_legs
    });

    match request.external_identifier.as_deref() {
        Some(tag) => {
            let matches: Vec<&Order> = matches.collect();
            matches
                .iter()
                .copied()
                .find(|c| c.external_identifier.as_deref() == Some(tag))
                .or_else(|| latest(matches.into_iter()))
        }
        None => latest(&mut matches),
    }
}

fn latest<'a>(orders: impl Iterator<Item = &'a Order>) -> Option<&'a Order> {
    orders.max_by_key(|order| order.received_at)
}
