//! Order models for placing and managing trades.
//!
//! A [`NewOrder`] carries its type-specific fields inside [`OrderKind`], so
//! a market order with a price or a stop order without a trigger cannot be
//! built. On the wire the order is flat (`order-type`, `price`,
//! `price-effect`, ...); conversion in both directions goes through
//! [`NewOrderBuilder`], which applies the order-type rules.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::*;
use super::primitives::{AccountNumber, OrderId};
use super::validation;

/// A single leg of a new order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrderLeg {
    /// Type of instrument
    pub instrument_type: InstrumentType,
    /// Trading symbol
    pub symbol: String,
    /// Quantity to trade. Absent only on notional market legs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    /// Action (buy/sell, open/close)
    pub action: OrderAction,
}

impl OrderLeg {
    /// Create a new order leg.
    pub fn new(
        instrument_type: InstrumentType,
        symbol: impl Into<String>,
        quantity: Decimal,
        action: OrderAction,
    ) -> Self {
        Self {
            instrument_type,
            symbol: symbol.into(),
            quantity: Some(quantity),
            action,
        }
    }

    /// Create a leg without a quantity, for notional market orders.
    pub fn notional(
        instrument_type: InstrumentType,
        symbol: impl Into<String>,
        action: OrderAction,
    ) -> Self {
        Self {
            instrument_type,
            symbol: symbol.into(),
            quantity: None,
            action,
        }
    }

    /// Create a leg to buy equity.
    pub fn buy_equity(symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(InstrumentType::Equity, symbol, quantity, OrderAction::BuyToOpen)
    }

    /// Create a leg to sell equity.
    pub fn sell_equity(symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(InstrumentType::Equity, symbol, quantity, OrderAction::SellToClose)
    }

    /// Create a leg to buy to open an option.
    pub fn buy_to_open_option(symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(
            InstrumentType::EquityOption,
            symbol,
            quantity,
            OrderAction::BuyToOpen,
        )
    }

    /// Create a leg to sell to open an option.
    pub fn sell_to_open_option(symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(
            InstrumentType::EquityOption,
            symbol,
            quantity,
            OrderAction::SellToOpen,
        )
    }

    /// Create a leg to buy to close an option.
    pub fn buy_to_close_option(symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(
            InstrumentType::EquityOption,
            symbol,
            quantity,
            OrderAction::BuyToClose,
        )
    }

    /// Create a leg to sell to close an option.
    pub fn sell_to_close_option(symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(
            InstrumentType::EquityOption,
            symbol,
            quantity,
            OrderAction::SellToClose,
        )
    }
}

/// Order type together with the fields that type requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    /// Execute at the market; single leg, no price.
    Market,
    /// Execute at `price` or better.
    Limit {
        /// Limit price
        price: Decimal,
        /// Whether the price is a credit or debit
        price_effect: PriceEffect,
    },
    /// Becomes a market order once `stop_trigger` trades.
    Stop {
        /// Stop trigger price
        stop_trigger: Decimal,
    },
    /// Becomes a limit order at `price` once `stop_trigger` trades.
    StopLimit {
        /// Limit price
        price: Decimal,
        /// Whether the price is a credit or debit
        price_effect: PriceEffect,
        /// Stop trigger price
        stop_trigger: Decimal,
    },
    /// Market order sized in dollars; single leg without quantity.
    NotionalMarket {
        /// Dollar amount to trade
        value: Decimal,
        /// Whether the value is a credit or debit
        value_effect: PriceEffect,
    },
}

impl OrderKind {
    /// The wire-level order type.
    pub fn order_type(&self) -> OrderType {
        match self {
            OrderKind::Market => OrderType::Market,
            OrderKind::Limit { .. } => OrderType::Limit,
            OrderKind::Stop { .. } => OrderType::Stop,
            OrderKind::StopLimit { .. } => OrderType::StopLimit,
            OrderKind::NotionalMarket { .. } => OrderType::NotionalMarket,
        }
    }

    /// Limit price, for the kinds that carry one.
    pub fn price(&self) -> Option<Decimal> {
        match *self {
            OrderKind::Limit { price, .. } | OrderKind::StopLimit { price, .. } => Some(price),
            _ => None,
        }
    }

    /// Price effect, for the kinds that carry a price.
    pub fn price_effect(&self) -> Option<PriceEffect> {
        match *self {
            OrderKind::Limit { price_effect, .. } | OrderKind::StopLimit { price_effect, .. } => {
                Some(price_effect)
            }
            _ => None,
        }
    }

    /// Stop trigger, for stop and stop-limit orders.
    pub fn stop_trigger(&self) -> Option<Decimal> {
        match *self {
            OrderKind::Stop { stop_trigger } | OrderKind::StopLimit { stop_trigger, .. } => {
                Some(stop_trigger)
            }
            _ => None,
        }
    }

    /// Notional value, for notional market orders.
    pub fn value(&self) -> Option<Decimal> {
        match *self {
            OrderKind::NotionalMarket { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Notional value effect, for notional market orders.
    pub fn value_effect(&self) -> Option<PriceEffect> {
        match *self {
            OrderKind::NotionalMarket { value_effect, .. } => Some(value_effect),
            _ => None,
        }
    }
}

/// A new order to be submitted.
///
/// Use [`NewOrderBuilder`] for a convenient way to construct orders.
///
/// # Example
///
/// ```
/// use tastytrade_oms::models::{NewOrderBuilder, OrderLeg, OrderType, PriceEffect, TimeInForce};
/// use rust_decimal_macros::dec;
///
/// let order = NewOrderBuilder::new()
///     .time_in_force(TimeInForce::Day)
///     .order_type(OrderType::Limit)
///     .price(dec!(150.00))
///     .price_effect(PriceEffect::Debit)
///     .add_leg(OrderLeg::buy_equity("AAPL", dec!(1)))
///     .build()
///     .unwrap();
///
/// assert_eq!(order.kind.price(), Some(dec!(150.00)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "NewOrderWire", try_from = "NewOrderWire")]
pub struct NewOrder {
    /// How long the order remains active
    pub time_in_force: TimeInForce,
    /// Expiry date, required for GTD orders
    pub gtc_date: Option<NaiveDate>,
    /// Order type and its type-specific fields
    pub kind: OrderKind,
    /// Order legs (instruments to trade)
    pub legs: Vec<OrderLeg>,
    /// Client-provided identifier, echoed back on the placed order
    pub external_identifier: Option<String>,
    /// Account the order is submitted to. Stamped by the orders service;
    /// never part of the request body.
    pub account_number: Option<AccountNumber>,
}

impl NewOrder {
    /// The wire-level order type.
    pub fn order_type(&self) -> OrderType {
        self.kind.order_type()
    }

    /// Check the order against every structural rule, without I/O.
    ///
    /// Returns the first rule broken as [`Error::Validation`](crate::Error::Validation).
    pub fn validate(&self) -> crate::Result<()> {
        validation::validate_order(self)
    }
}

/// Flat request-body form of [`NewOrder`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct NewOrderWire {
    time_in_force: TimeInForce,
    order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gtc_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price_effect: Option<PriceEffect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stop_trigger: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_effect: Option<PriceEffect>,
    #[serde(default)]
    legs: Vec<OrderLeg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    external_identifier: Option<String>,
}

impl From<NewOrder> for NewOrderWire {
    fn from(order: NewOrder) -> Self {
        let kind = order.kind;
        NewOrderWire {
            time_in_force: order.time_in_force,
            order_type: kind.order_type(),
            gtc_date: order.gtc_date,
            price: kind.price(),
            price_effect: kind.price_effect(),
            stop_trigger: kind.stop_trigger(),
            value: kind.value(),
            value_effect: kind.value_effect(),
            legs: order.legs,
            external_identifier: order.external_identifier,
        }
    }
}

impl TryFrom<NewOrderWire> for NewOrder {
    type Error = crate::Error;

    fn try_from(wire: NewOrderWire) -> crate::Result<Self> {
        let mut builder = NewOrderBuilder::new()
            .time_in_force(wire.time_in_force)
            .order_type(wire.order_type)
            .legs(wire.legs);
        builder.gtc_date = wire.gtc_date;
        builder.price = wire.price;
        builder.price_effect = wire.price_effect;
        builder.stop_trigger = wire.stop_trigger;
        builder.value = wire.value;
        builder.value_effect = wire.value_effect;
        builder.external_identifier = wire.external_identifier;
        builder.build()
    }
}

/// Builder for creating new orders with validation.
///
/// Accepts fields in their flat wire shape; [`build`](Self::build) checks
/// them against the order type and produces a typed [`NewOrder`].
#[derive(Debug, Default, Clone)]
pub struct NewOrderBuilder {
    pub(crate) time_in_force: Option<TimeInForce>,
    pub(crate) order_type: Option<OrderType>,
    pub(crate) price: Option<Decimal>,
    pub(crate) price_effect: Option<PriceEffect>,
    pub(crate) stop_trigger: Option<Decimal>,
    pub(crate) gtc_date: Option<NaiveDate>,
    pub(crate) value: Option<Decimal>,
    pub(crate) value_effect: Option<PriceEffect>,
    pub(crate) legs: Vec<OrderLeg>,
    pub(crate) external_identifier: Option<String>,
}

impl NewOrderBuilder {
    /// Create a new order builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time in force.
    pub fn time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    /// Set the order type.
    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    /// Set the limit price.
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the price effect (credit/debit).
    pub fn price_effect(mut self, effect: PriceEffect) -> Self {
        self.price_effect = Some(effect);
        self
    }

    /// Set the stop trigger price.
    pub fn stop_trigger(mut self, price: Decimal) -> Self {
        self.stop_trigger = Some(price);
        self
    }

    /// Set the GTC date for GTD orders.
    pub fn gtc_date(mut self, date: NaiveDate) -> Self {
        self.gtc_date = Some(date);
        self
    }

    /// Set the notional value.
    pub fn value(mut self, value: Decimal) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the value effect.
    pub fn value_effect(mut self, effect: PriceEffect) -> Self {
        self.value_effect = Some(effect);
        self
    }

    /// Set the order legs.
    pub fn legs(mut self, legs: Vec<OrderLeg>) -> Self {
        self.legs = legs;
        self
    }

    /// Add a single leg to the order.
    pub fn add_leg(mut self, leg: OrderLeg) -> Self {
        self.legs.push(leg);
        self
    }

    /// Add a leg with the specified parameters.
    pub fn leg(
        mut self,
        instrument_type: InstrumentType,
        symbol: impl Into<String>,
        action: OrderAction,
        quantity: impl Into<Decimal>,
    ) -> Self {
        self.legs.push(OrderLeg::new(
            instrument_type,
            symbol,
            quantity.into(),
            action,
        ));
        self
    }

    /// Set an external identifier, echoed back on the placed order.
    pub fn external_identifier(mut self, id: impl Into<String>) -> Self {
        self.external_identifier = Some(id.into());
        self
    }

    /// Build the order, validating all fields.
    pub fn build(self) -> crate::Result<NewOrder> {
        let time_in_force = self
            .time_in_force
            .ok_or_else(|| crate::Error::Validation("time-in-force is required".to_string()))?;
        let kind = validation::resolve_kind(&self)?;

        let order = NewOrder {
            time_in_force,
            gtc_date: self.gtc_date,
            kind,
            legs: self.legs,
            external_identifier: self.external_identifier,
            account_number: None,
        };
        order.validate()?;
        Ok(order)
    }
}

/// Complex order (OCO/OTO/OTOCO).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NewComplexOrder {
    /// Type of complex order
    #[serde(rename = "type")]
    pub order_type: ComplexOrderType,
    /// Order whose fill activates the others (OTO/OTOCO)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_order: Option<NewOrder>,
    /// Member orders
    pub orders: Vec<NewOrder>,
}

impl NewComplexOrder {
    /// One-cancels-other over `orders`.
    pub fn oco(orders: Vec<NewOrder>) -> Self {
        Self {
            order_type: ComplexOrderType::Oco,
            trigger_order: None,
            orders,
        }
    }

    /// `trigger` fills, then `order` is routed.
    pub fn oto(trigger: NewOrder, order: NewOrder) -> Self {
        Self {
            order_type: ComplexOrderType::Oto,
            trigger_order: Some(trigger),
            orders: vec![order],
        }
    }

    /// `trigger` fills, then `orders` are routed as a one-cancels-other pair.
    pub fn otoco(trigger: NewOrder, orders: Vec<NewOrder>) -> Self {
        Self {
            order_type: ComplexOrderType::Otoco,
            trigger_order: Some(trigger),
            orders,
        }
    }

    /// Check structural invariants and every member order, without I/O.
    pub fn validate(&self) -> crate::Result<()> {
        validation::validate_complex_order(self)
    }
}

/// A placed/existing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Order {
    /// Order ID
    pub id: OrderId,
    /// Account number
    #[serde(default)]
    pub account_number: Option<AccountNumber>,
    /// Time in force
    pub time_in_force: TimeInForce,
    /// Order type
    pub order_type: OrderType,
    /// Underlying symbol
    #[serde(default)]
    pub underlying_symbol: Option<String>,
    /// Current status
    pub status: OrderStatus,
    /// Limit price
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Price effect
    #[serde(default)]
    pub price_effect: Option<PriceEffect>,
    /// Stop trigger price
    #[serde(default)]
    pub stop_trigger: Option<Decimal>,
    /// Notional value
    #[serde(default)]
    pub value: Option<Decimal>,
    /// Value effect
    #[serde(default)]
    pub value_effect: Option<PriceEffect>,
    /// Order legs
    #[serde(default)]
    pub legs: Vec<FilledOrderLeg>,
    /// Cancellable flag
    #[serde(default)]
    pub cancellable: bool,
    /// Editable flag
    #[serde(default)]
    pub editable: bool,
    /// Edited flag
    #[serde(default)]
    pub edited: bool,
    /// External identifier
    #[serde(default)]
    pub external_identifier: Option<String>,
    /// When the order was received
    #[serde(default)]
    pub received_at: Option<DateTime<Utc>>,
    /// When the order was last updated
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// When the order was filled/cancelled/expired
    #[serde(default)]
    pub terminal_at: Option<DateTime<Utc>>,
    /// GTC date
    #[serde(default)]
    pub gtc_date: Option<NaiveDate>,
    /// Complex order ID (if part of a complex order)
    #[serde(default)]
    pub complex_order_id: Option<OrderId>,
    /// Rejection reason
    #[serde(default)]
    pub reject_reason: Option<String>,
}

impl Order {
    /// Returns `true` if the order can be cancelled.
    pub fn is_cancellable(&self) -> bool {
        self.cancellable && !self.status.is_terminal()
    }

    /// Returns `true` if the order can be modified.
    pub fn is_editable(&self) -> bool {
        self.editable && !self.status.is_terminal()
    }

    /// Returns `true` if the order is completely filled.
    pub fn is_filled(&self) -> bool {
        matches!(self.status, OrderStatus::Filled)
    }

    /// Returns `true` if the order is still working.
    pub fn is_working(&self) -> bool {
        self.status.is_working()
    }

    /// Total quantity filled across all legs.
    pub fn filled_quantity(&self) -> Decimal {
        self.legs
            .iter()
            .flat_map(|leg| leg.fills.iter())
            .map(|fill| fill.quantity)
            .sum()
    }
}

/// A leg of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FilledOrderLeg {
    /// Type of instrument
    pub instrument_type: InstrumentType,
    /// Trading symbol
    pub symbol: String,
    /// Quantity ordered
    #[serde(default)]
    pub quantity: Option<Decimal>,
    /// Remaining quantity
    #[serde(default)]
    pub remaining_quantity: Option<Decimal>,
    /// Action
    pub action: OrderAction,
    /// Executions against this leg
    #[serde(default)]
    pub fills: Vec<Fill>,
}

/// Fill information for an order leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Fill {
    /// Quantity filled
    pub quantity: Decimal,
    /// Fill price
    pub fill_price: Decimal,
    /// When the fill occurred
    pub filled_at: DateTime<Utc>,
    /// Destination exchange
    #[serde(default)]
    pub destination_venue: Option<String>,
    /// External execution ID
    #[serde(default)]
    pub ext_exec_id: Option<String>,
}

/// A placed complex order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ComplexOrder {
    /// Complex order ID
    pub id: OrderId,
    /// Account number
    #[serde(default)]
    pub account_number: Option<AccountNumber>,
    /// Type of complex order
    #[serde(rename = "type")]
    pub order_type: ComplexOrderType,
    /// Trigger order (OTO/OTOCO)
    #[serde(default)]
    pub trigger_order: Option<Order>,
    /// Member orders
    #[serde(default)]
    pub orders: Vec<Order>,
    /// When the complex order reached a terminal state
    #[serde(default)]
    pub terminal_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn limit_order() -> NewOrder {
        NewOrderBuilder::new()
            .time_in_force(TimeInForce::Day)
            .order_type(OrderType::Limit)
            .price(dec!(150.00))
            .price_effect(PriceEffect::Debit)
            .add_leg(OrderLeg::buy_equity("AAPL", dec!(1)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_order_builder_valid() {
        let order = limit_order();

        assert_eq!(order.time_in_force, TimeInForce::Day);
        assert_eq!(order.order_type(), OrderType::Limit);
        assert_eq!(order.kind.price(), Some(dec!(150.00)));
        assert_eq!(order.legs.len(), 1);
        assert!(order.account_number.is_none());
    }

    #[test]
    fn test_order_builder_missing_tif() {
        let result = NewOrderBuilder::new()
            .order_type(OrderType::Limit)
            .price(dec!(150.00))
            .price_effect(PriceEffect::Debit)
            .add_leg(OrderLeg::buy_equity("AAPL", dec!(10)))
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_flat_kebab_case() {
        let value = serde_json::to_value(limit_order()).unwrap();

        assert_eq!(
            value,
            json!({
                "time-in-force": "Day",
                "order-type": "Limit",
                "price": "150.00",
                "price-effect": "Debit",
                "legs": [{
                    "instrument-type": "Equity",
                    "symbol": "AAPL",
                    "quantity": "1",
                    "action": "Buy to Open"
                }]
            })
        );
    }

    #[test]
    fn test_notional_leg_omits_quantity() {
        let order = NewOrderBuilder::new()
            .time_in_force(TimeInForce::Day)
            .order_type(OrderType::NotionalMarket)
            .value(dec!(25))
            .value_effect(PriceEffect::Debit)
            .add_leg(OrderLeg::notional(
                InstrumentType::Equity,
                "AAPL",
                OrderAction::BuyToOpen,
            ))
            .build()
            .unwrap();

        let value = serde_json::to_value(order).unwrap();
        assert_eq!(value["order-type"], "Notional Market");
        assert_eq!(value["value"], "25");
        assert!(value["legs"][0].get("quantity").is_none());
        assert!(value.get("price").is_none());
    }

    #[test]
    fn test_deserialize_applies_order_rules() {
        let market_with_price = json!({
            "time-in-force": "Day",
            "order-type": "Market",
            "price": "10.00",
            "price-effect": "Debit",
            "legs": [{
                "instrument-type": "Equity",
                "symbol": "AAPL",
                "quantity": 1,
                "action": "Buy to Open"
            }]
        });
        assert!(serde_json::from_value::<NewOrder>(market_with_price).is_err());

        let stop = json!({
            "time-in-force": "GTC",
            "order-type": "Stop",
            "stop-trigger": "95.5",
            "legs": [{
                "instrument-type": "Equity",
                "symbol": "AAPL",
                "quantity": 1,
                "action": "Sell to Close"
            }]
        });
        let order: NewOrder = serde_json::from_value(stop).unwrap();
        assert_eq!(
            order.kind,
            OrderKind::Stop {
                stop_trigger: dec!(95.5)
            }
        );
    }

    #[test]
    fn test_order_decodes_server_shape() {
        let order: Order = serde_json::from_value(json!({
            "id": 224,
            "account-number": "5WV12345",
            "time-in-force": "Day",
            "order-type": "Limit",
            "status": "Live",
            "price": "1.0",
            "price-effect": "Debit",
            "cancellable": true,
            "editable": true,
            "received-at": "2024-03-01T14:30:00.000+00:00",
            "legs": [{
                "instrument-type": "Equity",
                "symbol": "AAPL",
                "quantity": "2",
                "remaining-quantity": "1",
                "action": "Buy to Open",
                "fills": [{
                    "quantity": "1",
                    "fill-price": "1.0",
                    "filled-at": "2024-03-01T14:30:01.000+00:00"
                }]
            }]
        }))
        .unwrap();

        assert_eq!(order.id.as_str(), "224");
        assert!(order.is_working());
        assert!(order.is_cancellable());
        assert_eq!(order.filled_quantity(), dec!(1));
    }

    #[test]
    fn test_order_leg_helpers() {
        let buy = OrderLeg::buy_equity("AAPL", dec!(100));
        assert_eq!(buy.instrument_type, InstrumentType::Equity);
        assert_eq!(buy.action, OrderAction::BuyToOpen);

        let sell = OrderLeg::sell_to_close_option("AAPL  240119C00150000", dec!(5));
        assert_eq!(sell.instrument_type, InstrumentType::EquityOption);
        assert_eq!(sell.action, OrderAction::SellToClose);
        assert_eq!(sell.quantity, Some(dec!(5)));
    }

    #[test]
    fn test_complex_order_serializes_type_and_trigger() {
        let complex = NewComplexOrder::oto(limit_order(), limit_order());
        let value = serde_json::to_value(complex).unwrap();
        assert_eq!(value["type"], "OTO");
        assert_eq!(value["trigger-order"]["order-type"], "Limit");
        assert_eq!(value["orders"].as_array().map(Vec::len), Some(1));
    }
}
