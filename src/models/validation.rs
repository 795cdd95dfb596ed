//! Client-side order validation.
//!
//! Pure functions; nothing here touches the network. Rules are checked in a
//! fixed order and the first one broken is reported.
//!
//! | Order type      | Required                            | Forbidden          | Legs        |
//! |-----------------|-------------------------------------|--------------------|-------------|
//! | Market          | -                                   | price, price-effect| exactly 1   |
//! | Limit           | price, price-effect                 | -                  | any         |
//! | Stop            | stop-trigger                        | price, price-effect| any         |
//! | Stop Limit      | price, price-effect, stop-trigger   | -                  | any         |
//! | Notional Market | value, value-effect                 | leg quantity       | exactly 1   |
//!
//! A field belonging to another order type (a stop trigger on a limit order,
//! a notional value on a stop order) is rejected as well, since the typed
//! [`OrderKind`] has nowhere to keep it.
//!
//! A price-effect or value-effect must be Credit or Debit.
//!
//! Then, for every order: GTD needs a `gtc-date`; at most one Equity, Future
//! or Cryptocurrency leg and at most four Equity Option or Future Option
//! legs; every non-notional leg has a quantity; no symbol appears twice; at
//! least one leg.

use std::collections::{HashMap, HashSet};

use super::enums::{ComplexOrderType, InstrumentType, OrderType, PriceEffect, TimeInForce};
use super::order::{NewComplexOrder, NewOrder, NewOrderBuilder, OrderKind};
use crate::{Error, Result};

fn violation(message: impl Into<String>) -> Error {
    Error::Validation(message.into())
}

/// Turn the builder's flat fields into an [`OrderKind`], applying the
/// required/forbidden columns of the rule table and its leg counts.
pub(crate) fn resolve_kind(builder: &NewOrderBuilder) -> Result<OrderKind> {
    let order_type = builder
        .order_type
        .ok_or_else(|| violation("order-type is required"))?;
    let label = order_type_label(order_type);

    let require = |present: bool, field: &str| -> Result<()> {
        if present {
            Ok(())
        } else {
            Err(violation(format!("{label} orders require {field}")))
        }
    };
    let forbid = |present: bool, field: &str| -> Result<()> {
        if present {
            Err(violation(format!("{label} orders must not have {field}")))
        } else {
            Ok(())
        }
    };

    let has_price = builder.price.is_some();
    let has_price_effect = builder.price_effect.is_some();
    let has_stop = builder.stop_trigger.is_some();
    let has_value = builder.value.is_some() || builder.value_effect.is_some();

    let kind = match order_type {
        OrderType::Market => {
            forbid(has_price, "a price")?;
            forbid(has_price_effect, "a price-effect")?;
            forbid(has_stop, "a stop-trigger")?;
            forbid(has_value, "a notional value")?;
            OrderKind::Market
        }
        OrderType::Limit => {
            let (price, price_effect) = match (builder.price, builder.price_effect) {
                (Some(price), Some(effect)) => (price, effect),
                (None, _) => return Err(violation(format!("{label} orders require a price"))),
                (_, None) => {
                    return Err(violation(format!("{label} orders require a price-effect")))
                }
            };
            forbid(has_stop, "a stop-trigger")?;
            forbid(has_value, "a notional value")?;
            OrderKind::Limit {
                price,
                price_effect,
            }
        }
        OrderType::Stop => {
            let stop_trigger = builder
                .stop_trigger
                .ok_or_else(|| violation(format!("{label} orders require a stop-trigger")))?;
            forbid(has_price, "a price")?;
            forbid(has_price_effect, "a price-effect")?;
            forbid(has_value, "a notional value")?;
            OrderKind::Stop { stop_trigger }
        }
        OrderType::StopLimit => {
            require(has_price, "a price")?;
            require(has_price_effect, "a price-effect")?;
            require(has_stop, "a stop-trigger")?;
            forbid(has_value, "a notional value")?;
            match (builder.price, builder.price_effect, builder.stop_trigger) {
                (Some(price), Some(price_effect), Some(stop_trigger)) => OrderKind::StopLimit {
                    price,
                    price_effect,
                    stop_trigger,
                },
                _ => return Err(violation(format!("{label} orders are incomplete"))),
            }
        }
        OrderType::NotionalMarket => {
            let value = builder
                .value
                .ok_or_else(|| violation(format!("{label} orders require a value")))?;
            let value_effect = builder
                .value_effect
                .ok_or_else(|| violation(format!("{label} orders require a value-effect")))?;
            forbid(has_price, "a price")?;
            forbid(has_price_effect, "a price-effect")?;
            forbid(has_stop, "a stop-trigger")?;
            OrderKind::NotionalMarket {
                value,
                value_effect,
            }
        }
    };

    Ok(kind)
}

/// Validate a typed order. See the module docs for the rule order.
pub(crate) fn validate_order(order: &NewOrder) -> Result<()> {
    let label = order_type_label(order.order_type());

    match order.kind {
        OrderKind::Market => require_single_leg(label, order)?,
        OrderKind::NotionalMarket { .. } => {
            if order.legs.iter().any(|leg| leg.quantity.is_some()) {
                return Err(violation(format!(
                    "{label} orders must not have a leg quantity"
                )));
            }
            require_single_leg(label, order)?;
        }
        OrderKind::Limit { .. } | OrderKind::Stop { .. } | OrderKind::StopLimit { .. } => {}
    }

    if let Some(effect) = order.kind.price_effect() {
        require_signed_effect(label, "price-effect", effect)?;
    }
    if let Some(effect) = order.kind.value_effect() {
        require_signed_effect(label, "value-effect", effect)?;
    }

    if order.time_in_force == TimeInForce::Gtd && order.gtc_date.is_none() {
        return Err(violation("GTD orders require a gtc-date"));
    }

    let mut per_instrument: HashMap<InstrumentType, usize> = HashMap::new();
    for leg in &order.legs {
        *per_instrument.entry(leg.instrument_type).or_default() += 1;
    }
    // Sorted so the reported instrument does not depend on hash order.
    let mut counts: Vec<_> = per_instrument.into_iter().collect();
    counts.sort_by_key(|(instrument, _)| instrument.to_string());
    for (instrument, count) in counts {
        match instrument.max_legs() {
            None => {
                return Err(violation(format!(
                    "instrument type {instrument} cannot be ordered"
                )))
            }
            Some(max) if count > max => {
                return Err(violation(format!(
                    "at most {max} {instrument} leg(s) allowed per order, got {count}"
                )))
            }
            Some(_) => {}
        }
    }

    if !matches!(order.kind, OrderKind::NotionalMarket { .. }) {
        if let Some(leg) = order.legs.iter().find(|leg| leg.quantity.is_none()) {
            return Err(violation(format!("leg {} requires a quantity", leg.symbol)));
        }
    }

    let mut seen = HashSet::new();
    for leg in &order.legs {
        if !seen.insert(leg.symbol.as_str()) {
            return Err(violation(format!("duplicate leg symbol {}", leg.symbol)));
        }
    }

    if order.legs.is_empty() {
        return Err(violation("order must have at least one leg"));
    }

    Ok(())
}

fn require_signed_effect(label: &str, field: &str, effect: PriceEffect) -> Result<()> {
    match effect {
        PriceEffect::Credit | PriceEffect::Debit => Ok(()),
        other => Err(violation(format!(
            "{label} orders require a {field} of Credit or Debit, got {other:?}"
        ))),
    }
}

/// Structural checks for a complex order, then each member order.
pub(crate) fn validate_complex_order(complex: &NewComplexOrder) -> Result<()> {
    let label = complex.order_type;

    if complex.order_type.requires_trigger() && complex.trigger_order.is_none() {
        return Err(violation(format!("{label} orders require a trigger order")));
    }
    if complex.order_type == ComplexOrderType::Oco && complex.orders.len() < 2 {
        return Err(violation(format!(
            "{label} orders require at least 2 orders, got {}",
            complex.orders.len()
        )));
    }
    if complex.orders.is_empty() {
        return Err(violation(format!("{label} orders require at least one order")));
    }

    if let Some(trigger) = &complex.trigger_order {
        trigger
            .validate()
            .map_err(|err| violation(format!("trigger order: {}", validation_reason(err))))?;
    }
    for (index, order) in complex.orders.iter().enumerate() {
        order
            .validate()
            .map_err(|err| violation(format!("order {index}: {}", validation_reason(err))))?;
    }

    Ok(())
}

fn require_single_leg(label: &str, order: &NewOrder) -> Result<()> {
    if order.legs.len() == 1 {
        Ok(())
    } else {
        Err(violation(format!(
            "{label} orders require exactly one leg, got {}",
            order.legs.len()
        )))
    }
}

fn validation_reason(err: Error) -> String {
    match err {
        Error::Validation(reason) => reason,
        other => other.to_string(),
    }
}

fn order_type_label(order_type: OrderType) -> &'static str {
    match order_type {
        OrderType::Market => "market",
        OrderType::Limit => "limit",
        OrderType::Stop => "stop",
        OrderType::StopLimit => "stop-limit",
        OrderType::NotionalMarket => "notional market",
    }
}
