//! Enumeration types for the TastyTrade API.
//!
//! Variants serialize to the exact strings the API uses
//! (`"Equity Option"`, `"Stop Limit"`, `"Buy to Open"`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of financial instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InstrumentType {
    /// Common stock or ETF
    #[serde(rename = "Equity")]
    #[default]
    Equity,
    /// Stock option contract
    #[serde(rename = "Equity Option")]
    EquityOption,
    /// Futures contract
    #[serde(rename = "Future")]
    Future,
    /// Option on a futures contract
    #[serde(rename = "Future Option")]
    FutureOption,
    /// Cryptocurrency
    #[serde(rename = "Cryptocurrency")]
    Cryptocurrency,
    /// Instrument type this client does not know how to trade
    #[serde(other)]
    Unknown,
}

impl InstrumentType {
    /// Returns `true` if this instrument type is a derivative.
    pub fn is_derivative(&self) -> bool {
        matches!(
            self,
            InstrumentType::EquityOption | InstrumentType::Future | InstrumentType::FutureOption
        )
    }

    /// Maximum number of legs of this instrument type a single order may
    /// carry. `None` for instruments that cannot be ordered.
    pub fn max_legs(&self) -> Option<usize> {
        match self {
            InstrumentType::Equity | InstrumentType::Future | InstrumentType::Cryptocurrency => {
                Some(1)
            }
            InstrumentType::EquityOption | InstrumentType::FutureOption => Some(4),
            InstrumentType::Unknown => None,
        }
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstrumentType::Equity => "Equity",
            InstrumentType::EquityOption => "Equity Option",
            InstrumentType::Future => "Future",
            InstrumentType::FutureOption => "Future Option",
            InstrumentType::Cryptocurrency => "Cryptocurrency",
            InstrumentType::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Order type specifying how the order should be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Market order - execute immediately at current market price
    Market,
    /// Limit order - execute at specified price or better
    Limit,
    /// Stop order - becomes market order when stop price is reached
    Stop,
    /// Stop limit - becomes limit order when stop price is reached
    #[serde(rename = "Stop Limit")]
    StopLimit,
    /// Notional market order - specify dollar amount instead of shares
    #[serde(rename = "Notional Market")]
    NotionalMarket,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderType::Market => "Market",
            OrderType::Limit => "Limit",
            OrderType::Stop => "Stop",
            OrderType::StopLimit => "Stop Limit",
            OrderType::NotionalMarket => "Notional Market",
        };
        f.write_str(name)
    }
}

/// Action to take for an order leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderAction {
    /// Buy to open a new long position
    #[serde(rename = "Buy to Open")]
    BuyToOpen,
    /// Buy to close an existing short position
    #[serde(rename = "Buy to Close")]
    BuyToClose,
    /// Sell to open a new short position
    #[serde(rename = "Sell to Open")]
    SellToOpen,
    /// Sell to close an existing long position
    #[serde(rename = "Sell to Close")]
    SellToClose,
    /// Buy (futures)
    Buy,
    /// Sell (futures)
    Sell,
}

impl OrderAction {
    /// Returns `true` if this is a buy action.
    pub fn is_buy(&self) -> bool {
        matches!(
            self,
            OrderAction::BuyToOpen | OrderAction::BuyToClose | OrderAction::Buy
        )
    }

    /// Returns `true` if this is a sell action.
    pub fn is_sell(&self) -> bool {
        !self.is_buy()
    }

    /// Returns `true` if this opens a new position.
    pub fn is_opening(&self) -> bool {
        matches!(self, OrderAction::BuyToOpen | OrderAction::SellToOpen)
    }
}

/// Time in force for orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Day order - expires at end of trading day
    Day,
    /// Good till cancelled - remains active until filled or cancelled
    #[serde(rename = "GTC")]
    Gtc,
    /// Good till date - remains active until the `gtc-date`
    #[serde(rename = "GTD")]
    Gtd,
    /// Extended hours - can execute during pre/post market
    Ext,
    /// Good till cancelled, including extended hours
    #[serde(rename = "GTC Ext")]
    GtcExt,
    /// Immediate or cancel - fill immediately or cancel
    #[serde(rename = "IOC")]
    Ioc,
}

/// Current status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order received by the system
    Received,
    /// Order routed to exchange
    Routed,
    /// Order is being processed
    #[serde(rename = "In Flight")]
    InFlight,
    /// Order is live and working at the exchange
    #[serde(alias = "Working")]
    Live,
    /// Cancel has been requested
    #[serde(rename = "Cancel Requested")]
    CancelRequested,
    /// Replace/modify has been requested
    #[serde(rename = "Replace Requested")]
    ReplaceRequested,
    /// Contingent order waiting for trigger
    Contingent,
    /// Order completely filled
    Filled,
    /// Order cancelled
    Cancelled,
    /// Order expired
    Expired,
    /// Order rejected
    Rejected,
    /// Order removed
    Removed,
    /// Order partially filled then removed
    #[serde(rename = "Partially Removed")]
    PartiallyRemoved,
    /// Status this client does not recognize
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Returns `true` if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Filled
                | OrderStatus::Cancelled
                | OrderStatus::Expired
                | OrderStatus::Rejected
                | OrderStatus::Removed
                | OrderStatus::PartiallyRemoved
        )
    }

    /// Returns `true` if the order is still working.
    pub fn is_working(&self) -> bool {
        matches!(
            self,
            OrderStatus::Received
                | OrderStatus::Routed
                | OrderStatus::InFlight
                | OrderStatus::Live
                | OrderStatus::Contingent
        )
    }
}

/// Effect on price/value (credit or debit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceEffect {
    /// Credit - money received
    Credit,
    /// Debit - money paid
    Debit,
    /// No effect
    None,
    /// Unknown effect (forward-compatibility)
    #[serde(other)]
    Unknown,
}

/// Relationship between the orders of a complex order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplexOrderType {
    /// One-cancels-other
    #[serde(rename = "OCO")]
    Oco,
    /// One-triggers-other
    #[serde(rename = "OTO")]
    Oto,
    /// One-triggers-one-cancels-other
    #[serde(rename = "OTOCO")]
    Otoco,
}

impl ComplexOrderType {
    /// Returns `true` if this complex order type needs a trigger order.
    pub fn requires_trigger(&self) -> bool {
        matches!(self, ComplexOrderType::Oto | ComplexOrderType::Otoco)
    }
}

impl fmt::Display for ComplexOrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComplexOrderType::Oco => "OCO",
            ComplexOrderType::Oto => "OTO",
            ComplexOrderType::Otoco => "OTOCO",
        };
        f.write_str(name)
    }
}
