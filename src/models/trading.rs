//! Order submission responses: placed orders, dry runs, fees and buying
//! power.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::PriceEffect;
use super::order::{ComplexOrder, Order};

/// Effect on buying power from an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuyingPowerEffect {
    /// Change in margin requirement
    #[serde(default)]
    pub change_in_margin_requirement: Option<Decimal>,
    /// Effect of margin change (debit increases, credit decreases)
    #[serde(default)]
    pub change_in_margin_requirement_effect: Option<PriceEffect>,
    /// Change in buying power
    #[serde(default)]
    pub change_in_buying_power: Option<Decimal>,
    /// Effect of buying power change
    #[serde(default)]
    pub change_in_buying_power_effect: Option<PriceEffect>,
    /// Current buying power before order
    #[serde(default)]
    pub current_buying_power: Option<Decimal>,
    /// Effect on current buying power
    #[serde(default)]
    pub current_buying_power_effect: Option<PriceEffect>,
    /// New buying power after order
    #[serde(default)]
    pub new_buying_power: Option<Decimal>,
    /// Effect on new buying power
    #[serde(default)]
    pub new_buying_power_effect: Option<PriceEffect>,
    /// Margin requirement for this order in isolation
    #[serde(default)]
    pub isolated_order_margin_requirement: Option<Decimal>,
    /// Effect of isolated margin
    #[serde(default)]
    pub isolated_order_margin_requirement_effect: Option<PriceEffect>,
    /// Whether this is a spread trade
    #[serde(default)]
    pub is_spread: bool,
    /// Overall impact amount
    #[serde(default)]
    pub impact: Option<Decimal>,
    /// Overall impact effect
    #[serde(default)]
    pub effect: Option<PriceEffect>,
}

impl BuyingPowerEffect {
    /// Check if there's sufficient buying power for the order.
    ///
    /// Reports `true` when the server did not send the new buying power.
    pub fn has_sufficient_buying_power(&self) -> bool {
        match (self.new_buying_power, self.new_buying_power_effect) {
            (Some(bp), Some(effect)) => bp > Decimal::ZERO || matches!(effect, PriceEffect::Credit),
            _ => true,
        }
    }
}

/// Fee calculation for an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FeeCalculation {
    /// Regulatory fees (SEC, FINRA, etc.)
    #[serde(default)]
    pub regulatory_fees: Option<Decimal>,
    /// Effect of regulatory fees
    #[serde(default)]
    pub regulatory_fees_effect: Option<PriceEffect>,
    /// Clearing fees
    #[serde(default)]
    pub clearing_fees: Option<Decimal>,
    /// Effect of clearing fees
    #[serde(default)]
    pub clearing_fees_effect: Option<PriceEffect>,
    /// Commission
    #[serde(default)]
    pub commission: Option<Decimal>,
    /// Effect of commission
    #[serde(default)]
    pub commission_effect: Option<PriceEffect>,
    /// Total fees
    #[serde(default)]
    pub total_fees: Option<Decimal>,
    /// Effect of total fees
    #[serde(default)]
    pub total_fees_effect: Option<PriceEffect>,
}

impl FeeCalculation {
    /// Get the total fees as a positive number.
    pub fn total_fees_amount(&self) -> Decimal {
        self.total_fees.unwrap_or(Decimal::ZERO).abs()
    }
}

/// Warning or error attached to an order response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrderMessage {
    /// Message code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Preflight ID (for warnings that can be acknowledged)
    #[serde(default)]
    pub preflight_id: Option<String>,
}

impl OrderMessage {
    /// Check if this is a warning that can be acknowledged.
    pub fn is_warning(&self) -> bool {
        self.preflight_id.is_some()
    }
}

/// Response from placing an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlacedOrderResponse {
    /// The placed order
    pub order: Order,
    /// Effect on buying power
    #[serde(default)]
    pub buying_power_effect: Option<BuyingPowerEffect>,
    /// Fee calculation
    #[serde(default)]
    pub fee_calculation: Option<FeeCalculation>,
    /// Warnings (can be acknowledged)
    #[serde(default)]
    pub warnings: Option<Vec<OrderMessage>>,
    /// Errors
    #[serde(default)]
    pub errors: Option<Vec<OrderMessage>>,
}

impl PlacedOrderResponse {
    /// Check if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        self.warnings.as_ref().is_some_and(|w| !w.is_empty())
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }
}

/// Response from dry-run order validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DryRunResponse {
    /// The order as it would be placed
    pub order: Order,
    /// Effect on buying power
    #[serde(default)]
    pub buying_power_effect: Option<BuyingPowerEffect>,
    /// Fee calculation
    #[serde(default)]
    pub fee_calculation: Option<FeeCalculation>,
    /// Warnings
    #[serde(default)]
    pub warnings: Option<Vec<OrderMessage>>,
    /// Errors (order would be rejected)
    #[serde(default)]
    pub errors: Option<Vec<OrderMessage>>,
}

impl DryRunResponse {
    /// Check if the order would be accepted.
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }
}

/// Response from placing a complex order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlacedComplexOrderResponse {
    /// The placed complex order
    pub complex_order: ComplexOrder,
    /// Effect on buying power
    #[serde(default)]
    pub buying_power_effect: Option<BuyingPowerEffect>,
    /// Fee calculation
    #[serde(default)]
    pub fee_calculation: Option<FeeCalculation>,
    /// Warnings
    #[serde(default)]
    pub warnings: Option<Vec<OrderMessage>>,
}
