//! Built-in scenario rules
//!
//! Each rule first measures its figures into a small data struct, then
//! formats it through [`super::templates`].

use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregates;
use crate::models::{PredictionResult, Scenario};

use super::templates;
use super::{probability, ScenarioContext, ScenarioKind, ScenarioRule, MAX_PROBABILITY};

/// Cap for the savings-share probability of the Wealth Builder scenario
pub const WEALTH_PROBABILITY_CAP: u8 = 90;

/// Fixed probability of the Future Millionaire scenario
pub const FUTURE_MILLIONAIRE_PROBABILITY: u8 = 82;

/// Share of the top category suggested as a cut
pub const CATEGORY_CUT: f64 = 0.25;

/// Annual return used for the ten-year projection
pub const ANNUAL_RETURN: f64 = 0.12;

/// Projection horizon in years
pub const PROJECTION_YEARS: f64 = 10.0;

/// `part / whole * 100`, or 0 when `whole` is not positive
fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

// ============================================================================
// Prediction Alert
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionAlertData {
    pub amount: f64,
    pub category: String,
    /// 0..=100
    pub confidence_percent: f64,
}

impl PredictionAlertData {
    pub fn measure(prediction: &PredictionResult) -> Self {
        Self {
            amount: prediction.predicted_amount,
            category: prediction.predicted_category.clone(),
            confidence_percent: prediction.confidence * 100.0,
        }
    }
}

pub struct PredictionAlertRule;

impl ScenarioRule for PredictionAlertRule {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::PredictionAlert
    }

    fn evaluate(&self, ctx: &ScenarioContext<'_>) -> Option<Scenario> {
        let data = PredictionAlertData::measure(ctx.prediction?);
        Some(templates::prediction_alert(
            &data,
            probability(data.confidence_percent, MAX_PROBABILITY),
        ))
    }
}

// ============================================================================
// Weekend Warrior
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekendData {
    pub weekend_ratio: f64,
    pub weekend_expense: f64,
}

impl WeekendData {
    pub fn measure(agg: &Aggregates) -> Self {
        Self {
            weekend_ratio: percent_of(agg.weekend_expense, agg.total_expense),
            weekend_expense: agg.weekend_expense,
        }
    }
}

pub struct WeekendWarriorRule;

impl ScenarioRule for WeekendWarriorRule {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::WeekendWarrior
    }

    fn evaluate(&self, ctx: &ScenarioContext<'_>) -> Option<Scenario> {
        let data = WeekendData::measure(ctx.aggregates);
        Some(templates::weekend_warrior(
            &data,
            probability(data.weekend_ratio, MAX_PROBABILITY),
        ))
    }
}

// ============================================================================
// Wealth Builder
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WealthData {
    pub monthly_savings: f64,
    pub yearly_projection: f64,
    /// Savings as a percent of income
    pub savings_share: f64,
}

impl WealthData {
    pub fn measure(agg: &Aggregates) -> Self {
        let monthly_savings = agg.monthly_savings();
        Self {
            monthly_savings,
            yearly_projection: monthly_savings * 12.0,
            savings_share: percent_of(monthly_savings, agg.total_income),
        }
    }
}

pub struct WealthBuilderRule;

impl ScenarioRule for WealthBuilderRule {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::WealthBuilder
    }

    fn evaluate(&self, ctx: &ScenarioContext<'_>) -> Option<Scenario> {
        let data = WealthData::measure(ctx.aggregates);
        Some(templates::wealth_builder(
            &data,
            probability(data.savings_share, WEALTH_PROBABILITY_CAP),
        ))
    }
}

// ============================================================================
// Category Lover
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryData {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
    /// Saved by cutting the category by [`CATEGORY_CUT`]
    pub cut_savings: f64,
}

impl CategoryData {
    pub fn measure(agg: &Aggregates) -> Option<Self> {
        let (category, amount) = agg.top_category()?;
        Some(Self {
            category: category.to_string(),
            amount,
            percentage: percent_of(amount, agg.total_expense),
            cut_savings: amount * CATEGORY_CUT,
        })
    }
}

pub struct CategoryLoverRule;

impl ScenarioRule for CategoryLoverRule {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::CategoryLover
    }

    fn evaluate(&self, ctx: &ScenarioContext<'_>) -> Option<Scenario> {
        let data = CategoryData::measure(ctx.aggregates)?;
        Some(templates::category_lover(
            &data,
            probability(data.percentage, MAX_PROBABILITY),
        ))
    }
}

// ============================================================================
// Future Millionaire
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthData {
    pub monthly_savings: f64,
    pub ten_year_value: f64,
}

impl GrowthData {
    /// Simplified projection: one year of return applied to ten years of
    /// contributions, with no per-period compounding
    pub fn measure(agg: &Aggregates) -> Option<Self> {
        let monthly_savings = agg.monthly_savings();
        if monthly_savings <= 0.0 {
            return None;
        }
        Some(Self {
            monthly_savings,
            ten_year_value: monthly_savings * 12.0 * PROJECTION_YEARS * (1.0 + ANNUAL_RETURN),
        })
    }
}

pub struct FutureMillionaireRule;

impl ScenarioRule for FutureMillionaireRule {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::FutureMillionaire
    }

    fn evaluate(&self, ctx: &ScenarioContext<'_>) -> Option<Scenario> {
        let data = GrowthData::measure(ctx.aggregates)?;
        Some(templates::future_millionaire(
            &data,
            FUTURE_MILLIONAIRE_PROBABILITY,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn agg(income: f64, expense: f64, weekend: f64) -> Aggregates {
        let mut expense_by_category = BTreeMap::new();
        if expense > 0.0 {
            expense_by_category.insert("Food".to_string(), expense);
        }
        Aggregates {
            total_income: income,
            total_expense: expense,
            net_balance: income - expense,
            expense_by_category,
            weekend_expense: weekend,
            savings_rate: 0.0,
            transaction_count: 2,
        }
    }

    fn ctx<'a>(
        aggregates: &'a Aggregates,
        prediction: Option<&'a PredictionResult>,
    ) -> ScenarioContext<'a> {
        ScenarioContext {
            aggregates,
            prediction,
        }
    }

    #[test]
    fn test_prediction_alert_probability_is_confidence() {
        let a = agg(0.0, 0.0, 0.0);
        let p = PredictionResult {
            predicted_amount: 320.4,
            predicted_category: "Shopping".to_string(),
            confidence: 0.5,
            model_version: "1.0".to_string(),
        };
        let scenario = PredictionAlertRule.evaluate(&ctx(&a, Some(&p))).unwrap();
        assert_eq!(scenario.probability, 50);
        assert_eq!(
            scenario.description,
            "My AI model predicts your next expense will be ₹320 in Shopping! Model confidence: 50%"
        );
        assert_eq!(scenario.icon, "trending-up");
        assert_eq!(scenario.color, "blue");

        assert!(PredictionAlertRule.evaluate(&ctx(&a, None)).is_none());
    }

    #[test]
    fn test_prediction_alert_full_confidence_is_capped() {
        let a = agg(0.0, 0.0, 0.0);
        let p = PredictionResult {
            predicted_amount: 1.0,
            predicted_category: "Food".to_string(),
            confidence: 1.0,
            model_version: "1.0".to_string(),
        };
        let scenario = PredictionAlertRule.evaluate(&ctx(&a, Some(&p))).unwrap();
        assert_eq!(scenario.probability, MAX_PROBABILITY);
        assert!(scenario.description.ends_with("Model confidence: 100%"));
    }

    #[test]
    fn test_weekend_warrior_without_expenses() {
        let a = agg(1000.0, 0.0, 0.0);
        let scenario = WeekendWarriorRule.evaluate(&ctx(&a, None)).unwrap();
        assert_eq!(scenario.probability, 0);
        assert_eq!(
            scenario.description,
            "You spend 0.0% on weekends! That's ₹0 of pure weekend fun. Maybe try a 'No-Spend Sunday'?"
        );
    }

    #[test]
    fn test_weekend_warrior_ratio() {
        let a = agg(0.0, 400.0, 300.0);
        let scenario = WeekendWarriorRule.evaluate(&ctx(&a, None)).unwrap();
        assert_eq!(scenario.probability, 75);
        assert!(scenario.description.starts_with("You spend 75.0% on weekends!"));

        let all_weekend = agg(0.0, 400.0, 400.0);
        let scenario = WeekendWarriorRule.evaluate(&ctx(&all_weekend, None)).unwrap();
        assert_eq!(scenario.probability, 95);
    }

    #[test]
    fn test_wealth_builder() {
        let a = agg(5000.0, 2000.0, 0.0);
        let scenario = WealthBuilderRule.evaluate(&ctx(&a, None)).unwrap();
        assert_eq!(scenario.probability, 60);
        assert_eq!(
            scenario.description,
            "At ₹3000/month savings rate, you'll have ₹36000 by year-end! Keep the momentum!"
        );

        let frugal = agg(1000.0, 10.0, 0.0);
        let scenario = WealthBuilderRule.evaluate(&ctx(&frugal, None)).unwrap();
        assert_eq!(scenario.probability, WEALTH_PROBABILITY_CAP);

        let no_income = agg(0.0, 10.0, 0.0);
        let scenario = WealthBuilderRule.evaluate(&ctx(&no_income, None)).unwrap();
        assert_eq!(scenario.probability, 0);
        assert!(scenario.description.starts_with("At ₹0/month"));
    }

    #[test]
    fn test_category_lover() {
        let mut a = agg(0.0, 0.0, 0.0);
        a.expense_by_category.insert("eating out".to_string(), 300.0);
        a.expense_by_category.insert("bills".to_string(), 100.0);
        a.total_expense = 400.0;

        let scenario = CategoryLoverRule.evaluate(&ctx(&a, None)).unwrap();
        assert_eq!(scenario.title, "🛍️ Eating Out Lover");
        assert_eq!(scenario.probability, 75);
        assert_eq!(
            scenario.description,
            "Alert! 75.0% goes to eating out. Cut by 25% and save ₹75! Your wallet will thank you 💸"
        );
        assert_eq!(scenario.color, "red");
    }

    #[test]
    fn test_category_lover_needs_expenses() {
        let a = agg(100.0, 0.0, 0.0);
        assert!(CategoryLoverRule.evaluate(&ctx(&a, None)).is_none());
    }

    #[test]
    fn test_future_millionaire() {
        let a = agg(5000.0, 2000.0, 0.0);
        let scenario = FutureMillionaireRule.evaluate(&ctx(&a, None)).unwrap();
        assert_eq!(scenario.probability, 82);
        // 3000 * 12 * 10 * 1.12 = 403200
        assert_eq!(
            scenario.description,
            "Invest your ₹3000/month at 12% returns = ₹403200 in 10 years! Time to start that SIP! 📈"
        );

        let broke = agg(100.0, 100.0, 0.0);
        assert!(FutureMillionaireRule.evaluate(&ctx(&broke, None)).is_none());
    }
}
