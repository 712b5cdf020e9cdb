//! Scenario text templates
//!
//! Pure formatting over already-computed figures. The strings here are part
//! of the public output and are matched verbatim by clients.

use crate::models::Scenario;

use super::rules::{CategoryData, GrowthData, PredictionAlertData, WealthData, WeekendData};

/// Currency symbol used in every description
pub const CURRENCY: &str = "₹";

fn scenario(title: String, description: String, probability: u8, icon: &str, color: &str) -> Scenario {
    Scenario {
        title,
        description,
        probability,
        icon: icon.to_string(),
        color: color.to_string(),
    }
}

pub fn prediction_alert(data: &PredictionAlertData, probability: u8) -> Scenario {
    scenario(
        "🤖 AI Prediction Alert".to_string(),
        format!(
            "My AI model predicts your next expense will be {CURRENCY}{:.0} in {}! Model confidence: {:.0}%",
            data.amount, data.category, data.confidence_percent
        ),
        probability,
        "trending-up",
        "blue",
    )
}

pub fn weekend_warrior(data: &WeekendData, probability: u8) -> Scenario {
    scenario(
        "🎉 Weekend Warrior".to_string(),
        format!(
            "You spend {:.1}% on weekends! That's {CURRENCY}{:.0} of pure weekend fun. Maybe try a 'No-Spend Sunday'?",
            data.weekend_ratio, data.weekend_expense
        ),
        probability,
        "coffee",
        "orange",
    )
}

pub fn wealth_builder(data: &WealthData, probability: u8) -> Scenario {
    scenario(
        "💰 Wealth Builder".to_string(),
        format!(
            "At {CURRENCY}{:.0}/month savings rate, you'll have {CURRENCY}{:.0} by year-end! Keep the momentum!",
            data.monthly_savings, data.yearly_projection
        ),
        probability,
        "savings",
        "green",
    )
}

pub fn category_lover(data: &CategoryData, probability: u8) -> Scenario {
    scenario(
        format!("🛍️ {} Lover", title_case(&data.category)),
        format!(
            "Alert! {:.1}% goes to {}. Cut by 25% and save {CURRENCY}{:.0}! Your wallet will thank you 💸",
            data.percentage, data.category, data.cut_savings
        ),
        probability,
        "shopping",
        "red",
    )
}

pub fn future_millionaire(data: &GrowthData, probability: u8) -> Scenario {
    scenario(
        "🚀 Future Millionaire".to_string(),
        format!(
            "Invest your {CURRENCY}{:.0}/month at 12% returns = {CURRENCY}{:.0} in 10 years! Time to start that SIP! 📈",
            data.monthly_savings, data.ten_year_value
        ),
        probability,
        "trending-up",
        "purple",
    )
}

/// Uppercase every cased letter that follows an uncased character and
/// lowercase the rest: `"eating OUT"` becomes `"Eating Out"`, `"3rd-party"`
/// becomes `"3Rd-Party"`. Scripts without case (CJK, digits) only start a new
/// word, so `"日本food"` becomes `"日本Food"`.
pub fn title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_cased = false;

    for c in s.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if !cased {
            result.push(c);
        } else if prev_cased {
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_uppercase());
        }
        prev_cased = cased;
    }

    result
}
