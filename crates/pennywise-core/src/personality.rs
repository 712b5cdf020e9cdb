//! Spending personality classification
//!
//! Savings rate alone decides the tier:
//!
//! | savings rate | tier |
//! |---|---|
//! | > 30 | Savings Champion |
//! | (15, 30] | Money Ninja |
//! | (0, 15] | Growing Saver |
//! | <= 0 | YOLO Spender |

use serde::{Deserialize, Serialize};

use crate::models::Personality;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalityTier {
    SavingsChampion,
    MoneyNinja,
    GrowingSaver,
    YoloSpender,
}

impl PersonalityTier {
    /// Classify a savings rate (percent)
    pub fn classify(savings_rate: f64) -> Self {
        if savings_rate > 30.0 {
            PersonalityTier::SavingsChampion
        } else if savings_rate > 15.0 {
            PersonalityTier::MoneyNinja
        } else if savings_rate > 0.0 {
            PersonalityTier::GrowingSaver
        } else {
            PersonalityTier::YoloSpender
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            PersonalityTier::SavingsChampion => "🏆",
            PersonalityTier::MoneyNinja => "🎯",
            PersonalityTier::GrowingSaver => "🌱",
            PersonalityTier::YoloSpender => "🔥",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PersonalityTier::SavingsChampion => "Savings Champion",
            PersonalityTier::MoneyNinja => "Money Ninja",
            PersonalityTier::GrowingSaver => "Growing Saver",
            PersonalityTier::YoloSpender => "YOLO Spender",
        }
    }

    pub fn describe(&self, savings_rate: f64) -> String {
        match self {
            PersonalityTier::SavingsChampion => format!(
                "Incredible! You save {:.1}% of income. You're building serious wealth! 💪",
                savings_rate
            ),
            PersonalityTier::MoneyNinja => format!(
                "Perfect balance! {:.1}% savings rate shows you enjoy life while securing your future 🌟",
                savings_rate
            ),
            PersonalityTier::GrowingSaver => format!(
                "Good start with {:.1}% savings! Small steps lead to big wealth 📈",
                savings_rate
            ),
            PersonalityTier::YoloSpender => {
                "Living for today! But maybe save just ₹100/month? Future you will be grateful 😊"
                    .to_string()
            }
        }
    }
}

/// Build the personality for a savings rate
pub fn classify(savings_rate: f64) -> Personality {
    let tier = PersonalityTier::classify(savings_rate);
    Personality {
        kind: format!("{} {}", tier.badge(), tier.name()),
        badge: tier.badge().to_string(),
        description: tier.describe(savings_rate),
    }
}
