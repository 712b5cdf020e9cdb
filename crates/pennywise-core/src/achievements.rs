//! Achievement evaluation
//!
//! A fixed battery of five independent unlock predicates. All five are always
//! returned, locked or not, in the same order.

use crate::aggregate::Aggregates;
use crate::models::Achievement;

/// Transactions needed for "First Steps"
pub const FIRST_STEPS_COUNT: usize = 5;

/// Transactions needed for "Consistency King"
pub const CONSISTENCY_COUNT: usize = 15;

/// Distinct expense categories needed for "Category Master"
pub const CATEGORY_MASTER_COUNT: usize = 3;

struct AchievementDef {
    title: &'static str,
    icon: &'static str,
    unlocked: fn(&Aggregates, usize) -> bool,
}

const ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        title: "🎯 First Steps",
        icon: "target",
        unlocked: |_, count| count >= FIRST_STEPS_COUNT,
    },
    AchievementDef {
        title: "💚 Positive Balance",
        icon: "trending-up",
        unlocked: |agg, _| agg.net_balance > 0.0,
    },
    AchievementDef {
        title: "📊 Category Master",
        icon: "chart",
        unlocked: |agg, _| agg.distinct_expense_categories() >= CATEGORY_MASTER_COUNT,
    },
    AchievementDef {
        title: "🔥 Consistency King",
        icon: "award",
        unlocked: |_, count| count >= CONSISTENCY_COUNT,
    },
    AchievementDef {
        title: "🤖 AI Powered",
        icon: "sparkles",
        unlocked: |_, _| true,
    },
];

/// Evaluate every achievement
pub fn evaluate(aggregates: &Aggregates, transaction_count: usize) -> Vec<Achievement> {
    ACHIEVEMENTS
        .iter()
        .map(|def| Achievement {
            title: def.title.to_string(),
            icon: def.icon.to_string(),
            unlocked: (def.unlocked)(aggregates, transaction_count),
        })
        .collect()
}
