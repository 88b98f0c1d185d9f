use chrono::Weekday;
use serde::Serialize;

use super::super::domain::CardType;

const EARLY_WEEK: &[Weekday] = &[Weekday::Mon, Weekday::Tue, Weekday::Wed];
const WORK_WEEK: &[Weekday] = &[
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];
const SATURDAY: &[Weekday] = &[Weekday::Sat];
const WEEKEND: &[Weekday] = &[Weekday::Sat, Weekday::Sun];

/// Named trigger so audit logs say which rule produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountRuleKind {
    EarlyWeekSpend,
    WorkWeekSpend,
    SaturdaySpend,
    WeekendSpend,
    Abroad,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Trigger {
    /// Purchase falls on one of `days` and the amount strictly exceeds `over`.
    Spend { days: &'static [Weekday], over: u32 },
    Abroad,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct DiscountRule {
    pub kind: DiscountRuleKind,
    pub trigger: Trigger,
    pub percent: u8,
}

const fn spend(
    kind: DiscountRuleKind,
    days: &'static [Weekday],
    over: u32,
    percent: u8,
) -> DiscountRule {
    DiscountRule {
        kind,
        trigger: Trigger::Spend { days, over },
        percent,
    }
}

const ABROAD: DiscountRule = DiscountRule {
    kind: DiscountRuleKind::Abroad,
    trigger: Trigger::Abroad,
    percent: 5,
};

const GOLD_RULES: &[DiscountRule] = &[spend(
    DiscountRuleKind::EarlyWeekSpend,
    EARLY_WEEK,
    100,
    15,
)];

const PLATINUM_RULES: &[DiscountRule] = &[
    spend(DiscountRuleKind::EarlyWeekSpend, EARLY_WEEK, 100, 20),
    spend(DiscountRuleKind::SaturdaySpend, SATURDAY, 200, 30),
    ABROAD,
];

const BLACK_RULES: &[DiscountRule] = &[
    spend(DiscountRuleKind::EarlyWeekSpend, EARLY_WEEK, 100, 25),
    spend(DiscountRuleKind::SaturdaySpend, SATURDAY, 200, 35),
    ABROAD,
];

const WHITE_RULES: &[DiscountRule] = &[
    spend(DiscountRuleKind::WorkWeekSpend, WORK_WEEK, 100, 25),
    spend(DiscountRuleKind::WeekendSpend, WEEKEND, 200, 35),
    ABROAD,
];

pub(crate) fn rules_for(card_type: CardType) -> &'static [DiscountRule] {
    match card_type {
        CardType::Classic => &[],
        CardType::Gold => GOLD_RULES,
        CardType::Platinum => PLATINUM_RULES,
        CardType::Black => BLACK_RULES,
        CardType::White => WHITE_RULES,
    }
}
