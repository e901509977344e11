//! Dietary advice derived from nutrition values.

use crate::record::Nutrients;
use serde::Serialize;

/// What a piece of advice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceKind {
    /// Protein above 20 g
    HighProtein,
    /// Fiber above 3 g
    HighFiber,
    /// Energy below 50 kcal
    LowCalorie,
    /// Fat below 1 g
    LowFat,
}

impl AdviceKind {
    /// Localised advisory text
    #[must_use]
    pub fn text(&self) -> &'static str {
        match self {
            Self::HighProtein => "富含蛋白质，适合健身人群",
            Self::HighFiber => "高纤维食物，有助消化",
            Self::LowCalorie => "低热量食物，适合减重期间",
            Self::LowFat => "低脂肪食物，健康选择",
        }
    }
}

/// One piece of advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Advice {
    /// Machine-readable kind
    pub kind: AdviceKind,
    /// Localised text
    pub text: &'static str,
}

impl From<AdviceKind> for Advice {
    fn from(kind: AdviceKind) -> Self {
        Self {
            kind,
            text: kind.text(),
        }
    }
}

/// Advice for a set of values, in rule order.
#[must_use]
pub fn advise(nutrients: &Nutrients) -> Vec<Advice> {
    let rules = [
        (nutrients.protein > 20.0, AdviceKind::HighProtein),
        (nutrients.fiber > 3.0, AdviceKind::HighFiber),
        (nutrients.calories < 50.0, AdviceKind::LowCalorie),
        (nutrients.fat < 1.0, AdviceKind::LowFat),
    ];
    rules
        .into_iter()
        .filter_map(|(applies, kind)| applies.then(|| Advice::from(kind)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(n: Nutrients) -> Vec<AdviceKind> {
        advise(&n).into_iter().map(|a| a.kind).collect()
    }

    #[test]
    fn test_high_protein() {
        // 鸡胸肉
        assert_eq!(kinds(Nutrients::new(165.0, 31.0, 0.0, 3.6, 0.0)), [AdviceKind::HighProtein]);
    }

    #[test]
    fn test_low_calorie_and_fat() {
        // 西瓜
        assert_eq!(
            kinds(Nutrients::new(30.0, 0.6, 8.0, 0.2, 0.4)),
            [AdviceKind::LowCalorie, AdviceKind::LowFat]
        );
    }

    #[test]
    fn test_rule_order_and_all_rules() {
        let all = kinds(Nutrients::new(40.0, 21.0, 0.0, 0.5, 4.0));
        assert_eq!(
            all,
            [
                AdviceKind::HighProtein,
                AdviceKind::HighFiber,
                AdviceKind::LowCalorie,
                AdviceKind::LowFat
            ]
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert!(kinds(Nutrients::new(50.0, 20.0, 0.0, 1.0, 3.0)).is_empty());
    }

    #[test]
    fn test_text() {
        assert_eq!(Advice::from(AdviceKind::HighFiber).text, "高纤维食物，有助消化");
    }
}
