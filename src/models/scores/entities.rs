use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考核等级评定
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub enum Rank {
    S,
    A,
    B,
    C,
    D,
}

impl Rank {
    /// 按净得分评级，阈值为闭区间下界，区间连续覆盖 [0, 5]
    pub fn from_net_score(net_score: f64) -> Self {
        if net_score >= 4.5 {
            Rank::S
        } else if net_score >= 4.0 {
            Rank::A
        } else if net_score >= 3.0 {
            Rank::B
        } else if net_score >= 2.0 {
            Rank::C
        } else {
            Rank::D
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::S => "S",
            Rank::A => "A",
            Rank::B => "B",
            Rank::C => "C",
            Rank::D => "D",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 合成后的考核结果
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct ScoreResult {
    /// 已评分审批人加权得分的算术平均
    pub total_score: f64,
    /// 警告扣分 = warning_count × 0.5
    pub warning_deduction: f64,
    /// max(0, total_score − warning_deduction)，保留两位小数
    pub net_score: f64,
    pub rank: Rank,
}
