//! 得分聚合与结果合成
//!
//! 纯函数：输入作答记录与警告次数，输出加权得分与最终评定。
//! 权重读取的是作答记录里冻结的快照值，与题库当前状态无关。

use super::entities::{Rank, ScoreResult};
use crate::models::responses::entities::{GraderRole, QuestionResponse};

/// 警告每次扣 0.5 分
pub const WARNING_DEDUCTION_STEP: f64 = 0.5;

/// 两位小数舍入，仅用于展示/落库边界
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 单个评分人的加权得分：Σ(score × weight/100)。
///
/// 只累加该评分人已评分的题目；一题未评返回 None（未开始评分
/// 与全部评 0 分是两种不同状态）。部分作答得到的是部分累加值，
/// 不按已答子集归一化——与原始系统行为保持一致。
pub fn weighted_score(responses: &[QuestionResponse], grader: GraderRole) -> Option<f64> {
    let mut weighted_sum = 0.0;
    let mut scored_any = false;

    for response in responses {
        if let Some(score) = response.score_for(grader) {
            weighted_sum += score * response.weight / 100.0;
            scored_any = true;
        }
    }

    scored_any.then_some(weighted_sum)
}

/// 合成最终结果：appr1/appr2/appr3 三个槽位的加权得分取算术平均，
/// manager/gm 只复核不计入。没有任何审批人评分时返回 None。
pub fn grand_result(responses: &[QuestionResponse], warning_count: i32) -> Option<ScoreResult> {
    let approver_scores: Vec<f64> = [GraderRole::Appr1, GraderRole::Appr2, GraderRole::Appr3]
        .into_iter()
        .filter_map(|grader| weighted_score(responses, grader))
        .collect();

    if approver_scores.is_empty() {
        return None;
    }

    let total_score = approver_scores.iter().sum::<f64>() / approver_scores.len() as f64;
    let warning_deduction = f64::from(warning_count) * WARNING_DEDUCTION_STEP;
    let net_score = round2((total_score - warning_deduction).max(0.0));

    Some(ScoreResult {
        total_score: round2(total_score),
        warning_deduction,
        net_score,
        rank: Rank::from_net_score(net_score),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(question_id: i64, weight: f64) -> QuestionResponse {
        QuestionResponse {
            id: question_id,
            assessment_id: 1,
            question_id,
            weight,
            self_score: None,
            self_comment: None,
            appr1_score: None,
            appr1_comment: None,
            appr2_score: None,
            appr2_comment: None,
            appr3_score: None,
            appr3_comment: None,
            mgr_score: None,
            mgr_comment: None,
            gm_score: None,
            gm_comment: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn scored(mut r: QuestionResponse, grader: GraderRole, score: f64) -> QuestionResponse {
        match grader {
            GraderRole::SelfEval => r.self_score = Some(score),
            GraderRole::Appr1 => r.appr1_score = Some(score),
            GraderRole::Appr2 => r.appr2_score = Some(score),
            GraderRole::Appr3 => r.appr3_score = Some(score),
            GraderRole::Manager => r.mgr_score = Some(score),
            GraderRole::Gm => r.gm_score = Some(score),
        }
        r
    }

    #[test]
    fn test_weighted_score_none_when_unscored() {
        let responses = vec![response(1, 50.0), response(2, 50.0)];
        assert_eq!(weighted_score(&responses, GraderRole::Appr1), None);
    }

    #[test]
    fn test_weighted_score_spec_scenario() {
        // 权重 50/30/20，评分 5/4/3 → 2.5 + 1.2 + 0.6 = 4.30
        let responses = vec![
            scored(response(1, 50.0), GraderRole::Appr1, 5.0),
            scored(response(2, 30.0), GraderRole::Appr1, 4.0),
            scored(response(3, 20.0), GraderRole::Appr1, 3.0),
        ];
        let score = weighted_score(&responses, GraderRole::Appr1).unwrap();
        assert!((score - 4.30).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_score_partial_not_renormalized() {
        // 只答了权重 50 的一题，得到的是部分累加值 2.5，不归一化
        let responses = vec![
            scored(response(1, 50.0), GraderRole::Appr1, 5.0),
            response(2, 30.0),
            response(3, 20.0),
        ];
        let score = weighted_score(&responses, GraderRole::Appr1).unwrap();
        assert!((score - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_score_zero_is_not_none() {
        let responses = vec![scored(response(1, 100.0), GraderRole::Appr1, 0.0)];
        assert_eq!(weighted_score(&responses, GraderRole::Appr1), Some(0.0));
    }

    #[test]
    fn test_weighted_score_monotonic_in_single_question() {
        let low = vec![
            scored(response(1, 50.0), GraderRole::Appr1, 2.0),
            scored(response(2, 50.0), GraderRole::Appr1, 3.0),
        ];
        let high = vec![
            scored(response(1, 50.0), GraderRole::Appr1, 4.0),
            scored(response(2, 50.0), GraderRole::Appr1, 3.0),
        ];
        assert!(
            weighted_score(&high, GraderRole::Appr1).unwrap()
                >= weighted_score(&low, GraderRole::Appr1).unwrap()
        );
    }

    #[test]
    fn test_grand_result_none_when_no_approver_scored() {
        // 本人与 mgr/gm 的评分不触发结果合成
        let responses = vec![
            scored(
                scored(response(1, 100.0), GraderRole::SelfEval, 5.0),
                GraderRole::Manager,
                4.0,
            ),
        ];
        assert!(grand_result(&responses, 0).is_none());
    }

    #[test]
    fn test_grand_result_single_approver_with_warning() {
        // appr1 加权 4.30，warning_count=1 → 扣 0.5 → 3.80 → B
        let responses = vec![
            scored(response(1, 50.0), GraderRole::Appr1, 5.0),
            scored(response(2, 30.0), GraderRole::Appr1, 4.0),
            scored(response(3, 20.0), GraderRole::Appr1, 3.0),
        ];
        let result = grand_result(&responses, 1).unwrap();
        assert!((result.total_score - 4.30).abs() < 1e-9);
        assert!((result.warning_deduction - 0.5).abs() < 1e-9);
        assert!((result.net_score - 3.80).abs() < 1e-9);
        assert_eq!(result.rank, Rank::B);
    }

    #[test]
    fn test_grand_result_averages_scored_approvers_only() {
        // appr1=4.0，appr3=3.0，appr2 未评 → 平均 3.5
        let mut r = response(1, 100.0);
        r.appr1_score = Some(4.0);
        r.appr3_score = Some(3.0);
        let result = grand_result(&[r], 0).unwrap();
        assert!((result.total_score - 3.5).abs() < 1e-9);
        assert_eq!(result.rank, Rank::B);
    }

    #[test]
    fn test_grand_result_excludes_mgr_and_gm() {
        let mut r = response(1, 100.0);
        r.appr1_score = Some(4.0);
        r.mgr_score = Some(1.0);
        r.gm_score = Some(1.0);
        let result = grand_result(&[r], 0).unwrap();
        assert!((result.total_score - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_net_score_never_negative() {
        let responses = vec![scored(response(1, 100.0), GraderRole::Appr1, 1.0)];
        let result = grand_result(&responses, 100).unwrap();
        assert_eq!(result.net_score, 0.0);
        assert_eq!(result.rank, Rank::D);
    }

    #[test]
    fn test_rank_boundaries_are_inclusive_lower_bounds() {
        assert_eq!(Rank::from_net_score(4.50), Rank::S);
        assert_eq!(Rank::from_net_score(4.49), Rank::A);
        assert_eq!(Rank::from_net_score(4.00), Rank::A);
        assert_eq!(Rank::from_net_score(3.99), Rank::B);
        assert_eq!(Rank::from_net_score(3.00), Rank::B);
        assert_eq!(Rank::from_net_score(2.00), Rank::C);
        assert_eq!(Rank::from_net_score(1.99), Rank::D);
        assert_eq!(Rank::from_net_score(0.0), Rank::D);
        assert_eq!(Rank::from_net_score(5.0), Rank::S);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(4.299999), 4.3);
        assert_eq!(round2(3.805), 3.81);
        assert_eq!(round2(0.0), 0.0);
    }
}
