// ============================================
// src/quiz.rs
// 四択問題の生成
// ============================================

use rand::Rng;
use rand::seq::SliceRandom;

use crate::kural::Kural;

/// 1ラウンドの問題数
pub const ROUND_SIZE: usize = 10;
/// 1問あたりの選択肢の数 (正解1 + 不正解3)
pub const OPTION_COUNT: usize = 4;

/// 1つの問題
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question<'a> {
    /// 出題されるクラル
    pub subject: &'a Kural,
    /// 表示順に並んだ選択肢 (正解を1つだけ含む)
    pub options: Vec<&'a Kural>,
    /// 正解のクラル番号
    pub correct_answer: u32,
}

impl<'a> Question<'a> {
    pub fn is_correct(&self, number: u32) -> bool {
        number == self.correct_answer
    }
}

/// MARK:問題を生成する
///
/// クラルが4つ未満なら選択肢が作れないので空のリストを返す。
/// シャッフルはすべて `SliceRandom::shuffle` (Fisher-Yates) で行う。
pub fn generate_questions<'a, R>(
    records: &'a [Kural],
    round_size: usize,
    rng: &mut R,
) -> Vec<Question<'a>>
where
    R: Rng + ?Sized,
{
    if records.len() < OPTION_COUNT {
        tracing::warn!(count = records.len(), "not enough kurals to build a question");
        return Vec::new();
    }

    let mut pool: Vec<&Kural> = records.iter().collect();
    pool.shuffle(rng);

    let subject_count = round_size.min(pool.len());
    let questions: Vec<Question<'a>> = pool[..subject_count]
        .iter()
        .map(|&subject| {
            // 正解以外から不正解を3つ選ぶ
            let mut others: Vec<&Kural> = pool
                .iter()
                .copied()
                .filter(|k| k.number != subject.number)
                .collect();
            others.shuffle(rng);

            let mut options = Vec::with_capacity(OPTION_COUNT);
            options.push(subject);
            options.extend(others.into_iter().take(OPTION_COUNT - 1));
            options.shuffle(rng);

            Question {
                subject,
                options,
                correct_answer: subject.number,
            }
        })
        .collect();

    tracing::debug!(count = questions.len(), "questions generated");
    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashMap, HashSet};

    fn kurals(numbers: impl IntoIterator<Item = u32>) -> Vec<Kural> {
        numbers
            .into_iter()
            .map(|number| Kural {
                number,
                text: format!("kural {number}"),
                translations: HashMap::from([("en".to_string(), format!("meaning {number}"))]),
            })
            .collect()
    }

    fn assert_well_formed(question: &Question<'_>) {
        assert_eq!(question.options.len(), OPTION_COUNT);
        let numbers: HashSet<u32> = question.options.iter().map(|k| k.number).collect();
        assert_eq!(numbers.len(), OPTION_COUNT, "options must be distinct");
        let correct = question
            .options
            .iter()
            .filter(|k| k.number == question.correct_answer)
            .count();
        assert_eq!(correct, 1);
        assert_eq!(question.correct_answer, question.subject.number);
    }

    #[test]
    fn every_question_has_four_distinct_options_with_one_correct() {
        let records = kurals(1..=40);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let questions = generate_questions(&records, ROUND_SIZE, &mut rng);
            assert_eq!(questions.len(), ROUND_SIZE);
            questions.iter().for_each(assert_well_formed);
        }
    }

    #[test]
    fn round_length_is_capped_by_dataset_size() {
        let mut rng = StdRng::seed_from_u64(1);
        for size in 4..=15u32 {
            let records = kurals(1..=size);
            let questions = generate_questions(&records, ROUND_SIZE, &mut rng);
            assert_eq!(questions.len(), ROUND_SIZE.min(size as usize));
        }
    }

    #[test]
    fn subjects_are_not_repeated_within_a_round() {
        let records = kurals(1..=30);
        let mut rng = StdRng::seed_from_u64(7);
        let questions = generate_questions(&records, ROUND_SIZE, &mut rng);
        let subjects: HashSet<u32> = questions.iter().map(|q| q.subject.number).collect();
        assert_eq!(subjects.len(), questions.len());
    }

    #[test]
    fn too_small_dataset_yields_no_questions() {
        let mut rng = StdRng::seed_from_u64(3);
        for size in 0..4u32 {
            let records = kurals(1..=size);
            assert!(generate_questions(&records, ROUND_SIZE, &mut rng).is_empty());
        }
    }

    #[test]
    fn four_records_use_every_record_as_options() {
        let records = kurals([1, 2, 3, 4]);
        let mut rng = StdRng::seed_from_u64(11);
        let questions = generate_questions(&records, ROUND_SIZE, &mut rng);

        assert_eq!(questions.len(), 4);
        for question in &questions {
            assert_well_formed(question);
            let mut numbers: Vec<u32> = question.options.iter().map(|k| k.number).collect();
            numbers.sort_unstable();
            assert_eq!(numbers, vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn same_seed_produces_same_round() {
        let records = kurals(1..=25);
        let first = generate_questions(&records, ROUND_SIZE, &mut StdRng::seed_from_u64(42));
        let second = generate_questions(&records, ROUND_SIZE, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn correct_option_position_varies() {
        let records = kurals(1..=20);
        let mut rng = StdRng::seed_from_u64(5);
        let mut positions = HashSet::new();
        for _ in 0..10 {
            for question in generate_questions(&records, ROUND_SIZE, &mut rng) {
                positions.insert(
                    question
                        .options
                        .iter()
                        .position(|k| k.number == question.correct_answer)
                        .unwrap(),
                );
            }
        }
        assert_eq!(positions.len(), OPTION_COUNT);
    }

    #[test]
    fn is_correct_matches_subject() {
        let records = kurals(1..=5);
        let mut rng = StdRng::seed_from_u64(9);
        let question = &generate_questions(&records, 1, &mut rng)[0];
        assert!(question.is_correct(question.subject.number));
        let wrong = question
            .options
            .iter()
            .find(|k| k.number != question.subject.number)
            .unwrap();
        assert!(!question.is_correct(wrong.number));
    }
}
