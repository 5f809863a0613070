// ============================================
// src/strings.rs
// 画面に表示する文字列 (言語ごと)
// ============================================

use crate::kural::Language;

/// UI文字列のテーブル
#[derive(Debug, Clone, Copy)]
pub struct UiStrings {
    pub quiz_title: &'static str,
    pub question: &'static str,
    pub of: &'static str,
    pub which_kural: &'static str,
    pub correct: &'static str,
    pub wrong: &'static str,
    pub quiz_results: &'static str,
    pub victory_message: &'static str,
    pub your_score: &'static str,
    pub play_again: &'static str,
    pub loading: &'static str,
    pub not_enough_kurals: &'static str,
    pub key_help: &'static str,
}

const EN: UiStrings = UiStrings {
    quiz_title: "Thirukkural Quiz",
    question: "Question",
    of: "of",
    which_kural: "Which translation matches this Kural?",
    correct: "Correct!",
    wrong: "Wrong!",
    quiz_results: "Quiz Results",
    victory_message: "Well done! You have completed the quiz.",
    your_score: "Your Score",
    play_again: "Play Again",
    loading: "Loading Quiz...",
    not_enough_kurals: "At least 4 Kurals are needed to start the quiz.",
    key_help: "1-4 / ↑↓ Enter: answer   Tab: language   r: restart   Esc: quit",
};

const TA: UiStrings = UiStrings {
    quiz_title: "திருக்குறள் வினாடி வினா",
    question: "கேள்வி",
    of: "/",
    which_kural: "இந்தக் குறளுக்கு பொருந்தும் விளக்கம் எது?",
    correct: "சரி!",
    wrong: "தவறு!",
    quiz_results: "வினாடி வினா முடிவுகள்",
    victory_message: "நன்று! நீங்கள் வினாடி வினாவை முடித்துவிட்டீர்கள்.",
    your_score: "உங்கள் மதிப்பெண்",
    play_again: "மீண்டும் விளையாடு",
    loading: "வினாடி வினா ஏற்றப்படுகிறது...",
    not_enough_kurals: "வினாடி வினாவைத் தொடங்க குறைந்தது 4 குறள்கள் தேவை.",
    key_help: "1-4 / ↑↓ Enter: பதில்   Tab: மொழி   r: மீண்டும்   Esc: வெளியேறு",
};

/// 言語に対応する文字列テーブル
pub fn ui_strings(language: Language) -> &'static UiStrings {
    match language {
        Language::En => &EN,
        Language::Ta => &TA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_has_non_empty_strings() {
        for language in Language::ALL {
            let s = ui_strings(language);
            for text in [
                s.quiz_title,
                s.question,
                s.of,
                s.which_kural,
                s.correct,
                s.wrong,
                s.quiz_results,
                s.victory_message,
                s.your_score,
                s.play_again,
                s.loading,
                s.not_enough_kurals,
                s.key_help,
            ] {
                assert!(!text.trim().is_empty(), "{language:?} has an empty string");
            }
        }
    }

    #[test]
    fn tables_differ_per_language() {
        assert_ne!(ui_strings(Language::En).quiz_title, ui_strings(Language::Ta).quiz_title);
    }
}
