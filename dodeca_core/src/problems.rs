//! # Practice Problems
//!
//! A fixed set of exercises with numeric answers. An answer is accepted when
//! it is within [`ANSWER_TOLERANCE`] of the expected value; answers are
//! rounded to two decimals in the catalog, so the tolerance is absolute.
//!
//! ## Example
//!
//! ```rust
//! use dodeca_core::problems::{check_answer, AnswerFeedback};
//!
//! assert_eq!(check_answer(1, "957.9").unwrap(), AnswerFeedback::Correct);
//! assert_eq!(check_answer(1, "950").unwrap(), AnswerFeedback::Incorrect);
//! assert_eq!(check_answer(1, "a lot").unwrap(), AnswerFeedback::NotANumber);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::i18n::{parse_localized_number, Language, MessageKey};

/// Largest accepted |answer − expected|
pub const ANSWER_TOLERANCE: f64 = 0.1;

/// Absorbs the binary rounding of decimal input, so "755.1" and "755.3" are
/// both exactly 0.1 away from 755.2
const ROUNDING_SLACK: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn code(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn message_key(self) -> MessageKey {
        match self {
            Difficulty::Easy => MessageKey::DifficultyEasy,
            Difficulty::Medium => MessageKey::DifficultyMedium,
            Difficulty::Hard => MessageKey::DifficultyHard,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Difficulty {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(CalcError::invalid_input(
                "difficulty",
                s,
                "Expected easy, medium or hard",
            )),
        }
    }
}

/// One exercise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Problem {
    /// 1-based number shown to the user
    pub number: u32,
    pub difficulty: Difficulty,
    pub statement_ru: &'static str,
    pub statement_en: &'static str,
    pub answer: f64,
}

impl Problem {
    pub fn statement(&self, language: Language) -> &'static str {
        match language {
            Language::Ru => self.statement_ru,
            Language::En => self.statement_en,
        }
    }

    pub fn accepts(&self, answer: f64) -> bool {
        (answer - self.answer).abs() <= ANSWER_TOLERANCE + ROUNDING_SLACK
    }
}

static PROBLEMS: [Problem; 6] = [
    Problem {
        number: 1,
        difficulty: Difficulty::Easy,
        statement_ru: "Найдите объем додекаэдра с ребром 5 см (см³).",
        statement_en: "Find the volume of a dodecahedron with edge 5 cm (cm³).",
        answer: 957.89,
    },
    Problem {
        number: 2,
        difficulty: Difficulty::Easy,
        statement_ru: "Найдите площадь поверхности додекаэдра с ребром 3 см (см²).",
        statement_en: "Find the surface area of a dodecahedron with edge 3 cm (cm²).",
        answer: 185.81,
    },
    Problem {
        number: 3,
        difficulty: Difficulty::Medium,
        statement_ru: "Найдите радиус вписанной сферы додекаэдра с ребром 4 см (см).",
        statement_en: "Find the inscribed sphere radius of a dodecahedron with edge 4 cm (cm).",
        answer: 2.38,
    },
    Problem {
        number: 4,
        difficulty: Difficulty::Medium,
        statement_ru: "Найдите длину ребра додекаэдра, описанная сфера которого имеет радиус 10 см (см).",
        statement_en: "Find the edge length of a dodecahedron whose circumscribed sphere has radius 10 cm (cm).",
        answer: 7.21,
    },
    Problem {
        number: 5,
        difficulty: Difficulty::Hard,
        statement_ru: "Найдите двугранный угол додекаэдра (в градусах).",
        statement_en: "Find the dihedral angle of a dodecahedron (in degrees).",
        answer: 116.57,
    },
    Problem {
        number: 6,
        difficulty: Difficulty::Hard,
        statement_ru: "Найдите объем додекаэдра, вписанного в куб объемом 1000 см³ (см³).",
        statement_en: "Find the volume of a dodecahedron inscribed in a cube of volume 1000 cm³ (cm³).",
        answer: 755.2,
    },
];

/// Every problem, in order
pub fn all() -> &'static [Problem] {
    &PROBLEMS
}

/// Problems of one difficulty; `None` means all
pub fn by_difficulty(difficulty: Option<Difficulty>) -> impl Iterator<Item = &'static Problem> {
    PROBLEMS
        .iter()
        .filter(move |p| difficulty.map_or(true, |d| p.difficulty == d))
}

pub fn find(number: u32) -> CalcResult<&'static Problem> {
    PROBLEMS
        .iter()
        .find(|p| p.number == number)
        .ok_or(CalcError::ProblemNotFound { number })
}

/// Verdict on a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerFeedback {
    Correct,
    Incorrect,
    /// The text did not contain a number
    NotANumber,
}

impl AnswerFeedback {
    pub fn is_correct(self) -> bool {
        self == AnswerFeedback::Correct
    }

    pub fn message_key(self) -> MessageKey {
        match self {
            AnswerFeedback::Correct => MessageKey::CorrectAnswer,
            AnswerFeedback::Incorrect => MessageKey::IncorrectAnswer,
            AnswerFeedback::NotANumber => MessageKey::EnterNumber,
        }
    }
}

/// Check the text a user typed as the answer to problem `number`.
///
/// # Returns
///
/// * `Ok(AnswerFeedback)` - Verdict, including `NotANumber` for unparseable text
/// * `Err(CalcError::ProblemNotFound)` - No such problem
pub fn check_answer(number: u32, text: &str) -> CalcResult<AnswerFeedback> {
    let problem = find(number)?;

    let feedback = match parse_localized_number(text) {
        None => AnswerFeedback::NotANumber,
        Some(answer) if problem.accepts(answer) => AnswerFeedback::Correct,
        Some(_) => AnswerFeedback::Incorrect,
    };
    debug!(number, ?feedback, "answer checked");

    Ok(feedback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::{surface_area, volume};

    #[test]
    fn test_catalog_numbering() {
        for (i, p) in all().iter().enumerate() {
            assert_eq!(p.number as usize, i + 1);
        }
    }

    #[test]
    fn test_formula_backed_answers() {
        assert!(find(1).unwrap().accepts(volume(5.0)));
        assert!(find(2).unwrap().accepts(surface_area(3.0)));
    }

    #[test]
    fn test_absolute_tolerance() {
        assert_eq!(check_answer(5, "116.5").unwrap(), AnswerFeedback::Correct);
        assert_eq!(check_answer(5, "116.65").unwrap(), AnswerFeedback::Correct);
        assert_eq!(check_answer(5, "116.8").unwrap(), AnswerFeedback::Incorrect);
        assert_eq!(check_answer(5, "116.3").unwrap(), AnswerFeedback::Incorrect);
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive_on_both_sides() {
        // As f64, 755.3 - 755.2 is just under 0.1 while 755.2 - 755.1 is just
        // over it; both must count as exactly 0.1 away
        assert_eq!(check_answer(6, "755.3").unwrap(), AnswerFeedback::Correct);
        assert_eq!(check_answer(6, "755.1").unwrap(), AnswerFeedback::Correct);
        assert_eq!(check_answer(1, "957.99").unwrap(), AnswerFeedback::Correct);
        assert_eq!(check_answer(3, "2.48").unwrap(), AnswerFeedback::Correct);
        assert_eq!(check_answer(3, "2.28").unwrap(), AnswerFeedback::Correct);

        assert_eq!(check_answer(6, "755.31").unwrap(), AnswerFeedback::Incorrect);
        assert_eq!(check_answer(6, "755.09").unwrap(), AnswerFeedback::Incorrect);
    }

    #[test]
    fn test_decimal_comma_and_whitespace() {
        assert_eq!(check_answer(6, " 755,2 ").unwrap(), AnswerFeedback::Correct);
    }

    #[test]
    fn test_not_a_number() {
        let fb = check_answer(2, "").unwrap();
        assert_eq!(fb, AnswerFeedback::NotANumber);
        assert_eq!(fb.message_key(), MessageKey::EnterNumber);
    }

    #[test]
    fn test_unknown_problem() {
        assert_eq!(
            check_answer(7, "1").unwrap_err(),
            CalcError::ProblemNotFound { number: 7 }
        );
    }

    #[test]
    fn test_filter_by_difficulty() {
        assert_eq!(by_difficulty(None).count(), all().len());
        let hard: Vec<u32> = by_difficulty(Some(Difficulty::Hard)).map(|p| p.number).collect();
        assert_eq!(hard, vec![5, 6]);
        assert!("Medium".parse::<Difficulty>().is_ok());
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_statements_are_localized() {
        let p = find(4).unwrap();
        assert_ne!(p.statement(Language::Ru), p.statement(Language::En));
    }
}
