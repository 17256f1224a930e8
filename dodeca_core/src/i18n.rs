//! # Localized Messages
//!
//! Russian and English strings for everything the calculator and the
//! practice problems report to a person. The rest of the crate deals in
//! [`MessageKey`]s and error codes; only front ends call [`translate`].
//!
//! ## Example
//!
//! ```rust
//! use dodeca_core::i18n::{translate, Language, MessageKey};
//!
//! assert_eq!(translate(MessageKey::CorrectAnswer, Language::En), "Correct! Great job.");
//! assert_eq!(Language::Ru.toggled(), Language::En);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calculations::QuantityKind;
use crate::errors::CalcError;
use crate::units::{Dimension, LengthUnit};

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Ru, Language::En];

    pub fn code(self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
        }
    }

    /// The other language (the site has a single RU/EN switch)
    pub fn toggled(self) -> Language {
        match self {
            Language::Ru => Language::En,
            Language::En => Language::Ru,
        }
    }

    pub fn translate(self, key: MessageKey) -> &'static str {
        translate(key, self)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ru" => Ok(Language::Ru),
            "en" => Ok(Language::En),
            _ => Err(CalcError::invalid_input("language", s, "Expected 'ru' or 'en'")),
        }
    }
}

/// Identifier of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKey {
    // Calculator
    CalculatorTitle,
    ParametersTitle,
    ResultsTitle,
    ErrorNoParameters,
    ErrorInvalidValues,
    ErrorTooMany,
    ErrorInconsistent,
    CalculationSuccess,

    // Problems
    ProblemsTitle,
    ProblemPrefix,
    DifficultyAll,
    DifficultyEasy,
    DifficultyMedium,
    DifficultyHard,
    CorrectAnswer,
    IncorrectAnswer,
    EnterNumber,

    // Preferences
    ThemeLight,
    ThemeDark,
}

impl MessageKey {
    pub const ALL: [MessageKey; 19] = [
        MessageKey::CalculatorTitle,
        MessageKey::ParametersTitle,
        MessageKey::ResultsTitle,
        MessageKey::ErrorNoParameters,
        MessageKey::ErrorInvalidValues,
        MessageKey::ErrorTooMany,
        MessageKey::ErrorInconsistent,
        MessageKey::CalculationSuccess,
        MessageKey::ProblemsTitle,
        MessageKey::ProblemPrefix,
        MessageKey::DifficultyAll,
        MessageKey::DifficultyEasy,
        MessageKey::DifficultyMedium,
        MessageKey::DifficultyHard,
        MessageKey::CorrectAnswer,
        MessageKey::IncorrectAnswer,
        MessageKey::EnterNumber,
        MessageKey::ThemeLight,
        MessageKey::ThemeDark,
    ];
}

/// Look up the text of a message.
pub fn translate(key: MessageKey, language: Language) -> &'static str {
    use MessageKey::*;

    match language {
        Language::Ru => match key {
            CalculatorTitle => "Калькулятор свойств додекаэдра",
            ParametersTitle => "Выберите известные параметры (не более двух):",
            ResultsTitle => "Результаты расчета:",
            ErrorNoParameters => "Пожалуйста, выберите хотя бы один параметр",
            ErrorInvalidValues => "Пожалуйста, введите положительные числа для всех выбранных параметров",
            ErrorTooMany => "Можно выбрать максимум 2 параметра одновременно",
            ErrorInconsistent => "Введенные параметры несовместимы друг с другом. Пожалуйста, проверьте значения.",
            CalculationSuccess => "Расчет успешно выполнен!",
            ProblemsTitle => "Задачи по додекаэдру",
            ProblemPrefix => "Задача",
            DifficultyAll => "Все",
            DifficultyEasy => "Легкие",
            DifficultyMedium => "Средние",
            DifficultyHard => "Сложные",
            CorrectAnswer => "Правильно! Отличная работа.",
            IncorrectAnswer => "Неправильно. Попробуйте еще раз.",
            EnterNumber => "Пожалуйста, введите число.",
            ThemeLight => "Светлая тема",
            ThemeDark => "Темная тема",
        },
        Language::En => match key {
            CalculatorTitle => "Dodecahedron Properties Calculator",
            ParametersTitle => "Select known parameters (maximum 2):",
            ResultsTitle => "Calculation results:",
            ErrorNoParameters => "Please select at least one parameter",
            ErrorInvalidValues => "Please enter positive numbers for all selected parameters",
            ErrorTooMany => "You can select a maximum of 2 parameters at once",
            ErrorInconsistent => "The entered parameters are incompatible. Please check your values.",
            CalculationSuccess => "Calculation completed successfully!",
            ProblemsTitle => "Dodecahedron Problems",
            ProblemPrefix => "Problem",
            DifficultyAll => "All",
            DifficultyEasy => "Easy",
            DifficultyMedium => "Medium",
            DifficultyHard => "Hard",
            CorrectAnswer => "Correct! Great job.",
            IncorrectAnswer => "Incorrect. Try again.",
            EnterNumber => "Please enter a number.",
            ThemeLight => "Light theme",
            ThemeDark => "Dark theme",
        },
    }
}

/// Field label of a quantity, e.g. "Volume (V)".
pub fn quantity_label(kind: QuantityKind, language: Language) -> &'static str {
    match (language, kind) {
        (Language::Ru, QuantityKind::EdgeLength) => "Длина ребра (a)",
        (Language::Ru, QuantityKind::Volume) => "Объем (V)",
        (Language::Ru, QuantityKind::SurfaceArea) => "Площадь поверхности (S)",
        (Language::Ru, QuantityKind::CircumscribedRadius) => "Радиус описанной сферы (R)",
        (Language::Ru, QuantityKind::InscribedRadius) => "Радиус вписанной сферы (r)",
        (Language::En, QuantityKind::EdgeLength) => "Edge length (a)",
        (Language::En, QuantityKind::Volume) => "Volume (V)",
        (Language::En, QuantityKind::SurfaceArea) => "Surface area (S)",
        (Language::En, QuantityKind::CircumscribedRadius) => "Circumscribed sphere radius (R)",
        (Language::En, QuantityKind::InscribedRadius) => "Inscribed sphere radius (r)",
    }
}

/// Unit symbol for a dimension, e.g. "см³" or "in²".
pub fn unit_symbol(unit: LengthUnit, dimension: Dimension, language: Language) -> String {
    let base = match (language, unit) {
        (Language::Ru, LengthUnit::Millimeter) => "мм",
        (Language::Ru, LengthUnit::Centimeter) => "см",
        (Language::Ru, LengthUnit::Meter) => "м",
        (Language::Ru, LengthUnit::Inch) => "дюйм",
        (Language::En, u) => u.code(),
    };
    match dimension {
        Dimension::Length => base.to_string(),
        Dimension::Area => format!("{}²", base),
        Dimension::Volume => format!("{}³", base),
    }
}

/// Parse a number typed by a person.
///
/// Accepts a decimal comma ("755,2") as well as a point. Returns `None` for
/// empty text, garbage, and non-finite values.
pub fn parse_localized_number(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
