//! Text Normalizer - 朗读前的文本规范化
//!
//! 把原始文本改写成适合语音合成的形式：
//! - 数字 -> 单词（序数词 / 年份 / 基数词）
//! - 温度符号 -> 单词
//! - 链接 -> 固定的朗读短语
//!
//! 所有替换都依赖语言。检测到的语言没有数字转换后端时原样返回。
//! 规范化永不失败，任何无法处理的情况都退化为原文。

mod numbers;
mod rules;

use super::number_words::NumberWords;
use super::Language;

pub use numbers::{convert_numbers, scan, NumberClass, NumberToken};
pub use rules::{rules_for, LanguageRules};

/// 规范化结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationResult {
    pub text: String,
    /// 没有可用的数字转换后端时为 None，此时 `text` 与输入相同
    pub language: Option<Language>,
}

impl NormalizationResult {
    fn passthrough(text: &str) -> Self {
        Self {
            text: text.to_string(),
            language: None,
        }
    }

    pub fn is_passthrough(&self) -> bool {
        self.language.is_none()
    }
}

/// 文本规范化器
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    numbers: NumberWords,
}

impl TextNormalizer {
    pub fn new(numbers: NumberWords) -> Self {
        Self { numbers }
    }

    /// 能力表当前支持的语言
    pub fn supported_languages(&self) -> Vec<Language> {
        self.numbers.supported_languages()
    }

    /// 确定文本语言
    ///
    /// 受支持的提示语言优先，否则使用统计检测
    pub fn resolve_language(&self, text: &str, hint: Option<Language>) -> Option<Language> {
        if let Some(hint) = hint.filter(|h| self.numbers.supports(*h)) {
            return Some(hint);
        }

        let info = whatlang::detect(text)?;
        let detected = Language::from_detected(info.lang()).filter(|l| self.numbers.supports(*l));
        if detected.is_none() {
            tracing::warn!(
                detected = info.lang().code(),
                confidence = info.confidence(),
                "Language not supported, skipping TTS normalization"
            );
        }
        detected
    }

    /// 规范化文本
    pub fn normalize(&self, text: &str, hint: Option<Language>) -> NormalizationResult {
        let Some(language) = self.resolve_language(text, hint) else {
            return NormalizationResult::passthrough(text);
        };
        let Some(speller) = self.numbers.speller(language) else {
            return NormalizationResult::passthrough(text);
        };
        let rules = rules_for(language);
        let ordinal_suffix = rules.map(|r| r.ordinal_adverb_suffix).unwrap_or_default();

        let mut out = String::with_capacity(text.len() * 2);
        for piece in text.split_inclusive('\n') {
            let (line, separator) = split_line_ending(piece);
            let line = convert_numbers(line, speller, ordinal_suffix);
            match rules {
                Some(rules) => {
                    let line = rules.replace_symbols(&line);
                    out.push_str(&rules.replace_urls(&line));
                }
                None => out.push_str(&line),
            }
            out.push_str(separator);
        }

        tracing::debug!(
            language = %language,
            input_len = text.len(),
            output_len = out.len(),
            "Text normalized for TTS"
        );

        NormalizationResult {
            text: out,
            language: Some(language),
        }
    }
}

/// 使用内置能力表规范化
pub fn normalize(text: &str, hint: Option<Language>) -> NormalizationResult {
    TextNormalizer::default().normalize(text, hint)
}

/// 拆出行尾的换行符（"\r\n" 或 "\n"）
fn split_line_ending(piece: &str) -> (&str, &str) {
    if let Some(line) = piece.strip_suffix("\r\n") {
        (line, "\r\n")
    } else if let Some(line) = piece.strip_suffix('\n') {
        (line, "\n")
    } else {
        (piece, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EN: Option<Language> = Some(Language::English);
    const DE: Option<Language> = Some(Language::German);

    #[test]
    fn test_cardinal() {
        let result = normalize("I have 5 apples", EN);
        assert_eq!(result.text, "I have five apples");
        assert_eq!(result.language, Some(Language::English));
    }

    #[test]
    fn test_ordinal_at_line_start() {
        let result = normalize("3. Do this", EN);
        assert!(result.text.starts_with("thirdly"));
        assert!(result.text.ends_with("Do this"));
    }

    #[test]
    fn test_german_ordinal_adverb() {
        let result = normalize("1. Erstens\n  2. Zweitens", DE);
        assert_eq!(result.text, "erstens. Erstens\n  zweitens. Zweitens");
    }

    #[test]
    fn test_year_range() {
        let result = normalize("It happened in 1984", EN);
        assert!(result.text.contains("nineteen eighty-four"));
        assert!(!result.text.contains("one thousand"));

        let result = normalize("There are 3000 stars", EN);
        assert!(result.text.contains("three thousand"));
    }

    #[test]
    fn test_digits_next_to_letters_untouched() {
        let result = normalize("Model gpt4 is fast", EN);
        assert_eq!(result.text, "Model gpt4 is fast");
    }

    #[test]
    fn test_symbol_and_url() {
        let result = normalize("It's 20°C, see https://x.com", EN);
        assert!(result.text.contains("degrees Celsius"));
        assert!(result.text.contains("(see link in the text)"));
        assert!(!result.text.contains("https"));
        assert!(!result.text.contains('°'));
    }

    #[test]
    fn test_german_symbol_and_url() {
        let result = normalize("Es sind 20 °C, siehe http://wetter.de/heute", DE);
        assert_eq!(result.text, "Es sind zwanzig Grad Celsius, siehe (siehe Link im Text)");
    }

    #[test]
    fn test_line_separators_preserved() {
        let result = normalize("1 a\r\n2 b\n\n3 c\n", EN);
        assert_eq!(result.text, "one a\r\ntwo b\n\nthree c\n");
    }

    #[test]
    fn test_unsupported_language_passthrough() {
        let text = "Это было давно, в 1984 году, когда мы жили в маленьком городе у реки.";
        let result = normalize(text, None);
        assert!(result.is_passthrough());
        assert_eq!(result.text, text);
    }

    #[test]
    fn test_restricted_capability_table() {
        let normalizer = TextNormalizer::new(NumberWords::with_languages(&[Language::English]));
        // 提示语言不受支持时回退到检测
        let text = "Die Kinder spielen heute im Garten, weil die Sonne scheint und es warm ist.";
        let result = normalizer.normalize(text, DE);
        assert_ne!(result.language, Some(Language::German));
        assert_eq!(result.text, text);
    }

    #[test]
    fn test_detects_english_without_hint() {
        let text = "The weather was wonderful yesterday and 3 children were playing in the garden near the house.";
        let result = normalize(text, None);
        assert_eq!(result.language, Some(Language::English));
        assert!(result.text.contains("three children"));
    }

    #[test]
    fn test_empty_text() {
        let result = normalize("", EN);
        assert_eq!(result.text, "");
    }

    #[test]
    fn test_normalize_is_idempotent_on_samples() {
        let samples = [
            "3. Do this\n4. Then that",
            "It's 20°C, see https://x.com",
            "In 1984 there were 3000 stars and 12 moons.",
            "Model gpt4 costs 5€ per 1000 tokens",
        ];
        for sample in samples {
            let once = normalize(sample, EN);
            let twice = normalize(&once.text, EN);
            assert_eq!(once, twice, "sample: {}", sample);
        }
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(text in "[a-zA-Z0-9 .,:/°CF\\n\\r-]{0,64}") {
            for hint in [EN, DE] {
                let once = normalize(&text, hint);
                let twice = normalize(&once.text, hint);
                prop_assert_eq!(&once.text, &twice.text);
            }
        }

        #[test]
        fn prop_text_without_digits_or_markers_unchanged(text in "[a-zA-Z ,!?\\n]{0,64}") {
            let result = normalize(&text, EN);
            prop_assert_eq!(result.text, text);
        }
    }
}
