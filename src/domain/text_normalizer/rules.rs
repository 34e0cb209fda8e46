//! Language Rules - 符号与链接的朗读替换表

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

use crate::domain::Language;

/// 链接: scheme 前缀后跟非空白字符
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?:\S+").expect("URL pattern is valid"));

/// 单一语言的朗读规则
#[derive(Debug, Clone, Copy)]
pub struct LanguageRules {
    pub language: Language,
    /// 行首序数词追加的后缀（序数形容词 -> 序数副词）
    pub ordinal_adverb_suffix: &'static str,
    /// 符号 -> 朗读文本，按顺序做字面替换
    pub symbols: &'static [(&'static str, &'static str)],
    /// 替换链接的固定短语
    pub url_placeholder: &'static str,
}

const RULES: &[LanguageRules] = &[
    LanguageRules {
        language: Language::English,
        ordinal_adverb_suffix: "ly",
        symbols: &[("°C", "degrees Celsius"), ("°F", "degrees Fahrenheit")],
        url_placeholder: "(see link in the text)",
    },
    LanguageRules {
        language: Language::German,
        ordinal_adverb_suffix: "ns",
        symbols: &[("°C", "Grad Celsius"), ("°F", "Grad Fahrenheit")],
        url_placeholder: "(siehe Link im Text)",
    },
];

/// 查找语言的朗读规则，表中没有的语言返回 None
pub fn rules_for(language: Language) -> Option<&'static LanguageRules> {
    RULES.iter().find(|r| r.language == language)
}

impl LanguageRules {
    pub fn replace_symbols<'a>(&self, line: &'a str) -> Cow<'a, str> {
        let mut result = Cow::Borrowed(line);
        for (symbol, spoken) in self.symbols {
            if result.contains(symbol) {
                result = Cow::Owned(result.replace(symbol, spoken));
            }
        }
        result
    }

    pub fn replace_urls<'a>(&self, line: &'a str) -> Cow<'a, str> {
        URL_PATTERN.replace_all(line, self.url_placeholder)
    }
}
