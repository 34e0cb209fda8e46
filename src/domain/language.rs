//! Language - 语言标签
//!
//! 规范化器支持的语言，使用 ISO 639-1 代码作为外部表示

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// 规范化器可以处理的语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Language {
    English,
    German,
}

impl Language {
    /// 所有内置语言
    pub const ALL: [Language; 2] = [Language::English, Language::German];

    /// ISO 639-1 代码
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
        }
    }

    /// 从 whatlang 的检测结果映射
    ///
    /// 没有对应枚举值的语言返回 None
    pub fn from_detected(lang: whatlang::Lang) -> Option<Self> {
        match lang {
            whatlang::Lang::Eng => Some(Language::English),
            whatlang::Lang::Deu => Some(Language::German),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "eng" | "english" => Ok(Language::English),
            "de" | "deu" | "ger" | "german" => Ok(Language::German),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

impl TryFrom<String> for Language {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
