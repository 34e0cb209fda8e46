//! Number Words - 数字转单词后端
//!
//! 每种语言一个 `NumberSpeller` 实现，`NumberWords` 是能力表：
//! 规范化器在调用时从这里查询支持的语言集合

mod english;
mod german;

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use super::Language;

pub use english::EnglishSpeller;
pub use german::GermanSpeller;

/// 数字转换错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpellError {
    #[error("number out of range: {0}")]
    OutOfRange(u64),

    #[error("unsupported form for {language}: {form}")]
    UnsupportedForm {
        language: Language,
        form: &'static str,
    },
}

/// 单一语言的数字拼读器
pub trait NumberSpeller: Send + Sync {
    fn language(&self) -> Language;

    /// 基数词 (5 -> "five")
    fn cardinal(&self, value: u64) -> Result<String, SpellError>;

    /// 序数词 (3 -> "third")
    fn ordinal(&self, value: u64) -> Result<String, SpellError>;

    /// 年份读法 (1984 -> "nineteen eighty-four")
    ///
    /// 默认退化为基数词
    fn year(&self, value: u64) -> Result<String, SpellError> {
        self.cardinal(value)
    }
}

/// 数字转单词能力表
#[derive(Clone)]
pub struct NumberWords {
    spellers: HashMap<Language, Arc<dyn NumberSpeller>>,
}

impl NumberWords {
    /// 空能力表
    pub fn empty() -> Self {
        Self {
            spellers: HashMap::new(),
        }
    }

    /// 注册所有内置语言
    pub fn builtin() -> Self {
        Self::with_languages(&Language::ALL)
    }

    /// 只注册指定的内置语言
    pub fn with_languages(languages: &[Language]) -> Self {
        let mut table = Self::empty();
        for language in languages {
            match language {
                Language::English => table.register(Arc::new(EnglishSpeller)),
                Language::German => table.register(Arc::new(GermanSpeller)),
            }
        }
        table
    }

    /// 注册（或替换）一个拼读器
    pub fn register(&mut self, speller: Arc<dyn NumberSpeller>) {
        self.spellers.insert(speller.language(), speller);
    }

    pub fn supports(&self, language: Language) -> bool {
        self.spellers.contains_key(&language)
    }

    pub fn speller(&self, language: Language) -> Option<&dyn NumberSpeller> {
        self.spellers.get(&language).map(|s| s.as_ref())
    }

    /// 当前支持的语言（按代码排序）
    pub fn supported_languages(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = self.spellers.keys().copied().collect();
        languages.sort_by_key(|l| l.code());
        languages
    }
}

impl Default for NumberWords {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for NumberWords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumberWords")
            .field("languages", &self.supported_languages())
            .finish()
    }
}
