//! Domain Layer - 领域层
//!
//! 纯函数部分，没有 I/O：
//! - language: 语言标签
//! - number_words: 数字转单词能力表
//! - text_normalizer: 朗读前的文本规范化

mod language;
pub mod number_words;
pub mod text_normalizer;

pub use language::Language;
pub use number_words::{NumberSpeller, NumberWords, SpellError};
pub use text_normalizer::{normalize, NormalizationResult, TextNormalizer};
