//! Number Tokens - 数字串的扫描与分类
//!
//! 从左到右扫描一行文本，找出每个最长的 ASCII 数字串，
//! 根据上下文决定读作序数词、年份、基数词或保持原样

use crate::domain::number_words::NumberSpeller;

/// 年份区间（开区间）
const YEAR_RANGE: (u64, u64) = (1000, 2200);

/// 数字串的读法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberClass {
    /// 行首的 "3." 这种列表序号
    Ordinal,
    Year,
    Cardinal,
    /// 保持原样（与字母相连、嵌在词中间或超出范围）
    Literal,
}

/// 一行中的一个数字串及其上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberToken<'a> {
    pub digits: &'a str,
    /// 在行内的字节偏移
    pub start: usize,
    pub end: usize,
    pub before: Option<char>,
    pub after: Option<char>,
    /// `after` 之后的字符
    pub after_next: Option<char>,
    /// 前面只有空白
    pub at_line_start: bool,
    /// `after` 之后只有空白（或根本没有 `after`）
    pub after_is_last: bool,
}

impl NumberToken<'_> {
    pub fn value(&self) -> Option<u64> {
        self.digits.parse().ok()
    }

    fn is_ordinal(&self) -> bool {
        self.after == Some('.')
            && !self.after_next.is_some_and(|c| c.is_ascii_digit())
            && self.at_line_start
    }

    /// 前后都有合适的边界
    fn is_bounded(&self) -> bool {
        let left = self.at_line_start || self.before.is_some_and(char::is_whitespace);
        let right = self.after.is_some_and(char::is_whitespace)
            || (self.after_is_last && !self.after.is_some_and(char::is_alphabetic));
        left && right
    }

    pub fn classify(&self) -> NumberClass {
        if self.is_ordinal() {
            // "0." 没有序数读法
            if self.value() == Some(0) {
                return NumberClass::Literal;
            }
            return NumberClass::Ordinal;
        }
        if !self.is_bounded() {
            return NumberClass::Literal;
        }
        match self.value() {
            Some(v) if v > YEAR_RANGE.0 && v < YEAR_RANGE.1 => NumberClass::Year,
            Some(_) => NumberClass::Cardinal,
            None => NumberClass::Literal,
        }
    }

    /// 转成单词，Literal 或转换失败时返回 None
    fn render(&self, speller: &dyn NumberSpeller, ordinal_suffix: &str) -> Option<String> {
        let class = self.classify();
        if class == NumberClass::Literal {
            return None;
        }
        let value = self.value()?;
        let words = match class {
            NumberClass::Ordinal => speller
                .ordinal(value)
                .map(|w| format!("{}{}", w, ordinal_suffix)),
            NumberClass::Year => speller.year(value),
            NumberClass::Cardinal => speller.cardinal(value),
            NumberClass::Literal => return None,
        };
        match words {
            Ok(words) => Some(words),
            Err(e) => {
                tracing::debug!(digits = %self.digits, error = %e, "Keeping number literal");
                None
            }
        }
    }
}

/// 扫描一行中的所有数字串
pub fn scan(line: &str) -> Vec<NumberToken<'_>> {
    let bytes = line.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        // ASCII 数字不会出现在多字节字符内部，切片边界总是合法的
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }

        let head = &line[..start];
        let mut following = line[i..].chars();
        let after = following.next();
        let after_next = following.clone().next();

        tokens.push(NumberToken {
            digits: &line[start..i],
            start,
            end: i,
            before: head.chars().next_back(),
            after,
            after_next,
            at_line_start: head.trim().is_empty(),
            after_is_last: following.as_str().trim().is_empty(),
        });
    }

    tokens
}

/// 把一行中的数字转换成单词
pub fn convert_numbers(line: &str, speller: &dyn NumberSpeller, ordinal_suffix: &str) -> String {
    let mut out = String::with_capacity(line.len() * 2);
    let mut cursor = 0;

    for token in scan(line) {
        out.push_str(&line[cursor..token.start]);
        match token.render(speller, ordinal_suffix) {
            Some(words) => out.push_str(&words),
            None => out.push_str(token.digits),
        }
        cursor = token.end;
    }
    out.push_str(&line[cursor..]);

    out
}
