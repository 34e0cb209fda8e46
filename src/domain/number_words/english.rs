//! English number speller

use super::{Language, NumberSpeller, SpellError};

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [&str; 7] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

/// 英语拼读器（美式，不带 "and"）
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishSpeller;

fn below_hundred(n: u64) -> String {
    debug_assert!(n < 100);
    if n < 20 {
        return ONES[n as usize].to_string();
    }
    let tens = TENS[(n / 10) as usize];
    match n % 10 {
        0 => tens.to_string(),
        unit => format!("{}-{}", tens, ONES[unit as usize]),
    }
}

fn below_thousand(n: u64) -> String {
    debug_assert!(n < 1000);
    let hundreds = n / 100;
    let rest = n % 100;
    match (hundreds, rest) {
        (0, _) => below_hundred(rest),
        (h, 0) => format!("{} hundred", ONES[h as usize]),
        (h, r) => format!("{} hundred {}", ONES[h as usize], below_hundred(r)),
    }
}

impl EnglishSpeller {
    fn ordinal_word(word: &str) -> String {
        match word {
            "zero" => "zeroth".to_string(),
            "one" => "first".to_string(),
            "two" => "second".to_string(),
            "three" => "third".to_string(),
            "five" => "fifth".to_string(),
            "eight" => "eighth".to_string(),
            "nine" => "ninth".to_string(),
            "twelve" => "twelfth".to_string(),
            w if w.ends_with('y') => format!("{}ieth", &w[..w.len() - 1]),
            w => format!("{}th", w),
        }
    }
}

impl NumberSpeller for EnglishSpeller {
    fn language(&self) -> Language {
        Language::English
    }

    fn cardinal(&self, value: u64) -> Result<String, SpellError> {
        if value == 0 {
            return Ok(ONES[0].to_string());
        }

        let mut parts: Vec<String> = Vec::new();
        let mut remaining = value;
        let mut scale = 0;
        while remaining > 0 {
            let group = remaining % 1000;
            if group > 0 {
                let name = SCALES.get(scale).ok_or(SpellError::OutOfRange(value))?;
                if name.is_empty() {
                    parts.push(below_thousand(group));
                } else {
                    parts.push(format!("{} {}", below_thousand(group), name));
                }
            }
            remaining /= 1000;
            scale += 1;
        }
        parts.reverse();
        Ok(parts.join(" "))
    }

    fn ordinal(&self, value: u64) -> Result<String, SpellError> {
        let cardinal = self.cardinal(value)?;
        // 只变换最后一个词（"twenty-one" -> "twenty-first"）
        let split_at = cardinal
            .rfind(|c: char| c == ' ' || c == '-')
            .map(|i| i + 1)
            .unwrap_or(0);
        let (head, last) = cardinal.split_at(split_at);
        Ok(format!("{}{}", head, Self::ordinal_word(last)))
    }

    fn year(&self, value: u64) -> Result<String, SpellError> {
        // 1000-1099、2000-2099 这类年份按基数词读
        if !(1000..10_000).contains(&value) || (value / 100) % 10 == 0 {
            return self.cardinal(value);
        }

        let high = below_hundred(value / 100);
        Ok(match value % 100 {
            0 => format!("{} hundred", high),
            low if low < 10 => format!("{} oh-{}", high, ONES[low as usize]),
            low => format!("{} {}", high, below_hundred(low)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_small() {
        let s = EnglishSpeller;
        assert_eq!(s.cardinal(0).unwrap(), "zero");
        assert_eq!(s.cardinal(5).unwrap(), "five");
        assert_eq!(s.cardinal(13).unwrap(), "thirteen");
        assert_eq!(s.cardinal(40).unwrap(), "forty");
        assert_eq!(s.cardinal(42).unwrap(), "forty-two");
    }

    #[test]
    fn test_cardinal_large() {
        let s = EnglishSpeller;
        assert_eq!(s.cardinal(105).unwrap(), "one hundred five");
        assert_eq!(s.cardinal(3000).unwrap(), "three thousand");
        assert_eq!(
            s.cardinal(2_000_017).unwrap(),
            "two million seventeen"
        );
        assert_eq!(
            s.cardinal(1_234_567).unwrap(),
            "one million two hundred thirty-four thousand five hundred sixty-seven"
        );
        assert!(s.cardinal(u64::MAX).unwrap().starts_with("eighteen quintillion"));
    }

    #[test]
    fn test_ordinal() {
        let s = EnglishSpeller;
        assert_eq!(s.ordinal(1).unwrap(), "first");
        assert_eq!(s.ordinal(3).unwrap(), "third");
        assert_eq!(s.ordinal(12).unwrap(), "twelfth");
        assert_eq!(s.ordinal(20).unwrap(), "twentieth");
        assert_eq!(s.ordinal(21).unwrap(), "twenty-first");
        assert_eq!(s.ordinal(100).unwrap(), "one hundredth");
    }

    #[test]
    fn test_year() {
        let s = EnglishSpeller;
        assert_eq!(s.year(1984).unwrap(), "nineteen eighty-four");
        assert_eq!(s.year(1905).unwrap(), "nineteen oh-five");
        assert_eq!(s.year(1900).unwrap(), "nineteen hundred");
        assert_eq!(s.year(2005).unwrap(), "two thousand five");
        assert_eq!(s.year(2150).unwrap(), "twenty-one fifty");
    }
}
