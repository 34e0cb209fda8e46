//! German number speller
//!
//! 千以下的部分写成一个复合词，百万及以上的量级单独成词

use super::{Language, NumberSpeller, SpellError};

const ONES: [&str; 20] = [
    "null", "eins", "zwei", "drei", "vier", "fünf", "sechs", "sieben", "acht", "neun", "zehn",
    "elf", "zwölf", "dreizehn", "vierzehn", "fünfzehn", "sechzehn", "siebzehn", "achtzehn",
    "neunzehn",
];

const TENS: [&str; 10] = [
    "", "", "zwanzig", "dreißig", "vierzig", "fünfzig", "sechzig", "siebzig", "achtzig",
    "neunzig",
];

/// 百万及以上的量级（单数, 复数）
const SCALES: [(&str, &str); 5] = [
    ("Million", "Millionen"),
    ("Milliarde", "Milliarden"),
    ("Billion", "Billionen"),
    ("Billiarde", "Billiarden"),
    ("Trillion", "Trillionen"),
];

/// 德语拼读器
#[derive(Debug, Clone, Copy, Default)]
pub struct GermanSpeller;

/// `terminal` 为 true 时 1 读作 "eins"，否则作为前缀 "ein"
fn below_hundred(n: u64, terminal: bool) -> String {
    debug_assert!(n < 100);
    if n == 1 {
        return if terminal { "eins" } else { "ein" }.to_string();
    }
    if n < 20 {
        return ONES[n as usize].to_string();
    }
    let tens = TENS[(n / 10) as usize];
    match n % 10 {
        0 => tens.to_string(),
        1 => format!("einund{}", tens),
        unit => format!("{}und{}", ONES[unit as usize], tens),
    }
}

fn below_thousand(n: u64, terminal: bool) -> String {
    debug_assert!(n < 1000);
    let hundreds = n / 100;
    let rest = n % 100;
    let mut word = String::new();
    if hundreds > 0 {
        word.push_str(&below_hundred(hundreds, false));
        word.push_str("hundert");
    }
    if rest > 0 {
        word.push_str(&below_hundred(rest, terminal));
    }
    word
}

fn small_ordinal(n: u64) -> String {
    match n {
        1 => "erste".to_string(),
        3 => "dritte".to_string(),
        7 => "siebte".to_string(),
        8 => "achte".to_string(),
        _ => format!("{}te", ONES[n as usize]),
    }
}

impl NumberSpeller for GermanSpeller {
    fn language(&self) -> Language {
        Language::German
    }

    fn cardinal(&self, value: u64) -> Result<String, SpellError> {
        if value == 0 {
            return Ok(ONES[0].to_string());
        }

        let mut parts: Vec<String> = Vec::new();

        // 百万以上
        let mut high = value / 1_000_000;
        let mut scale = 0;
        while high > 0 {
            let group = high % 1000;
            if group > 0 {
                let (singular, plural) = SCALES.get(scale).ok_or(SpellError::OutOfRange(value))?;
                if group == 1 {
                    parts.push(format!("eine {}", singular));
                } else {
                    let mut count = below_thousand(group, true);
                    if count.ends_with("eins") {
                        count.truncate(count.len() - 1);
                    }
                    parts.push(format!("{} {}", count, plural));
                }
            }
            high /= 1000;
            scale += 1;
        }
        parts.reverse();

        // 千以下合成一个词
        let low = value % 1_000_000;
        if low > 0 {
            let mut word = String::new();
            let thousands = low / 1000;
            if thousands > 0 {
                word.push_str(&below_thousand(thousands, false));
                word.push_str("tausend");
            }
            let rest = low % 1000;
            if rest > 0 {
                word.push_str(&below_thousand(rest, true));
            }
            parts.push(word);
        }

        Ok(parts.join(" "))
    }

    fn ordinal(&self, value: u64) -> Result<String, SpellError> {
        if value == 0 {
            return Ok("nullte".to_string());
        }

        let cardinal = self.cardinal(value)?;
        let rest = value % 100;
        if (1..20).contains(&rest) {
            let tail = below_hundred(rest, true);
            let head = cardinal
                .strip_suffix(tail.as_str())
                .ok_or(SpellError::UnsupportedForm {
                    language: Language::German,
                    form: "ordinal",
                })?;
            return Ok(format!("{}{}", head, small_ordinal(rest)));
        }
        Ok(format!("{}ste", cardinal))
    }

    fn year(&self, value: u64) -> Result<String, SpellError> {
        if !(1100..2000).contains(&value) {
            return self.cardinal(value);
        }

        let mut word = format!("{}hundert", below_hundred(value / 100, false));
        let low = value % 100;
        if low > 0 {
            word.push_str(&below_hundred(low, true));
        }
        Ok(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal() {
        let s = GermanSpeller;
        assert_eq!(s.cardinal(1).unwrap(), "eins");
        assert_eq!(s.cardinal(21).unwrap(), "einundzwanzig");
        assert_eq!(s.cardinal(30).unwrap(), "dreißig");
        assert_eq!(s.cardinal(101).unwrap(), "einhunderteins");
        assert_eq!(s.cardinal(3000).unwrap(), "dreitausend");
        assert_eq!(s.cardinal(1_000_000).unwrap(), "eine Million");
        assert_eq!(
            s.cardinal(2_500_001).unwrap(),
            "zwei Millionen fünfhunderttausendeins"
        );
    }

    #[test]
    fn test_ordinal() {
        let s = GermanSpeller;
        assert_eq!(s.ordinal(1).unwrap(), "erste");
        assert_eq!(s.ordinal(3).unwrap(), "dritte");
        assert_eq!(s.ordinal(7).unwrap(), "siebte");
        assert_eq!(s.ordinal(12).unwrap(), "zwölfte");
        assert_eq!(s.ordinal(20).unwrap(), "zwanzigste");
        assert_eq!(s.ordinal(101).unwrap(), "einhunderterste");
    }

    #[test]
    fn test_year() {
        let s = GermanSpeller;
        assert_eq!(s.year(1984).unwrap(), "neunzehnhundertvierundachtzig");
        assert_eq!(s.year(1900).unwrap(), "neunzehnhundert");
        assert_eq!(s.year(2012).unwrap(), "zweitausendzwölf");
    }
}
