//! Cyrillic to Latin transliteration.

use crate::error::{NormalizationError, Result};

fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{04FF}' | '\u{0500}'..='\u{052F}')
}

/// True when `text` contains any Cyrillic character.
pub fn needs_transliteration(text: &str) -> bool {
    text.chars().any(is_cyrillic)
}

fn latin_for(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' | 'э' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'ю' => "yu",
        'я' => "ya",
        'і' => "i",
        'ї' => "yi",
        'є' => "ye",
        'ґ' => "g",
        'ў' => "u",
        _ => return None,
    };
    Some(latin)
}

/// Transliterate every Cyrillic character of `text`; other characters pass through.
///
/// Upper-case letters come out lower-case. Fails on the first Cyrillic
/// character without a mapping.
pub fn transliterate(text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if !is_cyrillic(c) {
            out.push(c);
            continue;
        }
        let lower = c.to_lowercase().next().unwrap_or(c);
        let latin = latin_for(lower).ok_or(NormalizationError::Transliteration {
            character: c,
            code: u32::from(c),
        })?;
        out.push_str(latin);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transliterate_russian() {
        assert_eq!(transliterate("касперский").unwrap(), "kasperskiy");
        assert_eq!(transliterate("Щит").unwrap(), "shchit");
        assert_eq!(transliterate("1с бухгалтерия").unwrap(), "1s bukhgalteriya");
    }

    #[test]
    fn test_latin_passes_through() {
        assert!(!needs_transliteration("office 365"));
        assert_eq!(transliterate("office").unwrap(), "office");
    }

    #[test]
    fn test_unmapped_letter_is_an_error() {
        let err = transliterate("ѣ").unwrap_err();
        assert_eq!(
            err,
            NormalizationError::Transliteration {
                character: 'ѣ',
                code: 0x0463
            }
        );
    }
}
