// src/slug.rs
//! Transliterating slug generation for note titles

/// Latin spelling for a lower-case Cyrillic letter.
///
/// Hard and soft signs map to the empty string.
fn transliterate(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
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
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'є' => "ye",
        'і' => "i",
        'ї' => "yi",
        'ґ' => "g",
        _ => return None,
    };
    Some(latin)
}

/// Convert a title to a URL-safe slug
///
/// - Transliterates Cyrillic to Latin
/// - Converts to lowercase
/// - Drops everything except ASCII alphanumerics and `_`
/// - Turns runs of whitespace and hyphens into one hyphen
/// - Trims leading/trailing hyphens
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // Start true to trim leading hyphens

    let mut push = |c: char, slug: &mut String| {
        if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
            last_was_hyphen = false;
        } else if (c.is_whitespace() || c == '-') && !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    };

    for c in title.chars().flat_map(char::to_lowercase) {
        match transliterate(c) {
            Some(latin) => latin.chars().for_each(|l| push(l, &mut slug)),
            None => push(c, &mut slug),
        }
    }

    // Trim trailing hyphen
    if slug.ends_with('-') {
        slug.pop();
    }

    // Ensure non-empty slug
    if slug.is_empty() {
        slug = "untitled".to_string();
    }

    slug
}

/// Slugify and cut the result down to `max_chars`, without a dangling hyphen
pub fn slugify_truncated(title: &str, max_chars: usize) -> String {
    let slug = slugify(title);
    if slug.len() <= max_chars {
        return slug;
    }
    // slugify output is pure ASCII, byte slicing is safe
    slug[..max_chars].trim_end_matches('-').to_string()
}

/// Whether a user-supplied slug only uses characters valid in a note URL
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Note 1"), "note-1");
    }

    #[test]
    fn test_slugify_cyrillic() {
        assert_eq!(slugify("Заголовок"), "zagolovok");
        assert_eq!(slugify("Заметка"), "zametka");
        assert_eq!(slugify("Новое название"), "novoe-nazvanie");
        assert_eq!(slugify("Щука и ёж"), "schuka-i-yozh");
    }

    #[test]
    fn test_slugify_drops_signs() {
        assert_eq!(slugify("Объявление"), "obyavlenie");
        assert_eq!(slugify("Мальчик"), "malchik");
    }

    #[test]
    fn test_slugify_special_chars() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("snake_case title"), "snake_case-title");
        assert_eq!(slugify("API v2.0 (beta)"), "api-v20-beta");
    }

    #[test]
    fn test_slugify_consecutive_separators() {
        assert_eq!(slugify("Hello   World"), "hello-world");
        assert_eq!(slugify("---test---"), "test");
        assert_eq!(slugify("a - b"), "a-b");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "untitled");
        assert_eq!(slugify("!!!"), "untitled");
        assert_eq!(slugify("日本語"), "untitled");
    }

    #[test]
    fn test_slugify_truncated() {
        let title = "а".repeat(150);
        let slug = slugify_truncated(&title, 100);
        assert_eq!(slug.len(), 100);

        assert_eq!(slugify_truncated("ab cd", 3), "ab");
        assert_eq!(slugify_truncated("short", 100), "short");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("note-slug"));
        assert!(is_valid_slug("test_slug_2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("with space"));
        assert!(!is_valid_slug("заметка"));
        assert!(!is_valid_slug("a/b"));
    }
}
