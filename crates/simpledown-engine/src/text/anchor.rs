/// Builds the base anchor for a header from its title text.
pub trait AnchorMaker {
    fn make_anchor(&self, title: &str, translit: bool) -> String;
}

/// Lowercase, alphanumeric runs joined by `-`.
///
/// With `translit`, Cyrillic letters are spelled in Latin so anchors stay
/// ASCII; otherwise non-ASCII letters are kept as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct Slugger;

impl Slugger {
    pub const FALLBACK: &'static str = "section";
}

impl AnchorMaker for Slugger {
    fn make_anchor(&self, title: &str, translit: bool) -> String {
        let mut slug = String::new();
        let mut pending_dash = false;

        for ch in title.chars().flat_map(char::to_lowercase) {
            if translit && let Some(latin) = transliterate(ch) {
                push_piece(&mut slug, &mut pending_dash, latin);
            } else if ch.is_ascii_alphanumeric() || (!translit && ch.is_alphanumeric()) {
                push_piece(&mut slug, &mut pending_dash, ch.encode_utf8(&mut [0; 4]));
            } else {
                pending_dash = true;
            }
        }

        if slug.is_empty() {
            Self::FALLBACK.to_string()
        } else {
            slug
        }
    }
}

fn push_piece(slug: &mut String, pending_dash: &mut bool, piece: &str) {
    if piece.is_empty() {
        return;
    }
    if *pending_dash && !slug.is_empty() {
        slug.push('-');
    }
    *pending_dash = false;
    slug.push_str(piece);
}

fn transliterate(ch: char) -> Option<&'static str> {
    let latin = match ch {
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
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(latin)
}
