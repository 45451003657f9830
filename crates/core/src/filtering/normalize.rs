//! Title normalization.
//!
//! Scraped listing names arrive with HTML entities, URL escapes, CDATA
//! wrappers, diacritics and every punctuation convention under the sun.
//! [`normalize`] folds all of that into a lowercase, single-spaced token
//! stream that the matcher can compare with plain substring tests.

use std::borrow::Cow;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Upper bound on decode rounds for a single pass.
///
/// Each round that changes the string consumes at least one escape sequence,
/// so real inputs settle in two or three rounds.
const MAX_DECODE_ROUNDS: usize = 16;

/// Historical title aliases used by torrent sites (applied to lowercased names).
const TITLE_ALIASES: &[(&str, &str)] = &[
    ("csi crime scene investigation", "csi"),
    ("law and order special victims unit", "law and order svu"),
    ("law order special victims unit", "law and order svu"),
    ("s h i e l d", "shield"),
];

/// Named entities recognised by [`decode_entities`]. Lookup happens after
/// lowercasing, so only lowercase names are listed.
const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{00A0}'),
    ("agrave", 'à'),
    ("aacute", 'á'),
    ("acirc", 'â'),
    ("atilde", 'ã'),
    ("auml", 'ä'),
    ("aring", 'å'),
    ("aelig", 'æ'),
    ("ccedil", 'ç'),
    ("egrave", 'è'),
    ("eacute", 'é'),
    ("ecirc", 'ê'),
    ("euml", 'ë'),
    ("igrave", 'ì'),
    ("iacute", 'í'),
    ("icirc", 'î'),
    ("iuml", 'ï'),
    ("ntilde", 'ñ'),
    ("ograve", 'ò'),
    ("oacute", 'ó'),
    ("ocirc", 'ô'),
    ("otilde", 'õ'),
    ("ouml", 'ö'),
    ("oslash", 'ø'),
    ("ugrave", 'ù'),
    ("uacute", 'ú'),
    ("ucirc", 'û'),
    ("uuml", 'ü'),
    ("yacute", 'ý'),
    ("yuml", 'ÿ'),
    ("szlig", 'ß'),
    ("hellip", '…'),
    ("ndash", '–'),
    ("mdash", '—'),
    ("lsquo", '‘'),
    ("rsquo", '’'),
    ("ldquo", '“'),
    ("rdquo", '”'),
    ("laquo", '«'),
    ("raquo", '»'),
    ("middot", '·'),
    ("times", '×'),
    ("deg", '°'),
    ("copy", '©'),
    ("reg", '®'),
    ("trade", '™'),
];

/// Longest entity body we try to parse (`#x10FFFF` is 8 chars).
const MAX_ENTITY_LEN: usize = 10;

/// Normalize a raw title or filename into a comparable token stream.
///
/// The result is lowercase, free of diacritics and of the separator
/// characters `" * / : < > ? | _ . ) ( [ ] -`, with single spaces between
/// tokens. Applying it twice yields the same string.
pub fn normalize(raw: &str) -> String {
    let mut value = normalize_once(raw);
    // Dropping apostrophes can join the halves of an escape ("%4'1"), so run
    // to a fixpoint. After the first pass every changing pass shortens the
    // string, which bounds the loop.
    loop {
        let next = normalize_once(&value);
        if next == value {
            return value;
        }
        value = next;
    }
}

/// Unicode compatibility decomposition with combining marks removed.
///
/// `"Amélie"` becomes `"Amelie"`, `"ﬁ"` becomes `"fi"`. Characters without a
/// decomposition pass through unchanged.
pub fn fold_unicode(value: &str) -> String {
    value.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Replace well-known long-form titles with the short form sites use.
///
/// The result is lowercase.
pub fn apply_aliases(title: &str) -> String {
    let mut title = title.to_lowercase();
    for (long, short) in TITLE_ALIASES {
        if title.contains(long) {
            title = title.replace(long, short);
        }
    }
    title
}

fn normalize_once(raw: &str) -> String {
    let mut value = fold_unicode(raw).to_lowercase();

    for _ in 0..MAX_DECODE_ROUNDS {
        let decoded = percent_decode(&value);
        let decoded = strip_cdata(&decoded);
        let decoded = decode_entities(&decoded);
        // Decoding can reintroduce composed characters
        let decoded = fold_unicode(&decoded).to_lowercase();
        if decoded == value {
            break;
        }
        value = decoded;
    }

    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\'' => {}
            '"' | '*' | '/' | ':' | '<' | '>' | '?' | '|' | '_' | '.' | ')' | '(' | '[' | ']'
            | '-' => out.push(' '),
            c => out.push(c),
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode `%XX` escapes. Input that does not decode to valid UTF-8 is
/// returned unchanged.
fn percent_decode(value: &str) -> Cow<'_, str> {
    if !value.contains('%') {
        return Cow::Borrowed(value);
    }
    match urlencoding::decode(value) {
        Ok(decoded) => decoded,
        Err(_) => Cow::Borrowed(value),
    }
}

fn strip_cdata(value: &str) -> Cow<'_, str> {
    if !value.contains("<![cdata[") && !value.contains("]]") {
        return Cow::Borrowed(value);
    }
    Cow::Owned(
        value
            .replace("<![cdata[", "")
            .replace("]]>", "")
            .replace("]]", ""),
    )
}

/// Decode numeric (`&#233;`, `&#xe9;`) and named (`&eacute;`) character
/// references. Unknown or malformed references are left as they are.
fn decode_entities(value: &str) -> Cow<'_, str> {
    if !value.contains('&') {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let decoded = after
            .char_indices()
            .take(MAX_ENTITY_LEN + 1)
            .find(|(_, c)| *c == ';')
            .and_then(|(semi, _)| resolve_entity(&after[..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

fn resolve_entity(body: &str) -> Option<char> {
    if let Some(numeric) = body.strip_prefix('#') {
        let code = match numeric.strip_prefix('x').or_else(|| numeric.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }

    NAMED_ENTITIES
        .iter()
        .find(|(name, _)| *name == body)
        .map(|(_, c)| *c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_scene_name() {
        assert_eq!(normalize("Show.Name.S01E03.1080p.WEB-DL"), "show name s01e03 1080p web dl");
    }

    #[test]
    fn test_normalize_strips_diacritics() {
        assert_eq!(normalize("Amélie (2001) [FRENCH]"), "amelie 2001 french");
    }

    #[test]
    fn test_normalize_apostrophe_is_removed() {
        assert_eq!(normalize("Ocean's_Eleven"), "oceans eleven");
    }

    #[test]
    fn test_normalize_entities() {
        assert_eq!(normalize("Tom &amp; Jerry"), "tom & jerry");
        assert_eq!(normalize("Caf&eacute; Society"), "cafe society");
        assert_eq!(normalize("Caf&#233; &#x53;ociety"), "cafe society");
        assert_eq!(normalize("L&#039;Odyssée"), "lodyssee");
    }

    #[test]
    fn test_normalize_unknown_entity_passes_through() {
        assert_eq!(normalize("AT&T &bogus; R&D"), "at&t &bogus; r&d");
    }

    #[test]
    fn test_normalize_percent_decoding() {
        assert_eq!(normalize("The%20Matrix%20Reloaded"), "the matrix reloaded");
        assert_eq!(normalize("Le%20Fabuleux%20Destin%20d%27Am%C3%A9lie"), "le fabuleux destin damelie");
    }

    #[test]
    fn test_normalize_invalid_percent_sequence_passes_through() {
        assert_eq!(normalize("100% Pure %FF"), "100% pure %ff");
    }

    #[test]
    fn test_normalize_cdata() {
        assert_eq!(normalize("<![CDATA[Some.Movie.2010]]>"), "some movie 2010");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  a \t b\n\nc  "), "a b c");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_compatibility_forms() {
        assert_eq!(normalize("ＦＵＬＬＷＩＤＴＨ ﬁlm"), "fullwidth film");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "Show.Name.S01E03.1080p.WEB-DL",
            "Tom &amp;amp; Jerry",
            "%2541%2542",
            "&amp;lt;tag&amp;gt;",
            "％41 fullwidth percent",
            "%4'1 split escape",
            "&am'p; split entity",
            "<![CDATA[<![CDATA[nested]]>]]>",
            "Ωmega – “quoted” …",
            "İstanbul ß straße",
            "100% Pure %FF",
            "%4%2%2%2'7771",
            "%4%2%2%2%2%2%2'7777771",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_normalize_nested_split_escapes() {
        assert_eq!(normalize("%4%2%2%2'7771"), "a");
        assert_eq!(normalize("%4'1"), "a");
    }

    #[test]
    fn test_fold_unicode() {
        assert_eq!(fold_unicode("Crème Brûlée"), "Creme Brulee");
        assert_eq!(fold_unicode("плохо"), "плохо");
    }

    #[test]
    fn test_apply_aliases() {
        assert_eq!(
            apply_aliases("CSI Crime Scene Investigation S01E01"),
            "csi s01e01"
        );
        assert_eq!(
            apply_aliases("Law and Order Special Victims Unit"),
            "law and order svu"
        );
        assert_eq!(apply_aliases("Agents of S H I E L D"), "agents of shield");
        assert_eq!(apply_aliases("Unrelated"), "unrelated");
    }
}
