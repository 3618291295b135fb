// Download names for exported files
use chrono::NaiveDate;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase ASCII slug: accents dropped, runs of other characters become `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let folded = text.nfd().filter(|c| !is_combining_mark(*c)).flat_map(expand_ligature);
    for c in folded {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

// NFD leaves ligatures whole
fn expand_ligature(c: char) -> impl Iterator<Item = char> {
    let (first, second) = match c {
        'œ' => ('o', Some('e')),
        'Œ' => ('O', Some('E')),
        'æ' => ('a', Some('e')),
        'Æ' => ('A', Some('E')),
        other => (other, None),
    };
    std::iter::once(first).chain(second)
}

/// `luc-leger_<club>_<date>.csv`
pub fn csv_file_name(club_name: &str, date: NaiveDate) -> String {
    let club = slugify(club_name);
    let club = if club.is_empty() { "club".to_string() } else { club };
    format!("luc-leger_{}_{}.csv", club, date.format("%Y-%m-%d"))
}

/// `fiche_luc_leger_<last>_<first>_<date>.pdf`, spaces replaced by `_`.
pub fn pdf_file_name(last_name: Option<&str>, first_name: &str, date: NaiveDate) -> String {
    format!(
        "fiche_luc_leger_{}_{}_{}.pdf",
        last_name.unwrap_or(""),
        first_name,
        date.format("%Y-%m-%d")
    )
    .replace(' ', "_")
}
