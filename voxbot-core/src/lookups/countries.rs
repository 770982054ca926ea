use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Lookup key (ISO 3166-1 alpha-2 code, English short name, or common
/// alias) to the canonical alpha-2 code stored on the profile.
static COUNTRIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let entries: &[(&str, &str)] = &[
        ("ar", "ar"), ("argentina", "ar"),
        ("at", "at"), ("austria", "at"),
        ("au", "au"), ("australia", "au"),
        ("be", "be"), ("belgium", "be"),
        ("br", "br"), ("brazil", "br"),
        ("ca", "ca"), ("canada", "ca"),
        ("ch", "ch"), ("switzerland", "ch"),
        ("cl", "cl"), ("chile", "cl"),
        ("cn", "cn"), ("china", "cn"),
        ("co", "co"), ("colombia", "co"),
        ("cz", "cz"), ("czechia", "cz"), ("czech-republic", "cz"),
        ("de", "de"), ("germany", "de"),
        ("dk", "dk"), ("denmark", "dk"),
        ("ee", "ee"), ("estonia", "ee"),
        ("eg", "eg"), ("egypt", "eg"),
        ("es", "es"), ("spain", "es"),
        ("fi", "fi"), ("finland", "fi"),
        ("fr", "fr"), ("france", "fr"),
        ("gb", "gb"), ("uk", "gb"), ("united-kingdom", "gb"), ("britain", "gb"),
        ("gr", "gr"), ("greece", "gr"),
        ("hr", "hr"), ("croatia", "hr"),
        ("hu", "hu"), ("hungary", "hu"),
        ("id", "id"), ("indonesia", "id"),
        ("ie", "ie"), ("ireland", "ie"),
        ("il", "il"), ("israel", "il"),
        ("in", "in"), ("india", "in"),
        ("is", "is"), ("iceland", "is"),
        ("it", "it"), ("italy", "it"),
        ("jp", "jp"), ("japan", "jp"),
        ("ke", "ke"), ("kenya", "ke"),
        ("kr", "kr"), ("south-korea", "kr"), ("korea", "kr"),
        ("mx", "mx"), ("mexico", "mx"),
        ("my", "my"), ("malaysia", "my"),
        ("ng", "ng"), ("nigeria", "ng"),
        ("nl", "nl"), ("netherlands", "nl"), ("holland", "nl"),
        ("no", "no"), ("norway", "no"),
        ("nz", "nz"), ("new-zealand", "nz"),
        ("pe", "pe"), ("peru", "pe"),
        ("ph", "ph"), ("philippines", "ph"),
        ("pk", "pk"), ("pakistan", "pk"),
        ("pl", "pl"), ("poland", "pl"),
        ("pt", "pt"), ("portugal", "pt"),
        ("ro", "ro"), ("romania", "ro"),
        ("rs", "rs"), ("serbia", "rs"),
        ("ru", "ru"), ("russia", "ru"),
        ("se", "se"), ("sweden", "se"),
        ("sg", "sg"), ("singapore", "sg"),
        ("si", "si"), ("slovenia", "si"),
        ("sk", "sk"), ("slovakia", "sk"),
        ("th", "th"), ("thailand", "th"),
        ("tr", "tr"), ("turkey", "tr"),
        ("tw", "tw"), ("taiwan", "tw"),
        ("ua", "ua"), ("ukraine", "ua"),
        ("us", "us"), ("usa", "us"), ("united-states", "us"), ("america", "us"),
        ("uy", "uy"), ("uruguay", "uy"),
        ("vn", "vn"), ("vietnam", "vn"),
        ("za", "za"), ("south-africa", "za"),
    ];
    entries.iter().copied().collect()
});

/// Resolves a lowercased lookup key to its canonical country code.
pub fn lookup_country(key: &str) -> Option<&'static str> {
    COUNTRIES.get(key).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_codes_names_and_aliases() {
        assert_eq!(lookup_country("fr"), Some("fr"));
        assert_eq!(lookup_country("france"), Some("fr"));
        assert_eq!(lookup_country("uk"), Some("gb"));
        assert_eq!(lookup_country("america"), Some("us"));
    }

    #[test]
    fn unknown_key_is_none() {
        assert_eq!(lookup_country("atlantis"), None);
        assert_eq!(lookup_country(""), None);
    }
}
