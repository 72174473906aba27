//! 表示文字列の翻訳テーブル
//!
//! 参照順: 選択中の言語 → 英語 → キーそのもの。失敗はしない。

/// 選択可能な言語
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native: &'static str,
}

pub const SUPPORTED_LANGUAGES: [Language; 3] = [
    Language { code: "en", name: "English", native: "English" },
    Language { code: "hi", name: "Hindi", native: "हिंदी" },
    Language { code: "or", name: "Odia", native: "ଓଡ଼ିଆ" },
];

pub const FALLBACK_LANGUAGE: &str = "en";

type Table = &'static [(&'static str, &'static str)];

const EN: Table = &[
    ("appName", "AgriScan AI"),
    ("tagline", "From Drone to Decision"),
    ("dashboard", "Dashboard"),
    ("map", "Field Map"),
    ("reports", "Reports"),
    ("settings", "Settings"),
    ("newScan", "New Drone Scan"),
    ("projectedYield", "Projected Yield"),
    ("activeAlerts", "Active Alerts"),
    ("nextSpray", "Next Spray"),
    ("recentScans", "Recent Scans"),
    ("healthScore", "Health Score"),
    ("viewDetails", "View Details"),
    ("goodMorning", "Good Morning,"),
    ("goodAfternoon", "Good Afternoon,"),
    ("goodEvening", "Good Evening,"),
    ("noScans", "No scans found. Start by clicking the + button!"),
    ("viewAll", "View All"),
    ("language", "Language"),
    ("profile", "Profile"),
    ("uploadFailed", "Failed to analyze image."),
    ("offlineMode", "Offline demo mode"),
    ("recommendedActions", "Recommended Actions"),
    ("soilAnalysis", "Soil Deficiency Analysis"),
    ("healthAndYield", "Health & Yield"),
];

const HI: Table = &[
    ("appName", "एग्रीस्कैन AI"),
    ("tagline", "ड्रोन से निर्णय तक"),
    ("dashboard", "डैशबोर्ड"),
    ("map", "खेत का नक्शा"),
    ("reports", "रिपोर्ट"),
    ("settings", "सेटिंग्स"),
    ("newScan", "नया ड्रोन स्कैन"),
    ("projectedYield", "अनुमानित उपज"),
    ("activeAlerts", "सक्रिय अलर्ट"),
    ("nextSpray", "अगला स्प्रे"),
    ("recentScans", "हाल के स्कैन"),
    ("healthScore", "स्वास्थ्य स्कोर"),
    ("viewDetails", "विवरण देखें"),
    ("goodMorning", "सुप्रभात,"),
    ("goodAfternoon", "नमस्कार,"),
    ("goodEvening", "शुभ संध्या,"),
];

const OR: Table = &[
    ("appName", "ଏଗ୍ରୀସ୍କାନ AI"),
    ("tagline", "ଡ୍ରୋନରୁ ନିଷ୍ପତ୍ତି ପର୍ଯ୍ୟନ୍ତ"),
    ("dashboard", "ଡ୍ୟାସବୋର୍ଡ"),
    ("map", "କ୍ଷେତ୍ର ମାନଚିତ୍ର"),
    ("reports", "ରିପୋର୍ଟ"),
    ("settings", "ସେଟିଂସ"),
    ("newScan", "ନୂତନ ଡ୍ରୋନ ସ୍କାନ"),
    ("projectedYield", "ଆନୁମାନିକ ଅମଳ"),
    ("activeAlerts", "ସକ୍ରିୟ ଆଲର୍ଟ"),
    ("nextSpray", "ପରବର୍ତ୍ତୀ ସ୍ପ୍ରେ"),
    ("recentScans", "ସାମ୍ପ୍ରତିକ ସ୍କାନ"),
    ("healthScore", "ସ୍ୱାସ୍ଥ୍ୟ ସ୍କୋର"),
    ("viewDetails", "ବିବରଣୀ ଦେଖନ୍ତୁ"),
];

fn table(code: &str) -> Option<Table> {
    match code {
        "en" => Some(EN),
        "hi" => Some(HI),
        "or" => Some(OR),
        _ => None,
    }
}

/// 1つの言語テーブルだけを引く
pub fn lookup(code: &str, key: &str) -> Option<&'static str> {
    table(code)?
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// 表示文字列を解決する
pub fn translate<'a>(language: &str, key: &'a str) -> &'a str {
    let found: Option<&'a str> =
        lookup(language, key).or_else(|| lookup(FALLBACK_LANGUAGE, key));
    found.unwrap_or(key)
}

pub fn is_supported(code: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|l| l.code == code)
}

pub fn find_language(code: &str) -> Option<&'static Language> {
    SUPPORTED_LANGUAGES.iter().find(|l| l.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_active_language() {
        assert_eq!(translate("hi", "dashboard"), "डैशबोर्ड");
        assert_eq!(translate("or", "map"), "କ୍ଷେତ୍ର ମାନଚିତ୍ର");
    }

    #[test]
    fn test_translate_falls_back_to_english() {
        assert!(lookup("or", "goodMorning").is_none());
        assert_eq!(translate("or", "goodMorning"), "Good Morning,");
        assert_eq!(translate("hi", "noScans"), "No scans found. Start by clicking the + button!");
    }

    #[test]
    fn test_translate_unknown_key_returns_key() {
        for lang in SUPPORTED_LANGUAGES {
            assert_eq!(translate(lang.code, "nonexistent_key"), "nonexistent_key");
        }
    }

    #[test]
    fn test_translate_unknown_language_uses_english() {
        assert_eq!(translate("ta", "settings"), "Settings");
        assert_eq!(translate("", "nonexistent_key"), "nonexistent_key");
    }

    #[test]
    fn test_every_key_has_english() {
        for table in [HI, OR] {
            for (key, _) in table {
                assert!(lookup("en", key).is_some(), "英語が無いキー: {}", key);
            }
        }
    }

    #[test]
    fn test_supported_languages() {
        assert!(is_supported("or"));
        assert!(!is_supported("fr"));
        assert_eq!(find_language("hi").map(|l| l.name), Some("Hindi"));
    }
}
