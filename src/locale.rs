use std::env;
use std::fmt;

/// ロケールが取得できないときの言語（JVM と同じく "en"）
const DEFAULT_LANGUAGE: &str = "en";

const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// ホスト環境から得た言語コードと国コード。
///
/// 識別子は区切り文字なしの連結（"en" + "US" → "enUS"）。起動時に一度だけ作り、
/// 言語パックに明示的に渡す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleContext {
    language: String,
    country: String,
}

impl LocaleContext {
    pub fn new(language: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            country: country.into(),
        }
    }

    /// LC_ALL → LC_MESSAGES → LANG の順に、最初に空でない値を使う
    pub fn detect() -> Self {
        let locale = Self::detect_with(|name| env::var(name).ok());
        log::info!("locale detected: {}", locale.id());
        locale
    }

    /// 環境変数の参照方法を差し替えられる `detect`
    pub fn detect_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let raw = LOCALE_VARS
            .iter()
            .filter_map(|name| lookup(*name))
            .find(|value| !value.is_empty());
        match raw {
            Some(value) => Self::parse(&value),
            None => Self::new(DEFAULT_LANGUAGE, ""),
        }
    }

    /// POSIX 形式 `language[_COUNTRY][.codeset][@modifier]` を解釈する。
    /// "C" と "POSIX" は既定の言語として扱う。
    pub fn parse(raw: &str) -> Self {
        let base = raw
            .split(['.', '@'])
            .next()
            .unwrap_or_default();
        if base.is_empty() || base == "C" || base == "POSIX" {
            return Self::new(DEFAULT_LANGUAGE, "");
        }
        match base.split_once(['_', '-']) {
            Some((language, country)) => Self::new(language, country),
            None => Self::new(base, ""),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn id(&self) -> String {
        format!("{}{}", self.language, self.country)
    }
}

impl fmt::Display for LocaleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.language, self.country)
    }
}
