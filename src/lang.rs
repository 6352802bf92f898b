// src/lang.rs

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::LangError;
use crate::locale::LocaleContext;

/// 現在のロケールに訳文がないときに使う言語
pub const FALLBACK_LANG: &str = "en";

const POLYGLOT_PREFIX: &str = "Polyglot";

/// キーからローカライズ済み文字列を引くサービス
pub trait Localization {
    fn get(&self, key: &str) -> Result<String, LangError>;
}

/// Polyglot 形式のファイル: resources.data[] に { n: キー, s: 訳文 } が並ぶ
#[derive(Deserialize)]
struct PolyglotFile {
    resources: PolyglotResources,
}

#[derive(Deserialize)]
struct PolyglotResources {
    data: Vec<PolyglotEntry>,
}

#[derive(Deserialize)]
struct PolyglotEntry {
    n: String,
    s: String,
}

/// ディレクトリから読み込んだ言語パック。
///
/// `dir/<言語コード>/*.json` を全言語ぶん読み込み、(キー, 言語) で引けるようにする。
#[derive(Debug)]
pub struct Lang {
    locale: LocaleContext,
    locale_id: String,
    entries: HashMap<(String, String), String>,
    languages: BTreeSet<String>,
}

impl Lang {
    /// 言語パックを読み込む。ディレクトリが読めない・JSON が壊れている場合はエラー。
    pub fn load(dir: impl AsRef<Path>, locale: LocaleContext) -> Result<Self, LangError> {
        let dir = dir.as_ref();
        log::info!("loading languages from {}", dir.display());

        let mut lang = Self::empty(locale);
        for entry in read_dir(dir)? {
            let path = entry.map_err(|source| io_error(dir, source))?.path();
            if !path.is_dir() {
                continue;
            }
            let Some(code) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let code = code.to_string();
            lang.load_language(&path, &code)?;
            lang.languages.insert(code);
        }

        log::info!(
            "loaded {} strings in {} languages ({:?})",
            lang.entries.len(),
            lang.languages.len(),
            lang.languages
        );
        Ok(lang)
    }

    /// 空の言語パック
    pub fn empty(locale: LocaleContext) -> Self {
        let locale_id = locale.id();
        Self {
            locale,
            locale_id,
            entries: HashMap::new(),
            languages: BTreeSet::new(),
        }
    }

    fn load_language(&mut self, dir: &Path, code: &str) -> Result<(), LangError> {
        for entry in read_dir(dir)? {
            let path = entry.map_err(|source| io_error(dir, source))?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.ends_with(".json") || !path.is_file() {
                continue;
            }
            if name.starts_with(POLYGLOT_PREFIX) {
                self.load_polyglot_file(&path, code)?;
            } else {
                self.load_regular_file(&path, code)?;
            }
        }
        Ok(())
    }

    /// 通常形式: ルートオブジェクトに "キー": "訳文" が並ぶ
    fn load_regular_file(&mut self, path: &Path, code: &str) -> Result<(), LangError> {
        let text = read_file(path)?;
        let map: HashMap<String, Value> =
            serde_json::from_str(&text).map_err(|source| parse_error(path, source))?;
        for (key, value) in map {
            // 数値と真偽値は文字列として扱う
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    let source: serde_json::Error = serde::de::Error::custom(format!(
                        "`{key}` must be a string, number or boolean, found {other}"
                    ));
                    return Err(parse_error(path, source));
                }
            };
            self.insert(key, code, text);
        }
        Ok(())
    }

    fn load_polyglot_file(&mut self, path: &Path, code: &str) -> Result<(), LangError> {
        let text = read_file(path)?;
        let file: PolyglotFile =
            serde_json::from_str(&text).map_err(|source| parse_error(path, source))?;
        for entry in file.resources.data {
            self.insert(entry.n, code, entry.s);
        }
        Ok(())
    }

    pub fn insert(&mut self, key: impl Into<String>, language: &str, text: impl Into<String>) {
        self.entries
            .insert((key.into(), language.to_string()), text.into());
    }

    fn raw(&self, key: &str, language: &str) -> Option<&str> {
        self.entries
            .get(&(key.to_string(), language.to_string()))
            .map(String::as_str)
    }

    pub fn locale(&self) -> &LocaleContext {
        &self.locale
    }

    /// 読み込んだ言語コードの一覧（ソート済み）
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(String::as_str)
    }
}

impl Localization for Lang {
    /// 現在のロケールの訳文（空なら無視）→ フォールバック言語の訳文の順に探す。
    /// 結果の先頭文字は大文字にする。
    fn get(&self, key: &str) -> Result<String, LangError> {
        let text = self
            .raw(key, &self.locale_id)
            .filter(|text| !text.is_empty())
            .or_else(|| self.raw(key, FALLBACK_LANG))
            .ok_or_else(|| LangError::MissingKey {
                key: key.to_string(),
                locale: self.locale_id.clone(),
            })?;
        Ok(capitalize(text))
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn read_dir(dir: &Path) -> Result<fs::ReadDir, LangError> {
    fs::read_dir(dir).map_err(|source| io_error(dir, source))
}

fn read_file(path: &Path) -> Result<String, LangError> {
    fs::read_to_string(path).map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> LangError {
    LangError::Io {
        path: PathBuf::from(path),
        source,
    }
}

fn parse_error(path: &Path, source: serde_json::Error) -> LangError {
    LangError::Parse {
        path: PathBuf::from(path),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, rel: &str, contents: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn loads_regular_and_polyglot_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en/menu.json", r#"{ "MENU_IO_LOADING": "loading…" }"#);
        write(
            dir.path(),
            "koKR/Polyglot-100_koKR.json",
            r#"{ "resources": { "polyglot": {}, "data": [
                { "n": "MENU_IO_LOADING", "s": "불러오는 중" },
                { "n": "MENU_LABEL_PLAY", "s": "시작" }
            ] } }"#,
        );
        write(dir.path(), "en/notes.txt", "not a language file");

        let lang = Lang::load(dir.path(), LocaleContext::new("ko", "KR")).unwrap();
        assert_eq!(lang.get("MENU_IO_LOADING").unwrap(), "불러오는 중");
        assert_eq!(lang.get("MENU_LABEL_PLAY").unwrap(), "시작");
        assert_eq!(lang.languages().collect::<Vec<_>>(), vec!["en", "koKR"]);
    }

    #[test]
    fn falls_back_to_english_and_capitalizes() {
        let mut lang = Lang::empty(LocaleContext::new("fi", "FI"));
        lang.insert("MENU_IO_LOADING", "en", "loading");
        lang.insert("MENU_LABEL_PLAY", "fiFI", "");
        lang.insert("MENU_LABEL_PLAY", "en", "play");
        assert_eq!(lang.get("MENU_IO_LOADING").unwrap(), "Loading");
        assert_eq!(lang.get("MENU_LABEL_PLAY").unwrap(), "Play");
    }

    #[test]
    fn missing_key_is_an_error() {
        let lang = Lang::empty(LocaleContext::new("en", "US"));
        match lang.get("MENU_IO_LOADING") {
            Err(LangError::MissingKey { key, locale }) => {
                assert_eq!(key, "MENU_IO_LOADING");
                assert_eq!(locale, "enUS");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn malformed_file_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en/broken.json", r#"{ "KEY": { "nested": "x" } }"#);
        match Lang::load(dir.path(), LocaleContext::new("en", "")) {
            Err(LangError::Parse { path, .. }) => assert!(path.ends_with("broken.json")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn scalar_values_load_as_text() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "en/menu.json",
            r#"{ "MENU_IO_LOADING": "loading…", "APP_VERSION": 3, "FLAG": true }"#,
        );
        let lang = Lang::load(dir.path(), LocaleContext::new("en", "US")).unwrap();
        assert_eq!(lang.get("MENU_IO_LOADING").unwrap(), "Loading…");
        assert_eq!(lang.get("APP_VERSION").unwrap(), "3");
        assert_eq!(lang.get("FLAG").unwrap(), "True");
    }

    #[test]
    fn null_and_array_values_are_rejected() {
        for body in [r#"{ "KEY": null }"#, r#"{ "KEY": ["a"] }"#] {
            let dir = tempfile::tempdir().unwrap();
            write(dir.path(), "en/menu.json", body);
            let result = Lang::load(dir.path(), LocaleContext::new("en", ""));
            assert!(matches!(result, Err(LangError::Parse { .. })), "{body}");
        }
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Lang::load(dir.path().join("nope"), LocaleContext::new("en", ""));
        assert!(matches!(result, Err(LangError::Io { .. })));
    }
}
