use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const LANGUAGES_FIELD: &str = "languages";

/// 單一語言項目，例如 `{"Rust": "42.5"}`。
///
/// 值以字串編碼的百分比儲存；原始 JSON 會被完整保留，
/// 未被截斷的列表輸出時與輸入一致。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageEntry(Map<String, Value>);

impl LanguageEntry {
    pub fn new(name: impl Into<String>, share: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert(name.into(), Value::String(share.into()));
        Self(map)
    }

    /// 第一個鍵即語言名稱
    pub fn name(&self) -> Option<&str> {
        self.0.keys().next().map(String::as_str)
    }

    /// 將 JSON 項目轉成語言項目，非物件者回報所屬記錄 `index`
    pub fn from_items(index: usize, items: &[Value]) -> Result<Vec<Self>> {
        items
            .iter()
            .enumerate()
            .map(|(position, item)| match item {
                Value::Object(map) => Ok(Self(map.clone())),
                other => Err(EtlError::InvalidRecordError {
                    index,
                    message: format!(
                        "language entry #{} must be an object, found {}",
                        position,
                        json_type_name(other)
                    ),
                }),
            })
            .collect()
    }

    /// 所有值解析成浮點數後的總和（一般只有一個值）
    pub fn share(&self) -> Result<f64> {
        self.0
            .iter()
            .map(|(language, value)| parse_percentage(language, value))
            .sum()
    }
}

fn parse_percentage(language: &str, value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::String(text) => text.trim().parse::<f64>().ok(),
        Value::Number(number) => number.as_f64(),
        _ => None,
    };

    parsed.ok_or_else(|| EtlError::PercentageParseError {
        language: language.to_string(),
        value: match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        },
    })
}

/// 一筆倉庫記錄。除了 `languages` 以外的欄位原樣保留，且維持原本的鍵順序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Repository(Map<String, Value>);

impl Repository {
    /// 將 JSON 值轉成記錄，`index` 只用於錯誤訊息
    pub fn from_value(index: usize, value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(EtlError::InvalidRecordError {
                index,
                message: format!("expected an object, found {}", json_type_name(&other)),
            }),
        }
    }

    /// 借用原始的 `languages` 陣列，不檢查項目內容
    pub fn language_items(&self, index: usize) -> Result<&[Value]> {
        let value = self
            .0
            .get(LANGUAGES_FIELD)
            .ok_or_else(|| EtlError::MissingFieldError {
                index,
                field: LANGUAGES_FIELD.to_string(),
            })?;

        let items = value.as_array().ok_or_else(|| EtlError::InvalidRecordError {
            index,
            message: format!(
                "'{}' must be an array, found {}",
                LANGUAGES_FIELD,
                json_type_name(value)
            ),
        })?;

        Ok(items)
    }

    pub fn languages(&self, index: usize) -> Result<Vec<LanguageEntry>> {
        LanguageEntry::from_items(index, self.language_items(index)?)
    }

    /// 以 `preserve_order` 的 map 覆寫既有鍵時，鍵的位置不變
    pub fn set_languages(&mut self, languages: Vec<LanguageEntry>) {
        let items = languages
            .into_iter()
            .map(|entry| Value::Object(entry.0))
            .collect();
        self.0.insert(LANGUAGES_FIELD.to_string(), Value::Array(items));
    }

    /// 用於日誌的名稱，找不到時回傳 None
    pub fn label(&self) -> Option<&str> {
        ["full_name", "name", "repo", "url"]
            .iter()
            .find_map(|key| self.0.get(*key).and_then(Value::as_str))
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// 將輸入文件解析成倉庫記錄列表
pub fn parse_repositories(bytes: &[u8]) -> Result<Vec<Repository>> {
    let document: Value = serde_json::from_slice(bytes)?;

    match document {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| Repository::from_value(index, item))
            .collect(),
        other => Err(EtlError::InvalidDocumentError {
            message: format!(
                "expected a JSON array of repositories, found {}",
                json_type_name(&other)
            ),
        }),
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReductionResult {
    pub repositories: Vec<Repository>,
    pub reduced_count: usize,
    pub negative_other_count: usize,
}

impl ReductionResult {
    pub fn total(&self) -> usize {
        self.repositories.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_language_entry_share_accepts_strings_and_numbers() {
        assert_eq!(LanguageEntry::new("Go", "50").share().unwrap(), 50.0);
        assert_eq!(LanguageEntry::new("Go", " 12.5 ").share().unwrap(), 12.5);

        let numeric: LanguageEntry = serde_json::from_value(json!({"C": 7.5})).unwrap();
        assert_eq!(numeric.share().unwrap(), 7.5);
        assert_eq!(numeric.name(), Some("C"));
    }

    #[test]
    fn test_language_entry_share_rejects_non_numeric() {
        let err = LanguageEntry::new("Rust", "lots").share().unwrap_err();
        match err {
            EtlError::PercentageParseError { language, value } => {
                assert_eq!(language, "Rust");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_languages_field() {
        let repo = Repository::from_value(3, json!({"name": "demo"})).unwrap();
        assert!(matches!(
            repo.languages(3),
            Err(EtlError::MissingFieldError { index: 3, .. })
        ));
    }

    #[test]
    fn test_language_items_borrow_without_shape_check() {
        let repo = Repository::from_value(0, json!({"languages": ["Go", 3]})).unwrap();
        assert_eq!(repo.language_items(0).unwrap().len(), 2);
        assert!(matches!(
            repo.languages(0),
            Err(EtlError::InvalidRecordError { index: 0, .. })
        ));
    }

    #[test]
    fn test_set_languages_keeps_key_position() {
        let mut repo = Repository::from_value(
            0,
            json!({"name": "demo", "languages": [{"Go": "100"}], "stars": 5}),
        )
        .unwrap();
        repo.set_languages(vec![LanguageEntry::new("Rust", "100")]);

        let keys: Vec<&String> = repo.fields().keys().collect();
        assert_eq!(keys, ["name", "languages", "stars"]);
        assert_eq!(repo.label(), Some("demo"));
    }

    #[test]
    fn test_parse_repositories_rejects_non_array_document() {
        let err = parse_repositories(br#"{"languages": []}"#).unwrap_err();
        assert!(matches!(err, EtlError::InvalidDocumentError { .. }));

        let err = parse_repositories(br#"[{"languages": []}, 42]"#).unwrap_err();
        assert!(matches!(err, EtlError::InvalidRecordError { index: 1, .. }));
    }
}
