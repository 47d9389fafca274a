use crate::domain::model::LanguageEntry;
use crate::utils::error::Result;
use crate::utils::format::format_general;

pub const DEFAULT_MAX_ITEMS: usize = 6;
pub const OTHER_LABEL: &str = "Other";

#[derive(Debug, Clone, PartialEq)]
pub enum Reduction {
    Unchanged(Vec<LanguageEntry>),
    Truncated {
        languages: Vec<LanguageEntry>,
        other: f64,
    },
}

impl Reduction {
    pub fn into_languages(self) -> Vec<LanguageEntry> {
        match self {
            Reduction::Unchanged(languages) => languages,
            Reduction::Truncated { languages, .. } => languages,
        }
    }

    pub fn other(&self) -> Option<f64> {
        match self {
            Reduction::Unchanged(_) => None,
            Reduction::Truncated { other, .. } => Some(*other),
        }
    }
}

/// 列表長度超過 `max_items` 時要保留的項目數。
///
/// 一般為 `max_items - 1`；`max_items` 為 0 時與切片 `[0:-1]` 相同，保留除最後一筆以外的全部。
/// 呼叫端須先確認 `len > max_items`。
pub fn kept_count(len: usize, max_items: usize) -> usize {
    match max_items {
        0 => len.saturating_sub(1),
        n => n - 1,
    }
}

/// 將語言列表限制在 `max_items` 筆以內。
///
/// 輸入須已依佔比由大到小排序；這裡不會重新排序。
/// 超過上限時保留前 `max_items - 1` 筆，剩餘比例併入 `"Other"`，
/// 其值為 100 減去保留項目的總和，不做下限截斷（可能為負數）。
pub fn reduce_languages(languages: Vec<LanguageEntry>, max_items: usize) -> Result<Reduction> {
    if languages.len() <= max_items {
        return Ok(Reduction::Unchanged(languages));
    }

    let mut kept = languages;
    kept.truncate(kept_count(kept.len(), max_items));
    let (languages, other) = fold_into_other(kept)?;
    Ok(Reduction::Truncated { languages, other })
}

/// 在已保留的項目後面補上 `"Other"`，並回傳其數值
pub fn fold_into_other(mut kept: Vec<LanguageEntry>) -> Result<(Vec<LanguageEntry>, f64)> {
    let mut other = 100.0;
    for entry in &kept {
        other -= entry.share()?;
    }

    kept.push(LanguageEntry::new(OTHER_LABEL, format_general(other)));
    Ok((kept, other))
}

pub fn reduce(languages: Vec<LanguageEntry>, max_items: usize) -> Result<Vec<LanguageEntry>> {
    reduce_languages(languages, max_items).map(Reduction::into_languages)
}
