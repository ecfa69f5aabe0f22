//! ページに埋め込まれた設定の読み込み

use chrono::NaiveDate;
use hire_wizard_common::WizardConfig;

const CONFIG_ELEMENT_ID: &str = "wizard-config";

/// `<script id="wizard-config" type="application/json">` を読む
pub fn load_config() -> WizardConfig {
    let content = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    parse_config(content.as_deref())
}

/// 設定がない・壊れている場合はデフォルト
pub fn parse_config(content: Option<&str>) -> WizardConfig {
    match content.map(str::trim).filter(|c| !c.is_empty()) {
        None => WizardConfig::default(),
        Some(content) => WizardConfig::from_json(content).unwrap_or_else(|e| {
            log::warn!("ignoring invalid wizard config: {}", e);
            WizardConfig::default()
        }),
    }
}

/// ブラウザのローカル日付
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    local_date(now.get_full_year(), now.get_month(), now.get_date())
}

/// JSの Date は月が0始まり
fn local_date(year: u32, month0: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year as i32, month0 + 1, day).unwrap_or_default()
}
