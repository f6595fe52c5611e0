use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_DC: &str = "main_menu.dc";
    pub const MAIN_MENU_AC: &str = "main_menu.ac";
    pub const MAIN_MENU_CAPACITOR_DC: &str = "main_menu.capacitor_dc";
    pub const MAIN_MENU_CAPACITOR_AC: &str = "main_menu.capacitor_ac";
    pub const MAIN_MENU_THREE_PHASE: &str = "main_menu.three_phase";
    pub const MAIN_MENU_HISTORY: &str = "main_menu.history";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const ERROR_VOLTAGE: &str = "error.voltage";
    pub const ERROR_CURRENT: &str = "error.current";
    pub const ERROR_POWER_FACTOR: &str = "error.power_factor";
    pub const ERROR_CAPACITANCE: &str = "error.capacitance";
    pub const ERROR_FREQUENCY: &str = "error.frequency";
    pub const ERROR_PHASE_CURRENTS: &str = "error.phase_currents";
    pub const ERROR_HOURS: &str = "error.hours";

    pub const INPUT_VOLTAGE: &str = "input.voltage";
    pub const INPUT_CURRENT: &str = "input.current";
    pub const INPUT_POWER_FACTOR: &str = "input.power_factor";
    pub const INPUT_HOURS: &str = "input.hours";
    pub const INPUT_CAPACITANCE: &str = "input.capacitance";
    pub const INPUT_FREQUENCY: &str = "input.frequency";
    pub const INPUT_LINE_VOLTAGE: &str = "input.line_voltage";
    pub const INPUT_LINE_CURRENT: &str = "input.line_current";
    pub const INPUT_CURRENT_R: &str = "input.current_r";
    pub const INPUT_CURRENT_S: &str = "input.current_s";
    pub const INPUT_CURRENT_T: &str = "input.current_t";
    pub const INPUT_CONNECTION: &str = "input.connection";

    pub const CONNECTION_STAR: &str = "connection.star";
    pub const CONNECTION_DELTA: &str = "connection.delta";

    pub const CIRCUIT_DC: &str = "circuit.dc";
    pub const CIRCUIT_AC: &str = "circuit.ac";
    pub const CIRCUIT_CAPACITOR_DC: &str = "circuit.capacitor_dc";
    pub const CIRCUIT_CAPACITOR_AC: &str = "circuit.capacitor_ac";
    pub const CIRCUIT_THREE_PHASE: &str = "circuit.three_phase";

    pub const RESULT_RESISTANCE: &str = "result.resistance";
    pub const RESULT_POWER: &str = "result.power";
    pub const RESULT_CONSUMPTION: &str = "result.consumption";
    pub const RESULT_ACTIVE_POWER: &str = "result.active_power";
    pub const RESULT_REACTIVE_POWER: &str = "result.reactive_power";
    pub const RESULT_APPARENT_POWER: &str = "result.apparent_power";
    pub const RESULT_IMPEDANCE: &str = "result.impedance";
    pub const RESULT_REACTANCE: &str = "result.reactance";
    pub const RESULT_CHARGE: &str = "result.charge";
    pub const RESULT_ENERGY: &str = "result.energy";
    pub const RESULT_CAPACITIVE_REACTANCE: &str = "result.capacitive_reactance";
    pub const RESULT_PHASE_VOLTAGE: &str = "result.phase_voltage";
    pub const RESULT_PHASE_CURRENT: &str = "result.phase_current";
    pub const RESULT_PHASE_ACTIVE_POWER: &str = "result.phase_active_power";
    pub const RESULT_PHASE_REACTIVE_POWER: &str = "result.phase_reactive_power";
    pub const RESULT_PHASE_APPARENT_POWER: &str = "result.phase_apparent_power";
    pub const RESULT_PHASE_IMPEDANCE: &str = "result.phase_impedance";
    pub const RESULT_PHASE_RESISTANCE: &str = "result.phase_resistance";
    pub const RESULT_PHASE_REACTANCE: &str = "result.phase_reactance";
    pub const RESULT_TOTAL_ACTIVE_POWER: &str = "result.total_active_power";
    pub const RESULT_TOTAL_REACTIVE_POWER: &str = "result.total_reactive_power";
    pub const RESULT_TOTAL_APPARENT_POWER: &str = "result.total_apparent_power";
    pub const RESULT_PHASE_ANGLE: &str = "result.phase_angle";
    pub const RESULT_AVERAGE_CURRENT: &str = "result.average_current";
    pub const RESULT_IMBALANCE: &str = "result.imbalance";
    pub const RESULT_PF_EFFICIENCY: &str = "result.pf_efficiency";
    pub const RESULT_REACTIVE_LOSS: &str = "result.reactive_loss";
    pub const RESULT_QUALITY_SCORE: &str = "result.quality_score";
    pub const RESULT_ESTIMATED_LOSS: &str = "result.estimated_loss";
    pub const RESULT_ANNUAL_COST: &str = "result.annual_cost";

    pub const SECTION_RESULTS: &str = "section.results";
    pub const SECTION_PER_PHASE: &str = "section.per_phase";
    pub const SECTION_TOTALS: &str = "section.totals";
    pub const SECTION_IMBALANCE: &str = "section.imbalance";
    pub const SECTION_EFFICIENCY: &str = "section.efficiency";
    pub const SECTION_QUALITY: &str = "section.quality";
    pub const SECTION_RECOMMENDATIONS: &str = "section.recommendations";
    pub const EFFICIENCY_CATEGORY: &str = "efficiency.category";

    pub const IMBALANCE_ACCEPTABLE: &str = "imbalance.acceptable";
    pub const IMBALANCE_MODERATE: &str = "imbalance.moderate";
    pub const IMBALANCE_HIGH: &str = "imbalance.high";

    pub const EFFICIENCY_EXCELLENT: &str = "efficiency.excellent";
    pub const EFFICIENCY_GOOD: &str = "efficiency.good";
    pub const EFFICIENCY_FAIR: &str = "efficiency.fair";
    pub const EFFICIENCY_POOR: &str = "efficiency.poor";

    pub const RECOMMEND_CAPACITOR_BANK: &str = "recommend.capacitor_bank";
    pub const RECOMMEND_INDUCTIVE_LOADS: &str = "recommend.inductive_loads";
    pub const RECOMMEND_REPLACEMENT: &str = "recommend.replacement";

    pub const QUALITY_IMBALANCE_OK: &str = "quality.imbalance_ok";
    pub const QUALITY_IMBALANCE_MODERATE: &str = "quality.imbalance_moderate";
    pub const QUALITY_IMBALANCE_HIGH: &str = "quality.imbalance_high";
    pub const QUALITY_PF_GOOD: &str = "quality.pf_good";
    pub const QUALITY_PF_IMPROVABLE: &str = "quality.pf_improvable";
    pub const QUALITY_PF_LOW: &str = "quality.pf_low";
    pub const QUALITY_RATING_GOOD: &str = "quality.rating_good";
    pub const QUALITY_RATING_FAIR: &str = "quality.rating_fair";
    pub const QUALITY_RATING_POOR: &str = "quality.rating_poor";

    pub const HISTORY_HEADING: &str = "history.heading";
    pub const HISTORY_SAVED: &str = "history.saved";
    pub const HISTORY_EMPTY: &str = "history.empty";
    pub const HISTORY_TOTAL: &str = "history.total";
    pub const HISTORY_RANGE: &str = "history.range";
    pub const HISTORY_BY_CIRCUIT: &str = "history.by_circuit";
    pub const HISTORY_FILTER: &str = "history.filter";
    pub const HISTORY_EXPORT: &str = "history.export";
    pub const HISTORY_EXPORTED: &str = "history.exported";
    pub const HISTORY_TIMESTAMP: &str = "history.timestamp";
    pub const HISTORY_CIRCUIT: &str = "history.circuit";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_LANGUAGE: &str = "settings.language";
    pub const SETTINGS_DECIMALS: &str = "settings.decimals";
    pub const SETTINGS_HISTORY_PATH: &str = "settings.history_path";
    pub const SETTINGS_SAVE_HISTORY: &str = "settings.save_history";
    pub const SETTINGS_PROMPT_KEEP: &str = "settings.prompt_keep";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const GUI_TAB_RESISTIVE: &str = "gui.tab.resistive";
    pub const GUI_TAB_CAPACITIVE: &str = "gui.tab.capacitive";
    pub const GUI_TAB_THREE_PHASE: &str = "gui.tab.three_phase";
    pub const GUI_TAB_HISTORY: &str = "gui.tab.history";
    pub const GUI_CURRENT_TYPE: &str = "gui.current_type";
    pub const GUI_CALCULATE: &str = "gui.calculate";
    pub const GUI_INPUTS: &str = "gui.inputs";
    pub const GUI_CHART_POWER_TRIANGLE: &str = "gui.chart.power_triangle";
    pub const GUI_CHART_POWER_SHARE: &str = "gui.chart.power_share";
    pub const GUI_CHART_DC: &str = "gui.chart.dc";
    pub const GUI_CHART_CAPACITOR: &str = "gui.chart.capacitor";
    pub const GUI_CHART_PHASOR: &str = "gui.chart.phasor";
    pub const GUI_CHART_IMBALANCE: &str = "gui.chart.imbalance";
    pub const GUI_SETTINGS: &str = "gui.settings";
    pub const GUI_SAVE: &str = "gui.save";

    /// 모든 키 목록. 번역 누락 검사에 쓴다.
    pub const ALL: &[&str] = &[
        ERROR_PREFIX, APP_EXIT, APP_TITLE,
        MAIN_MENU_TITLE, MAIN_MENU_DC, MAIN_MENU_AC, MAIN_MENU_CAPACITOR_DC,
        MAIN_MENU_CAPACITOR_AC, MAIN_MENU_THREE_PHASE, MAIN_MENU_HISTORY,
        MAIN_MENU_SETTINGS, MAIN_MENU_EXIT, PROMPT_MENU_SELECT,
        INVALID_SELECTION_RETRY, ERROR_INVALID_NUMBER,
        ERROR_VOLTAGE, ERROR_CURRENT, ERROR_POWER_FACTOR, ERROR_CAPACITANCE,
        ERROR_FREQUENCY, ERROR_PHASE_CURRENTS, ERROR_HOURS,
        INPUT_VOLTAGE, INPUT_CURRENT, INPUT_POWER_FACTOR, INPUT_HOURS,
        INPUT_CAPACITANCE, INPUT_FREQUENCY, INPUT_LINE_VOLTAGE, INPUT_LINE_CURRENT,
        INPUT_CURRENT_R, INPUT_CURRENT_S, INPUT_CURRENT_T, INPUT_CONNECTION,
        CONNECTION_STAR, CONNECTION_DELTA,
        CIRCUIT_DC, CIRCUIT_AC, CIRCUIT_CAPACITOR_DC, CIRCUIT_CAPACITOR_AC,
        CIRCUIT_THREE_PHASE,
        RESULT_RESISTANCE, RESULT_POWER, RESULT_CONSUMPTION, RESULT_ACTIVE_POWER,
        RESULT_REACTIVE_POWER, RESULT_APPARENT_POWER, RESULT_IMPEDANCE,
        RESULT_REACTANCE, RESULT_CHARGE, RESULT_ENERGY, RESULT_CAPACITIVE_REACTANCE,
        RESULT_PHASE_VOLTAGE, RESULT_PHASE_CURRENT, RESULT_PHASE_ACTIVE_POWER,
        RESULT_PHASE_REACTIVE_POWER, RESULT_PHASE_APPARENT_POWER,
        RESULT_PHASE_IMPEDANCE, RESULT_PHASE_RESISTANCE, RESULT_PHASE_REACTANCE,
        RESULT_TOTAL_ACTIVE_POWER, RESULT_TOTAL_REACTIVE_POWER,
        RESULT_TOTAL_APPARENT_POWER, RESULT_PHASE_ANGLE, RESULT_AVERAGE_CURRENT,
        RESULT_IMBALANCE, RESULT_PF_EFFICIENCY, RESULT_REACTIVE_LOSS,
        RESULT_QUALITY_SCORE, RESULT_ESTIMATED_LOSS, RESULT_ANNUAL_COST,
        SECTION_RESULTS, SECTION_PER_PHASE, SECTION_TOTALS, SECTION_IMBALANCE,
        SECTION_EFFICIENCY, SECTION_QUALITY, SECTION_RECOMMENDATIONS,
        EFFICIENCY_CATEGORY,
        IMBALANCE_ACCEPTABLE, IMBALANCE_MODERATE, IMBALANCE_HIGH,
        EFFICIENCY_EXCELLENT, EFFICIENCY_GOOD, EFFICIENCY_FAIR, EFFICIENCY_POOR,
        RECOMMEND_CAPACITOR_BANK, RECOMMEND_INDUCTIVE_LOADS, RECOMMEND_REPLACEMENT,
        QUALITY_IMBALANCE_OK, QUALITY_IMBALANCE_MODERATE, QUALITY_IMBALANCE_HIGH,
        QUALITY_PF_GOOD, QUALITY_PF_IMPROVABLE, QUALITY_PF_LOW,
        QUALITY_RATING_GOOD, QUALITY_RATING_FAIR, QUALITY_RATING_POOR,
        HISTORY_HEADING, HISTORY_SAVED, HISTORY_EMPTY, HISTORY_TOTAL, HISTORY_RANGE,
        HISTORY_BY_CIRCUIT, HISTORY_FILTER, HISTORY_EXPORT, HISTORY_EXPORTED,
        HISTORY_TIMESTAMP, HISTORY_CIRCUIT,
        SETTINGS_HEADING, SETTINGS_LANGUAGE, SETTINGS_DECIMALS, SETTINGS_HISTORY_PATH,
        SETTINGS_SAVE_HISTORY, SETTINGS_PROMPT_KEEP, SETTINGS_SAVED,
        GUI_TAB_RESISTIVE, GUI_TAB_CAPACITIVE, GUI_TAB_THREE_PHASE, GUI_TAB_HISTORY,
        GUI_CURRENT_TYPE, GUI_CALCULATE, GUI_INPUTS, GUI_CHART_POWER_TRIANGLE,
        GUI_CHART_POWER_SHARE, GUI_CHART_DC, GUI_CHART_CAPACITOR, GUI_CHART_PHASOR,
        GUI_CHART_IMBALANCE, GUI_SETTINGS, GUI_SAVE,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Es,
    Ko,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Es, Language::Ko];

    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("es") {
            Language::Es
        } else if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Ko => "ko",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Español",
            Language::Ko => "한국어",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(en/es/ko)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 영어 순으로 찾는다.
    pub fn t(&self, key: &str) -> Cow<'static, str> {
        if let Some(v) = self.lookup(key) {
            return Cow::Owned(v);
        }
        let builtin = match self.lang {
            Language::En => en(key),
            Language::Es => es(key).or_else(|| en(key)),
            Language::Ko => ko(key).or_else(|| en(key)),
        };
        Cow::Borrowed(builtin.unwrap_or("[missing translation]"))
    }

    /// `{name}` 자리표시자를 채운 번역 문자열.
    pub fn fmt(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }
}

pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("en") => Some("en".into()),
        other if other.starts_with("es") => Some("es".into()),
        other if other.starts_with("ko") => Some("ko".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "en" | "es" | "ko" => Some(lang),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵 또는 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(&path).ok()?;
        let map = parse_toml_to_map(&content);
        if map.is_none() {
            tracing::warn!(path = %path.display(), "language pack is empty or invalid");
        }
        map
    };

    // 1) full code (e.g., es-mx)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., es)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        APP_TITLE => "Electrical Toolbox",
        MAIN_MENU_TITLE => "\n=== Electrical Toolbox ===",
        MAIN_MENU_DC => "1) Resistive circuit (DC)",
        MAIN_MENU_AC => "2) Resistive circuit (AC)",
        MAIN_MENU_CAPACITOR_DC => "3) Capacitor (DC)",
        MAIN_MENU_CAPACITOR_AC => "4) Capacitor (AC)",
        MAIN_MENU_THREE_PHASE => "5) Three-phase system",
        MAIN_MENU_HISTORY => "6) History",
        MAIN_MENU_SETTINGS => "7) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_VOLTAGE => "Voltage must be greater than 0",
        ERROR_CURRENT => "Current must be greater than 0",
        ERROR_POWER_FACTOR => "Power factor must be between -1 and 1",
        ERROR_CAPACITANCE => "Capacitance must be greater than 0",
        ERROR_FREQUENCY => "Frequency must be greater than 0",
        ERROR_PHASE_CURRENTS => "Phase currents must be greater than 0",
        ERROR_HOURS => "Operating hours cannot be negative",
        INPUT_VOLTAGE => "Voltage [V]",
        INPUT_CURRENT => "Current [A]",
        INPUT_POWER_FACTOR => "Power factor (cos φ)",
        INPUT_HOURS => "Operating hours [h]",
        INPUT_CAPACITANCE => "Capacitance [F]",
        INPUT_FREQUENCY => "Frequency [Hz]",
        INPUT_LINE_VOLTAGE => "Line voltage VL [V]",
        INPUT_LINE_CURRENT => "Line current IL [A]",
        INPUT_CURRENT_R => "Phase R current [A]",
        INPUT_CURRENT_S => "Phase S current [A]",
        INPUT_CURRENT_T => "Phase T current [A]",
        INPUT_CONNECTION => "Connection (1=Star Y, 2=Delta Δ)",
        CONNECTION_STAR => "Star (Y)",
        CONNECTION_DELTA => "Delta (Δ)",
        CIRCUIT_DC => "Resistive DC",
        CIRCUIT_AC => "Resistive AC",
        CIRCUIT_CAPACITOR_DC => "Capacitor DC",
        CIRCUIT_CAPACITOR_AC => "Capacitor AC",
        CIRCUIT_THREE_PHASE => "Three-phase",
        RESULT_RESISTANCE => "Resistance",
        RESULT_POWER => "Power",
        RESULT_CONSUMPTION => "Consumption",
        RESULT_ACTIVE_POWER => "Active power",
        RESULT_REACTIVE_POWER => "Reactive power",
        RESULT_APPARENT_POWER => "Apparent power",
        RESULT_IMPEDANCE => "Impedance",
        RESULT_REACTANCE => "Reactance",
        RESULT_CHARGE => "Stored charge",
        RESULT_ENERGY => "Stored energy",
        RESULT_CAPACITIVE_REACTANCE => "Capacitive reactance",
        RESULT_PHASE_VOLTAGE => "Phase voltage",
        RESULT_PHASE_CURRENT => "Phase current",
        RESULT_PHASE_ACTIVE_POWER => "Active power per phase",
        RESULT_PHASE_REACTIVE_POWER => "Reactive power per phase",
        RESULT_PHASE_APPARENT_POWER => "Apparent power per phase",
        RESULT_PHASE_IMPEDANCE => "Impedance per phase",
        RESULT_PHASE_RESISTANCE => "Resistance per phase",
        RESULT_PHASE_REACTANCE => "Reactance per phase",
        RESULT_TOTAL_ACTIVE_POWER => "Total active power",
        RESULT_TOTAL_REACTIVE_POWER => "Total reactive power",
        RESULT_TOTAL_APPARENT_POWER => "Total apparent power",
        RESULT_PHASE_ANGLE => "Angle φ",
        RESULT_AVERAGE_CURRENT => "Average current",
        RESULT_IMBALANCE => "Imbalance",
        RESULT_PF_EFFICIENCY => "Power-factor efficiency",
        RESULT_REACTIVE_LOSS => "Reactive losses",
        RESULT_QUALITY_SCORE => "Quality score",
        RESULT_ESTIMATED_LOSS => "Estimated losses",
        RESULT_ANNUAL_COST => "Estimated annual cost",
        SECTION_RESULTS => "Results",
        SECTION_PER_PHASE => "Per-phase parameters",
        SECTION_TOTALS => "System totals",
        SECTION_IMBALANCE => "Phase imbalance analysis",
        SECTION_EFFICIENCY => "Energy efficiency analysis",
        SECTION_QUALITY => "Power quality analysis",
        SECTION_RECOMMENDATIONS => "Recommendations",
        EFFICIENCY_CATEGORY => "Category",
        IMBALANCE_ACCEPTABLE => "Acceptable imbalance (≤ 2%)",
        IMBALANCE_MODERATE => "Moderate imbalance (2-5%)",
        IMBALANCE_HIGH => "High imbalance (> 5%)",
        EFFICIENCY_EXCELLENT => "Excellent",
        EFFICIENCY_GOOD => "Good",
        EFFICIENCY_FAIR => "Fair",
        EFFICIENCY_POOR => "Poor",
        RECOMMEND_CAPACITOR_BANK => "Install a capacitor bank for compensation",
        RECOMMEND_INDUCTIVE_LOADS => "Inspect inductive loads and consider filters",
        RECOMMEND_REPLACEMENT => "Evaluate replacing inefficient equipment",
        QUALITY_IMBALANCE_OK => "Acceptable phase imbalance",
        QUALITY_IMBALANCE_MODERATE => "Moderate phase imbalance",
        QUALITY_IMBALANCE_HIGH => "High phase imbalance",
        QUALITY_PF_GOOD => "Good power factor",
        QUALITY_PF_IMPROVABLE => "Improvable power factor",
        QUALITY_PF_LOW => "Low power factor",
        QUALITY_RATING_GOOD => "Good quality",
        QUALITY_RATING_FAIR => "Fair quality",
        QUALITY_RATING_POOR => "Poor quality",
        HISTORY_HEADING => "Calculation history",
        HISTORY_SAVED => "Saved to history (total: {count} records)",
        HISTORY_EMPTY => "No history records yet.",
        HISTORY_TOTAL => "Total calculations:",
        HISTORY_RANGE => "Date range:",
        HISTORY_BY_CIRCUIT => "By circuit type:",
        HISTORY_FILTER => "Filter by circuit type",
        HISTORY_EXPORT => "Export CSV",
        HISTORY_EXPORTED => "Exported {count} records to {path}",
        HISTORY_TIMESTAMP => "Date",
        HISTORY_CIRCUIT => "Circuit",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_LANGUAGE => "Language (en/es/ko)",
        SETTINGS_DECIMALS => "Decimal places",
        SETTINGS_HISTORY_PATH => "History file",
        SETTINGS_SAVE_HISTORY => "Save calculations to history",
        SETTINGS_PROMPT_KEEP => "(enter to keep current value)",
        SETTINGS_SAVED => "Settings saved.",
        GUI_TAB_RESISTIVE => "Resistive",
        GUI_TAB_CAPACITIVE => "Capacitive",
        GUI_TAB_THREE_PHASE => "Three-phase",
        GUI_TAB_HISTORY => "History",
        GUI_CURRENT_TYPE => "Current type",
        GUI_CALCULATE => "Calculate",
        GUI_INPUTS => "Input parameters",
        GUI_CHART_POWER_TRIANGLE => "Power triangle",
        GUI_CHART_POWER_SHARE => "Power distribution",
        GUI_CHART_DC => "DC circuit parameters",
        GUI_CHART_CAPACITOR => "Capacitor parameters",
        GUI_CHART_PHASOR => "Phasor diagram",
        GUI_CHART_IMBALANCE => "Phase currents",
        GUI_SETTINGS => "Settings",
        GUI_SAVE => "Save",
        _ => return None,
    })
}

fn es(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Saliendo de la aplicación.",
        APP_TITLE => "Calculadora Eléctrica",
        MAIN_MENU_TITLE => "\n=== Calculadora Eléctrica ===",
        MAIN_MENU_DC => "1) Circuito resistivo (DC)",
        MAIN_MENU_AC => "2) Circuito resistivo (AC)",
        MAIN_MENU_CAPACITOR_DC => "3) Capacitor (DC)",
        MAIN_MENU_CAPACITOR_AC => "4) Capacitor (AC)",
        MAIN_MENU_THREE_PHASE => "5) Sistema trifásico",
        MAIN_MENU_HISTORY => "6) Histórico",
        MAIN_MENU_SETTINGS => "7) Configuración",
        MAIN_MENU_EXIT => "0) Salir",
        PROMPT_MENU_SELECT => "Selecciona una opción: ",
        INVALID_SELECTION_RETRY => "Entrada no válida. Inténtalo de nuevo.",
        ERROR_INVALID_NUMBER => "Introduce un número.",
        ERROR_VOLTAGE => "El voltaje debe ser mayor que 0",
        ERROR_CURRENT => "La corriente debe ser mayor que 0",
        ERROR_POWER_FACTOR => "El factor de potencia debe estar entre -1 y 1",
        ERROR_CAPACITANCE => "La capacitancia debe ser mayor que 0",
        ERROR_FREQUENCY => "La frecuencia debe ser mayor que 0",
        ERROR_PHASE_CURRENTS => "Las corrientes de fase deben ser mayores que 0",
        ERROR_HOURS => "Las horas de funcionamiento no pueden ser negativas",
        INPUT_VOLTAGE => "Voltaje [V]",
        INPUT_CURRENT => "Corriente [A]",
        INPUT_POWER_FACTOR => "Factor de potencia (cos φ)",
        INPUT_HOURS => "Horas de funcionamiento [h]",
        INPUT_CAPACITANCE => "Capacitancia [F]",
        INPUT_FREQUENCY => "Frecuencia [Hz]",
        INPUT_LINE_VOLTAGE => "Voltaje de línea VL [V]",
        INPUT_LINE_CURRENT => "Corriente de línea IL [A]",
        INPUT_CURRENT_R => "Corriente fase R [A]",
        INPUT_CURRENT_S => "Corriente fase S [A]",
        INPUT_CURRENT_T => "Corriente fase T [A]",
        INPUT_CONNECTION => "Conexión (1=Estrella Y, 2=Delta Δ)",
        CONNECTION_STAR => "Estrella (Y)",
        CONNECTION_DELTA => "Delta (Δ)",
        CIRCUIT_DC => "Resistivo DC",
        CIRCUIT_AC => "Resistivo AC",
        CIRCUIT_CAPACITOR_DC => "Capacitor DC",
        CIRCUIT_CAPACITOR_AC => "Capacitor AC",
        CIRCUIT_THREE_PHASE => "Trifásico",
        RESULT_RESISTANCE => "Resistencia",
        RESULT_POWER => "Potencia",
        RESULT_CONSUMPTION => "Consumo",
        RESULT_ACTIVE_POWER => "Potencia activa",
        RESULT_REACTIVE_POWER => "Potencia reactiva",
        RESULT_APPARENT_POWER => "Potencia aparente",
        RESULT_IMPEDANCE => "Impedancia",
        RESULT_REACTANCE => "Reactancia",
        RESULT_CHARGE => "Carga almacenada",
        RESULT_ENERGY => "Energía almacenada",
        RESULT_CAPACITIVE_REACTANCE => "Reactancia capacitiva",
        RESULT_PHASE_VOLTAGE => "Voltaje de fase",
        RESULT_PHASE_CURRENT => "Corriente de fase",
        RESULT_PHASE_ACTIVE_POWER => "Potencia activa por fase",
        RESULT_PHASE_REACTIVE_POWER => "Potencia reactiva por fase",
        RESULT_PHASE_APPARENT_POWER => "Potencia aparente por fase",
        RESULT_PHASE_IMPEDANCE => "Impedancia por fase",
        RESULT_PHASE_RESISTANCE => "Resistencia por fase",
        RESULT_PHASE_REACTANCE => "Reactancia por fase",
        RESULT_TOTAL_ACTIVE_POWER => "Potencia activa total",
        RESULT_TOTAL_REACTIVE_POWER => "Potencia reactiva total",
        RESULT_TOTAL_APPARENT_POWER => "Potencia aparente total",
        RESULT_PHASE_ANGLE => "Ángulo φ",
        RESULT_AVERAGE_CURRENT => "Corriente promedio",
        RESULT_IMBALANCE => "Desequilibrio",
        RESULT_PF_EFFICIENCY => "Eficiencia del factor de potencia",
        RESULT_REACTIVE_LOSS => "Pérdidas reactivas",
        RESULT_QUALITY_SCORE => "Puntuación de calidad",
        RESULT_ESTIMATED_LOSS => "Pérdidas estimadas",
        RESULT_ANNUAL_COST => "Costo anual estimado",
        SECTION_RESULTS => "Resultados",
        SECTION_PER_PHASE => "Parámetros por fase",
        SECTION_TOTALS => "Parámetros totales del sistema",
        SECTION_IMBALANCE => "Análisis de desequilibrio de fases",
        SECTION_EFFICIENCY => "Análisis de eficiencia energética",
        SECTION_QUALITY => "Análisis de calidad de energía",
        SECTION_RECOMMENDATIONS => "Recomendaciones",
        EFFICIENCY_CATEGORY => "Categoría",
        IMBALANCE_ACCEPTABLE => "Desequilibrio aceptable (≤ 2%)",
        IMBALANCE_MODERATE => "Desequilibrio moderado (2-5%)",
        IMBALANCE_HIGH => "Desequilibrio alto (> 5%)",
        EFFICIENCY_EXCELLENT => "Excelente",
        EFFICIENCY_GOOD => "Buena",
        EFFICIENCY_FAIR => "Regular",
        EFFICIENCY_POOR => "Deficiente",
        RECOMMEND_CAPACITOR_BANK => "Instalar banco de capacitores para compensación",
        RECOMMEND_INDUCTIVE_LOADS => "Revisar cargas inductivas y considerar filtros",
        RECOMMEND_REPLACEMENT => "Evaluar reemplazo de equipos ineficientes",
        QUALITY_IMBALANCE_OK => "Desequilibrio de fases aceptable",
        QUALITY_IMBALANCE_MODERATE => "Desequilibrio de fases moderado",
        QUALITY_IMBALANCE_HIGH => "Desequilibrio de fases alto",
        QUALITY_PF_GOOD => "Factor de potencia bueno",
        QUALITY_PF_IMPROVABLE => "Factor de potencia mejorable",
        QUALITY_PF_LOW => "Factor de potencia bajo",
        QUALITY_RATING_GOOD => "Calidad buena",
        QUALITY_RATING_FAIR => "Calidad regular",
        QUALITY_RATING_POOR => "Calidad deficiente",
        HISTORY_HEADING => "Histórico de cálculos",
        HISTORY_SAVED => "Cálculo guardado en el histórico (total: {count} registros)",
        HISTORY_EMPTY => "No hay datos en el histórico aún.",
        HISTORY_TOTAL => "Número total de cálculos:",
        HISTORY_RANGE => "Rango de fechas:",
        HISTORY_BY_CIRCUIT => "Por tipo de circuito:",
        HISTORY_FILTER => "Filtrar por tipo de circuito",
        HISTORY_EXPORT => "Descargar histórico",
        HISTORY_EXPORTED => "Se exportaron {count} registros a {path}",
        HISTORY_TIMESTAMP => "Fecha",
        HISTORY_CIRCUIT => "Circuito",
        SETTINGS_HEADING => "\n-- Configuración --",
        SETTINGS_LANGUAGE => "Idioma (en/es/ko)",
        SETTINGS_DECIMALS => "Decimales",
        SETTINGS_HISTORY_PATH => "Archivo de histórico",
        SETTINGS_SAVE_HISTORY => "Guardar cálculos en el histórico",
        SETTINGS_PROMPT_KEEP => "(enter para mantener el valor actual)",
        SETTINGS_SAVED => "Configuración guardada.",
        GUI_TAB_RESISTIVE => "Resistivo",
        GUI_TAB_CAPACITIVE => "Capacitivo",
        GUI_TAB_THREE_PHASE => "Trifásico",
        GUI_TAB_HISTORY => "Histórico",
        GUI_CURRENT_TYPE => "Tipo de corriente",
        GUI_CALCULATE => "Calcular",
        GUI_INPUTS => "Parámetros de entrada",
        GUI_CHART_POWER_TRIANGLE => "Triángulo de potencias",
        GUI_CHART_POWER_SHARE => "Distribución de potencias",
        GUI_CHART_DC => "Parámetros del circuito DC",
        GUI_CHART_CAPACITOR => "Parámetros del capacitor",
        GUI_CHART_PHASOR => "Diagrama fasorial",
        GUI_CHART_IMBALANCE => "Corrientes por fase",
        GUI_SETTINGS => "Configuración",
        GUI_SAVE => "Guardar",
        _ => return None,
    })
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "전기 계산 도구",
        MAIN_MENU_TITLE => "\n=== 전기 계산 도구 ===",
        MAIN_MENU_DC => "1) 저항 회로 (DC)",
        MAIN_MENU_AC => "2) 저항 회로 (AC)",
        MAIN_MENU_CAPACITOR_DC => "3) 커패시터 (DC)",
        MAIN_MENU_CAPACITOR_AC => "4) 커패시터 (AC)",
        MAIN_MENU_THREE_PHASE => "5) 삼상 계통",
        MAIN_MENU_HISTORY => "6) 계산 이력",
        MAIN_MENU_SETTINGS => "7) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_VOLTAGE => "전압은 0보다 커야 합니다",
        ERROR_CURRENT => "전류는 0보다 커야 합니다",
        ERROR_POWER_FACTOR => "역률은 -1과 1 사이여야 합니다",
        ERROR_CAPACITANCE => "정전용량은 0보다 커야 합니다",
        ERROR_FREQUENCY => "주파수는 0보다 커야 합니다",
        ERROR_PHASE_CURRENTS => "상전류는 0보다 커야 합니다",
        ERROR_HOURS => "운전 시간은 음수일 수 없습니다",
        INPUT_VOLTAGE => "전압 [V]",
        INPUT_CURRENT => "전류 [A]",
        INPUT_POWER_FACTOR => "역률 (cos φ)",
        INPUT_HOURS => "운전 시간 [h]",
        INPUT_CAPACITANCE => "정전용량 [F]",
        INPUT_FREQUENCY => "주파수 [Hz]",
        INPUT_LINE_VOLTAGE => "선간 전압 VL [V]",
        INPUT_LINE_CURRENT => "선전류 IL [A]",
        INPUT_CURRENT_R => "R상 전류 [A]",
        INPUT_CURRENT_S => "S상 전류 [A]",
        INPUT_CURRENT_T => "T상 전류 [A]",
        INPUT_CONNECTION => "결선 (1=Y 결선, 2=Δ 결선)",
        CONNECTION_STAR => "Y 결선",
        CONNECTION_DELTA => "Δ 결선",
        CIRCUIT_DC => "저항 회로 DC",
        CIRCUIT_AC => "저항 회로 AC",
        CIRCUIT_CAPACITOR_DC => "커패시터 DC",
        CIRCUIT_CAPACITOR_AC => "커패시터 AC",
        CIRCUIT_THREE_PHASE => "삼상",
        RESULT_RESISTANCE => "저항",
        RESULT_POWER => "전력",
        RESULT_CONSUMPTION => "소비 전력량",
        RESULT_ACTIVE_POWER => "유효전력",
        RESULT_REACTIVE_POWER => "무효전력",
        RESULT_APPARENT_POWER => "피상전력",
        RESULT_IMPEDANCE => "임피던스",
        RESULT_REACTANCE => "리액턴스",
        RESULT_CHARGE => "저장 전하",
        RESULT_ENERGY => "저장 에너지",
        RESULT_CAPACITIVE_REACTANCE => "용량성 리액턴스",
        RESULT_PHASE_VOLTAGE => "상전압",
        RESULT_PHASE_CURRENT => "상전류",
        RESULT_PHASE_ACTIVE_POWER => "상별 유효전력",
        RESULT_PHASE_REACTIVE_POWER => "상별 무효전력",
        RESULT_PHASE_APPARENT_POWER => "상별 피상전력",
        RESULT_PHASE_IMPEDANCE => "상 임피던스",
        RESULT_PHASE_RESISTANCE => "상 저항",
        RESULT_PHASE_REACTANCE => "상 리액턴스",
        RESULT_TOTAL_ACTIVE_POWER => "총 유효전력",
        RESULT_TOTAL_REACTIVE_POWER => "총 무효전력",
        RESULT_TOTAL_APPARENT_POWER => "총 피상전력",
        RESULT_PHASE_ANGLE => "위상각 φ",
        RESULT_AVERAGE_CURRENT => "평균 전류",
        RESULT_IMBALANCE => "불평형률",
        RESULT_PF_EFFICIENCY => "역률 효율",
        RESULT_REACTIVE_LOSS => "무효 손실",
        RESULT_QUALITY_SCORE => "품질 점수",
        RESULT_ESTIMATED_LOSS => "추정 손실",
        RESULT_ANNUAL_COST => "추정 연간 비용",
        SECTION_RESULTS => "계산 결과",
        SECTION_PER_PHASE => "상별 값",
        SECTION_TOTALS => "계통 합계",
        SECTION_IMBALANCE => "상 불평형 분석",
        SECTION_EFFICIENCY => "에너지 효율 분석",
        SECTION_QUALITY => "전력 품질 분석",
        SECTION_RECOMMENDATIONS => "권고 사항",
        EFFICIENCY_CATEGORY => "등급",
        IMBALANCE_ACCEPTABLE => "불평형 양호 (≤ 2%)",
        IMBALANCE_MODERATE => "불평형 보통 (2-5%)",
        IMBALANCE_HIGH => "불평형 높음 (> 5%)",
        EFFICIENCY_EXCELLENT => "우수",
        EFFICIENCY_GOOD => "양호",
        EFFICIENCY_FAIR => "보통",
        EFFICIENCY_POOR => "미흡",
        RECOMMEND_CAPACITOR_BANK => "역률 보상용 커패시터 뱅크 설치",
        RECOMMEND_INDUCTIVE_LOADS => "유도성 부하 점검 및 필터 검토",
        RECOMMEND_REPLACEMENT => "비효율 설비 교체 검토",
        QUALITY_IMBALANCE_OK => "상 불평형 양호",
        QUALITY_IMBALANCE_MODERATE => "상 불평형 보통",
        QUALITY_IMBALANCE_HIGH => "상 불평형 높음",
        QUALITY_PF_GOOD => "역률 양호",
        QUALITY_PF_IMPROVABLE => "역률 개선 필요",
        QUALITY_PF_LOW => "역률 낮음",
        QUALITY_RATING_GOOD => "품질 양호",
        QUALITY_RATING_FAIR => "품질 보통",
        QUALITY_RATING_POOR => "품질 미흡",
        HISTORY_HEADING => "계산 이력",
        HISTORY_SAVED => "이력에 저장했습니다 (총 {count}건)",
        HISTORY_EMPTY => "저장된 이력이 없습니다.",
        HISTORY_TOTAL => "전체 계산 수:",
        HISTORY_RANGE => "기간:",
        HISTORY_BY_CIRCUIT => "회로 종류별:",
        HISTORY_FILTER => "회로 종류 필터",
        HISTORY_EXPORT => "CSV 내보내기",
        HISTORY_EXPORTED => "{count}건을 {path}에 저장했습니다",
        HISTORY_TIMESTAMP => "일시",
        HISTORY_CIRCUIT => "회로",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_LANGUAGE => "언어 (en/es/ko)",
        SETTINGS_DECIMALS => "소수점 자릿수",
        SETTINGS_HISTORY_PATH => "이력 파일",
        SETTINGS_SAVE_HISTORY => "계산 결과를 이력에 저장",
        SETTINGS_PROMPT_KEEP => "(엔터: 현재 값 유지)",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        GUI_TAB_RESISTIVE => "저항 회로",
        GUI_TAB_CAPACITIVE => "커패시터",
        GUI_TAB_THREE_PHASE => "삼상",
        GUI_TAB_HISTORY => "이력",
        GUI_CURRENT_TYPE => "전류 종류",
        GUI_CALCULATE => "계산",
        GUI_INPUTS => "입력값",
        GUI_CHART_POWER_TRIANGLE => "전력 삼각형",
        GUI_CHART_POWER_SHARE => "전력 구성",
        GUI_CHART_DC => "DC 회로 값",
        GUI_CHART_CAPACITOR => "커패시터 값",
        GUI_CHART_PHASOR => "페이저도",
        GUI_CHART_IMBALANCE => "상전류",
        GUI_SETTINGS => "설정",
        GUI_SAVE => "저장",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_builtin_text_in_all_languages() {
        for key in keys::ALL {
            assert!(en(key).is_some(), "en missing {key}");
            assert!(es(key).is_some(), "es missing {key}");
            assert!(ko(key).is_some(), "ko missing {key}");
        }
    }

    #[test]
    fn unknown_code_falls_back_to_english() {
        let tr = Translator::new("fr");
        assert_eq!(tr.language(), Language::En);
        assert_eq!(tr.t(keys::EFFICIENCY_GOOD), "Good");
    }

    #[test]
    fn spanish_lookup_and_template() {
        let tr = Translator::new("es-AR");
        assert_eq!(tr.t(keys::EFFICIENCY_FAIR), "Regular");
        let msg = tr.fmt(keys::HISTORY_SAVED, &[("count", "3".to_string())]);
        assert!(msg.contains("3 registros"));
    }

    #[test]
    fn resolve_prefers_cli_then_config() {
        assert_eq!(resolve_language("ko-KR", Some("es")), "ko");
        assert_eq!(resolve_language("auto", Some("es")), "es");
    }

    #[test]
    fn nested_pack_is_flattened() {
        let map = parse_toml_to_map("[efficiency]\ngood = \"Bien\"\n").unwrap();
        assert_eq!(map.get("efficiency.good").map(String::as_str), Some("Bien"));
    }

    #[test]
    fn pack_directory_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("es.toml"), "efficiency.good = \"Muy bien\"\n").unwrap();
        let tr = Translator::new_with_pack("es", dir.path().to_str());
        assert_eq!(tr.t(keys::EFFICIENCY_GOOD), "Muy bien");
        assert_eq!(tr.t(keys::EFFICIENCY_POOR), "Deficiente");
    }
}
