#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use eframe::{egui, App, Frame};
use egui_plot::{Arrows, Bar, BarChart, HLine, Legend, Line, LineStyle, Plot, PlotPoints};
use electrical_toolbox::{
    analysis::{ImbalanceLevel, QualityRating},
    charts::{self, BarValue},
    circuits::{Connection, InputError},
    config,
    history::{
        self, CircuitKind, CsvHistoryStore, HistoryRecord, HistoryStore, HistorySummary,
        CIRCUIT_COLUMN, TIMESTAMP_COLUMN, TIMESTAMP_FORMAT,
    },
    i18n::{self, keys::*, Language, Translator},
    quantity::ResultRow,
    reports::{
        record_report, AcInput, AcReport, CapacitorInput, CapacitorReport, DcInput, DcReport,
        Report, ThreePhaseInput, ThreePhaseReport,
    },
};
use image::GenericImageView;
use rfd::FileDialog;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;

/// Electrical circuit calculator (desktop)
#[derive(Parser)]
#[command(name = "electrical_toolbox", version)]
struct Args {
    /// UI language: auto, en, es, ko
    #[arg(long, short = 'L')]
    lang: Option<String>,
}

fn main() -> Result<(), eframe::Error> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([1100.0, 780.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let app_cfg = config::load_or_default().unwrap_or_else(|err| {
        tracing::warn!(%err, "falling back to default settings");
        config::Config::default()
    });
    let lang = i18n::resolve_language(
        args.lang.as_deref().unwrap_or("auto"),
        Some(app_cfg.language.as_str()),
    );
    eframe::run_native(
        "Electrical Toolbox",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                tracing::warn!("{e}");
            }
            Box::new(GuiApp::new(app_cfg, &lang))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

/// 바이너리 폰트 바이트를 기본 글꼴 앞에 등록한다.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(name.to_string(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .insert(0, name.to_string());
    }
    ctx.set_fonts(fonts);
}

/// 한글 표시용 글꼴을 찾는다. 1) assets/fonts 2) 시스템 글꼴 순.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<PathBuf> = ["NanumGothic.ttf", "malgun.ttf", "NotoSansKR-Regular.otf"]
        .iter()
        .map(|f| Path::new("assets/fonts").join(f))
        .collect();
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].iter().map(|f| fonts.join(f)));
    }
    candidates.extend(
        [
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        ]
        .iter()
        .map(PathBuf::from),
    );

    let path = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or("CJK font not found; Korean labels may not render")?;
    let bytes = fs::read(path)
        .map_err(|e| format!("Failed to read font file ({}): {e}", path.display()))?;
    apply_font_bytes(ctx, bytes, "cjk_font");
    tracing::debug!(path = %path.display(), "loaded font");
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Tab {
    Resistive,
    Capacitive,
    ThreePhase,
    History,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum CurrentType {
    Dc,
    Ac,
}

#[derive(Debug, Clone)]
enum ResistiveReport {
    Dc(DcReport),
    Ac(AcReport),
}

struct GuiApp {
    config: config::Config,
    tr: Translator,
    store: Box<dyn HistoryStore>,
    tab: Tab,
    save_status: Option<String>,
    // 저항 회로
    res_type: CurrentType,
    res_voltage: f64,
    res_current: f64,
    res_pf: f64,
    res_hours: f64,
    res_report: Option<ResistiveReport>,
    res_error: Option<InputError>,
    // 커패시터
    cap_type: CurrentType,
    cap_voltage: f64,
    cap_capacitance: f64,
    cap_frequency: f64,
    cap_report: Option<CapacitorReport>,
    cap_error: Option<InputError>,
    // 삼상
    tp_connection: Connection,
    tp_line_voltage: f64,
    tp_line_current: f64,
    tp_pf: f64,
    tp_currents: [f64; 3],
    tp_report: Option<ThreePhaseReport>,
    tp_error: Option<InputError>,
    // 이력
    history_records: Vec<HistoryRecord>,
    history_filter: Vec<CircuitKind>,
    history_dirty: bool,
    history_status: Option<String>,
    // 설정
    show_settings_modal: bool,
    lang_input: String,
    decimals_input: usize,
    history_path_input: String,
    save_history_input: bool,
    settings_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, lang_code: &str) -> Self {
        let tr = Translator::new_with_pack(lang_code, config.locale_dir.as_deref());
        let store: Box<dyn HistoryStore> = Box::new(CsvHistoryStore::new(&config.history_path));
        Self {
            tr,
            store,
            tab: Tab::Resistive,
            save_status: None,
            res_type: CurrentType::Dc,
            res_voltage: 230.0,
            res_current: 10.0,
            res_pf: 0.9,
            res_hours: 1.0,
            res_report: None,
            res_error: None,
            cap_type: CurrentType::Dc,
            cap_voltage: 12.0,
            cap_capacitance: 0.001,
            cap_frequency: config.default_frequency_hz,
            cap_report: None,
            cap_error: None,
            tp_connection: Connection::Star,
            tp_line_voltage: 380.0,
            tp_line_current: 10.0,
            tp_pf: 0.85,
            tp_currents: [10.0, 10.0, 10.0],
            tp_report: None,
            tp_error: None,
            history_records: Vec::new(),
            history_filter: Vec::new(),
            history_dirty: true,
            history_status: None,
            show_settings_modal: false,
            lang_input: config.language.clone(),
            decimals_input: config.decimals,
            history_path_input: config.history_path.display().to_string(),
            save_history_input: config.save_history,
            settings_status: None,
            config,
        }
    }

    fn decimals(&self) -> usize {
        self.config.display_decimals()
    }

    /// 계산이 끝난 보고서를 이력에 추가하고 상태 문구를 갱신한다.
    fn record(&mut self, report: &dyn Report) {
        if !self.config.save_history {
            self.save_status = None;
            return;
        }
        self.save_status = Some(match record_report(self.store.as_ref(), report) {
            Ok(count) => {
                self.history_dirty = true;
                self.tr.fmt(HISTORY_SAVED, &[("count", count.to_string())])
            }
            Err(err) => {
                tracing::error!(%err, "failed to append history");
                format!("{}: {err}", self.tr.t(ERROR_PREFIX))
            }
        });
    }

    fn calculate_resistive(&mut self) {
        let result = match self.res_type {
            CurrentType::Dc => DcReport::run(DcInput {
                voltage: self.res_voltage,
                current: self.res_current,
                hours: self.res_hours,
            })
            .map(ResistiveReport::Dc),
            CurrentType::Ac => AcReport::run(AcInput {
                voltage: self.res_voltage,
                current: self.res_current,
                power_factor: self.res_pf,
                hours: self.res_hours,
            })
            .map(ResistiveReport::Ac),
        };
        match result {
            Ok(report) => {
                match &report {
                    ResistiveReport::Dc(r) => self.record(r),
                    ResistiveReport::Ac(r) => self.record(r),
                }
                self.res_report = Some(report);
                self.res_error = None;
            }
            Err(err) => {
                self.res_report = None;
                self.res_error = Some(err);
            }
        }
    }

    fn calculate_capacitive(&mut self) {
        let input = match self.cap_type {
            CurrentType::Dc => CapacitorInput::Dc {
                voltage: self.cap_voltage,
                capacitance: self.cap_capacitance,
            },
            CurrentType::Ac => CapacitorInput::Ac {
                voltage: self.cap_voltage,
                frequency: self.cap_frequency,
                capacitance: self.cap_capacitance,
            },
        };
        match CapacitorReport::run(input) {
            Ok(report) => {
                self.record(&report);
                self.cap_report = Some(report);
                self.cap_error = None;
            }
            Err(err) => {
                self.cap_report = None;
                self.cap_error = Some(err);
            }
        }
    }

    fn calculate_three_phase(&mut self) {
        let input = ThreePhaseInput {
            connection: self.tp_connection,
            line_voltage: self.tp_line_voltage,
            line_current: self.tp_line_current,
            power_factor: self.tp_pf,
            phase_currents: self.tp_currents,
        };
        match ThreePhaseReport::run(input) {
            Ok(report) => {
                self.record(&report);
                self.tp_report = Some(report);
                self.tp_error = None;
            }
            Err(err) => {
                self.tp_report = None;
                self.tp_error = Some(err);
            }
        }
    }

    fn reload_history(&mut self) {
        match self.store.load() {
            Ok(records) => {
                self.history_records = records;
                self.history_status = None;
            }
            Err(err) => {
                tracing::error!(%err, "failed to load history");
                self.history_status = Some(format!("{}: {err}", self.tr.t(ERROR_PREFIX)));
            }
        }
        self.history_dirty = false;
    }

    fn apply_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        self.config.decimals = self.decimals_input;
        self.config.save_history = self.save_history_input;
        let path = self.history_path_input.trim();
        if !path.is_empty() {
            self.config.history_path = PathBuf::from(path);
        }
        let lang = i18n::resolve_language(&self.config.language, None);
        self.tr = Translator::new_with_pack(&lang, self.config.locale_dir.as_deref());
        self.store = Box::new(CsvHistoryStore::new(&self.config.history_path));
        self.history_dirty = true;
        self.settings_status = Some(match self.config.save() {
            Ok(()) => self.tr.t(SETTINGS_SAVED).into_owned(),
            Err(err) => {
                tracing::error!(%err, "failed to save settings");
                format!("{}: {err}", self.tr.t(ERROR_PREFIX))
            }
        });
    }

    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str| tr.t(key).into_owned();
        ui.style_mut().wrap = Some(false);
        ui.vertical_centered(|ui| {
            ui.heading(txt(APP_TITLE));
            ui.add_space(8.0);
        });
        for (tab, label) in [
            (Tab::Resistive, txt(GUI_TAB_RESISTIVE)),
            (Tab::Capacitive, txt(GUI_TAB_CAPACITIVE)),
            (Tab::ThreePhase, txt(GUI_TAB_THREE_PHASE)),
            (Tab::History, txt(GUI_TAB_HISTORY)),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    fn ui_resistive(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str| tr.t(key).into_owned();
        ui.heading(txt(GUI_TAB_RESISTIVE));
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(txt(GUI_CURRENT_TYPE));
                ui.selectable_value(&mut self.res_type, CurrentType::Dc, "DC");
                ui.selectable_value(&mut self.res_type, CurrentType::Ac, "AC");
            });
            egui::Grid::new("resistive_inputs")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    number_row(ui, &txt(INPUT_VOLTAGE), &mut self.res_voltage, 1.0);
                    number_row(ui, &txt(INPUT_CURRENT), &mut self.res_current, 0.1);
                    if self.res_type == CurrentType::Ac {
                        number_row(ui, &txt(INPUT_POWER_FACTOR), &mut self.res_pf, 0.01);
                    }
                    number_row(ui, &txt(INPUT_HOURS), &mut self.res_hours, 0.5);
                });
            ui.add_space(8.0);
            if ui.button(txt(GUI_CALCULATE)).clicked() {
                self.calculate_resistive();
            }
        });

        if let Some(err) = self.res_error {
            error_label(ui, &tr, err);
        }
        let decimals = self.decimals();
        match &self.res_report {
            Some(ResistiveReport::Dc(report)) => {
                section(ui, &txt(SECTION_RESULTS));
                result_grid(ui, "dc_results", &tr, &report.rows(), decimals);
                status_label(ui, self.save_status.as_deref());
                let bars = charts::dc_bars(
                    report.input.voltage,
                    report.input.current,
                    report.result.resistance,
                );
                bar_plot(ui, "dc_chart", &txt(GUI_CHART_DC), &bars, &tr);
            }
            Some(ResistiveReport::Ac(report)) => {
                section(ui, &txt(SECTION_RESULTS));
                result_grid(ui, "ac_results", &tr, &report.rows(), decimals);
                status_label(ui, self.save_status.as_deref());
                ui.columns(2, |cols| {
                    power_triangle_plot(
                        &mut cols[0],
                        &txt(GUI_CHART_POWER_TRIANGLE),
                        report.powers.active,
                        report.powers.reactive,
                    );
                    let shares = charts::power_distribution(report.powers.active, report.powers.reactive);
                    bar_plot(&mut cols[1], "power_share", &txt(GUI_CHART_POWER_SHARE), &shares, &tr);
                });
            }
            None => {}
        }
    }

    fn ui_capacitive(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str| tr.t(key).into_owned();
        ui.heading(txt(GUI_TAB_CAPACITIVE));
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(txt(GUI_CURRENT_TYPE));
                ui.selectable_value(&mut self.cap_type, CurrentType::Dc, "DC");
                ui.selectable_value(&mut self.cap_type, CurrentType::Ac, "AC");
            });
            egui::Grid::new("capacitive_inputs")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    number_row(ui, &txt(INPUT_VOLTAGE), &mut self.cap_voltage, 1.0);
                    ui.label(txt(INPUT_CAPACITANCE));
                    ui.add(
                        egui::DragValue::new(&mut self.cap_capacitance)
                            .speed(1e-6)
                            .max_decimals(9),
                    );
                    ui.end_row();
                    if self.cap_type == CurrentType::Ac {
                        number_row(ui, &txt(INPUT_FREQUENCY), &mut self.cap_frequency, 1.0);
                    }
                });
            ui.add_space(8.0);
            if ui.button(txt(GUI_CALCULATE)).clicked() {
                self.calculate_capacitive();
            }
        });

        if let Some(err) = self.cap_error {
            error_label(ui, &tr, err);
        }
        if let Some(report) = &self.cap_report {
            section(ui, &txt(SECTION_RESULTS));
            result_grid(ui, "cap_results", &tr, &report.rows(), self.decimals());
            status_label(ui, self.save_status.as_deref());
            let bars = charts::capacitor_bars(report);
            bar_plot(ui, "cap_chart", &txt(GUI_CHART_CAPACITOR), &bars, &tr);
        }
    }

    fn ui_three_phase(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str| tr.t(key).into_owned();
        ui.heading(txt(GUI_TAB_THREE_PHASE));
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                for conn in Connection::ALL {
                    ui.selectable_value(&mut self.tp_connection, conn, txt(conn.label_key()));
                }
            });
            egui::Grid::new("three_phase_inputs")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    number_row(ui, &txt(INPUT_LINE_VOLTAGE), &mut self.tp_line_voltage, 1.0);
                    number_row(ui, &txt(INPUT_LINE_CURRENT), &mut self.tp_line_current, 0.1);
                    number_row(ui, &txt(INPUT_POWER_FACTOR), &mut self.tp_pf, 0.01);
                    let [ir, is, it] = &mut self.tp_currents;
                    number_row(ui, &txt(INPUT_CURRENT_R), ir, 0.1);
                    number_row(ui, &txt(INPUT_CURRENT_S), is, 0.1);
                    number_row(ui, &txt(INPUT_CURRENT_T), it, 0.1);
                });
            ui.add_space(8.0);
            if ui.button(txt(GUI_CALCULATE)).clicked() {
                self.calculate_three_phase();
            }
        });

        if let Some(err) = self.tp_error {
            error_label(ui, &tr, err);
        }
        let Some(report) = &self.tp_report else {
            return;
        };
        let decimals = self.decimals();
        status_label(ui, self.save_status.as_deref());

        ui.columns(2, |cols| {
            section(&mut cols[0], &txt(SECTION_PER_PHASE));
            result_grid(&mut cols[0], "tp_phase", &tr, &report.phase_rows(), decimals);
            section(&mut cols[1], &txt(SECTION_TOTALS));
            result_grid(&mut cols[1], "tp_totals", &tr, &report.total_rows(), decimals);
        });

        ui.columns(2, |cols| {
            power_triangle_plot(
                &mut cols[0],
                &txt(GUI_CHART_POWER_TRIANGLE),
                report.system.total_active_power,
                report.system.total_reactive_power,
            );
            phasor_plot(&mut cols[1], &txt(GUI_CHART_PHASOR), report.system.phase_voltage);
        });

        section(ui, &txt(SECTION_IMBALANCE));
        result_grid(ui, "tp_imbalance", &tr, &report.imbalance_rows(), decimals);
        ui.label(txt(ImbalanceLevel::classify(report.imbalance.imbalance_percent).label_key()));
        imbalance_plot(ui, &txt(GUI_CHART_IMBALANCE), report.input.phase_currents, &tr);

        section(ui, &txt(SECTION_EFFICIENCY));
        result_grid(ui, "tp_efficiency", &tr, &report.efficiency_rows(), decimals);
        ui.label(format!(
            "{}: {}",
            txt(EFFICIENCY_CATEGORY),
            txt(report.efficiency.category.label_key())
        ));
        if !report.efficiency.recommendations.is_empty() {
            ui.strong(txt(SECTION_RECOMMENDATIONS));
            for rec in &report.efficiency.recommendations {
                ui.label(format!("• {}", txt(rec.label_key())));
            }
        }

        section(ui, &txt(SECTION_QUALITY));
        result_grid(ui, "tp_quality", &tr, &report.quality_rows(), decimals);
        ui.strong(txt(QualityRating::from_score(report.quality.score).label_key()));
        for finding in &report.quality.findings {
            ui.label(format!("• {}: {}", txt(finding.label_key()), finding.value_text()));
        }
    }

    fn ui_history(&mut self, ui: &mut egui::Ui) {
        if self.history_dirty {
            self.reload_history();
        }
        let tr = self.tr.clone();
        let txt = |key: &str| tr.t(key).into_owned();
        ui.heading(txt(HISTORY_HEADING));
        ui.small(self.store_label());
        ui.add_space(8.0);

        ui.label(txt(HISTORY_FILTER));
        ui.horizontal_wrapped(|ui| {
            for kind in CircuitKind::ALL {
                let mut on = self.history_filter.contains(&kind);
                if ui.checkbox(&mut on, txt(kind.label_key())).changed() {
                    if on {
                        self.history_filter.push(kind);
                    } else {
                        self.history_filter.retain(|k| *k != kind);
                    }
                }
            }
        });
        if let Some(msg) = &self.history_status {
            ui.label(msg);
        }

        let decimals = self.decimals();
        let selected = history::filter_records(&self.history_records, &self.history_filter);
        if selected.is_empty() {
            ui.label(txt(HISTORY_EMPTY));
            return;
        }

        let summary = HistorySummary::from_records(selected.iter().copied());
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(format!("{} {}", txt(HISTORY_TOTAL), summary.total));
            if let (Some(first), Some(last)) = (summary.first, summary.last) {
                ui.label(format!(
                    "{} {} ~ {}",
                    txt(HISTORY_RANGE),
                    first.format(TIMESTAMP_FORMAT),
                    last.format(TIMESTAMP_FORMAT)
                ));
            }
            ui.label(txt(HISTORY_BY_CIRCUIT));
            for (kind, count) in &summary.by_circuit {
                ui.label(format!("  {}: {count}", txt(kind.label_key())));
            }
        });

        let mut export_msg = None;
        if ui.button(txt(HISTORY_EXPORT)).clicked() {
            if let Some(path) = FileDialog::new()
                .add_filter("CSV", &["csv"])
                .set_file_name("history_export.csv")
                .save_file()
            {
                export_msg = Some(match history::export_csv(&selected, &path) {
                    Ok(()) => tr.fmt(
                        HISTORY_EXPORTED,
                        &[
                            ("count", selected.len().to_string()),
                            ("path", path.display().to_string()),
                        ],
                    ),
                    Err(err) => {
                        tracing::error!(%err, "history export failed");
                        format!("{}: {err}", txt(ERROR_PREFIX))
                    }
                });
            }
        }

        let columns = history::columns(selected.iter().copied());
        egui::ScrollArea::horizontal().show(ui, |ui| {
            egui::Grid::new("history_table")
                .striped(true)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for col in &columns {
                        let header = match col.as_str() {
                            CIRCUIT_COLUMN => txt(HISTORY_CIRCUIT),
                            TIMESTAMP_COLUMN => txt(HISTORY_TIMESTAMP),
                            other => other.to_string(),
                        };
                        ui.strong(header);
                    }
                    ui.end_row();
                    for record in &selected {
                        for col in &columns {
                            ui.label(history_cell(&tr, record, col, decimals));
                        }
                        ui.end_row();
                    }
                });
        });

        if export_msg.is_some() {
            self.history_status = export_msg;
        }
    }

    fn store_label(&self) -> String {
        format!("{}: {}", self.tr.t(SETTINGS_HISTORY_PATH), self.config.history_path.display())
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let tr = self.tr.clone();
        let txt = move |key: &str| tr.t(key).into_owned();

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt(APP_TITLE));
                ui.separator();
                if ui.button(txt(GUI_SETTINGS)).clicked() {
                    self.show_settings_modal = true;
                }
            });
        });

        // 설정 모달
        if self.show_settings_modal {
            let mut save_requested = false;
            egui::Window::new(txt(GUI_SETTINGS))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_settings_modal)
                .show(ctx, |ui| {
                    egui::Grid::new("settings_grid")
                        .num_columns(2)
                        .spacing([12.0, 8.0])
                        .show(ui, |ui| {
                            ui.label(txt(SETTINGS_LANGUAGE));
                            egui::ComboBox::from_id_source("lang_choice")
                                .selected_text(self.lang_input.clone())
                                .show_ui(ui, |ui| {
                                    ui.selectable_value(&mut self.lang_input, "auto".into(), "auto");
                                    for lang in Language::ALL {
                                        ui.selectable_value(
                                            &mut self.lang_input,
                                            lang.as_code().to_string(),
                                            lang.native_name(),
                                        );
                                    }
                                });
                            ui.end_row();

                            ui.label(txt(SETTINGS_DECIMALS));
                            ui.add(egui::DragValue::new(&mut self.decimals_input).clamp_range(0..=9));
                            ui.end_row();

                            ui.label(txt(SETTINGS_HISTORY_PATH));
                            ui.text_edit_singleline(&mut self.history_path_input);
                            ui.end_row();

                            ui.label(txt(SETTINGS_SAVE_HISTORY));
                            ui.checkbox(&mut self.save_history_input, "");
                            ui.end_row();
                        });
                    if ui.button(txt(GUI_SAVE)).clicked() {
                        save_requested = true;
                    }
                    if let Some(msg) = &self.settings_status {
                        ui.label(msg);
                    }
                });
            if save_requested {
                self.apply_settings();
            }
        }

        // 좌측 네비 + 본문
        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(180.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::Resistive => self.ui_resistive(ui),
                    Tab::Capacitive => self.ui_capacitive(ui),
                    Tab::ThreePhase => self.ui_three_phase(ui),
                    Tab::History => self.ui_history(ui),
                });
        });
    }
}

fn number_row(ui: &mut egui::Ui, label: &str, value: &mut f64, speed: f64) {
    ui.label(label);
    ui.add(egui::DragValue::new(value).speed(speed).max_decimals(4));
    ui.end_row();
}

fn section(ui: &mut egui::Ui, title: &str) {
    ui.add_space(10.0);
    ui.separator();
    ui.heading(title);
}

fn error_label(ui: &mut egui::Ui, tr: &Translator, err: InputError) {
    ui.colored_label(
        ui.visuals().error_fg_color,
        format!("{}: {}", tr.t(ERROR_PREFIX), tr.t(err.message_key())),
    );
}

fn status_label(ui: &mut egui::Ui, status: Option<&str>) {
    if let Some(msg) = status {
        ui.small(msg);
    }
}

fn result_grid(ui: &mut egui::Ui, id: &str, tr: &Translator, rows: &[ResultRow], decimals: usize) {
    egui::Grid::new(id)
        .num_columns(2)
        .striped(true)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            for row in rows {
                ui.label(tr.t(row.label_key).into_owned());
                ui.strong(row.quantity.format(decimals));
                ui.end_row();
            }
        });
}

fn history_cell(tr: &Translator, record: &HistoryRecord, column: &str, decimals: usize) -> String {
    match column {
        CIRCUIT_COLUMN => tr.t(record.circuit.label_key()).into_owned(),
        TIMESTAMP_COLUMN => record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        other => match record.get(other) {
            Some(value) => match value.as_number() {
                Some(n) => format!("{n:.decimals$}"),
                None => value.to_string(),
            },
            None => String::new(),
        },
    }
}

fn bar_plot(ui: &mut egui::Ui, id: &str, title: &str, bars: &[BarValue], tr: &Translator) {
    ui.label(title);
    let bars: Vec<Bar> = bars
        .iter()
        .enumerate()
        .map(|(i, b)| {
            Bar::new(i as f64, b.value)
                .name(tr.t(b.label_key))
                .width(0.6)
        })
        .collect();
    Plot::new(id)
        .height(220.0)
        .allow_drag(false)
        .allow_zoom(false)
        .include_y(0.0)
        .show(ui, |plot_ui| plot_ui.bar_chart(BarChart::new(bars)));
}

fn power_triangle_plot(ui: &mut egui::Ui, title: &str, active: f64, reactive: f64) {
    let tri = charts::power_triangle(active, reactive);
    ui.label(title);
    Plot::new("power_triangle")
        .height(240.0)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(PlotPoints::from(tri.outline.clone())).name("P / Q"));
            plot_ui.line(
                Line::new(PlotPoints::from(tri.hypotenuse.to_vec()))
                    .style(LineStyle::Dashed { length: 8.0 })
                    .name(format!("S = {:.2} VA, φ = {:.1}°", tri.apparent, tri.angle_deg)),
            );
        });
}

fn phasor_plot(ui: &mut egui::Ui, title: &str, phase_voltage: f64) {
    let colors = [
        egui::Color32::from_rgb(220, 50, 50),
        egui::Color32::from_rgb(40, 170, 60),
        egui::Color32::from_rgb(50, 90, 220),
    ];
    ui.label(title);
    Plot::new("phasor_diagram")
        .height(240.0)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for (phasor, color) in charts::phasor_diagram(phase_voltage).into_iter().zip(colors) {
                plot_ui.arrows(
                    Arrows::new(vec![[0.0, 0.0]], vec![phasor.tip])
                        .color(color)
                        .name(format!("{} ({:.0}°)", phasor.phase, phasor.angle_deg)),
                );
            }
        });
}

fn imbalance_plot(ui: &mut egui::Ui, title: &str, currents: [f64; 3], tr: &Translator) {
    let series = charts::imbalance_bars(currents);
    ui.label(title);
    let bars: Vec<Bar> = series
        .bars
        .iter()
        .enumerate()
        .map(|(i, b)| Bar::new(i as f64, b.value).name(tr.t(b.label_key)).width(0.6))
        .collect();
    Plot::new("imbalance_chart")
        .height(220.0)
        .legend(Legend::default())
        .allow_drag(false)
        .allow_zoom(false)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
            plot_ui.hline(
                HLine::new(series.average)
                    .style(LineStyle::Dashed { length: 6.0 })
                    .name(tr.t(RESULT_AVERAGE_CURRENT)),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use electrical_toolbox::history::MemoryHistoryStore;

    fn app() -> GuiApp {
        let mut app = GuiApp::new(config::Config::default(), "en");
        app.store = Box::new(MemoryHistoryStore::new());
        app
    }

    #[test]
    fn three_phase_calculation_is_recorded() {
        let mut app = app();
        app.calculate_three_phase();
        assert!(app.tp_error.is_none());
        let report = app.tp_report.as_ref().unwrap();
        assert!((report.system.phase_voltage - 219.393).abs() < 1e-2);
        assert_eq!(app.store.load().unwrap().len(), 1);
        assert!(app.history_dirty);
        assert!(app.save_status.as_deref().unwrap_or_default().contains('1'));
    }

    #[test]
    fn invalid_input_keeps_error_and_skips_history() {
        let mut app = app();
        app.res_voltage = -5.0;
        app.calculate_resistive();
        assert_eq!(app.res_error, Some(InputError::NonPositiveVoltage));
        assert!(app.res_report.is_none());
        assert!(app.store.load().unwrap().is_empty());
    }

    #[test]
    fn capacitor_ac_uses_frequency_input() {
        let mut app = app();
        app.cap_type = CurrentType::Ac;
        app.cap_frequency = 50.0;
        app.calculate_capacitive();
        match app.cap_report {
            Some(CapacitorReport::Ac { frequency, .. }) => assert_eq!(frequency, 50.0),
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[test]
    fn disabled_history_is_not_written() {
        let mut app = app();
        app.config.save_history = false;
        app.calculate_resistive();
        assert!(app.res_report.is_some());
        assert!(app.store.load().unwrap().is_empty());
    }
}
