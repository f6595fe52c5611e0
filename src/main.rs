use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use electrical_toolbox::app::{self, AppError, Session};
use electrical_toolbox::circuits::Connection;
use electrical_toolbox::config;
use electrical_toolbox::history::CircuitKind;
use electrical_toolbox::i18n::{self, keys, Translator};
use electrical_toolbox::reports::{
    AcInput, AcReport, CapacitorInput, CapacitorReport, DcInput, DcReport, ThreePhaseInput,
    ThreePhaseReport,
};
use electrical_toolbox::ui_cli;
use tracing_subscriber::EnvFilter;

/// Electrical circuit calculator (DC, AC, capacitors, three-phase)
#[derive(Parser)]
#[command(name = "electrical_toolbox_cli", version)]
struct Cli {
    /// UI language: auto, en, es, ko
    #[arg(long, global = true, default_value = "auto")]
    lang: String,

    /// History CSV file (overrides config.toml for this run)
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    /// Do not append results to the history file
    #[arg(long, global = true)]
    no_save: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Resistive DC circuit
    Dc {
        #[arg(long, allow_negative_numbers = true)]
        voltage: f64,
        #[arg(long, allow_negative_numbers = true)]
        current: f64,
        /// Operating hours for the consumption estimate
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        hours: f64,
    },
    /// Resistive single-phase AC circuit
    Ac {
        #[arg(long, allow_negative_numbers = true)]
        voltage: f64,
        #[arg(long, allow_negative_numbers = true)]
        current: f64,
        #[arg(long = "pf", allow_negative_numbers = true)]
        power_factor: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        hours: f64,
    },
    /// Capacitor charge/energy (dc) or reactance (ac)
    #[command(subcommand)]
    Capacitor(CapacitorCommand),
    /// Balanced three-phase system with imbalance/efficiency/quality analysis
    ThreePhase {
        /// star (Y) or delta (D)
        #[arg(long, default_value = "star", value_parser = parse_connection)]
        connection: Connection,
        #[arg(long, allow_negative_numbers = true)]
        line_voltage: f64,
        #[arg(long, allow_negative_numbers = true)]
        line_current: f64,
        #[arg(long = "pf", allow_negative_numbers = true)]
        power_factor: f64,
        #[arg(long, allow_negative_numbers = true)]
        current_r: f64,
        #[arg(long, allow_negative_numbers = true)]
        current_s: f64,
        #[arg(long, allow_negative_numbers = true)]
        current_t: f64,
    },
    /// Show saved calculations
    History {
        /// Only show these circuit types (dc, ac, capacitor_dc, capacitor_ac, three_phase)
        #[arg(long, value_parser = parse_circuit)]
        circuit: Vec<CircuitKind>,
    },
}

#[derive(Subcommand)]
enum CapacitorCommand {
    Dc {
        #[arg(long, allow_negative_numbers = true)]
        voltage: f64,
        /// Capacitance [F]
        #[arg(long, allow_negative_numbers = true)]
        capacitance: f64,
    },
    Ac {
        #[arg(long, allow_negative_numbers = true)]
        voltage: f64,
        /// Frequency [Hz]; defaults to default_frequency_hz in config.toml
        #[arg(long, allow_negative_numbers = true)]
        frequency: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        capacitance: f64,
    },
}

fn parse_connection(s: &str) -> Result<Connection, String> {
    Connection::from_code(s).ok_or_else(|| format!("unknown connection: {s}"))
}

fn parse_circuit(s: &str) -> Result<CircuitKind, String> {
    CircuitKind::from_code(s).ok_or_else(|| format!("unknown circuit type: {s}"))
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령 또는 대화형 메뉴를 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::warn!(%err, "falling back to default settings");
            config::Config::default()
        }
    };
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, cfg.locale_dir.as_deref());
    let mut session = Session::new(cfg, tr);
    session.set_history_override(cli.history);
    session.no_save = cli.no_save;

    match try_run(&mut session, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "command failed");
            let message = match &err {
                AppError::Input(e) => session.translator.t(e.message_key()).into_owned(),
                other => other.to_string(),
            };
            eprintln!("{}: {message}", session.translator.t(keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

fn try_run(session: &mut Session, command: Option<Command>) -> Result<(), AppError> {
    let Some(command) = command else {
        return app::run(session);
    };
    match command {
        Command::Dc {
            voltage,
            current,
            hours,
        } => {
            let report = DcReport::run(DcInput {
                voltage,
                current,
                hours,
            })?;
            ui_cli::show_report(session, &report)
        }
        Command::Ac {
            voltage,
            current,
            power_factor,
            hours,
        } => {
            let report = AcReport::run(AcInput {
                voltage,
                current,
                power_factor,
                hours,
            })?;
            ui_cli::show_report(session, &report)
        }
        Command::Capacitor(CapacitorCommand::Dc {
            voltage,
            capacitance,
        }) => {
            let report = CapacitorReport::run(CapacitorInput::Dc {
                voltage,
                capacitance,
            })?;
            ui_cli::show_report(session, &report)
        }
        Command::Capacitor(CapacitorCommand::Ac {
            voltage,
            frequency,
            capacitance,
        }) => {
            let report = CapacitorReport::run(CapacitorInput::Ac {
                voltage,
                frequency: frequency.unwrap_or(session.config.default_frequency_hz),
                capacitance,
            })?;
            ui_cli::show_report(session, &report)
        }
        Command::ThreePhase {
            connection,
            line_voltage,
            line_current,
            power_factor,
            current_r,
            current_s,
            current_t,
        } => {
            let report = ThreePhaseReport::run(ThreePhaseInput {
                connection,
                line_voltage,
                line_current,
                power_factor,
                phase_currents: [current_r, current_s, current_t],
            })?;
            ui_cli::print_three_phase(
                &session.translator,
                &report,
                session.config.display_decimals(),
            );
            ui_cli::save_report(session, &report)
        }
        Command::History { circuit } => ui_cli::print_history(session, &circuit),
    }
}
